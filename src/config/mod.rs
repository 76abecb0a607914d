/// 設定管理モジュール
///
/// 2層の設定構造:
/// 1. AppConfig - コンパイル時定数（APP_CONFIG）。エンドポイント、タイムアウト、受け付ける拡張子など
/// 2. UserConfig - 実行時にユーザーディレクトリから読み込む設定。APIキーと表示用タイムゾーン
///
/// # 使用例
///
/// ```no_run
/// use museai::config::{APP_CONFIG, UserConfig};
/// use museai::api::MuseClient;
///
/// # fn main() -> anyhow::Result<()> {
/// let endpoint = APP_CONFIG.api.endpoint;
/// let user_config = UserConfig::load()?;
/// let client = MuseClient::new(user_config.client_config()?)?;
/// # Ok(())
/// # }
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::{APP_CONFIG, BYTES_PER_MB};
pub use user::UserConfig;
