/// ログインコマンド
///
/// APIキーを受け取り、muse.ai で有効か確認してから config.toml に保存します。
use crate::commands::result::{CommandResult, LoginResult};
use crate::presentation::input;
use anyhow::{Context, Result};
use museai::api::ApiKey;
use museai::config::UserConfig;

/// ログイン情報
pub struct LoginCredentials {
    pub api_key: String,
}

/// ログインコマンドを実行
///
/// # Arguments
/// * `from_stdin` - true の場合は標準入力の1行目をAPIキーとして読む
pub async fn execute(from_stdin: bool) -> Result<CommandResult> {
    let credentials = if from_stdin {
        input::read_api_key_from_stdin()?
    } else {
        input::read_api_key_interactive()?
    };

    let api_key = ApiKey::new(credentials.api_key);

    api_key
        .verify()
        .await
        .context("Authentication failed. Please verify that your API key is correct.")?;

    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let was_logged_in = config.has_auth();

    config.set_api_key(api_key.expose().to_string());
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        was_logged_in,
        api_key: api_key.masked(),
    }))
}
