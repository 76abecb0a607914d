/// ログアウトコマンド
///
/// 保存されているAPIキーを削除します。環境変数 MUSEAI_API_KEY には触れません。
use crate::commands::result::{CommandResult, LogoutResult};
use anyhow::{Context, Result};
use museai::config::UserConfig;

pub fn execute() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    if !config.has_auth() {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
        }));
    }

    config.clear_auth();
    config.save().context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
    }))
}
