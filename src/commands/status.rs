/// ステータスコマンド
///
/// 現在のAPIキーで muse.ai にアクセスできるかを確認します。
use crate::commands::result::{CommandResult, StatusResult};
use anyhow::{Context, Result};
use museai::config::UserConfig;
use museai::config::error::ConfigError;

pub async fn execute() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let api_key = match config.api_key() {
        Ok(key) => key,
        Err(ConfigError::ApiKeyNotFound { .. }) => {
            return Ok(CommandResult::Status(StatusResult {
                is_authenticated: false,
                api_key: None,
                error: None,
            }));
        }
        Err(e) => return Err(e).context("Failed to resolve API key"),
    };

    let result = match api_key.verify().await {
        Ok(()) => StatusResult {
            is_authenticated: true,
            api_key: Some(api_key.masked()),
            error: None,
        },
        Err(e) => StatusResult {
            is_authenticated: false,
            api_key: Some(api_key.masked()),
            error: Some(e.to_string()),
        },
    };

    Ok(CommandResult::Status(result))
}
