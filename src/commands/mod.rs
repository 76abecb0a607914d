pub mod collections;
pub mod cover;
pub mod help;
pub mod insight;
pub mod login;
pub mod logout;
pub mod result;
pub mod status;
pub mod thumbnail;
pub mod videos;

pub use result::CommandResult;

use anyhow::{Context, Result};
use museai::api::{ApiResponse, MuseClient};
use museai::config::UserConfig;
use result::RecordResult;

/// ユーザー設定を読み込み、APIキー付きのクライアントを作成する
pub(crate) fn load_client() -> Result<(MuseClient, UserConfig)> {
    let user_config = UserConfig::load()
        .context("Failed to load user configuration. Please check your config.toml file.")?;

    let client_config = user_config
        .client_config()
        .context("API key not found. Please run 'museai login' first.")?;

    let client = MuseClient::new(client_config).context("Failed to create API client")?;

    Ok((client, user_config))
}

/// 単一リソースのレスポンスを RecordResult に変換
///
/// 失敗は InfraError の分類を保ったまま伝播する。
pub(crate) fn into_record(
    response: ApiResponse,
    operation: &str,
    id: &str,
    label: String,
) -> Result<CommandResult> {
    let data = response
        .into_result()
        .with_context(|| format!("muse.ai returned an error for {}", operation))?;

    Ok(CommandResult::Record(RecordResult {
        operation: operation.to_string(),
        id: id.to_string(),
        label,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use museai::api::InfraError;
    use serde_json::json;

    #[test]
    fn test_into_record_wraps_success() {
        let result = into_record(
            ApiResponse::Success(json!({ "fid": "f1" })),
            "delete_video",
            "f1",
            "Deleted video f1".to_string(),
        )
        .unwrap();

        match result {
            CommandResult::Record(record) => {
                assert_eq!(record.operation, "delete_video");
                assert_eq!(record.data["fid"], "f1");
            }
            other => panic!("Expected Record, got {:?}", other),
        }
    }

    #[test]
    fn test_into_record_keeps_transport_error_kind() {
        let err = into_record(
            ApiResponse::Failure(InfraError::network("Connection failed for GET files/videos")),
            "get_video",
            "sv1",
            "Video sv1".to_string(),
        )
        .unwrap_err();

        let infra = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<InfraError>())
            .expect("InfraError should be in the chain");
        assert!(matches!(infra, InfraError::Network { .. }));
        assert_eq!(
            infra.hint(),
            Some("Check your network connection and try again.")
        );
    }
}
