/// API層のエラー定義
///
/// muse.ai との通信で起きる失敗を分類する。
/// クライアントの公開メソッドはこれを `ApiResponse::Failure` に包んで返す。
/// 分類は保持されるので、CLI 層は種類ごとの終了コードとヒントを出せる。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfraError {
    /// 接続失敗などの通信エラー
    #[error("network error: {message}")]
    Network { message: String },

    /// タイムアウト
    #[error("operation timed out: {operation}")]
    Timeout { operation: String },

    /// JSONとして解釈できないレスポンスボディ
    ///
    /// `body` は生のボディをJSON文字列としてエスケープしたもの。
    #[error("Unknown response: {body}")]
    UnknownResponse { body: String },

    /// muse.ai がボディの `error` フィールドで返したエラー
    #[error("{message}")]
    Api { endpoint: String, message: String },

    /// アップロードするファイルを開けなかった
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl InfraError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// 生のレスポンスボディから UnknownResponse を作る
    pub fn unknown_response(raw_body: &str) -> Self {
        let body = serde_json::to_string(raw_body).unwrap_or_else(|_| raw_body.to_string());
        Self::UnknownResponse { body }
    }

    pub fn api(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// reqwest のエラーを分類して変換
    pub fn from_transport(error: &reqwest::Error, method: &str, endpoint: &str) -> Self {
        if error.is_timeout() {
            Self::timeout(format!("{} {}", method, endpoint))
        } else if error.is_connect() {
            Self::network(format!(
                "Connection failed for {} {}: {}",
                method, endpoint, error
            ))
        } else {
            Self::network(format!("Request failed for {} {}: {}", method, endpoint, error))
        }
    }

    /// エラーの深刻度
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::SystemError
    }

    /// ユーザー向けヒント
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Network { .. } => Some("Check your network connection and try again."),
            Self::Timeout { .. } => {
                Some("The request took too long. Large uploads may need a faster connection.")
            }
            Self::UnknownResponse { .. } => {
                Some("muse.ai returned an unexpected response. The service may be unavailable.")
            }
            Self::Api { .. } => Some(
                "muse.ai rejected the request. Check the IDs you passed and that your API key is valid ('museai status').",
            ),
            Self::Io { .. } => {
                Some("The file could not be read while uploading. Check that it still exists.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_response_quotes_raw_body() {
        let err = InfraError::unknown_response("<html>Bad Gateway</html>");
        assert_eq!(
            err.to_string(),
            "Unknown response: \"<html>Bad Gateway</html>\""
        );
    }

    #[test]
    fn test_unknown_response_empty_body() {
        let err = InfraError::unknown_response("");
        assert_eq!(err.to_string(), "Unknown response: \"\"");
    }

    #[test]
    fn test_api_error_displays_vendor_message_only() {
        let err = InfraError::api("files/videos", "bad key");
        assert_eq!(err.to_string(), "bad key");
        assert_eq!(err.severity(), ErrorSeverity::SystemError);
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_hints_differ_by_kind() {
        let network = InfraError::network("Connection failed for GET files/videos");
        let vendor = InfraError::api("files/videos", "bad key");
        assert_ne!(network.hint(), vendor.hint());
        assert_eq!(
            network.hint(),
            Some("Check your network connection and try again.")
        );
    }
}
