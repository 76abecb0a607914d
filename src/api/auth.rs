/// APIキー
///
/// muse.ai はリクエストごとに `Key` ヘッダーで生のAPIキーを受け取ります。
/// 署名やトークン更新は無いため、キー文字列をそのまま保持するだけです。
use crate::api::client::{ClientConfig, MuseClient};
use crate::api::error::InfraError;
use std::fmt;

/// APIキー（Debug出力ではマスクされる）
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// ヘッダーに載せる生の値
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// 先頭4文字と末尾4文字以外を伏せた表示用文字列
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            "*".repeat(chars.len())
        } else {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}***{}", head, tail)
        }
    }

    /// キーが muse.ai に受け入れられるか確認（`files/collections` を取得）
    pub async fn verify(&self) -> Result<(), InfraError> {
        let client = MuseClient::new(ClientConfig::new(self.0.clone()))?;
        client
            .list_collections()
            .await
            .into_result()
            .map(|_| ())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_long_key() {
        let key = ApiKey::new("abcdef123456789");
        let masked = key.masked();
        assert_eq!(masked, "abcd***6789");
        assert!(!masked.contains("ef12345"));
    }

    #[test]
    fn test_masked_short_key() {
        assert_eq!(ApiKey::new("short").masked(), "*****");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = ApiKey::new("super-secret-api-key");
        let debug = format!("{:?}", key);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("supe***-key"));
    }

    #[test]
    fn test_blank_key() {
        assert!(ApiKey::new("   ").is_blank());
        assert!(!ApiKey::new("k").is_blank());
    }
}
