/// アプリケーション設定モジュール
///
/// コンパイル時定数として埋め込まれる静的設定を管理します。
/// 実行時には変更できません。クライアント単位で変えたい値は
/// `ClientConfig` のビルダーで上書きします。

/// 1MBのバイト数
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// アプリケーション全体の設定
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Copy)]
pub struct ApiConfig {
    /// muse.ai API のベースURL（末尾 `/` 付き）
    pub endpoint: &'static str,

    /// サムネイル配信用CDNのURL
    pub cdn_endpoint: &'static str,

    /// 接続確立のタイムアウト(ミリ秒)
    pub connect_timeout_ms: u64,

    /// リクエスト全体のタイムアウト(秒)
    pub timeout_seconds: u64,
}

/// アップロード関連の設定
#[derive(Debug, Clone, Copy)]
pub struct UploadConfig {
    /// 動画として受け付ける拡張子
    pub video_formats: &'static [&'static str],

    /// カバー画像として受け付ける拡張子
    pub image_formats: &'static [&'static str],
}

/// ロギング関連の設定
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// RUST_LOG 未指定時のフィルタ
    pub level: &'static str,
}

/// グローバルなアプリケーション設定
pub const APP_CONFIG: AppConfig = AppConfig {
    api: ApiConfig {
        endpoint: "https://muse.ai/api/",
        cdn_endpoint: "https://cdn.muse.ai",
        connect_timeout_ms: 500,
        timeout_seconds: 300,
    },
    upload: UploadConfig {
        video_formats: &[
            "avi", "mov", "mp4", "ogg", "wmv", "webm", "mkv", "3gp", "m4v", "mpeg", "mpg",
        ],
        image_formats: &["png", "jpeg", "jpg"],
    },
    logging: LoggingConfig { level: "warn" },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_values() {
        assert_eq!(APP_CONFIG.api.endpoint, "https://muse.ai/api/");
        assert!(APP_CONFIG.api.endpoint.ends_with('/'));
        assert_eq!(APP_CONFIG.api.connect_timeout_ms, 500);
        assert_eq!(APP_CONFIG.api.timeout_seconds, 300);
    }

    #[test]
    fn test_supported_formats() {
        assert!(APP_CONFIG.upload.video_formats.contains(&"mp4"));
        assert!(APP_CONFIG.upload.video_formats.contains(&"3gp"));
        assert!(APP_CONFIG.upload.image_formats.contains(&"png"));
        assert!(!APP_CONFIG.upload.image_formats.contains(&"gif"));
    }
}
