/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\museai\config.toml
/// macOS:   /Users/<User>/Library/Application Support/museai/config.toml
/// Linux:   /home/<user>/.config/museai/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::api::auth::ApiKey;
use crate::api::client::ClientConfig;
use crate::config::error::ConfigError;
use crate::config::permissions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 保存済みキーより優先される環境変数
pub const API_KEY_ENV: &str = "MUSEAI_API_KEY";

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの範囲（±18時間）
const MAX_TIMEZONE_OFFSET: i32 = 64800;
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// 認証設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// muse.ai API キー
    pub api_key: String,
}

/// ユーザー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub auth: Option<AuthConfig>,

    /// 一覧表示の日時に使うタイムゾーンオフセット(秒単位)
    /// 例: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_seconds: i32,
}

fn default_timezone_offset() -> i32 {
    DEFAULT_TIMEZONE_OFFSET
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            auth: None,
            timezone_offset_seconds: DEFAULT_TIMEZONE_OFFSET,
        }
    }
}

impl UserConfig {
    /// ユーザー設定ファイルのパス
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("museai").join("config.toml"))
    }

    /// 既定の場所からユーザー設定を読み込む
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスからユーザー設定を読み込む
    ///
    /// ファイルが無ければデフォルトテンプレートを作成します。
    /// 読み込み後に検証を行います（Fail Fast）。
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to create default config file: {}",
                    config_path.display()
                ),
                e,
            )
        })
    }

    fn ensure_parent_dir(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn default_toml_content() -> String {
        format!(
            r#"# muse.ai CLI - User Configuration
# The API key is set with 'museai login' (or the {} environment variable)

# Timezone offset in seconds used when displaying dates
# Examples: UTC=0, JST(UTC+9)=32400, PST(UTC-8)=-28800
timezone_offset_seconds = {}
"#,
            API_KEY_ENV, DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// 既定の場所に保存
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定パスに保存し、所有者のみ読み書き可能にする
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent_dir(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - auth.api_key: 空文字列でないこと
    /// - timezone_offset_seconds: ±18時間以内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(auth) = &self.auth
            && auth.api_key.trim().is_empty()
        {
            return Err(ConfigError::validation_error(
                "Stored API key cannot be empty. Please run 'museai login' again.",
            ));
        }

        let offset = self.timezone_offset_seconds;
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }

        Ok(())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.auth = Some(AuthConfig { api_key });
    }

    pub fn has_auth(&self) -> bool {
        self.auth.is_some()
    }

    pub fn clear_auth(&mut self) {
        self.auth = None;
    }

    /// 使用するAPIキー（環境変数 MUSEAI_API_KEY が優先）
    ///
    /// # Errors
    /// どちらにもキーが無い場合に ConfigError::ApiKeyNotFound を返します。
    pub fn api_key(&self) -> Result<ApiKey, ConfigError> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Result<ApiKey, ConfigError> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.auth.as_ref().map(|auth| auth.api_key.clone()))
            .map(ApiKey::new)
            .ok_or_else(|| {
                ConfigError::api_key_not_found(
                    "No API key configured. Please run 'museai login' first.",
                )
            })
    }

    /// APIキーを載せたクライアント設定
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let key = self.api_key()?;
        Ok(ClientConfig::new(key.expose()))
    }
}
