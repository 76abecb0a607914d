/// 設定ファイルのパーミッション
///
/// config.toml にはAPIキーが平文で入るため、所有者のみ読み書きできるようにする。
///
/// Unix系 (Linux, macOS): 0600 (rw-------)
/// Windows: 既定のACLで現在のユーザーに限定されるため何もしない
use crate::config::error::ConfigError;
use std::path::Path;

/// APIキーを含むファイルのパーミッションを設定
///
/// # Errors
/// ファイルが存在しない、またはパーミッション設定に失敗した場合に ConfigError を返します。
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file_path, permissions).map_err(|e| {
            ConfigError::file_system(
                format!(
                    "Failed to set permissions (0600) for config file: {}",
                    file_path.display()
                ),
                e,
            )
        })
    }

    #[cfg(not(unix))]
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn test_restrict_to_owner_sets_0600() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("config.toml");
        fs::write(&file, "[auth]\napi_key = \"k\"\n").expect("Failed to write test file");

        restrict_to_owner(&file).expect("Failed to set permissions");

        let mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Expected 0600 permissions, got 0o{:o}", mode);
    }

    #[test]
    fn test_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = restrict_to_owner(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::FileSystem { .. })));
    }
}
