/// ドメインサービス: アップロードファイルの検証
///
/// 受け付ける拡張子はAPP_CONFIGから取得します。
/// 検証はCLIがファイルを読み込む前に行い、APIクライアント自体は検証しません。
use crate::config::APP_CONFIG;
use crate::domain::error::DomainError;
use std::path::Path;

/// アップロードするファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// 動画本体
    Video,
    /// カバー画像
    CoverImage,
}

impl UploadKind {
    fn supported_formats(self) -> &'static [&'static str] {
        match self {
            Self::Video => APP_CONFIG.upload.video_formats,
            Self::CoverImage => APP_CONFIG.upload.image_formats,
        }
    }
}

/// ファイルの検証結果
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub path: String,
    pub size: u64,
    pub extension: String,
}

/// アップロード対象のファイルを検証する
///
/// # エラー
/// - ファイルが存在しない
/// - ディレクトリが指定された
/// - ファイルが空
/// - 対応していない拡張子
pub fn validate_upload_file(
    file_path: &str,
    kind: UploadKind,
) -> Result<ValidationResult, DomainError> {
    let path = Path::new(file_path);

    let metadata =
        std::fs::metadata(path).map_err(|_| DomainError::file_not_found(file_path))?;

    if metadata.is_dir() {
        return Err(DomainError::not_a_file(file_path));
    }

    let size = metadata.len();
    if size == 0 {
        return Err(DomainError::empty_file(file_path));
    }

    let supported_formats = kind.supported_formats();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .ok_or_else(|| DomainError::invalid_format(file_path, supported_formats, "no extension"))?;

    if !supported_formats.contains(&extension.as_str()) {
        return Err(DomainError::invalid_format(
            file_path,
            supported_formats,
            extension,
        ));
    }

    Ok(ValidationResult {
        path: file_path.to_string(),
        size,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_accepts_video_with_uppercase_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "holiday.MOV", b"data");

        let result = validate_upload_file(&path, UploadKind::Video).unwrap();
        assert_eq!(result.extension, "mov");
        assert_eq!(result.size, 4);
    }

    #[test]
    fn test_rejects_image_as_video() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "cover.png", b"png");

        let result = validate_upload_file(&path, UploadKind::Video);
        assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
        assert!(validate_upload_file(&path, UploadKind::CoverImage).is_ok());
    }

    #[test]
    fn test_rejects_missing_empty_and_directory() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("nope.mp4");
        assert!(matches!(
            validate_upload_file(&missing.to_string_lossy(), UploadKind::Video),
            Err(DomainError::FileNotFound { .. })
        ));

        let empty = write_file(&dir, "empty.mp4", b"");
        assert!(matches!(
            validate_upload_file(&empty, UploadKind::Video),
            Err(DomainError::EmptyFile { .. })
        ));

        assert!(matches!(
            validate_upload_file(&dir.path().to_string_lossy(), UploadKind::Video),
            Err(DomainError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "video", b"data");

        match validate_upload_file(&path, UploadKind::Video) {
            Err(DomainError::InvalidFormat { found, .. }) => assert_eq!(found, "no extension"),
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }
}
