/// カバー画像変更コマンド
use crate::commands::result::{CommandResult, NoChangesResult};
use crate::commands::{into_record, load_client};
use anyhow::{Context, Result, bail};
use museai::api::{CoverSource, UpdateOutcome, UploadFile};
use museai::domain::validator::{self, UploadKind};

/// 秒数指定と画像指定からカバーの変更方法を決める
///
/// 両方指定された場合はエラー、どちらも無ければ None。
pub async fn resolve_source(
    seconds: Option<u32>,
    image_path: Option<&str>,
) -> Result<Option<CoverSource>> {
    match (seconds, image_path) {
        (Some(_), Some(_)) => bail!("Specify either --time or --file for the cover, not both."),
        (Some(seconds), None) => Ok(Some(CoverSource::ByTimestamp(seconds))),
        (None, Some(path)) => {
            let validation = validator::validate_upload_file(path, UploadKind::CoverImage)
                .context("Cover image validation failed")?;
            let image = UploadFile::from_path(&validation.path)
                .await
                .context("Failed to read cover image")?;
            Ok(Some(CoverSource::ByFile(image)))
        }
        (None, None) => Ok(None),
    }
}

/// カバー画像を変更する
///
/// # 引数
/// * `fid` - 動画のFID
/// * `seconds` - 切り出す秒数
/// * `image_path` - アップロードする画像
pub async fn execute(
    fid: &str,
    seconds: Option<u32>,
    image_path: Option<&str>,
) -> Result<CommandResult> {
    let source = resolve_source(seconds, image_path).await?;
    let (client, _) = load_client()?;

    match client.change_video_cover(fid, source).await {
        UpdateOutcome::NoChanges => Ok(CommandResult::NoChanges(NoChangesResult {
            operation: "change_video_cover".to_string(),
            id: fid.to_string(),
            changed: false,
        })),
        UpdateOutcome::Sent(response) => into_record(
            response,
            "change_video_cover",
            fid,
            format!("Changed cover of video {}", fid),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resolve_source_variants() {
        assert!(resolve_source(None, None).await.unwrap().is_none());
        assert_eq!(
            resolve_source(Some(30), None).await.unwrap(),
            Some(CoverSource::ByTimestamp(30))
        );
        assert!(resolve_source(Some(30), Some("cover.png")).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_source_reads_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let source = resolve_source(None, Some(&path.to_string_lossy()))
            .await
            .unwrap();
        match source {
            Some(CoverSource::ByFile(file)) => {
                assert_eq!(file.file_name, "cover.jpg");
                assert_eq!(file.mime.as_deref(), Some("image/jpeg"));
            }
            other => panic!("Expected ByFile, got {:?}", other),
        }
    }
}
