/// 動画関連コマンド
///
/// アップロード・更新・削除・一覧・詳細・取り込み状態。
use crate::commands::result::{
    CommandResult, IngestingResult, ListingResult, NoChangesResult,
};
use crate::commands::{into_record, load_client};
use anyhow::{Context, Result};
use museai::api::{UpdateOutcome, UploadFile, VideoUpdate, Visibility};
use museai::config::BYTES_PER_MB;
use museai::domain::validator::{self, UploadKind};
use tracing::info;

/// 動画をアップロードする
///
/// # 引数
/// * `file_path` - 動画ファイルのパス
/// * `collection` - 追加先のSCID
/// * `visibility` - 公開範囲
pub async fn upload(
    file_path: &str,
    collection: Option<&str>,
    visibility: Option<Visibility>,
) -> Result<CommandResult> {
    let validation = validator::validate_upload_file(file_path, UploadKind::Video)
        .context("File validation failed")?;

    let (client, _) = load_client()?;

    let file = UploadFile::from_path(&validation.path)
        .await
        .context("Failed to read video file")?;

    let size_mb = validation.size as f64 / BYTES_PER_MB as f64;
    info!(
        path = %validation.path,
        size_mb,
        format = %validation.extension,
        "uploading video"
    );

    let response = client.upload_video(file, collection, visibility).await;

    into_record(
        response,
        "upload_video",
        file_path,
        format!("Uploaded {} ({:.2} MB)", file_path, size_mb),
    )
}

/// 動画のメタデータを更新する
///
/// 更新内容が空の場合は送信せず NoChanges を返す。
pub async fn update(fid: &str, update: VideoUpdate) -> Result<CommandResult> {
    let (client, _) = load_client()?;

    match client.update_video(fid, update).await {
        UpdateOutcome::NoChanges => Ok(CommandResult::NoChanges(NoChangesResult {
            operation: "update_video".to_string(),
            id: fid.to_string(),
            changed: false,
        })),
        UpdateOutcome::Sent(response) => into_record(
            response,
            "update_video",
            fid,
            format!("Updated video {}", fid),
        ),
    }
}

/// 動画を削除する（FID）
pub async fn delete(fid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.delete_video(fid).await;

    into_record(
        response,
        "delete_video",
        fid,
        format!("Deleted video {}", fid),
    )
}

/// 動画一覧を取得する
pub async fn list() -> Result<CommandResult> {
    let (client, user_config) = load_client()?;

    let items = client
        .list_videos()
        .await
        .into_result()
        .context("Failed to fetch videos list")?;

    Ok(CommandResult::Videos(ListingResult::new(
        items,
        user_config.timezone_offset_seconds,
    )))
}

/// 動画の詳細を取得する（SVID）
pub async fn show(svid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.get_video(svid).await;

    into_record(
        response,
        "get_video",
        svid,
        format!("Video {}", svid),
    )
}

/// 取り込み処理中かどうかを確認する（SVID）
pub async fn ingesting(svid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;

    let ingesting = client
        .is_video_ingesting(svid)
        .await
        .into_result()
        .context("Failed to fetch video status")?;

    Ok(CommandResult::Ingesting(IngestingResult {
        svid: svid.to_string(),
        ingesting,
    }))
}
