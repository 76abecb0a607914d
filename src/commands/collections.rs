/// コレクション関連コマンド
///
/// 一覧・詳細・作成・削除。
use crate::commands::result::{CommandResult, ListingResult};
use crate::commands::{into_record, load_client};
use anyhow::{Context, Result};
use museai::api::Visibility;

/// コレクション一覧を取得する
pub async fn list() -> Result<CommandResult> {
    let (client, user_config) = load_client()?;

    let items = client
        .list_collections()
        .await
        .into_result()
        .context("Failed to fetch collections")?;

    Ok(CommandResult::Collections(ListingResult::new(
        items,
        user_config.timezone_offset_seconds,
    )))
}

/// コレクションの詳細を取得する
///
/// # 引数
/// * `scid` - コレクションID
pub async fn show(scid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.get_collection(scid).await;

    into_record(
        response,
        "get_collection",
        scid,
        format!("Collection {}", scid),
    )
}

/// コレクションを作成する
pub async fn create(name: &str, visibility: Visibility) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.create_collection(name, visibility).await;

    into_record(
        response,
        "create_collection",
        name,
        format!("Created {} collection '{}'", visibility, name),
    )
}

/// コレクションを削除する
pub async fn delete(scid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.delete_collection(scid).await;

    into_record(
        response,
        "delete_collection",
        scid,
        format!("Deleted collection {}", scid),
    )
}
