/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読、stderr）または
/// 機械向け（JSON、stdout）形式で出力します。
use crate::commands::result::{CommandResult, ListingResult};
use anyhow::Result;
use museai::domain::formatter::{format_duration, format_timestamp};
use serde_json::{Value, json};

/// ヘルプテキスト（単一の情報源）
const HELP_TEXT: &str = "museai
Manage your muse.ai videos and collections from the command line

Usage:
  museai [--machine] <command> [args...]

Global Flags:
  --machine        - Output machine-readable JSON to stdout (for scripting)
                     Works for both success and error cases

Account:
  login [--stdin]  - Store your API key (verified before saving)
                     With --stdin: read the key from the first line of stdin
  logout           - Remove the stored API key
  status           - Check whether the API key is accepted

Collections:
  collections                          - List collections
  collection <scid>                    - Show a collection
  create-collection <name> [visibility]
                                       - Create a collection (default: private)
  delete-collection <scid>             - Delete a collection

Videos (note: some commands take a FID, others an SVID):
  upload <file> [--collection <scid>] [--visibility <v>]
                                       - Upload a video
  update <fid> [--visibility <v>] [--title <t>] [--description <d>] [--domain <host>]...
                                       - Update video details (only given fields are sent)
  delete <fid>                         - Delete a video
  list                                 - List all videos
  show <svid>                          - Show a video
  ingesting <svid>                     - Check whether a video is still being processed
  cover <fid> (--time <seconds> | --file <image>)
                                       - Change the video cover
  insight <kind> <svid>                - Show analysis results
                                         kind: scenes, speech, text, actions, sounds, faces
  thumbnail <fid> [--time <seconds>]   - Print the thumbnail URL (404s for private videos)

  help                                 - Display this help message

Visibility values: private, unlisted, public

Environment:
  MUSEAI_API_KEY   - Overrides the stored API key
  RUST_LOG         - Log filter (e.g. RUST_LOG=museai=debug)";

/// コマンド使用方法を表示する
pub fn print_usage() {
    eprintln!("{}", HELP_TEXT);
}

/// コマンド結果を適切な形式で出力する
///
/// * `machine_output = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine_output = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, machine_output: bool) -> Result<()> {
    if machine_output {
        println!("{}", serde_json::to_string(&machine_readable(result)?)?);
    } else {
        output_human_readable(result);
    }
    Ok(())
}

/// エラーを出力する
pub fn output_error(
    error: &anyhow::Error,
    exit_code: i32,
    hint: Option<String>,
    machine_output: bool,
) {
    let causes: Vec<String> = error.chain().skip(1).map(|c| c.to_string()).collect();

    if machine_output {
        let json = json!({
            "success": false,
            "error": error.to_string(),
            "causes": causes,
            "exit_code": exit_code,
            "hint": hint,
        });
        println!("{}", json);
        return;
    }

    eprintln!("Error: {}", error);
    if !causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in causes.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }
    if let Some(hint) = hint {
        eprintln!("\nHint: {}", hint);
    }
}

/// 機械可読JSONを組み立てる
///
/// CommandResult のシリアライズ結果に `success: true` を加えたもの。
fn machine_readable(result: &CommandResult) -> Result<Value> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Ok(value)
}

/// 人間向けの詳細メッセージを出力（stderr）
fn output_human_readable(result: &CommandResult) {
    match result {
        CommandResult::Login(r) => {
            eprintln!();
            eprintln!("✓ {}", result.success_message());
            eprintln!("API key {} has been saved.", r.api_key);
        }
        CommandResult::Logout(r) => {
            eprintln!("{}", result.success_message());
            if r.was_logged_in {
                eprintln!("The stored API key has been removed.");
            }
        }
        CommandResult::Status(r) => {
            eprintln!();
            match (&r.api_key, r.is_authenticated) {
                (Some(key), true) => {
                    eprintln!("Authenticated");
                    eprintln!("API key: {}", key);
                }
                (Some(key), false) => {
                    eprintln!("✗ Authentication failed");
                    eprintln!("  API key: {}", key);
                    if let Some(error) = &r.error {
                        eprintln!("  Error: {}", error);
                    }
                    eprintln!();
                    eprintln!("Please run 'museai login' to update your API key.");
                }
                (None, _) => {
                    eprintln!("Not logged in");
                    eprintln!("Please run 'museai login' to store your API key.");
                }
            }
        }
        CommandResult::Collections(r) => print_collections(r),
        CommandResult::Videos(r) => print_videos(r),
        CommandResult::Record(r) => {
            eprintln!();
            eprintln!("{}", r.label);
            eprintln!("{}", "=".repeat(r.label.chars().count()));
            eprintln!("{}", pretty(&r.data));
        }
        CommandResult::NoChanges(r) => {
            eprintln!("Nothing to change for {} ({}).", r.id, r.operation);
            eprintln!("No request was sent to muse.ai.");
        }
        CommandResult::Ingesting(_) => {
            eprintln!("{}", result.success_message());
        }
        CommandResult::Thumbnail(r) => {
            eprintln!("{}", r.url);
            eprintln!();
            eprintln!("Note: the URL returns 404 while the video is private.");
        }
        CommandResult::Help => print_usage(),
    }
}

fn print_collections(r: &ListingResult) {
    eprintln!();
    if r.total_count == 0 {
        eprintln!("No collections found.");
        eprintln!("Create one with 'museai create-collection <name>'");
        return;
    }

    eprintln!("Found {} collection(s):", r.total_count);
    eprintln!();
    for item in listing_items(r) {
        let video_count = item
            .get("videos")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        eprintln!("---");
        eprintln!("Name:       {}", text(item, "name"));
        eprintln!("SCID:       {}", text(item, "scid"));
        eprintln!("Visibility: {}", text(item, "visibility"));
        eprintln!("Videos:     {}", video_count);
        if let Some(created) = item.get("tcreated") {
            eprintln!(
                "Created:    {}",
                format_timestamp(created, r.timezone_offset_seconds)
            );
        }
    }
    eprintln!("---");
}

fn print_videos(r: &ListingResult) {
    eprintln!();
    if r.total_count == 0 {
        eprintln!("No videos found.");
        eprintln!("Upload your first video with 'museai upload <file>'");
        return;
    }

    eprintln!("Found {} video(s):", r.total_count);
    eprintln!();
    for (idx, item) in listing_items(r).enumerate() {
        eprintln!("---");
        eprintln!("Video #{}", idx + 1);
        eprintln!("Title:      {}", text(item, "title"));
        eprintln!("SVID:       {}", text(item, "svid"));
        eprintln!("FID:        {}", text(item, "fid"));
        if let Some(duration) = item.get("duration").and_then(Value::as_f64) {
            eprintln!("Duration:   {}", format_duration(duration));
        }
        if let Some(visibility) = item.get("visibility") {
            eprintln!("Visibility: {}", plain(visibility));
        }
        if let Some(url) = item.get("url") {
            eprintln!("URL:        {}", plain(url));
        }
        if let Some(created) = item.get("tcreated") {
            eprintln!(
                "Created:    {}",
                format_timestamp(created, r.timezone_offset_seconds)
            );
        }
    }
    eprintln!("---");
}

fn listing_items(r: &ListingResult) -> impl Iterator<Item = &Value> {
    r.items.as_array().into_iter().flatten()
}

fn text(item: &Value, key: &str) -> String {
    item.get(key).map_or_else(|| "-".to_string(), plain)
}

/// 文字列は引用符なし、それ以外はJSON表記
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::result::{IngestingResult, LoginResult, NoChangesResult, RecordResult};

    #[test]
    fn test_machine_readable_adds_success_flag() {
        let result = CommandResult::Login(LoginResult {
            was_logged_in: false,
            api_key: "abcd***wxyz".to_string(),
        });

        let value = machine_readable(&result).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["command"], "login");
        assert_eq!(value["api_key"], "abcd***wxyz");
    }

    #[test]
    fn test_machine_readable_no_changes() {
        let result = CommandResult::NoChanges(NoChangesResult {
            operation: "update_video".to_string(),
            id: "f1".to_string(),
            changed: false,
        });

        let value = machine_readable(&result).unwrap();
        assert_eq!(value["command"], "no_changes");
        assert_eq!(value["changed"], false);
    }

    #[test]
    fn test_machine_readable_help() {
        let value = machine_readable(&CommandResult::Help).unwrap();
        assert_eq!(value, json!({ "command": "help", "success": true }));
    }

    #[test]
    fn test_plain_and_text_helpers() {
        let item = json!({ "title": "Demo", "duration": 12.5 });
        assert_eq!(text(&item, "title"), "Demo");
        assert_eq!(text(&item, "duration"), "12.5");
        assert_eq!(text(&item, "missing"), "-");
    }

    #[test]
    fn test_output_human_readable_does_not_panic() {
        output_human_readable(&CommandResult::Ingesting(IngestingResult {
            svid: "sv1".to_string(),
            ingesting: true,
        }));
        output_human_readable(&CommandResult::Record(RecordResult {
            operation: "get_video".to_string(),
            id: "sv1".to_string(),
            label: "Video sv1".to_string(),
            data: json!({ "svid": "sv1" }),
        }));
        output_human_readable(&CommandResult::Videos(ListingResult::new(
            json!([{ "title": "A", "tcreated": 1764434950, "duration": 61.0 }]),
            0,
        )));
    }

    #[test]
    fn test_output_result_modes() {
        assert!(output_result(&CommandResult::Help, true).is_ok());
        assert!(output_result(&CommandResult::Help, false).is_ok());
    }
}
