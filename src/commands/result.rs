/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use serde::Serialize;
use serde_json::Value;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Login(LoginResult),
    Logout(LogoutResult),
    Status(StatusResult),
    Collections(ListingResult),
    Videos(ListingResult),
    Record(RecordResult),
    NoChanges(NoChangesResult),
    Ingesting(IngestingResult),
    Thumbnail(ThumbnailResult),
    Help,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
    /// マスクしたAPIキー
    pub api_key: String,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// muse.ai がキーを受け入れたか
    pub is_authenticated: bool,
    /// マスクしたAPIキー（設定されている場合）
    pub api_key: Option<String>,
    /// 認証に失敗した理由
    pub error: Option<String>,
}

/// コレクション・動画一覧の結果
#[derive(Debug, Clone, Serialize)]
pub struct ListingResult {
    /// muse.ai が返した配列そのもの
    pub items: Value,
    pub total_count: usize,
    /// 日時表示用（出力には含めない）
    #[serde(skip)]
    pub timezone_offset_seconds: i32,
}

impl ListingResult {
    pub fn new(items: Value, timezone_offset_seconds: i32) -> Self {
        let total_count = items.as_array().map_or(0, Vec::len);
        Self {
            items,
            total_count,
            timezone_offset_seconds,
        }
    }
}

/// 単一リソースを返すオペレーションの結果
#[derive(Debug, Clone, Serialize)]
pub struct RecordResult {
    /// 実行したオペレーション名（例: "create_collection"）
    pub operation: String,
    /// 対象のID（SCID / FID / SVID）
    pub id: String,
    /// 人間向けの見出し
    #[serde(skip)]
    pub label: String,
    /// muse.ai が返したボディ
    pub data: Value,
}

/// 変更内容が無く送信しなかった結果
#[derive(Debug, Clone, Serialize)]
pub struct NoChangesResult {
    pub operation: String,
    pub id: String,
    pub changed: bool,
}

/// 取り込み状態の結果
#[derive(Debug, Clone, Serialize)]
pub struct IngestingResult {
    pub svid: String,
    pub ingesting: bool,
}

/// サムネイルURLの結果
#[derive(Debug, Clone, Serialize)]
pub struct ThumbnailResult {
    pub fid: String,
    pub seconds: Option<u32>,
    pub url: String,
}

impl CommandResult {
    /// 成功メッセージ（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Login(r) => {
                if r.was_logged_in {
                    "API key updated!".to_string()
                } else {
                    "Login successful!".to_string()
                }
            }
            CommandResult::Logout(r) => {
                if r.was_logged_in {
                    "Logged out successfully.".to_string()
                } else {
                    "Already logged out.".to_string()
                }
            }
            CommandResult::Status(r) => {
                if r.is_authenticated {
                    "Authenticated".to_string()
                } else {
                    "Not authenticated".to_string()
                }
            }
            CommandResult::Collections(r) => format!("Found {} collection(s)", r.total_count),
            CommandResult::Videos(r) => format!("Found {} video(s)", r.total_count),
            CommandResult::Record(r) => r.label.clone(),
            CommandResult::NoChanges(_) => "Nothing to change; no request was sent.".to_string(),
            CommandResult::Ingesting(r) => {
                if r.ingesting {
                    format!("Video {} is still ingesting", r.svid)
                } else {
                    format!("Video {} is not ingesting", r.svid)
                }
            }
            CommandResult::Thumbnail(_) => "Thumbnail URL".to_string(),
            CommandResult::Help => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_counts_array_items() {
        let listing = ListingResult::new(json!([{ "scid": "a" }, { "scid": "b" }]), 0);
        assert_eq!(listing.total_count, 2);

        let not_array = ListingResult::new(json!({ "unexpected": true }), 0);
        assert_eq!(not_array.total_count, 0);
    }

    #[test]
    fn test_serialization_is_tagged_by_command() {
        let result = CommandResult::Ingesting(IngestingResult {
            svid: "sv1".to_string(),
            ingesting: true,
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["command"], "ingesting");
        assert_eq!(value["ingesting"], true);
    }

    #[test]
    fn test_record_label_not_serialized() {
        let result = CommandResult::Record(RecordResult {
            operation: "get_video".to_string(),
            id: "sv1".to_string(),
            label: "Video sv1".to_string(),
            data: json!({}),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("label").is_none());
        assert_eq!(result.success_message(), "Video sv1");
    }
}
