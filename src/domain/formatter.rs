/// ドメインサービス: タイムスタンプのフォーマット
///
/// muse.ai は作成日時（`tcreated`）をUnix秒で返すため、
/// ユーザー設定のタイムゾーンオフセットで人間向けの時刻文字列に変換する。
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde_json::Value;

/// Unixタイムスタンプ（数値または数値文字列）をフォーマット
///
/// # 戻り値
/// - オフセット0: "2025-11-29 16:49:10 UTC"
/// - それ以外: "2025-11-30 01:49:10 +09:00"
///
/// 解釈できない値はそのまま文字列化して返します。
pub fn format_timestamp(value: &Value, offset_seconds: i32) -> String {
    let timestamp = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };

    let Some(datetime) = timestamp.and_then(|ts| match Utc.timestamp_opt(ts, 0) {
        chrono::LocalResult::Single(dt) => Some(dt),
        _ => None,
    }) else {
        return match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    };

    format_with_offset(datetime, offset_seconds)
}

fn format_with_offset(datetime: DateTime<Utc>, offset_seconds: i32) -> String {
    if offset_seconds == 0 {
        return datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }

    match FixedOffset::east_opt(offset_seconds) {
        Some(offset) => datetime
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
        None => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

/// 動画の長さ（秒）を "m:ss" 形式に
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_timestamp_utc() {
        // 1764434950 = 2025-11-29 16:49:10 UTC
        assert_eq!(
            format_timestamp(&json!(1764434950), 0),
            "2025-11-29 16:49:10 UTC"
        );
    }

    #[test]
    fn test_format_timestamp_jst() {
        assert_eq!(
            format_timestamp(&json!(1764434950), 9 * 3600),
            "2025-11-30 01:49:10 +09:00"
        );
    }

    #[test]
    fn test_format_timestamp_string_input() {
        assert_eq!(
            format_timestamp(&json!("1764434950"), -8 * 3600),
            "2025-11-29 08:49:10 -08:00"
        );
    }

    #[test]
    fn test_format_timestamp_invalid_input() {
        assert_eq!(format_timestamp(&json!("yesterday"), 0), "yesterday");
        assert_eq!(format_timestamp(&Value::Null, 0), "null");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(125.7), "2:05");
        assert_eq!(format_duration(0.0), "0:00");
    }
}
