/// 動画解析結果コマンド（scenes / speech / text / actions / sounds / faces）
use crate::commands::result::CommandResult;
use crate::commands::{into_record, load_client};
use anyhow::Result;
use museai::api::Insight;

pub async fn execute(kind: Insight, svid: &str) -> Result<CommandResult> {
    let (client, _) = load_client()?;
    let response = client.get_video_insight(kind, svid).await;

    into_record(
        response,
        &format!("get_video_{}", kind),
        svid,
        format!("{} of video {}", capitalize(kind.as_str()), svid),
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("faces"), "Faces");
        assert_eq!(capitalize(""), "");
    }
}
