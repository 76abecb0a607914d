/// サムネイルURLコマンド
///
/// URLを組み立てるだけなので、APIキーもネットワークも使わない。
use crate::commands::result::{CommandResult, ThumbnailResult};
use museai::api::client::thumbnail_url;
use museai::config::APP_CONFIG;

pub fn execute(fid: &str, seconds: Option<u32>) -> CommandResult {
    CommandResult::Thumbnail(ThumbnailResult {
        fid: fid.to_string(),
        seconds,
        url: thumbnail_url(APP_CONFIG.api.cdn_endpoint, fid, seconds),
    })
}
