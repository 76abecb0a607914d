//! muse.ai API クライアントモジュール
//!
//! - `client`: リクエスト構築とレスポンス正規化、各エンドポイントのメソッド
//! - `types`: リクエスト記述子・ペイロード・レスポンスの型
//! - `auth`: APIキー
//! - `error`: 通信エラーの分類

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::ApiKey;
pub use client::{ClientConfig, MuseClient};
pub use error::InfraError;
pub use types::{
    ApiRequest, ApiResponse, CoverSource, Insight, Payload, UpdateOutcome, UploadFile,
    VideoUpdate, Visibility,
};
