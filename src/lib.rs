//! muse.ai 動画ホスティングAPIのクライアント
//!
//! ```no_run
//! use museai::api::{ClientConfig, MuseClient, Visibility};
//!
//! # async fn demo() -> Result<(), museai::api::InfraError> {
//! let client = MuseClient::new(ClientConfig::new("API-KEY-HERE"))?;
//!
//! let created = client.create_collection("Trips", Visibility::Unlisted).await;
//! match created {
//!     museai::api::ApiResponse::Success(collection) => println!("{}", collection["scid"]),
//!     museai::api::ApiResponse::Failure(error) => eprintln!("{}", error),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! 動画系のエンドポイントには FID（アップロードファイルのID）を取るものと
//! SVID（動画ID）を取るものがあるので注意してください。

pub mod api;
pub mod config;
pub mod domain;
pub mod error_severity;
