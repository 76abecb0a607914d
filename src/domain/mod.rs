//! ドメイン層
//!
//! - `error`: 入力値の制約違反
//! - `validator`: アップロードファイルの検証
//! - `formatter`: 表示用の日時・長さのフォーマット

pub mod error;
pub mod formatter;
pub mod validator;
