/// ドメイン層のエラー定義
///
/// 入力値の制約違反を表現する。外部クレートのエラーは含まない。
use crate::api::types::{Insight, Visibility};
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// ファイルが見つからない
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// ファイル形式が無効
    #[error("invalid file format: {path} (expected: {expected}, found: {found})")]
    InvalidFormat {
        path: String,
        expected: String,
        found: String,
    },

    /// ファイルが空
    #[error("file is empty: {path}")]
    EmptyFile { path: String },

    /// ディレクトリが指定された
    #[error("'{path}' is a directory, not a file")]
    NotAFile { path: String },

    /// 公開範囲の値が不正
    #[error("invalid visibility: '{value}'")]
    InvalidVisibility { value: String },

    /// 解析結果の種類が不正
    #[error("invalid insight kind: '{value}'")]
    InvalidInsight { value: String },
}

impl DomainError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn invalid_format(
        path: impl Into<String>,
        supported_formats: &[&str],
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            expected: format!("one of: {}", supported_formats.join(", ")),
            found: found.into(),
        }
    }

    pub fn empty_file(path: impl Into<String>) -> Self {
        Self::EmptyFile { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn invalid_visibility(value: impl Into<String>) -> Self {
        Self::InvalidVisibility {
            value: value.into(),
        }
    }

    pub fn invalid_insight(value: impl Into<String>) -> Self {
        Self::InvalidInsight {
            value: value.into(),
        }
    }

    /// エラーの深刻度（すべてユーザー入力の問題）
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージ
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Please check the file path and ensure the file exists.".to_string())
            }
            Self::InvalidFormat { expected, .. } => Some(format!("Supported formats: {}", expected)),
            Self::EmptyFile { .. } => Some("The file appears to be empty or corrupted.".to_string()),
            Self::NotAFile { .. } => Some("Please specify a file, not a directory.".to_string()),
            Self::InvalidVisibility { .. } => Some(format!(
                "Visibility must be one of: {}",
                join_names(Visibility::ALL.iter().map(|v| v.as_str()))
            )),
            Self::InvalidInsight { .. } => Some(format!(
                "Insight kind must be one of: {}",
                join_names(Insight::ALL.iter().map(|i| i.as_str()))
            )),
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_hint_lists_values() {
        let err = DomainError::invalid_visibility("secret");
        assert_eq!(err.to_string(), "invalid visibility: 'secret'");
        assert_eq!(
            err.hint().unwrap(),
            "Visibility must be one of: private, unlisted, public"
        );
        assert_eq!(err.severity(), ErrorSeverity::UserError);
    }

    #[test]
    fn test_invalid_format_message() {
        let err = DomainError::invalid_format("a.txt", &["mp4", "mov"], "txt");
        assert_eq!(
            err.to_string(),
            "invalid file format: a.txt (expected: one of: mp4, mov, found: txt)"
        );
    }
}
