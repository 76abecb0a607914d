//! エラー深刻度と終了コード
//!
//! api / domain / config の各層のエラーはすべてこの分類に落とし込まれ、
//! CLI の終了コードはここから決まる。
//!
//! **依存方向:**
//! - 各層のエラー型はこのモジュールに依存してよい
//! - このモジュール自体は他のモジュールに依存しない

use std::fmt;

/// エラーの深刻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// ユーザーが直せる入力ミス
    ///
    /// ファイルが存在しない、公開範囲の指定が不正など。
    ///
    /// **Exit Code: 1**
    UserError,

    /// 設定の問題
    ///
    /// APIキー未設定、設定ファイルの破損など。
    ///
    /// **Exit Code: 2**
    ConfigError,

    /// 外部要因
    ///
    /// 通信障害、タイムアウト、muse.ai 側が返したエラーなど。
    ///
    /// **Exit Code: 3**
    SystemError,
}

impl ErrorSeverity {
    /// 対応する終了コード
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UserError => 1,
            Self::ConfigError => 2,
            Self::SystemError => 3,
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UserError => "user error",
            Self::ConfigError => "configuration error",
            Self::SystemError => "system error",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(ErrorSeverity::UserError.exit_code(), 1);
        assert_eq!(ErrorSeverity::ConfigError.exit_code(), 2);
        assert_eq!(ErrorSeverity::SystemError.exit_code(), 3);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ErrorSeverity::UserError.to_string(), "user error");
        assert_eq!(
            ErrorSeverity::ConfigError.to_string(),
            "configuration error"
        );
        assert_eq!(ErrorSeverity::SystemError.to_string(), "system error");
    }
}
