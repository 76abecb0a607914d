/// プレゼンテーション層: ユーザー入力処理
///
/// 対話入力または標準入力からAPIキーを受け取ります。
use crate::commands::login::LoginCredentials;
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的にAPIキーを取得
pub fn read_api_key_interactive() -> Result<LoginCredentials> {
    eprintln!("Logging in to muse.ai...");
    eprintln!();
    eprintln!("Please enter your muse.ai API key.");
    eprintln!("You can create one at: https://muse.ai/settings/api");
    eprintln!();

    eprint!("API key: ");
    io::stderr().flush()?;

    read_api_key(io::stdin().lock())
}

/// 標準入力の1行目をAPIキーとして取得（パイプ用）
pub fn read_api_key_from_stdin() -> Result<LoginCredentials> {
    read_api_key(io::stdin().lock())
        .context("Please ensure the first line of stdin contains a valid API key.")
}

fn read_api_key(mut reader: impl BufRead) -> Result<LoginCredentials> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read API key from input")?;
    let api_key = line.trim().to_string();

    if api_key.is_empty() {
        bail!("API key cannot be empty. Please provide a valid API key.");
    }

    Ok(LoginCredentials { api_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_api_key_trims_whitespace() {
        let credentials = read_api_key(Cursor::new("  abc123  \nignored\n")).unwrap();
        assert_eq!(credentials.api_key, "abc123");
    }

    #[test]
    fn test_read_api_key_rejects_empty() {
        assert!(read_api_key(Cursor::new("\n")).is_err());
        assert!(read_api_key(Cursor::new("")).is_err());
    }
}
