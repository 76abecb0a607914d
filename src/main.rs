mod cli;
mod commands;
mod presentation;

use anyhow::Result;
use museai::api::error::InfraError;
use museai::config::APP_CONFIG;
use museai::config::error::ConfigError;
use museai::domain::error::DomainError;
use std::env;
use tracing_subscriber::EnvFilter;

const MACHINE_FLAG: &str = "--machine";

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    // --machine はどの位置にあっても受け付け、コマンド引数からは取り除く
    let machine_output = args.iter().any(|arg| arg == MACHINE_FLAG);
    let filtered_args: Vec<String> = args
        .into_iter()
        .filter(|arg| arg != MACHINE_FLAG)
        .collect();

    if let Err(e) = run(&filtered_args, machine_output).await {
        handle_error(e, machine_output);
    }
}

/// ログ出力を初期化する
///
/// RUST_LOG が無ければ既定のレベルを使う。stdout は機械可読出力専用なので stderr に書く。
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// アプリケーションのメイン処理
async fn run(args: &[String], machine_output: bool) -> Result<()> {
    let result = cli::parse_args(args).await?;
    presentation::output::output_result(&result, machine_output)
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とヒントを決定する。
fn handle_error(error: anyhow::Error, machine_output: bool) {
    let exit_code = determine_exit_code(&error);
    let hint = get_error_hint(&error);

    presentation::output::output_error(&error, exit_code, hint, machine_output);

    std::process::exit(exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }
        if let Some(infra_err) = cause.downcast_ref::<InfraError>() {
            return infra_err.severity().exit_code();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 引数の誤りなど、型付きエラーを経由しないもの
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>()
            && let Some(hint) = domain_err.hint()
        {
            return Some(hint);
        }
        if let Some(infra_err) = cause.downcast_ref::<InfraError>()
            && let Some(hint) = infra_err.hint()
        {
            return Some(hint.to_string());
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>()
            && let Some(hint) = config_err.hint()
        {
            return Some(hint.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_from_domain_error() {
        let error = Err::<(), _>(DomainError::invalid_visibility("secret"))
            .context("Create collection command failed")
            .unwrap_err();
        assert_eq!(determine_exit_code(&error), 1);
    }

    #[test]
    fn test_exit_code_from_infra_error() {
        let error = Err::<(), _>(InfraError::api("files/collections", "not found"))
            .context("Collections command failed")
            .unwrap_err();
        assert_eq!(determine_exit_code(&error), 3);
        assert!(get_error_hint(&error).is_some());
    }

    #[test]
    fn test_exit_code_defaults_to_user_error() {
        let error = anyhow::anyhow!("Unknown command: 'x'");
        assert_eq!(determine_exit_code(&error), 1);
        assert_eq!(get_error_hint(&error), None);
    }
}
