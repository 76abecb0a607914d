use crate::commands::{self, CommandResult};
use anyhow::{Context, Result, bail};
use museai::api::{Insight, VideoUpdate, Visibility};

/// 解析済みのコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login { from_stdin: bool },
    Logout,
    Status,
    Collections,
    Collection { scid: String },
    CreateCollection { name: String, visibility: Visibility },
    DeleteCollection { scid: String },
    Upload {
        file: String,
        collection: Option<String>,
        visibility: Option<Visibility>,
    },
    Update { fid: String, update: VideoUpdate },
    Delete { fid: String },
    List,
    Show { svid: String },
    Ingesting { svid: String },
    Cover {
        fid: String,
        seconds: Option<u32>,
        image: Option<String>,
    },
    Insight { kind: Insight, svid: String },
    Thumbnail { fid: String, seconds: Option<u32> },
    Help,
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
pub async fn parse_args(args: &[String]) -> Result<CommandResult> {
    let command = parse_command(args)?;
    dispatch(command).await
}

/// CLI引数をコマンドに変換する（ネットワークには触れない）
pub fn parse_command(args: &[String]) -> Result<Command> {
    let Some(name) = args.get(1) else {
        return Ok(Command::Help);
    };
    let rest = &args[2..];

    let command = match name.as_str() {
        "login" => {
            let from_stdin = rest.iter().any(|arg| arg == "--stdin");
            let others: Vec<String> = rest
                .iter()
                .filter(|arg| *arg != "--stdin")
                .cloned()
                .collect();
            no_args(&others, name, Command::Login { from_stdin })?
        }
        "logout" => no_args(rest, name, Command::Logout)?,
        "status" => no_args(rest, name, Command::Status)?,
        "collections" => no_args(rest, name, Command::Collections)?,
        "collection" => Command::Collection {
            scid: single_id(rest, name, "a collection id (scid)")?,
        },
        "create-collection" => {
            let parsed = ParsedArgs::parse(rest, &[])?;
            let collection_name = parsed
                .positional(0)
                .context("Please specify a name for create-collection command")?;
            if parsed.positionals.len() > 2 {
                bail!("Too many arguments for '{}'", name);
            }
            let visibility = match parsed.positional(1) {
                Some(v) => v.parse::<Visibility>()?,
                None => Visibility::Private,
            };
            Command::CreateCollection {
                name: collection_name.to_string(),
                visibility,
            }
        }
        "delete-collection" => Command::DeleteCollection {
            scid: single_id(rest, name, "a collection id (scid)")?,
        },
        "upload" => {
            let parsed = ParsedArgs::parse(rest, &["--collection", "--visibility"])?;
            let file = parsed
                .positional(0)
                .context("Please specify a file path for upload command")?;
            parsed.expect_positionals(1, name)?;
            Command::Upload {
                file: file.to_string(),
                collection: parsed.value("--collection").map(str::to_string),
                visibility: parsed
                    .value("--visibility")
                    .map(str::parse::<Visibility>)
                    .transpose()?,
            }
        }
        "update" => {
            let parsed = ParsedArgs::parse(
                rest,
                &["--visibility", "--title", "--description", "--domain"],
            )?;
            let fid = parsed
                .positional(0)
                .context("Please specify a video FID for update command")?;
            parsed.expect_positionals(1, name)?;

            let mut update = VideoUpdate::new().domains(parsed.values("--domain"));
            if let Some(visibility) = parsed.value("--visibility") {
                update = update.visibility(visibility.parse()?);
            }
            if let Some(title) = parsed.value("--title") {
                update = update.title(title);
            }
            if let Some(description) = parsed.value("--description") {
                update = update.description(description);
            }
            Command::Update {
                fid: fid.to_string(),
                update,
            }
        }
        "delete" => Command::Delete {
            fid: single_id(rest, name, "a video FID")?,
        },
        "list" => no_args(rest, name, Command::List)?,
        "show" => Command::Show {
            svid: single_id(rest, name, "a video SVID")?,
        },
        "ingesting" => Command::Ingesting {
            svid: single_id(rest, name, "a video SVID")?,
        },
        "cover" => {
            let parsed = ParsedArgs::parse(rest, &["--time", "--file"])?;
            let fid = parsed
                .positional(0)
                .context("Please specify a video FID for cover command")?;
            parsed.expect_positionals(1, name)?;
            Command::Cover {
                fid: fid.to_string(),
                seconds: parsed.seconds("--time")?,
                image: parsed.value("--file").map(str::to_string),
            }
        }
        "insight" => {
            let parsed = ParsedArgs::parse(rest, &[])?;
            let kind = parsed.positional(0).context(
                "Please specify an insight kind (scenes, speech, text, actions, sounds, faces)",
            )?;
            let svid = parsed
                .positional(1)
                .context("Please specify a video SVID for insight command")?;
            parsed.expect_positionals(2, name)?;
            Command::Insight {
                kind: kind.parse()?,
                svid: svid.to_string(),
            }
        }
        "thumbnail" => {
            let parsed = ParsedArgs::parse(rest, &["--time"])?;
            let fid = parsed
                .positional(0)
                .context("Please specify a video FID for thumbnail command")?;
            parsed.expect_positionals(1, name)?;
            Command::Thumbnail {
                fid: fid.to_string(),
                seconds: parsed.seconds("--time")?,
            }
        }
        "help" | "--help" | "-h" => Command::Help,
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            name
        ),
    };

    Ok(command)
}

/// コマンドを実行する
async fn dispatch(command: Command) -> Result<CommandResult> {
    match command {
        Command::Login { from_stdin } => commands::login::execute(from_stdin)
            .await
            .context("Login command failed"),
        Command::Logout => commands::logout::execute().context("Logout command failed"),
        Command::Status => commands::status::execute()
            .await
            .context("Status command failed"),
        Command::Collections => commands::collections::list()
            .await
            .context("Collections command failed"),
        Command::Collection { scid } => commands::collections::show(&scid)
            .await
            .context("Collection command failed"),
        Command::CreateCollection { name, visibility } => {
            commands::collections::create(&name, visibility)
                .await
                .context("Create collection command failed")
        }
        Command::DeleteCollection { scid } => commands::collections::delete(&scid)
            .await
            .context("Delete collection command failed"),
        Command::Upload {
            file,
            collection,
            visibility,
        } => commands::videos::upload(&file, collection.as_deref(), visibility)
            .await
            .context("Upload command failed"),
        Command::Update { fid, update } => commands::videos::update(&fid, update)
            .await
            .context("Update command failed"),
        Command::Delete { fid } => commands::videos::delete(&fid)
            .await
            .context("Delete command failed"),
        Command::List => commands::videos::list()
            .await
            .context("List command failed"),
        Command::Show { svid } => commands::videos::show(&svid)
            .await
            .context("Show command failed"),
        Command::Ingesting { svid } => commands::videos::ingesting(&svid)
            .await
            .context("Ingesting command failed"),
        Command::Cover {
            fid,
            seconds,
            image,
        } => commands::cover::execute(&fid, seconds, image.as_deref())
            .await
            .context("Cover command failed"),
        Command::Insight { kind, svid } => commands::insight::execute(kind, &svid)
            .await
            .context("Insight command failed"),
        Command::Thumbnail { fid, seconds } => Ok(commands::thumbnail::execute(&fid, seconds)),
        Command::Help => Ok(commands::help::execute()),
    }
}

fn no_args(rest: &[String], name: &str, command: Command) -> Result<Command> {
    ParsedArgs::parse(rest, &[])?.expect_positionals(0, name)?;
    Ok(command)
}

fn single_id(rest: &[String], name: &str, what: &str) -> Result<String> {
    let parsed = ParsedArgs::parse(rest, &[])?;
    let id = parsed
        .positional(0)
        .with_context(|| format!("Please specify {} for {} command", what, name))?
        .to_string();
    parsed.expect_positionals(1, name)?;
    Ok(id)
}

/// 位置引数とオプションに分解した引数
#[derive(Debug, Default)]
struct ParsedArgs {
    positionals: Vec<String>,
    options: Vec<(String, String)>,
}

impl ParsedArgs {
    /// `value_flags` は値を1つ取るオプション
    fn parse(args: &[String], value_flags: &[&str]) -> Result<Self> {
        let mut parsed = Self::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            if value_flags.contains(&arg.as_str()) {
                let value = iter
                    .next()
                    .with_context(|| format!("Option '{}' requires a value", arg))?;
                parsed.options.push((arg.clone(), value.clone()));
            } else if arg.starts_with("--") {
                bail!("Unknown option: '{}'", arg);
            } else {
                parsed.positionals.push(arg.clone());
            }
        }

        Ok(parsed)
    }

    fn positional(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    fn expect_positionals(&self, max: usize, command: &str) -> Result<()> {
        if self.positionals.len() > max {
            bail!(
                "Unexpected argument '{}' for '{}'",
                self.positionals[max],
                command
            );
        }
        Ok(())
    }

    /// 最後に指定された値
    fn value(&self, flag: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(name, _)| name == flag)
            .map(|(_, value)| value.as_str())
    }

    /// 繰り返し指定されたオプションのすべての値
    fn values(&self, flag: &str) -> Vec<String> {
        self.options
            .iter()
            .filter(|(name, _)| name == flag)
            .map(|(_, value)| value.clone())
            .collect()
    }

    fn seconds(&self, flag: &str) -> Result<Option<u32>> {
        self.value(flag)
            .map(|v| {
                v.parse::<u32>().with_context(|| {
                    format!("'{}' expects a whole number of seconds, got '{}'", flag, v)
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use museai::domain::error::DomainError;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("museai")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_command_shows_help() {
        assert_eq!(parse_command(&args(&[])).unwrap(), Command::Help);
        assert_eq!(parse_command(&args(&["help"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command(&args(&["frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
    }

    #[test]
    fn test_login_stdin_switch() {
        assert_eq!(
            parse_command(&args(&["login", "--stdin"])).unwrap(),
            Command::Login { from_stdin: true }
        );
        assert_eq!(
            parse_command(&args(&["login"])).unwrap(),
            Command::Login { from_stdin: false }
        );
        assert!(parse_command(&args(&["login", "--stdin", "extra"])).is_err());
    }

    #[test]
    fn test_create_collection_defaults_to_private() {
        assert_eq!(
            parse_command(&args(&["create-collection", "Demo"])).unwrap(),
            Command::CreateCollection {
                name: "Demo".to_string(),
                visibility: Visibility::Private,
            }
        );
        assert_eq!(
            parse_command(&args(&["create-collection", "Demo", "Public"])).unwrap(),
            Command::CreateCollection {
                name: "Demo".to_string(),
                visibility: Visibility::Public,
            }
        );
    }

    #[test]
    fn test_invalid_visibility_is_domain_error() {
        let err = parse_command(&args(&["create-collection", "Demo", "secret"])).unwrap_err();
        assert!(err.downcast_ref::<DomainError>().is_some());
    }

    #[test]
    fn test_upload_options() {
        let command = parse_command(&args(&[
            "upload",
            "movie.mp4",
            "--collection",
            "sc1",
            "--visibility",
            "unlisted",
        ]))
        .unwrap();

        assert_eq!(
            command,
            Command::Upload {
                file: "movie.mp4".to_string(),
                collection: Some("sc1".to_string()),
                visibility: Some(Visibility::Unlisted),
            }
        );
    }

    #[test]
    fn test_upload_requires_file() {
        assert!(parse_command(&args(&["upload"])).is_err());
    }

    #[test]
    fn test_update_collects_fields() {
        let command = parse_command(&args(&[
            "update",
            "f1",
            "--title",
            "New title",
            "--domain",
            "a.example",
            "--domain",
            "b.example",
        ]))
        .unwrap();

        assert_eq!(
            command,
            Command::Update {
                fid: "f1".to_string(),
                update: VideoUpdate::new()
                    .title("New title")
                    .domains(["a.example", "b.example"]),
            }
        );
    }

    #[test]
    fn test_update_without_fields_is_empty() {
        match parse_command(&args(&["update", "f1"])).unwrap() {
            Command::Update { update, .. } => assert!(update.is_empty()),
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn test_cover_options() {
        assert_eq!(
            parse_command(&args(&["cover", "f1", "--time", "12"])).unwrap(),
            Command::Cover {
                fid: "f1".to_string(),
                seconds: Some(12),
                image: None,
            }
        );
        assert!(parse_command(&args(&["cover", "f1", "--time", "soon"])).is_err());
    }

    #[test]
    fn test_insight_kind() {
        assert_eq!(
            parse_command(&args(&["insight", "faces", "sv1"])).unwrap(),
            Command::Insight {
                kind: Insight::Faces,
                svid: "sv1".to_string(),
            }
        );
        assert!(parse_command(&args(&["insight", "colors", "sv1"])).is_err());
    }

    #[test]
    fn test_thumbnail_time() {
        assert_eq!(
            parse_command(&args(&["thumbnail", "f1", "--time", "0"])).unwrap(),
            Command::Thumbnail {
                fid: "f1".to_string(),
                seconds: Some(0),
            }
        );
    }

    #[test]
    fn test_option_errors() {
        let missing = parse_command(&args(&["upload", "a.mp4", "--collection"])).unwrap_err();
        assert!(missing.to_string().contains("requires a value"));

        let unknown = parse_command(&args(&["list", "--verbose"])).unwrap_err();
        assert!(unknown.to_string().contains("Unknown option"));

        let extra = parse_command(&args(&["show", "sv1", "sv2"])).unwrap_err();
        assert!(extra.to_string().contains("Unexpected argument"));
    }
}
