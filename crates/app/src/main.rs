use std::fmt;

use services::{AppServices, ProgressConfig, ProgressService};
use tracing::info;
use tutor_core::model::TopicId;

const DEFAULT_DB_FILE: &str = "tutor.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArg { what: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidIndex { raw: String },
    InvalidTopicId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArg { what } => write!(f, "missing {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidIndex { raw } => write!(f, "invalid index: {raw}"),
            ArgsError::InvalidTopicId { raw } => write!(f, "invalid topic id: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tutor [outline]                    [--db <sqlite_url>]");
    eprintln!("  tutor status                       [--db <sqlite_url>]");
    eprintln!("  tutor show <chapter> <topic>       [--db <sqlite_url>]  # 1-based");
    eprintln!("  tutor toggle <topic-id>            [--db <sqlite_url>]");
    eprintln!("  tutor reset                        [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_FILE}  (relative paths resolve against the working directory)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_DB_URL, TUTOR_PROGRESS_KEY, TUTOR_ON_CORRUPT=reset|fail, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Outline,
    Status,
    Show { chapter: usize, topic: usize },
    Toggle { topic: TopicId },
    Reset,
}

#[derive(Debug)]
struct Args {
    db_url: String,
    command: Command,
}

/// 1-based on the command line, 0-based in the service.
fn parse_index(raw: String) -> Result<usize, ArgsError> {
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(ArgsError::InvalidIndex { raw }),
    }
}

impl Args {
    /// Parse arguments after the program name. `Ok(None)` means help was requested.
    fn parse(
        argv: impl IntoIterator<Item = String>,
        default_db_url: String,
    ) -> Result<Option<Self>, ArgsError> {
        let mut db_url = default_db_url;
        let mut positional = Vec::new();
        let mut args = argv.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--help" | "-h" => return Ok(None),
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("outline") => Command::Outline,
            Some("status") => Command::Status,
            Some("reset") => Command::Reset,
            Some("show") => {
                let chapter = positional
                    .next()
                    .ok_or(ArgsError::MissingArg { what: "chapter number" })?;
                let topic = positional
                    .next()
                    .ok_or(ArgsError::MissingArg { what: "topic number" })?;
                Command::Show {
                    chapter: parse_index(chapter)?,
                    topic: parse_index(topic)?,
                }
            }
            Some("toggle") => {
                let raw = positional
                    .next()
                    .ok_or(ArgsError::MissingArg { what: "topic id" })?;
                let topic = raw
                    .parse::<TopicId>()
                    .map_err(|_| ArgsError::InvalidTopicId { raw: raw.clone() })?;
                Command::Toggle { topic }
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Some(Self { db_url, command }))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn print_outline(progress: &ProgressService) {
    let outline = progress.outline();
    for chapter in &outline.chapters {
        println!(
            "{}. {} ({}/{})",
            chapter.index + 1,
            chapter.title,
            chapter.completed,
            chapter.total
        );
        for item in &chapter.topics {
            let marker = if item.selected { '>' } else { ' ' };
            let check = if item.completed { 'x' } else { ' ' };
            println!(
                " {marker} [{check}] {}.{} {}  ({})",
                chapter.index + 1,
                item.index + 1,
                item.title,
                item.id
            );
        }
    }
    print_status(progress);
}

fn print_status(progress: &ProgressService) {
    let snapshot = progress.progress();
    println!(
        "Progress: {}/{} topics ({}%)",
        snapshot.completed,
        snapshot.total,
        snapshot.percent()
    );
}

fn print_current_topic(progress: &ProgressService) {
    match progress.current_topic() {
        Some(topic) => {
            let done = if progress.is_completed(topic.id()) {
                "completed"
            } else {
                "not completed"
            };
            println!("# {} [{}] ({done})", topic.title(), topic.id());
            println!();
            println!("{}", topic.content());
        }
        None => println!("Select a topic to get started!"),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let default_db_url = std::env::var("TUTOR_DB_URL")
        .ok()
        .map_or_else(|| normalize_sqlite_url(DEFAULT_DB_FILE.into()), normalize_sqlite_url);

    let parsed = match Args::parse(std::env::args().skip(1), default_db_url) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    prepare_sqlite_file(&parsed.db_url)?;
    let mut services = AppServices::new_sqlite(&parsed.db_url, ProgressConfig::from_env()).await?;
    info!(db = %parsed.db_url, command = ?parsed.command, load = ?services.load_report(), "running");

    let progress = services.progress_mut();
    match parsed.command {
        Command::Outline => print_outline(progress),
        Command::Status => print_status(progress),
        Command::Show { chapter, topic } => {
            progress.select_topic(chapter, topic);
            print_current_topic(progress);
        }
        Command::Toggle { topic } => {
            let known = progress.curriculum().contains_topic(&topic);
            let completed = progress.toggle_completion(topic.clone()).await?;
            let state = if completed { "completed" } else { "not completed" };
            println!("{topic}: {state}");
            if !known {
                eprintln!("note: {topic} is not part of the curriculum");
            }
            print_status(progress);
        }
        Command::Reset => {
            progress.reset_progress().await?;
            print_status(progress);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        Args::parse(
            args.iter().map(|arg| (*arg).to_string()),
            "sqlite://default.sqlite3".into(),
        )
    }

    #[test]
    fn no_args_shows_outline_with_default_db() {
        let args = parse(&[]).unwrap().unwrap();
        assert_eq!(args.command, Command::Outline);
        assert_eq!(args.db_url, "sqlite://default.sqlite3");
    }

    #[test]
    fn show_takes_one_based_coordinates() {
        let args = parse(&["show", "2", "1"]).unwrap().unwrap();
        assert_eq!(args.command, Command::Show { chapter: 1, topic: 0 });
        assert_eq!(
            parse(&["show", "0", "1"]).unwrap_err(),
            ArgsError::InvalidIndex { raw: "0".into() }
        );
    }

    #[test]
    fn toggle_requires_topic_id() {
        let args = parse(&["toggle", "loops-for", "--db", "sqlite::memory:"])
            .unwrap()
            .unwrap();
        assert_eq!(
            args.command,
            Command::Toggle {
                topic: TopicId::new("loops-for")
            }
        );
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(
            parse(&["toggle"]).unwrap_err(),
            ArgsError::MissingArg { what: "topic id" }
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(
            parse(&["dance"]).unwrap_err(),
            ArgsError::UnknownCommand("dance".into())
        );
        assert_eq!(
            parse(&["--verbose"]).unwrap_err(),
            ArgsError::UnknownArg("--verbose".into())
        );
        assert_eq!(
            parse(&["--db"]).unwrap_err(),
            ArgsError::MissingValue { flag: "--db" }
        );
        assert_eq!(
            parse(&["status", "extra"]).unwrap_err(),
            ArgsError::UnknownArg("extra".into())
        );
    }

    #[test]
    fn default_db_resolves_into_working_directory() {
        let url = normalize_sqlite_url(DEFAULT_DB_FILE.into());
        let expected = std::env::current_dir().unwrap().join(DEFAULT_DB_FILE);
        assert_eq!(url, format!("sqlite://{}", expected.display()));
        assert_eq!(normalize_sqlite_url(format!("sqlite:{DEFAULT_DB_FILE}")), url);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["toggle", "--help"]).unwrap().is_none());
    }
}
