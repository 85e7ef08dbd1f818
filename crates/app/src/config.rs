use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DB_URL: &str = "sqlite://trivia.sqlite3";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_PAGE_SIZE: u32 = trivia_core::pagination::DEFAULT_PAGE_SIZE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unknown subcommand: {0}")]
    UnknownCommand(String),
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("invalid --bind value: {raw}")]
    InvalidBind { raw: String },
    #[error("invalid --page-size value: {raw}")]
    InvalidPageSize { raw: String },
    #[error("invalid --rng-seed value: {raw}")]
    InvalidSeed { raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Seed,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(Command, Config),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_url: String,
    pub bind: SocketAddr,
    pub page_size: u32,
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Defaults overridden by `TRIVIA_*` variables. Unparseable values are ignored.
    fn from_env(env: &impl Fn(&str) -> Option<String>) -> Self {
        let db_url = env("TRIVIA_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let bind = env("TRIVIA_BIND")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_bind);
        let page_size = env("TRIVIA_PAGE_SIZE")
            .and_then(|value| value.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let rng_seed = env("TRIVIA_RNG_SEED").and_then(|value| value.parse().ok());
        Self {
            db_url,
            bind,
            page_size,
            rng_seed,
        }
    }

    fn apply_flags(mut self, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    self.db_url = normalize_sqlite_url(value);
                }
                "--bind" => {
                    let value = require_value(args, "--bind")?;
                    self.bind = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidBind { raw: value.clone() })?;
                }
                "--page-size" => {
                    let value = require_value(args, "--page-size")?;
                    self.page_size = value
                        .parse()
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| ArgsError::InvalidPageSize { raw: value.clone() })?;
                }
                "--rng-seed" => {
                    let value = require_value(args, "--rng-seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    self.rng_seed = Some(seed);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Parse the arguments after the program name.
///
/// The subcommand is optional and defaults to `serve`.
pub fn parse_args(
    args: impl IntoIterator<Item = String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Invocation, ArgsError> {
    let mut args = args.into_iter().peekable();
    if args.peek().is_some_and(|arg| arg.as_str() == "--help" || arg.as_str() == "-h") {
        return Ok(Invocation::Help);
    }

    let command = match args.peek().cloned() {
        Some(first) if !first.starts_with("--") => {
            let command = Command::from_arg(&first).ok_or(ArgsError::UnknownCommand(first))?;
            args.next();
            command
        }
        _ => Command::Serve,
    };

    if args.peek().is_some_and(|arg| arg.as_str() == "--help" || arg.as_str() == "-h") {
        return Ok(Invocation::Help);
    }

    let config = Config::from_env(&env).apply_flags(&mut args)?;
    Ok(Invocation::Run(command, config))
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  trivia [serve] [--db <sqlite_url>] [--bind <addr>] [--page-size <n>] [--rng-seed <n>]");
    eprintln!("  trivia seed    [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --bind {DEFAULT_BIND}");
    eprintln!("  --page-size {DEFAULT_PAGE_SIZE}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_DB_URL, TRIVIA_BIND, TRIVIA_PAGE_SIZE, TRIVIA_RNG_SEED, RUST_LOG");
}

/// Turn a relative `SQLite` path into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = std::path::Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
