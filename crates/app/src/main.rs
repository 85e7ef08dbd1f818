use std::error::Error;
use std::path::Path;

use api::AppState;
use services::{Sampler, TriviaServices};
use storage::fixtures::seed_sample;
use storage::repository::Storage;

mod config;
mod logging;

use config::{ArgsError, Command, Config, Invocation};

async fn run() -> Result<(), Box<dyn Error>> {
    let invocation = config::parse_args(std::env::args().skip(1), |key| std::env::var(key).ok())
        .inspect_err(|_| config::print_usage())?;
    let (command, config) = match invocation {
        Invocation::Help => {
            config::print_usage();
            return Ok(());
        }
        Invocation::Run(command, config) => (command, config),
    };

    logging::init()?;

    // Open + migrate SQLite in the binary so the library crates never touch the filesystem.
    prepare_sqlite_file(&config.db_url)?;

    match command {
        Command::Serve => serve(&config).await,
        Command::Seed => seed(&config).await,
    }
}

async fn serve(config: &Config) -> Result<(), Box<dyn Error>> {
    let sampler = config.rng_seed.map_or_else(Sampler::thread, Sampler::seeded);
    let services = TriviaServices::sqlite(&config.db_url, sampler, config.page_size).await?;
    let app = api::router(AppState::from(&services));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        db = %config.db_url,
        page_size = config.page_size,
        seeded = config.rng_seed.is_some(),
        "trivia api listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn seed(config: &Config) -> Result<(), Box<dyn Error>> {
    let storage = Storage::sqlite(&config.db_url).await?;
    seed_sample(&storage).await?;
    let total = storage.questions.count_questions().await?;
    tracing::info!(db = %config.db_url, total_questions = total, "sample data loaded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let invalid = || ArgsError::InvalidDbUrl {
        raw: db_url.to_owned(),
    };
    let path = db_url.strip_prefix("sqlite://").ok_or_else(invalid)?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(invalid().into());
    }

    let path = Path::new(path);
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

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
