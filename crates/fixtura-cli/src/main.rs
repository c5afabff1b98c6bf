mod config;
mod registry;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fixtura_generate::{BatchPlan, FixtureGenerator, GenerationError, LocaleKey};
use fixtura_store::{
    FixtureStore, MemoryStore, PopulateStatus, PostgresStore, StoreError, populate,
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use config::{ConfigError, FixtureConfig};
use registry::{
    RunContext, RunOptions, init_console_logging, init_run_logging, start_run, write_report,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("output error: {0}")]
    Output(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("run aborted after {committed} of {planned} batches")]
    Incomplete { committed: u64, planned: u64 },
    #[error("{0} document numbers occur more than once")]
    DuplicateDocuments(i64),
}

#[derive(Parser, Debug)]
#[command(name = "fixtura", version, about = "Synthetic customer fixtures for Postgres")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clear the tables and insert fresh fixtures.
    Populate(PopulateArgs),
    /// Print generated records as JSON lines without touching a database.
    Preview(PreviewArgs),
    /// Report row counts and duplicated document numbers.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// TOML settings file.
    #[arg(long, value_name = "PATH", env = "FIXTURA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Database connection string; overrides the discrete settings.
    #[arg(long, value_name = "CONNECTION_STRING", env = "DATABASE_URL")]
    conn: Option<String>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    database: Option<String>,
    #[arg(long)]
    user: Option<String>,
    #[arg(long, env = "FIXTURA_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args, Debug)]
struct GenerationArgs {
    /// Seed for reproducible output; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Locale for names and phone numbers (en_US, pt_BR).
    #[arg(long, value_parser = parse_locale)]
    locale: Option<LocaleKey>,
}

#[derive(Args, Debug)]
struct PopulateArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    generation: GenerationArgs,
    /// Number of customers to insert.
    #[arg(long)]
    records: Option<u64>,
    /// Records per committed batch.
    #[arg(long)]
    batch_size: Option<u64>,
    /// Output directory for runs.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Run against an in-memory store instead of Postgres.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    generation: GenerationArgs,
    /// Number of records to print.
    #[arg(long, default_value_t = 5)]
    count: u64,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    connection: ConnectionArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Populate(args) => run_populate(args).await,
        Command::Preview(args) => run_preview(args),
        Command::Verify(args) => run_verify(args).await,
    }
}

async fn run_populate(args: PopulateArgs) -> Result<(), CliError> {
    let mut config = FixtureConfig::load(args.config.config.as_deref())?;
    apply_connection(&mut config, args.connection);
    apply_generation(&mut config, &args.generation);
    if let Some(records) = args.records {
        config.run.records = records;
    }
    if let Some(batch_size) = args.batch_size {
        config.run.batch_size = batch_size;
    }
    if let Some(run_dir) = args.run_dir {
        config.run.run_dir = run_dir;
    }

    let started_at = chrono::Utc::now();
    let options = config.populate_options();
    BatchPlan::new(options.records, options.batch_size)?;
    let mut generator = FixtureGenerator::new(config.generate_options(started_at.naive_utc()))?;

    let engine = if args.dry_run { "memory" } else { "postgres" };
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at,
        engine: engine.to_string(),
        run_dir: config.run.run_dir.clone(),
        options: RunOptions {
            records: config.run.records,
            batch_size: config.run.batch_size,
            seed: config.run.seed,
            locale: config.run.locale,
            dry_run: args.dry_run,
            status_weights: config.weights.status,
            document_weights: config.weights.documents,
        },
        connection: (!args.dry_run).then(|| config.database.redacted()),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    info!(event = "run_started", run_id = %run_id, engine = %engine);

    let report = if args.dry_run {
        let mut store = MemoryStore::new();
        populate(&mut store, &mut generator, options).await?
    } else {
        let connect_options = config.database.connect_options()?;
        let mut store = match PostgresStore::connect(&connect_options).await {
            Ok(store) => store,
            Err(err) => {
                error!(event = "connection_failed", error = %err);
                return Err(err.into());
            }
        };
        info!(
            event = "connected",
            connection = %config.database.redacted().redacted
        );
        let report = populate(&mut store, &mut generator, options).await?;
        store.close().await?;
        report
    };

    write_report(&run_paths, &report)?;
    info!(event = "report_written", path = %run_paths.report_path.display());

    println!(
        "{} customers in {} (seed {}, run {})",
        report.final_count,
        engine,
        report.seed,
        run_paths.root.display()
    );

    match report.status {
        PopulateStatus::Completed => {
            info!(event = "run_finished", status = "success", duration_ms = report.duration_ms);
            Ok(())
        }
        PopulateStatus::Aborted => {
            warn!(event = "run_finished", status = "aborted", duration_ms = report.duration_ms);
            Err(CliError::Incomplete {
                committed: report.batches_committed,
                planned: report.batches_planned,
            })
        }
    }
}

fn run_preview(args: PreviewArgs) -> Result<(), CliError> {
    init_console_logging()?;

    let mut config = FixtureConfig::load(args.config.config.as_deref())?;
    apply_generation(&mut config, &args.generation);

    let mut generator =
        FixtureGenerator::new(config.generate_options(chrono::Utc::now().naive_utc()))?;
    info!(event = "preview_started", count = args.count, seed = generator.seed());

    let records = generator.batch(0..args.count)?;
    let mut stdout = io::stdout().lock();
    for record in &records {
        serde_json::to_writer(&mut stdout, record)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

async fn run_verify(args: VerifyArgs) -> Result<(), CliError> {
    init_console_logging()?;

    let mut config = FixtureConfig::load(args.config.config.as_deref())?;
    apply_connection(&mut config, args.connection);

    let mut store = PostgresStore::connect(&config.database.connect_options()?).await?;
    let counts = store.counts().await?;
    store.close().await?;

    println!("{}", serde_json::to_string_pretty(&counts)?);

    if counts.duplicate_document_numbers > 0 {
        return Err(CliError::DuplicateDocuments(
            counts.duplicate_document_numbers,
        ));
    }
    info!(
        event = "verified",
        customers = counts.customers,
        documents = counts.documents
    );
    Ok(())
}

fn apply_connection(config: &mut FixtureConfig, args: ConnectionArgs) {
    let ConnectionArgs {
        conn,
        host,
        port,
        database,
        user,
        password,
    } = args;

    let settings = &mut config.database;
    if let Some(conn) = conn {
        settings.url = Some(conn);
    }
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    if let Some(database) = database {
        settings.database = database;
    }
    if let Some(user) = user {
        settings.user = user;
    }
    if let Some(password) = password {
        settings.password = password;
    }
}

fn apply_generation(config: &mut FixtureConfig, args: &GenerationArgs) {
    if args.seed.is_some() {
        config.run.seed = args.seed;
    }
    if let Some(locale) = args.locale {
        config.run.locale = locale;
    }
}

fn parse_locale(value: &str) -> Result<LocaleKey, String> {
    LocaleKey::parse(value).ok_or_else(|| {
        let known: Vec<&str> = LocaleKey::ALL.iter().map(|locale| locale.as_str()).collect();
        format!("unknown locale '{value}' (expected one of {})", known.join(", "))
    })
}
