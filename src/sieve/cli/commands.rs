//! # CLI Layer
//!
//! The only place that knows about terminal I/O, logging setup and exit codes.
//!
//! ## Structure
//!
//! - `run()`: parse arguments and dispatch (called by `main.rs`)
//! - `init_context()`: build the [`AppContext`] from configuration
//! - `handle_*()`: per-command handlers that call the API and print results
//!
//! Output formatting lives in [`super::print`].

use super::print::{
    print_columns, print_loaded, print_messages, print_operators, print_records,
    print_records_json, print_values, print_views,
};
use super::setup::{Cli, Commands, ViewCommands};
use clap::Parser;
use sieve::api::SieveApi;
use sieve::commands::apply::ConditionSource;
use sieve::config::SieveConfig;
use sieve::engine::unique_values;
use sieve::error::{Result, SieveError};
use sieve::model::Condition;
use sieve::operators::OPERATORS;
use sieve::records::{infer_columns, json_field, load_records};
use sieve::session::FilterSession;
use sieve::store::fs_backend::FsBackend;
use sieve::store::validate_storage_key;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SIEVE_LOG";

struct AppContext {
    api: SieveApi<FsBackend>,
    key: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Operators are static; no storage needed
    if let Commands::Operators = cli.command {
        print_operators(OPERATORS);
        return Ok(());
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Apply {
            records,
            conditions,
            view,
            all,
            json,
        } => handle_apply(&ctx, &records, conditions, view, all, json),
        Commands::Values { records, field } => handle_values(&records, &field),
        Commands::Fields { records } => handle_fields(&records),
        // handled before context init
        Commands::Operators => Ok(()),
        Commands::View(cmd) => match cmd {
            ViewCommands::List => handle_view_list(&ctx),
            ViewCommands::Save {
                name,
                conditions,
                records,
            } => handle_view_save(&ctx, &name, conditions, records.as_deref()),
            ViewCommands::Show { selector } => handle_view_show(&ctx, &selector),
            ViewCommands::Delete { selector } => handle_view_delete(&ctx, &selector),
            ViewCommands::Default { selector } => handle_view_default(&ctx, &selector),
            ViewCommands::ClearDefault => handle_view_clear_default(&ctx),
        },
        Commands::Keys => handle_keys(&ctx),
    }
}

/// Logging goes to stderr so stdout stays parseable. `SIEVE_LOG` wins over
/// `RUST_LOG`; `--verbose` raises the fallback level to debug.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "sieve=debug" } else { "warn" };
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(filter)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = SieveConfig::load(&cwd)?;
    let key = cli.key.clone().unwrap_or_else(|| config.storage_key.clone());
    validate_storage_key(&key)?;

    let root = config.filters_dir();
    tracing::debug!(root = %root.display(), key = %key, "Using saved-view store");

    let api = SieveApi::new(FsBackend::new(root)).with_strict_operators(config.strict_operators);
    Ok(AppContext { api, key })
}

/// Parse `field:operator:value`. The value may itself contain `:`.
fn parse_condition(raw: &str) -> Result<Condition> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(operator), Some(value)) if !field.is_empty() && !operator.is_empty() => {
            Ok(Condition::new(field, operator, value))
        }
        _ => Err(SieveError::Api(format!(
            "invalid condition '{}', expected field:operator:value",
            raw
        ))),
    }
}

fn parse_conditions(raw: &[String]) -> Result<Vec<Condition>> {
    raw.iter().map(|r| parse_condition(r)).collect()
}

fn handle_apply(
    ctx: &AppContext,
    path: &Path,
    raw_conditions: Vec<String>,
    view: Option<String>,
    all: bool,
    json: bool,
) -> Result<()> {
    let records = load_records(path)?;
    let source = if !raw_conditions.is_empty() {
        ConditionSource::Explicit(parse_conditions(&raw_conditions)?)
    } else if let Some(selector) = view {
        ConditionSource::View(selector)
    } else if all {
        ConditionSource::All
    } else {
        ConditionSource::Default
    };

    let applied = ctx.api.apply(&ctx.key, &records, source, json_field)?;
    print_messages(&applied.messages);

    if json {
        print_records_json(&applied.records)?;
    } else {
        print_records(&infer_columns(&records), &applied.records);
    }
    Ok(())
}

fn handle_values(path: &Path, field: &str) -> Result<()> {
    let records = load_records(path)?;
    let values = unique_values(&records, field, json_field);
    if values.is_empty() {
        eprintln!("No values for '{}'", field);
    }
    print_values(&values);
    Ok(())
}

fn handle_fields(path: &Path) -> Result<()> {
    let records = load_records(path)?;
    print_columns(&infer_columns(&records));
    Ok(())
}

fn handle_view_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_views(&ctx.key)?;
    print_views(&result.views);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_save(
    ctx: &AppContext,
    name: &str,
    raw_conditions: Vec<String>,
    records: Option<&Path>,
) -> Result<()> {
    let mut conditions = parse_conditions(&raw_conditions)?;
    if let Some(path) = records {
        let records = load_records(path)?;
        let session = FilterSession::with_conditions(infer_columns(&records), conditions)?;
        conditions = session.conditions().to_vec();
    }

    let result = ctx.api.save_view(&ctx.key, name, conditions)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_show(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.load_view(&ctx.key, selector)?;
    if let (Some(view), Some(loaded)) = (result.views.first(), result.loaded.as_ref()) {
        print_loaded(view, loaded);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_delete(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.delete_view(&ctx.key, selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_default(ctx: &AppContext, selector: &str) -> Result<()> {
    let result = ctx.api.toggle_default(&ctx.key, selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_clear_default(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.set_default(&ctx.key, None)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_keys(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.storage_keys()?;
    if result.keys.is_empty() {
        eprintln!("No saved views yet");
    }
    for key in &result.keys {
        let marker = if *key == ctx.key { "*" } else { " " };
        println!("{} {}", marker, key);
    }
    Ok(())
}
