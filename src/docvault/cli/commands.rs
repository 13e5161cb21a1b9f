//! # CLI Layer
//!
//! This module is **one possible UI client** for docvault; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Every invocation replays one session: the `--day` selection is dispatched first,
//! then the gesture the subcommand maps to. Selection is not persisted between runs.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API over the on-disk stores
//! - `handle_*()`: Per-command handlers that call the API and print the result

use super::render::{
    print_days, print_deliveries, print_files, print_messages, print_page, print_summary,
    print_text_list,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use docvault::api::{CmdResult, ConfigAction, Gesture, VaultApi};
use docvault::config::VaultConfig;
use docvault::download::FsDownloadSink;
use docvault::error::{Result, VaultError};
use docvault::model::{AppState, UploadFile};
use docvault::store::blob::SqliteBlobStore;
use docvault::store::repository::Repository;
use docvault::store::slot::FileSlotStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DOCVAULT_LOG";
/// Folder under the data directory that holds the metadata slots.
pub const LOCAL_STORAGE_DIR: &str = "local-storage";

type LocalApi = VaultApi<FileSlotStore, SqliteBlobStore, FsDownloadSink>;

struct AppContext {
    api: LocalApi,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;
    ctx.api.dispatch(Gesture::SelectDay(cli.day.clone())).await?;

    match cli.command {
        None | Some(Commands::View) => handle_view(&ctx),
        Some(Commands::Days) => handle_days(&ctx),
        Some(Commands::Files) => handle_files(&ctx),
        Some(Commands::Summary) => handle_summary(&ctx),
        Some(Commands::Upload { paths }) => handle_upload(&mut ctx, &cli.day, paths).await,
        Some(Commands::Open { file }) => handle_open(&mut ctx, &file).await,
        Some(Commands::OpenDay { day_id }) => handle_open_day(&mut ctx, day_id).await,
        Some(Commands::Remove { file }) => handle_remove(&mut ctx, &file).await,
        Some(Commands::Doctor) => handle_doctor(&mut ctx).await,
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,docvault=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "docvault", "docvault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Api("Could not determine the data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.home {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };

    let config = VaultConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read config, using defaults");
        VaultConfig::default()
    });

    let out_dir = cli
        .out
        .clone()
        .or_else(|| config.download_dir.clone())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let slots = FileSlotStore::new(data_dir.join(LOCAL_STORAGE_DIR));
    let blobs = SqliteBlobStore::in_dir(&data_dir);
    let repo = Repository::open(slots, blobs)?;
    tracing::debug!(data_dir = %data_dir.display(), out_dir = %out_dir.display(), "context ready");

    Ok(AppContext {
        api: VaultApi::new(repo, config, data_dir, FsDownloadSink::new(out_dir)),
    })
}

/// Resolves a file selector: a UUID, or a 1-based position in the selected day's list.
///
/// Ids of files listed under another day are rejected; unlisted ids pass through.
fn resolve_file(state: &AppState, selector: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(selector) {
        return match state.record(&id) {
            Some(record) if record.day_id != state.selected_day_id => Err(VaultError::Api(
                format!(
                    "File {} belongs to day {}, not {}",
                    id, record.day_id, state.selected_day_id
                ),
            )),
            _ => Ok(id),
        };
    }

    let position: usize = selector
        .parse()
        .map_err(|_| VaultError::Api(format!("Invalid file selector: {}", selector)))?;

    position
        .checked_sub(1)
        .and_then(|i| state.records_for_day(&state.selected_day_id).nth(i))
        .map(|record| record.id)
        .ok_or_else(|| {
            VaultError::Api(format!(
                "No file at position {} for day {}",
                position, state.selected_day_id
            ))
        })
}

async fn read_upload(path: &Path) -> Result<UploadFile> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|e| VaultError::Api(format!("Cannot read {}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mime_type = mime_guess::from_path(path).first_raw().unwrap_or_default();
    Ok(UploadFile::new(name, mime_type, content))
}

fn print_result(result: &CmdResult) {
    print_deliveries(&result.deliveries);
    print_messages(&result.messages);
}

fn handle_view(ctx: &AppContext) -> Result<()> {
    print_page(&ctx.api.page());
    Ok(())
}

fn handle_days(ctx: &AppContext) -> Result<()> {
    print_days(&ctx.api.page());
    Ok(())
}

fn handle_files(ctx: &AppContext) -> Result<()> {
    print_files(&ctx.api.page());
    Ok(())
}

fn handle_summary(ctx: &AppContext) -> Result<()> {
    print_summary(&ctx.api.page());
    Ok(())
}

async fn handle_upload(ctx: &mut AppContext, day_id: &str, paths: Vec<PathBuf>) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(read_upload(path).await?);
    }

    let result = ctx
        .api
        .dispatch(Gesture::Upload {
            day_id: day_id.to_string(),
            files,
        })
        .await?;
    print_messages(&result.messages);
    if let Some(page) = &result.page {
        print_files(page);
    }
    Ok(())
}

async fn handle_open(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = resolve_file(ctx.api.state(), selector)?;
    let result = ctx.api.dispatch(Gesture::OpenFile(id)).await?;
    print_result(&result);
    Ok(())
}

async fn handle_open_day(ctx: &mut AppContext, day_id: String) -> Result<()> {
    let result = ctx.api.dispatch(Gesture::OpenDay(day_id)).await?;
    print_result(&result);
    Ok(())
}

async fn handle_remove(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = resolve_file(ctx.api.state(), selector)?;
    let result = ctx.api.dispatch(Gesture::RemoveFile(id)).await?;
    print_messages(&result.messages);
    if let Some(page) = &result.page {
        print_summary(page);
    }
    Ok(())
}

async fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.dispatch(Gesture::Doctor).await?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    let mut lines = Vec::new();
    if let Some(config) = &result.config {
        let keys: Vec<&str> = match key.as_deref() {
            Some(k) => vec![k],
            None => VaultConfig::KEYS.to_vec(),
        };
        for k in keys {
            if let Some(v) = config.get(k) {
                lines.push(format!("{} = {}", k, v));
            }
        }
    }
    if !lines.is_empty() {
        print_text_list(&lines, "");
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault::model::FileRecord;

    fn state_with(day: &str, names: &[&str]) -> AppState {
        let records = names
            .iter()
            .map(|n| FileRecord::new(day, &UploadFile::new(*n, "", vec![1]), "now"))
            .collect();
        AppState::new(day, records)
    }

    #[test]
    fn selector_by_position_follows_the_day_list() {
        let mut state = state_with("qua", &["b.pdf", "a.pdf"]);
        state.records.push(FileRecord::new("seg", &UploadFile::new("x", "", vec![]), "now"));

        assert_eq!(resolve_file(&state, "2").unwrap(), state.records[1].id);
    }

    #[test]
    fn selector_by_uuid_is_taken_as_is() {
        let state = state_with("qua", &[]);
        let id = Uuid::new_v4();
        assert_eq!(resolve_file(&state, &id.to_string()).unwrap(), id);
    }

    #[test]
    fn selector_by_uuid_of_another_day_fails() {
        let mut state = state_with("seg", &[]);
        let other = FileRecord::new("qua", &UploadFile::new("plan.pdf", "", vec![]), "now");
        let id = other.id;
        state.records.push(other);

        assert!(resolve_file(&state, &id.to_string()).is_err());
    }

    #[test]
    fn selector_out_of_range_or_garbage_fails() {
        let state = state_with("qua", &["a.pdf"]);
        assert!(resolve_file(&state, "0").is_err());
        assert!(resolve_file(&state, "2").is_err());
        assert!(resolve_file(&state, "first").is_err());
    }

    #[tokio::test]
    async fn upload_guesses_the_mime_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let file = read_upload(&path).await.unwrap();

        assert_eq!(file.name, "plan.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.size(), 4);
    }

    #[tokio::test]
    async fn unknown_extension_has_empty_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.zzzunknown");
        std::fs::write(&path, b"x").unwrap();

        assert_eq!(read_upload(&path).await.unwrap().mime_type, "");
    }
}
