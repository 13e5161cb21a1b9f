//! # CLI Behavior
//!
//! This is **one possible UI client** for docvault, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in `docvault`.
//!
//! ### Naked Execution (`docvault`)
//!
//! Running `docvault` with no arguments defaults to `docvault view`: the day list,
//! the first day's files and the storage summary.
//!
//! ### Selection
//!
//! `--day` picks the day that `view`, `files`, `upload`, `open` and `remove` work on.
//! Files are addressed by their position in that day's list (`1` is the most recent
//! upload) or by the id of a file in that day.
//!
//! ### Downloads
//!
//! `open` and `open-day` write files into `--out`, the `download-dir` setting, or the
//! current directory, in that order. Days backed by a slide deck print its export
//! link instead.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and format output
//! - `render`: Output formatting (day list, file list, usage bar, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling
//! - `templates`: Output templates

mod commands;
pub mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
