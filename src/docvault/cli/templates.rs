//! Output templates, kept as standalone files and embedded at compile time.
//!
//! Templates are minijinja, rendered with `trim_blocks` and `lstrip_blocks`: a line
//! holding only a block tag produces nothing, so every visible line ends in text or
//! an expression. Widths, padding and truncation are computed in `render` and handed
//! to the templates ready to print.

pub const DAYS_TEMPLATE: &str = include_str!("templates/days.tmp");
pub const FILES_TEMPLATE: &str = include_str!("templates/files.tmp");
pub const SUMMARY_TEMPLATE: &str = include_str!("templates/summary.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
