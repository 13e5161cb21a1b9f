//! # Rendering Module
//!
//! Turns view models into styled terminal text through the templates in
//! [`super::templates`].
//!
//! Layout calculations (width, truncation, the usage bar) stay in Rust because they
//! need Unicode-aware processing. Templates pick styles and arrange lines.

use super::styles::{names, stdout_supports_color, VAULT_THEME};
use super::templates::{
    DAYS_TEMPLATE, FILES_TEMPLATE, MESSAGES_TEMPLATE, SUMMARY_TEMPLATE, TEXT_LIST_TEMPLATE,
};
use console::Term;
use docvault::api::{CmdMessage, MessageLevel};
use docvault::download::Delivery;
use docvault::error::VaultError;
use docvault::view::{DayCard, DayNavItem, PageView, RepositoryView, SummaryView};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const BAR_WIDTH: usize = 30;
pub const ACTIVE_MARKER: &str = "▸";
pub const EMPTY_DAY_MESSAGE: &str = "Nenhum documento enviado para este dia.";

#[derive(Serialize)]
struct DayLine {
    marker: String,
    marker_style: &'static str,
    heading: String,
    heading_style: &'static str,
    training: String,
    count_text: String,
    resource: Option<&'static str>,
    open_hint: &'static str,
}

#[derive(Serialize)]
struct DaysData {
    days: Vec<DayLine>,
}

#[derive(Serialize)]
struct FileLine {
    index: String,
    name: String,
    indent: String,
    details: String,
}

#[derive(Serialize)]
struct FilesData {
    title: String,
    empty: bool,
    empty_message: &'static str,
    files: Vec<FileLine>,
}

#[derive(Serialize)]
struct SummaryData {
    docs_text: String,
    total_size: String,
    bar_filled: String,
    bar_empty: String,
    bar_style: &'static str,
    percent_text: String,
    storage_text: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct TextListData<'a> {
    lines: &'a [String],
    empty_message: &'a str,
}

fn render_template<T: Serialize>(
    template: &'static str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("style", move |value: Value, name: String| -> String {
        VAULT_THEME.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("_inline", template)?;
    let mut output = env.get_template("_inline")?.render(data)?;
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn documents_text(count: usize) -> String {
    format!("{} documento(s)", count)
}

/// Renders the navigation and day cards as one block, a line pair per day.
pub fn render_days(nav: &[DayNavItem], cards: &[DayCard], use_color: bool) -> String {
    let days: Vec<DayLine> = nav
        .iter()
        .zip(cards)
        .map(|(item, card)| DayLine {
            marker: if item.active { ACTIVE_MARKER } else { " " }.to_string(),
            marker_style: names::ACTIVE,
            heading: format!("{} · {}", item.label, item.name),
            heading_style: if item.active { names::ACTIVE } else { names::NAME },
            training: item.training.clone(),
            count_text: documents_text(card.document_count),
            resource: card
                .has_external_resource
                .then_some(docvault::view::EXTERNAL_RESOURCE_LABEL),
            open_hint: if card.open_disabled {
                " · nada para baixar"
            } else {
                ""
            },
        })
        .collect();

    render_template(DAYS_TEMPLATE, &DaysData { days }, use_color).unwrap_or_else(|_| {
        nav.iter()
            .map(|item| format!("{} · {}\n", item.label, item.name))
            .collect()
    })
}

/// Renders the selected day's files, numbered from 1 in display order.
pub fn render_files(repository: &RepositoryView, use_color: bool) -> String {
    let count = repository.files.len();
    let index_width = format!("{}.", count).len();

    let files: Vec<FileLine> = repository
        .files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let index = format!("{:>width$}", format!("{}.", i + 1), width = index_width);
            let available = LINE_WIDTH.saturating_sub(index_width + 1);
            FileLine {
                name: truncate_to_width(&file.name, available),
                indent: " ".repeat(index_width + 1),
                details: format!(
                    "{} · {} · enviado em {}",
                    file.type_label, file.size_label, file.uploaded_at
                ),
                index,
            }
        })
        .collect();

    let data = FilesData {
        title: repository.title.clone(),
        empty: repository.empty,
        empty_message: EMPTY_DAY_MESSAGE,
        files,
    };

    render_template(FILES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        let mut out = format!("{}\n", repository.title);
        for file in &repository.files {
            out.push_str(&format!("{}\n", file.name));
        }
        out
    })
}

/// Splits the usage bar into its filled and empty parts.
pub fn usage_bar(percent: f64, width: usize) -> (String, String) {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_summary(summary: &SummaryView, use_color: bool) -> String {
    let (bar_filled, bar_empty) = usage_bar(summary.percent, BAR_WIDTH);
    let data = SummaryData {
        docs_text: documents_text(summary.total_docs),
        total_size: summary.total_size.clone(),
        bar_filled,
        bar_empty,
        bar_style: if summary.percent >= 100.0 {
            names::BAR_FULL
        } else {
            names::BAR
        },
        percent_text: format!("{:.1}%", summary.percent),
        storage_text: summary.storage_text.clone(),
    };

    render_template(SUMMARY_TEMPLATE, &data, use_color)
        .unwrap_or_else(|_| format!("{}\n", summary.storage_text))
}

/// The whole page: days, the selected day's files and storage usage.
pub fn render_page(page: &PageView, use_color: bool) -> String {
    [
        render_days(&page.nav, &page.cards, use_color),
        render_files(&page.repository, use_color),
        render_summary(&page.summary, use_color),
    ]
    .join("\n")
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_template(MESSAGES_TEMPLATE, &data, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn render_text_list(lines: &[String], empty_message: &str, use_color: bool) -> String {
    let data = TextListData {
        lines,
        empty_message,
    };
    render_template(TEXT_LIST_TEMPLATE, &data, use_color).unwrap_or_else(|_| lines.join("\n"))
}

/// Where saved downloads ended up; external links are already in the messages.
pub fn delivery_lines(deliveries: &[Delivery]) -> Vec<String> {
    deliveries
        .iter()
        .filter_map(|d| match d {
            Delivery::Saved(path) => Some(format!("Saved to {}", path.display())),
            Delivery::Navigated(_) => None,
        })
        .collect()
}

pub fn print_page(page: &PageView) {
    print!("{}", render_page(page, stdout_supports_color()));
}

pub fn print_days(page: &PageView) {
    print!("{}", render_days(&page.nav, &page.cards, stdout_supports_color()));
}

pub fn print_files(page: &PageView) {
    print!("{}", render_files(&page.repository, stdout_supports_color()));
}

pub fn print_summary(page: &PageView) {
    print!("{}", render_summary(&page.summary, stdout_supports_color()));
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, stdout_supports_color()));
}

pub fn print_deliveries(deliveries: &[Delivery]) {
    let lines = delivery_lines(deliveries);
    if !lines.is_empty() {
        print!("{}", render_text_list(&lines, "", stdout_supports_color()));
    }
}

pub fn print_text_list(lines: &[String], empty_message: &str) {
    print!(
        "{}",
        render_text_list(lines, empty_message, stdout_supports_color())
    );
}

pub fn print_error(error: &VaultError) {
    let use_color = Term::stderr().features().colors_supported();
    eprintln!(
        "{}",
        VAULT_THEME.apply(names::ERROR, &format!("Error: {}", error), use_color)
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault::model::{AppState, FileRecord, UploadFile};
    use docvault::view::project;

    fn page_with(day: &str, files: &[(&str, usize)]) -> PageView {
        let records = files
            .iter()
            .map(|(name, size)| {
                let upload = UploadFile::new(*name, "application/pdf", vec![0; *size]);
                FileRecord::new(day, &upload, "01/01/2026, 09:00:00")
            })
            .collect();
        project(&AppState::new(day, records), 150)
    }

    #[test]
    fn days_mark_the_active_day() {
        let page = page_with("qua", &[]);
        let output = render_days(&page.nav, &page.cards, false);
        assert!(output.contains("▸ Dia 3 · Quarta-feira"));
        assert!(output.contains("  Dia 1 · Segunda-feira"));
    }

    #[test]
    fn days_show_counts_and_external_material() {
        let page = page_with("ter", &[("a.pdf", 1)]);
        let output = render_days(&page.nav, &page.cards, false);
        assert!(output.contains("1 documento(s) · Material oficial no Google Drive"));
        assert!(output.contains("0 documento(s) · nada para baixar"));
    }

    #[test]
    fn empty_day_lists_placeholder() {
        let page = page_with("qui", &[]);
        let output = render_files(&page.repository, false);
        assert!(output.starts_with("Dia 4 · Quinta-feira\n"));
        assert!(output.contains(EMPTY_DAY_MESSAGE));
    }

    #[test]
    fn files_are_numbered_with_details() {
        let page = page_with("qua", &[("plan.pdf", 2_097_152)]);
        let output = render_files(&page.repository, false);
        assert!(output.contains("1. plan.pdf"));
        assert!(output.contains("application/pdf · 2.00 MB · enviado em 01/01/2026, 09:00:00"));
        assert!(!output.contains(EMPTY_DAY_MESSAGE));
    }

    #[test]
    fn summary_shows_usage() {
        let page = page_with("qua", &[("plan.pdf", 2_097_152)]);
        let output = render_summary(&page.summary, false);
        assert!(output.contains("1 documento(s) · 2.00 MB"));
        assert!(output.contains("2.00 MB de 150 MB"));
        assert!(output.contains("1.3%"));
    }

    #[test]
    fn usage_bar_is_capped() {
        let (filled, empty) = usage_bar(250.0, 10);
        assert_eq!(filled.chars().count(), 10);
        assert!(empty.is_empty());

        let (filled, empty) = usage_bar(50.0, 10);
        assert_eq!(filled.chars().count(), 5);
        assert_eq!(empty.chars().count(), 5);
    }

    #[test]
    fn messages_render_in_order() {
        let messages = vec![
            CmdMessage::info("first"),
            CmdMessage::warning("second"),
        ];
        assert_eq!(render_messages(&messages, false), "first\nsecond\n");
    }

    #[test]
    fn no_messages_render_nothing() {
        assert!(render_messages(&[], false).is_empty());
    }

    #[test]
    fn text_list_falls_back_to_empty_message() {
        assert_eq!(render_text_list(&[], "Nothing here.", false), "Nothing here.\n");
        let lines = vec!["a = 1".to_string()];
        assert_eq!(render_text_list(&lines, "", false), "a = 1\n");
    }

    #[test]
    fn saved_deliveries_are_listed() {
        let lines = delivery_lines(&[
            Delivery::Saved("out/plan.pdf".into()),
            Delivery::Navigated("https://example.com".into()),
        ]);
        assert_eq!(lines, vec!["Saved to out/plan.pdf".to_string()]);
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 4), "abc");
    }
}
