//! The five training days and lookups over them.

use crate::model::{AppState, DayDescriptor};
use once_cell::sync::Lazy;
use regex::Regex;

pub const TRAINING_DAYS: [DayDescriptor; 5] = [
    DayDescriptor {
        id: "seg",
        label: "Dia 1",
        name: "Segunda-feira",
        training: "Onboarding + Cultura",
        drive_url: Some(
            "https://docs.google.com/presentation/d/1GRIsfTt0fWHqSn4UJeVfKZWHjl1UQ7Kd/edit?usp=sharing&ouid=116387531387832367212&rtpof=true&sd=true",
        ),
    },
    DayDescriptor {
        id: "ter",
        label: "Dia 2",
        name: "Terça-feira",
        training: "Processos operacionais",
        drive_url: Some(
            "https://docs.google.com/presentation/d/16ZtCLSF5vaskonP92cXY8TlMX5tbRb4Y/edit?usp=sharing&ouid=116387531387832367212&rtpof=true&sd=true",
        ),
    },
    DayDescriptor {
        id: "qua",
        label: "Dia 3",
        name: "Quarta-feira",
        training: "Sistemas e fluxo",
        drive_url: None,
    },
    DayDescriptor {
        id: "qui",
        label: "Dia 4",
        name: "Quinta-feira",
        training: "Qualidade e compliance",
        drive_url: None,
    },
    DayDescriptor {
        id: "sex",
        label: "Dia 5",
        name: "Sexta-feira",
        training: "Projeto final + avaliação",
        drive_url: None,
    },
];

/// Filename used for every external slide-deck download.
pub const EXTERNAL_DOWNLOAD_NAME: &str = "material-terca-feira.pptx";

static PRESENTATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/presentation/d/([^/]+)").expect("static regex"));

pub fn default_day() -> &'static DayDescriptor {
    &TRAINING_DAYS[0]
}

pub fn day_by_id(id: &str) -> Option<&'static DayDescriptor> {
    TRAINING_DAYS.iter().find(|day| day.id == id)
}

/// The descriptor of the selected day.
///
/// Selection is validated whenever it changes, so an unknown id here is a bug in
/// the caller; we fall back to the first day rather than panic.
pub fn current_day(state: &AppState) -> &'static DayDescriptor {
    day_by_id(&state.selected_day_id).unwrap_or_else(default_day)
}

/// Turns a slide-deck share link into its direct pptx export link.
///
/// Links that do not carry a `/presentation/d/<id>` segment are returned unchanged.
pub fn drive_download_url(drive_url: &str) -> String {
    match PRESENTATION_ID.captures(drive_url) {
        Some(caps) => format!(
            "https://docs.google.com/presentation/d/{}/export/pptx",
            &caps[1]
        ),
        None => drive_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_ids_are_unique() {
        let mut ids: Vec<_> = TRAINING_DAYS.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn looks_up_days_by_id() {
        assert_eq!(day_by_id("qua").unwrap().label, "Dia 3");
        assert!(day_by_id("dom").is_none());
    }

    #[test]
    fn current_day_follows_selection() {
        let state = AppState::new("sex", vec![]);
        assert_eq!(current_day(&state).name, "Sexta-feira");
    }

    #[test]
    fn derives_export_link() {
        let url = "https://docs.google.com/presentation/d/ABC123/edit?usp=sharing";
        assert_eq!(
            drive_download_url(url),
            "https://docs.google.com/presentation/d/ABC123/export/pptx"
        );
    }

    #[test]
    fn keeps_unrecognised_links() {
        let url = "https://example.com/slides/ABC123";
        assert_eq!(drive_download_url(url), url);
    }

    #[test]
    fn catalog_links_resolve() {
        let url = drive_download_url(day_by_id("seg").unwrap().drive_url.unwrap());
        assert_eq!(
            url,
            "https://docs.google.com/presentation/d/1GRIsfTt0fWHqSn4UJeVfKZWHjl1UQ7Kd/export/pptx"
        );
    }
}
