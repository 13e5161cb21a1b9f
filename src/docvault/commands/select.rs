use crate::catalog::day_by_id;
use crate::commands::CmdResult;
use crate::error::{Result, VaultError};
use crate::model::AppState;

/// Makes `day_id` the selected day. Selection is not persisted.
pub fn run(state: &mut AppState, day_id: &str) -> Result<CmdResult> {
    let day = day_by_id(day_id).ok_or_else(|| VaultError::UnknownDay(day_id.to_string()))?;
    state.selected_day_id = day.id.to_string();
    Ok(CmdResult::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_selection() {
        let mut state = AppState::new("seg", vec![]);
        run(&mut state, "sex").unwrap();
        assert_eq!(state.selected_day_id, "sex");
    }

    #[test]
    fn unknown_day_keeps_selection() {
        let mut state = AppState::new("ter", vec![]);
        let err = run(&mut state, "sab").unwrap_err();
        assert!(matches!(err, VaultError::UnknownDay(ref d) if d == "sab"));
        assert_eq!(state.selected_day_id, "ter");
    }
}
