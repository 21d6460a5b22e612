//! App state persistence: JSON save/load across restarts.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tegdash_core::page::ids;
use tegdash_core::panel::ControlValue;
use tegdash_core::ViewState;

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Tab open at exit. `None` defers to the configured initial tab.
    pub active_tab: Option<ViewState>,
    /// Slider values by input id.
    pub numbers: BTreeMap<String, f64>,
    /// Select values (wire names) by input id.
    pub choices: BTreeMap<String, String>,
    pub cursor: [usize; 2],
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    let mut state = PersistedState {
        active_tab: Some(app.dashboard.state()),
        cursor: app.cursor,
        ..Default::default()
    };
    for view in ViewState::ALL {
        let panel = app.dashboard.panel(view);
        for control in panel.controls() {
            let id = control.spec.id.to_string();
            match control.value {
                ControlValue::Number(v) => {
                    state.numbers.insert(id, v);
                }
                ControlValue::Choice(_) => {
                    if let Ok(wire) = panel.choice(control.spec.id) {
                        state.choices.insert(id, wire.to_string());
                    }
                }
            }
        }
    }
    state
}

/// Apply persisted state to AppState, before startup. The module preset is
/// restored first so locked fields keep their preset values. Entries for
/// controls that no longer exist are skipped.
///
/// Returns the tab to open, if one was saved.
pub fn apply(app: &mut AppState, state: PersistedState) -> Option<ViewState> {
    if let Some(module) = state.choices.get(ids::IN_MODULE) {
        if let Err(e) = app.dashboard.select(ids::IN_MODULE, module) {
            tracing::warn!(error = %e, "ignoring persisted module");
        }
    }
    for (id, option) in state.choices.iter().filter(|(id, _)| *id != ids::IN_MODULE) {
        if let Err(e) = app.dashboard.select(id, option) {
            tracing::warn!(error = %e, "ignoring persisted choice");
        }
    }
    for (id, value) in &state.numbers {
        if let Err(e) = app.dashboard.set_number(id, *value) {
            tracing::warn!(error = %e, "ignoring persisted value");
        }
    }
    for view in ViewState::ALL {
        let index = match view {
            ViewState::Theoretical => 0,
            ViewState::Real => 1,
        };
        let len = app.dashboard.panel(view).len();
        app.cursor[index] = state.cursor[index].min(len.saturating_sub(1));
    }
    state.active_tab
}
