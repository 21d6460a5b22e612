//! View controller: the two tabs, their refresh requests and the page they
//! write to.
//!
//! The controller never performs I/O. Edits produce [`RefreshRequest`]s; the
//! caller executes them (on a worker thread in the TUI, inline in tests and
//! the CLI) and hands the [`RefreshOutcome`] back to [`Dashboard::apply`].

pub mod real;
pub mod theoretical;

use serde::{Deserialize, Serialize};

use crate::api::models::{DeviceViability, RealAnalysisResult};
use crate::api::{ApiClient, ApiError};
use crate::page::{ids, Page, PageError};
use crate::panel::{Change, ParameterPanel};
use crate::params::{DeviceQuery, ModulePreset};

pub use real::{RealRequest, RealView};
pub use theoretical::{TheoreticalData, TheoreticalRequest, TheoreticalView};

/// Which tab is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Theoretical,
    Real,
}

impl ViewState {
    pub const ALL: [ViewState; 2] = [ViewState::Theoretical, ViewState::Real];

    pub fn title(self) -> &'static str {
        match self {
            ViewState::Theoretical => "Theoretical",
            ViewState::Real => "Real data",
        }
    }
}

/// Style of a tab button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStyle {
    Active,
    Inactive,
}

/// Work for the network side.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshRequest {
    Theoretical(TheoreticalRequest),
    Real(RealRequest),
    Device(DeviceQuery),
}

/// A finished request, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Theoretical(TheoreticalRequest, Result<TheoreticalData, ApiError>),
    Real(RealRequest, Result<RealAnalysisResult, ApiError>),
    Device(DeviceQuery, Result<DeviceViability, ApiError>),
}

impl RefreshRequest {
    /// Perform the request. Blocks on the network.
    pub fn execute(self, client: &ApiClient) -> RefreshOutcome {
        match self {
            RefreshRequest::Theoretical(request) => {
                let result = request.execute(client);
                RefreshOutcome::Theoretical(request, result)
            }
            RefreshRequest::Real(request) => {
                let result = client.analyze(&request.params);
                RefreshOutcome::Real(request, result)
            }
            RefreshRequest::Device(query) => {
                let result = client.device_viability(&query);
                RefreshOutcome::Device(query, result)
            }
        }
    }

    pub fn view(&self) -> ViewState {
        match self {
            RefreshRequest::Theoretical(_) => ViewState::Theoretical,
            RefreshRequest::Real(_) | RefreshRequest::Device(_) => ViewState::Real,
        }
    }
}

/// What applying an outcome did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A newer request for the same view was issued; nothing changed.
    Stale,
    Updated(ViewState),
    Failed(ViewState, ApiError),
    DeviceAdded(DeviceViability),
}

/// The whole dashboard: page, both tabs and the active view.
#[derive(Debug, Clone)]
pub struct Dashboard {
    state: ViewState,
    page: Page,
    theoretical: TheoreticalView,
    real: RealView,
}

impl Dashboard {
    /// Bind both tabs to `page`. Fails if the page lacks a required input.
    pub fn new(page: Page) -> Result<Self, PageError> {
        let theoretical = TheoreticalView::new(&page)?;
        let real = RealView::new(&page)?;
        Ok(Self {
            state: ViewState::Theoretical,
            page,
            theoretical,
            real,
        })
    }

    /// Lock the geometry for the current module, fill every label and issue
    /// the initial refreshes. Current values are kept, so restored state
    /// survives. The real tab is refreshed only if it starts active.
    pub fn startup(&mut self, initial: ViewState) -> Result<Vec<RefreshRequest>, PageError> {
        let preset = self.theoretical.module()?;
        self.theoretical.lock_geometry(preset)?;
        self.theoretical.panel.update_labels(&mut self.page);
        self.real.panel.update_labels(&mut self.page);

        let mut requests = vec![self.refresh_theoretical()?];
        if let Some(request) = self.activate(initial)? {
            requests.push(request);
        }
        Ok(requests)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn theoretical(&self) -> &TheoreticalView {
        &self.theoretical
    }

    pub fn real(&self) -> &RealView {
        &self.real
    }

    pub fn panel(&self, view: ViewState) -> &ParameterPanel {
        match view {
            ViewState::Theoretical => &self.theoretical.panel,
            ViewState::Real => &self.real.panel,
        }
    }

    pub fn tab_style(&self, tab: ViewState) -> TabStyle {
        if tab == self.state {
            TabStyle::Active
        } else {
            TabStyle::Inactive
        }
    }

    pub fn is_visible(&self, view: ViewState) -> bool {
        view == self.state
    }

    pub fn is_loading(&self, view: ViewState) -> bool {
        match view {
            ViewState::Theoretical => self.theoretical.is_loading(),
            ViewState::Real => self.real.is_loading(),
        }
    }

    /// Switch tabs. Entering the real tab always refreshes it.
    pub fn activate(&mut self, tab: ViewState) -> Result<Option<RefreshRequest>, PageError> {
        self.state = tab;
        match tab {
            ViewState::Theoretical => Ok(None),
            ViewState::Real => self.refresh_real().map(Some),
        }
    }

    pub fn refresh_theoretical(&mut self) -> Result<RefreshRequest, PageError> {
        let source = self.real.source()?;
        Ok(RefreshRequest::Theoretical(
            self.theoretical.begin_refresh(source)?,
        ))
    }

    pub fn refresh_real(&mut self) -> Result<RefreshRequest, PageError> {
        Ok(RefreshRequest::Real(self.real.begin_refresh()?))
    }

    /// Refresh whichever view is active.
    pub fn refresh_active(&mut self) -> Result<RefreshRequest, PageError> {
        match self.state {
            ViewState::Theoretical => self.refresh_theoretical(),
            ViewState::Real => self.refresh_real(),
        }
    }

    fn owner(&self, id: &str) -> Result<ViewState, PageError> {
        if self.theoretical.panel.control(id).is_some() {
            Ok(ViewState::Theoretical)
        } else if self.real.panel.control(id).is_some() {
            Ok(ViewState::Real)
        } else {
            Err(PageError::MissingElement(id.to_string()))
        }
    }

    /// Mirror changed controls into their labels and issue one refresh for
    /// the owning view.
    fn changed(
        &mut self,
        view: ViewState,
        changes: &[Change],
    ) -> Result<Option<RefreshRequest>, PageError> {
        if changes.is_empty() {
            return Ok(None);
        }
        let panel = match view {
            ViewState::Theoretical => &self.theoretical.panel,
            ViewState::Real => &self.real.panel,
        };
        for change in changes {
            panel.update_label(&mut self.page, *change);
        }
        match view {
            ViewState::Theoretical => self.refresh_theoretical().map(Some),
            ViewState::Real => self.refresh_real().map(Some),
        }
    }

    /// User edit of a slider.
    pub fn set_number(&mut self, id: &str, value: f64) -> Result<Option<RefreshRequest>, PageError> {
        let view = self.owner(id)?;
        let change = match view {
            ViewState::Theoretical => self.theoretical.panel.set_number(id, value)?,
            ViewState::Real => self.real.panel.set_number(id, value)?,
        };
        self.changed(view, &change.into_iter().collect::<Vec<_>>())
    }

    /// Move a slider by whole steps, or cycle a select.
    pub fn nudge(&mut self, id: &str, steps: i32) -> Result<Option<RefreshRequest>, PageError> {
        if id == ids::IN_MODULE {
            return self.cycle_module(steps);
        }
        let view = self.owner(id)?;
        let change = match view {
            ViewState::Theoretical => self.theoretical.panel.nudge(id, steps)?,
            ViewState::Real => self.real.panel.nudge(id, steps)?,
        };
        self.changed(view, &change.into_iter().collect::<Vec<_>>())
    }

    /// Select an option by wire value. Choosing a module preset rewrites the
    /// dependent controls first.
    pub fn select(&mut self, id: &str, option: &str) -> Result<Option<RefreshRequest>, PageError> {
        if id == ids::IN_MODULE {
            let preset = ModulePreset::parse(option)
                .ok_or_else(|| PageError::MissingElement(format!("{id}[{option}]")))?;
            return self.select_module(preset);
        }
        let view = self.owner(id)?;
        let change = match view {
            ViewState::Theoretical => self.theoretical.panel.select(id, option)?,
            ViewState::Real => self.real.panel.select(id, option)?,
        };
        self.changed(view, &change.into_iter().collect::<Vec<_>>())
    }

    pub fn select_module(&mut self, preset: ModulePreset) -> Result<Option<RefreshRequest>, PageError> {
        let changes = self.theoretical.select_module(preset)?;
        self.changed(ViewState::Theoretical, &changes)
    }

    fn cycle_module(&mut self, direction: i32) -> Result<Option<RefreshRequest>, PageError> {
        let current = self.theoretical.module()?;
        let all = ModulePreset::ALL;
        let index = all.iter().position(|p| *p == current).unwrap_or(0) as i32;
        let next = all[(index + direction).rem_euclid(all.len() as i32) as usize];
        self.select_module(next)
    }

    /// Submit the device form.
    pub fn submit_device(&self, name: &str, energy_wh: f64) -> Result<RefreshRequest, PageError> {
        Ok(RefreshRequest::Device(self.real.device_query(name, energy_wh)?))
    }

    /// Write a finished request into the page and charts.
    pub fn apply(&mut self, outcome: RefreshOutcome) -> Applied {
        match outcome {
            RefreshOutcome::Theoretical(request, result) => {
                if !self.theoretical.apply(&mut self.page, &request, &result) {
                    return Applied::Stale;
                }
                match result {
                    Ok(_) => Applied::Updated(ViewState::Theoretical),
                    Err(e) => Applied::Failed(ViewState::Theoretical, e),
                }
            }
            RefreshOutcome::Real(request, result) => {
                if !self.real.apply(&mut self.page, &request, &result) {
                    return Applied::Stale;
                }
                match result {
                    Ok(_) => Applied::Updated(ViewState::Real),
                    Err(e) => Applied::Failed(ViewState::Real, e),
                }
            }
            RefreshOutcome::Device(_, result) => {
                self.real.apply_device(&mut self.page, &result);
                match result {
                    Ok(device) => Applied::DeviceAdded(device),
                    Err(e) => Applied::Failed(ViewState::Real, e),
                }
            }
        }
    }
}
