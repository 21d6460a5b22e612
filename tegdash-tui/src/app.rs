//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{Local, NaiveDateTime};

use tegdash_core::panel::ControlKind;
use tegdash_core::{ApiError, Applied, Dashboard, PageError, RefreshRequest, ViewState};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Oldest errors are dropped past this many records.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Http,
    Parse,
    Page,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Http => "HTTP",
            ErrorCategory::Parse => "PARSE",
            ErrorCategory::Page => "PAGE",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn of(error: &ApiError) -> Self {
        match error {
            ApiError::Transport(_) | ApiError::InvalidBaseUrl(_) => ErrorCategory::Network,
            ApiError::HttpStatus { .. } => ErrorCategory::Http,
            ApiError::Parse { .. } => ErrorCategory::Parse,
        }
    }
}

/// Modal overlays. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
    Help,
    Interpretation,
    DeviceForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceField {
    #[default]
    Name,
    Energy,
}

/// The device viability form.
#[derive(Debug, Clone, Default)]
pub struct DeviceForm {
    pub name: String,
    pub energy: String,
    pub field: DeviceField,
}

impl DeviceForm {
    /// Text of the field being edited.
    pub fn input_mut(&mut self) -> &mut String {
        match self.field {
            DeviceField::Name => &mut self.name,
            DeviceField::Energy => &mut self.energy,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            DeviceField::Name => DeviceField::Energy,
            DeviceField::Energy => DeviceField::Name,
        };
    }

    /// Validated device name and daily energy in Wh.
    pub fn submission(&self) -> Result<(String, f64), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Device name is required".into());
        }
        let energy: f64 = self
            .energy
            .trim()
            .parse()
            .map_err(|_| format!("'{}' is not a number", self.energy.trim()))?;
        if !energy.is_finite() || energy <= 0.0 {
            return Err("Daily energy must be greater than zero".into());
        }
        Ok((name.to_string(), energy))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub dashboard: Dashboard,

    /// Focused control row, per view.
    pub cursor: [usize; 2],

    pub overlay: Overlay,
    pub device_form: DeviceForm,

    // Channels
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    /// Requests handed to the worker and not yet answered.
    pub in_flight: usize,

    // Status
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,

    // Paths
    pub state_path: PathBuf,
}

fn view_index(view: ViewState) -> usize {
    match view {
        ViewState::Theoretical => 0,
        ViewState::Real => 1,
    }
}

impl AppState {
    pub fn new(
        dashboard: Dashboard,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            running: true,
            dashboard,
            cursor: [0; 2],
            overlay: Overlay::None,
            device_form: DeviceForm::default(),
            worker_tx,
            worker_rx,
            in_flight: 0,
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            state_path,
        }
    }

    pub fn view(&self) -> ViewState {
        self.dashboard.state()
    }

    /// Focused row in the active panel.
    pub fn cursor(&self) -> usize {
        self.cursor[view_index(self.view())]
    }

    /// Id of the focused control in the active panel.
    pub fn focused_id(&self) -> Option<&'static str> {
        self.dashboard
            .panel(self.view())
            .controls()
            .get(self.cursor())
            .map(|c| c.spec.id)
    }

    fn focused_is_select(&self) -> bool {
        self.dashboard
            .panel(self.view())
            .controls()
            .get(self.cursor())
            .is_some_and(|c| matches!(c.spec.kind, ControlKind::Select { .. }))
    }

    /// Move the focus by `delta` rows, wrapping.
    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.dashboard.panel(self.view()).len() as i32;
        if len == 0 {
            return;
        }
        let slot = &mut self.cursor[view_index(self.view())];
        *slot = (*slot as i32 + delta).rem_euclid(len) as usize;
    }

    /// Cycle the focused select, or jump to the next select when the focus
    /// is on a slider.
    pub fn cycle_select(&mut self) {
        if self.focused_is_select() {
            self.nudge_focused(1);
            return;
        }
        let controls = self.dashboard.panel(self.view()).controls();
        let len = controls.len();
        let start = self.cursor();
        let next = (1..=len)
            .map(|offset| (start + offset) % len.max(1))
            .find(|&i| matches!(controls[i].spec.kind, ControlKind::Select { .. }));
        if let Some(index) = next {
            self.cursor[view_index(self.view())] = index;
        }
    }

    /// Hand a request to the worker.
    pub fn dispatch(&mut self, request: RefreshRequest) {
        let context = request.view().title();
        match self.worker_tx.send(WorkerCommand::Execute(request)) {
            Ok(()) => self.in_flight += 1,
            Err(_) => self.push_error(
                ErrorCategory::Other,
                "Worker thread is not running".to_string(),
                context.to_string(),
            ),
        }
    }

    /// Dispatch the refresh an edit produced, or record why it failed.
    pub fn dispatch_edit(&mut self, result: Result<Option<RefreshRequest>, PageError>, context: &str) {
        match result {
            Ok(Some(request)) => self.dispatch(request),
            Ok(None) => {}
            Err(e) => self.push_error(ErrorCategory::Page, e.to_string(), context.to_string()),
        }
    }

    /// Step the focused control. Locked controls ignore the edit.
    pub fn nudge_focused(&mut self, steps: i32) {
        let Some(id) = self.focused_id() else {
            return;
        };
        if self.dashboard.panel(self.view()).is_disabled(id) {
            self.set_warning("Locked by the module preset (choose Custom to edit)");
            return;
        }
        let result = self.dashboard.nudge(id, steps);
        self.dispatch_edit(result, id);
    }

    pub fn cycle_module(&mut self) {
        let result = self.dashboard.nudge(tegdash_core::page::ids::IN_MODULE, 1);
        self.dispatch_edit(result, tegdash_core::page::ids::IN_MODULE);
    }

    /// Switch tabs. Entering the real tab refreshes it.
    pub fn activate(&mut self, tab: ViewState) {
        let result = self.dashboard.activate(tab);
        self.dispatch_edit(result, tab.title());
    }

    pub fn refresh(&mut self) {
        let view = self.view();
        let result = self.dashboard.refresh_active().map(Some);
        self.dispatch_edit(result, view.title());
    }

    /// Validate and submit the device form.
    pub fn submit_device(&mut self) {
        let (name, energy) = match self.device_form.submission() {
            Ok(submission) => submission,
            Err(message) => {
                self.set_warning(message);
                return;
            }
        };
        match self.dashboard.submit_device(&name, energy) {
            Ok(request) => {
                self.dispatch(request);
                self.device_form.clear();
                self.overlay = Overlay::None;
                self.set_status(format!("Checking {name}..."));
            }
            Err(e) => self.push_error(ErrorCategory::Page, e.to_string(), "Device form".into()),
        }
    }

    /// Apply a worker response to the dashboard and report it.
    pub fn handle_response(&mut self, resp: WorkerResponse) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match resp {
            WorkerResponse::Completed(outcome) => {
                let applied = self.dashboard.apply(outcome);
                self.report(applied);
            }
        }
    }

    fn report(&mut self, applied: Applied) {
        match applied {
            Applied::Stale => tracing::debug!("discarded superseded response"),
            Applied::Updated(view) => self.set_status(format!("{} updated", view.title())),
            Applied::Failed(view, e) => {
                self.push_error(ErrorCategory::of(&e), e.to_string(), view.title().to_string());
            }
            Applied::DeviceAdded(device) => self.set_status(format!(
                "{}: viable on {}/{} days",
                device.device, device.viable_days, device.total_days
            )),
        }
    }

    /// Record an error in the history and show it in the status bar.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        tracing::warn!(category = category.label(), %context, "{message}");
        let record = ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
