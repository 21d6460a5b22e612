//! Test helpers: a canned transport and an app wired to in-memory channels.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use tegdash_core::api::{ApiError, RawResponse, Transport, Url};
use tegdash_core::{Dashboard, Page};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Answers every request with the same status and body.
pub struct FixedTransport {
    status: u16,
    body: &'static str,
}

impl FixedTransport {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self { status, body }
    }
}

impl Transport for FixedTransport {
    fn get(&self, _url: &Url) -> Result<RawResponse, ApiError> {
        Ok(RawResponse {
            status: self.status,
            body: self.body.to_string(),
        })
    }
}

/// An app on the standard page. The returned receiver sees every command the
/// app dispatches; the sender feeds it responses.
pub fn test_app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let dashboard = Dashboard::new(Page::standard()).expect("standard page binds");
    let app = AppState::new(dashboard, cmd_tx, resp_rx, PathBuf::from("."));
    (app, cmd_rx, resp_tx)
}
