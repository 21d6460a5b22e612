//! Background worker thread: every network request runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Requests
//! are executed in arrival order; the dashboard discards responses that were
//! superseded while they were in flight.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tegdash_core::{ApiClient, RefreshOutcome, RefreshRequest};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Execute(RefreshRequest),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Completed(RefreshOutcome),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    client: ApiClient,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tegdash-worker".into())
        .spawn(move || worker_loop(&client, rx, tx))
}

fn worker_loop(client: &ApiClient, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    tracing::debug!(base_url = client.base_url(), "worker started");
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Execute(request)) => {
                let view = request.view();
                let started = Instant::now();
                let outcome = request.execute(client);
                tracing::debug!(
                    ?view,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "request finished"
                );
                if tx.send(WorkerResponse::Completed(outcome)).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("worker stopped");
}
