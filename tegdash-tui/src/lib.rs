//! TEG Dashboard TUI: two-tab terminal interface over the simulation API.
//!
//! Tabs:
//! 1. Theoretical: module parameters, result cards, four simulation charts
//! 2. Real data: scenario and source selects, four recorded-data charts,
//!    device viability checks
//!
//! Requests run on a background worker; the main thread owns all state.

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

#[cfg(test)]
mod test_helpers;
