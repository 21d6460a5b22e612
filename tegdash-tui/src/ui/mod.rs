//! Top-level UI layout: tab bar, active view, status bar.

pub mod charts;
pub mod controls;
pub mod overlays;
pub mod real_panel;
pub mod status_bar;
pub mod tabs;
pub mod theoretical_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use tegdash_core::chart::ChartKey;
use tegdash_core::ViewState;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Width of the parameter column.
const SIDE_WIDTH: u16 = 52;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: tab bar + body + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    tabs::render(f, chunks[0], app);
    draw_view(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Overlays on top.
    let main_area = chunks[1];
    match app.overlay {
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::Interpretation => overlays::render_interpretation(f, main_area, app),
        Overlay::DeviceForm => overlays::render_device_form(f, main_area, app),
        Overlay::None => {}
    }
}

/// Parameter column on the left, chart grid on the right. Only the active
/// view is drawn.
fn draw_view(f: &mut Frame, area: Rect, app: &AppState) {
    let view = app.view();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDE_WIDTH), Constraint::Min(20)])
        .split(area);

    let focused = app.overlay == Overlay::None;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", view.title()))
        .title_style(theme::panel_title(focused));
    let inner = block.inner(columns[0]);
    f.render_widget(block, columns[0]);

    let dashboard = &app.dashboard;
    let loading = dashboard.is_loading(view);
    match view {
        ViewState::Theoretical => {
            theoretical_panel::render(f, inner, app);
            charts::render_grid(
                f,
                columns[1],
                dashboard.page(),
                &dashboard.theoretical().charts,
                &ChartKey::THEORETICAL,
                loading,
            );
        }
        ViewState::Real => {
            real_panel::render(f, inner, app);
            charts::render_grid(
                f,
                columns[1],
                dashboard.page(),
                &dashboard.real().charts,
                &ChartKey::REAL,
                loading,
            );
        }
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
