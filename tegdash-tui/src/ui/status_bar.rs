//! Bottom status bar: key hints, last status or error message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tegdash_core::ViewState;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match app.view() {
        ViewState::Theoretical => " 1/2:tab j/k:select h/l:adjust m:module i:notes r:refresh ?:help q:quit",
        ViewState::Real => " 1/2:tab j/k:select h/l:adjust s:select d:device r:refresh ?:help q:quit",
    };
    spans.push(Span::styled(hints, theme::muted()));

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    if !app.error_history.is_empty() {
        spans.push(Span::styled(
            format!("  [e] {} error(s)", app.error_history.len()),
            theme::negative(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
