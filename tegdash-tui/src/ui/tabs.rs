//! Tab bar: one button per view, the active one highlighted.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tegdash_core::view::TabStyle;
use tegdash_core::ViewState;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans = vec![Span::styled(" TEG Dashboard ", theme::accent_bold())];
    for (i, view) in ViewState::ALL.iter().enumerate() {
        let style = match app.dashboard.tab_style(*view) {
            TabStyle::Active => theme::accent_bold().add_modifier(Modifier::REVERSED),
            TabStyle::Inactive => theme::muted(),
        };
        let busy = if app.dashboard.is_loading(*view) { " …" } else { "" };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} {}{busy} ", i + 1, view.title()), style));
    }
    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!("  {} request(s) in flight", app.in_flight),
            theme::neutral(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
