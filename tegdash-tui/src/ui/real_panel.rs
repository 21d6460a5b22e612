//! Real-data view side column: controls and the device viability list.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use tegdash_core::page::ids;
use tegdash_core::ViewState;

use crate::app::{AppState, Overlay};
use crate::theme::{self, Theme};
use crate::ui::controls::{self, slider_bar};

const GAUGE_WIDTH: usize = 30;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let dashboard = &app.dashboard;
    let page = dashboard.page();
    let mut lines = controls::lines(
        dashboard.panel(ViewState::Real),
        page,
        app.cursor(),
        app.overlay == Overlay::None,
    );

    if let Some(cards) = page.container(ids::DEVICE_CONTAINER) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Devices ", theme::accent_bold()),
            Span::styled("[d] add", theme::muted()),
        ]));
        if cards.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No devices checked yet.",
                theme::muted(),
            )));
        }
        let palette = Theme::default();
        let devices = dashboard.real().devices();
        for (i, card) in cards.iter().enumerate() {
            let percentage = devices.get(i).map(|d| d.percentage).unwrap_or(0.0);
            let color = Style::default().fg(palette.viability_color(percentage));
            lines.push(Line::from(Span::styled(format!("  {card}"), theme::text())));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(slider_bar(percentage / 100.0, GAUGE_WIDTH), color),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
