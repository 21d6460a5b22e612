//! Theoretical view side column: controls, result cards and the error
//! container.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use tegdash_core::page::{ids, Page};
use tegdash_core::ViewState;

use crate::app::AppState;
use crate::theme;
use crate::ui::controls;

/// Result cards: label element, title, unit.
const CARDS: [(&str, &str, &str); 7] = [
    (ids::RES_ENERGY, "Energy per cycle", "Wh"),
    (ids::RES_DELTA_T, "ΔT", "°C"),
    (ids::RES_VOLTAGE, "Load voltage", "V"),
    (ids::RES_CURRENT, "Current", "mA"),
    (ids::RES_POWER, "Power", "mW"),
    (ids::RES_CARNOT, "Carnot efficiency", "%"),
    (ids::RES_TEG, "TEG efficiency", "%"),
];

/// Card lines for whichever result labels the page has.
pub fn card_lines(page: &Page) -> Vec<Line<'static>> {
    CARDS
        .iter()
        .filter_map(|(id, title, unit)| {
            let value = page.label(id)?;
            let shown = if value.is_empty() { "--" } else { value };
            Some(Line::from(vec![
                Span::styled(format!("{title:>18}: "), theme::muted()),
                Span::styled(shown.to_string(), theme::accent_bold()),
                Span::styled(format!(" {unit}"), theme::secondary()),
            ]))
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let dashboard = &app.dashboard;
    let page = dashboard.page();
    let mut lines = controls::lines(
        dashboard.panel(ViewState::Theoretical),
        page,
        app.cursor(),
        app.overlay == crate::app::Overlay::None,
    );

    let cards = card_lines(page);
    if !cards.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Results", theme::accent_bold())));
        lines.extend(cards);
    }

    if let Some(blocks) = page.container(ids::THEORY_RESULTS) {
        if !blocks.is_empty() {
            lines.push(Line::from(""));
            for block in blocks {
                lines.push(Line::from(Span::styled(block.clone(), theme::negative())));
            }
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
