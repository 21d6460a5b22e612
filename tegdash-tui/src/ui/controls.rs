//! Control rows shared by both parameter panels: inline slider bars and
//! select pickers, value text read back from the page labels.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use tegdash_core::page::{ids, Page};
use tegdash_core::panel::{Control, ControlKind, ParameterPanel};
use tegdash_core::params::{DataType, ModulePreset, Scenario, SourceType};

use crate::theme;

const BAR_WIDTH: usize = 16;

/// Human name of a select option.
pub fn option_title(id: &str, wire: &str) -> String {
    let title = match id {
        ids::IN_MODULE => ModulePreset::parse(wire).map(ModulePreset::title),
        ids::IN_SOURCE => SourceType::parse(wire).map(SourceType::title),
        ids::IN_SCENARIO => Scenario::parse(wire).map(Scenario::title),
        ids::IN_DATA_TYPE => DataType::parse(wire).map(DataType::title),
        _ => None,
    };
    title.unwrap_or(wire).to_string()
}

/// The value text for a control: its page label when the page has one.
fn value_text(control: &Control, page: &Page) -> String {
    control
        .spec
        .label
        .and_then(|(label_id, _)| page.label(label_id))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| control.display())
}

pub fn slider_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

/// One line per control. `cursor` marks the focused row.
pub fn lines(panel: &ParameterPanel, page: &Page, cursor: usize, focused: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(panel.len());
    for (i, control) in panel.controls().iter().enumerate() {
        let is_active = focused && i == cursor;
        let style = if is_active {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if control.disabled {
            theme::muted().add_modifier(Modifier::DIM)
        } else {
            theme::secondary()
        };

        let mut spans = vec![Span::styled(format!("{:>18}: ", control.spec.title), style)];
        match control.spec.kind {
            ControlKind::Slider { .. } => {
                spans.push(Span::styled(
                    slider_bar(control.fraction(), BAR_WIDTH),
                    if is_active { theme::accent() } else { theme::muted() },
                ));
                spans.push(Span::styled(format!(" {}", value_text(control, page)), theme::text()));
            }
            ControlKind::Select { .. } => {
                let wire = panel.choice(control.spec.id).unwrap_or_default();
                spans.push(Span::styled(
                    format!("< {} >", option_title(control.spec.id, wire)),
                    if is_active { theme::accent_bold() } else { theme::neutral() },
                ));
            }
        }
        if control.disabled {
            spans.push(Span::styled(" (locked)", theme::muted()));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use tegdash_core::{Dashboard, ViewState};

    #[test]
    fn slider_bar_fills_proportionally() {
        assert_eq!(slider_bar(0.0, 4), "[    ]");
        assert_eq!(slider_bar(0.5, 4), "[==  ]");
        assert_eq!(slider_bar(1.5, 4), "[====]");
    }

    #[test]
    fn option_titles_fall_back_to_wire() {
        assert_eq!(option_title(ids::IN_MODULE, "sp1848"), "SP1848-27145");
        assert_eq!(option_title(ids::IN_DATA_TYPE, "tmin"), "Daily minimum");
        assert_eq!(option_title("in-other", "x"), "x");
    }

    #[test]
    fn rows_show_labels_and_locks() {
        let mut dash = Dashboard::new(Page::standard()).unwrap();
        dash.startup(ViewState::Theoretical).unwrap();
        let rows = lines(dash.panel(ViewState::Theoretical), dash.page(), 0, true);
        assert_eq!(rows.len(), 9);
        let area_row: String = rows[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(area_row.contains("16.0 cm²"));
        assert!(area_row.ends_with("(locked)"));
    }
}
