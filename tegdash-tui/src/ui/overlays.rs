//! Overlay widgets: error history, help, chart notes, device form.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use tegdash_core::page::ids;

use crate::app::{AppState, DeviceField};
use crate::theme;
use crate::ui::centered_rect;

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Keyboard reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys [Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1 / 2", "Theoretical / Real data tab");
    key(&mut lines, "Tab", "Switch tab");
    key(&mut lines, "r", "Refresh the active tab");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "?", "This help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Parameters");
    key(&mut lines, "j / k", "Focus next / previous control");
    key(&mut lines, "h / l", "Decrease / increase by one step");
    key(&mut lines, "H / L", "Decrease / increase by ten steps");
    key(&mut lines, "s", "Cycle the focused select, or jump to one");
    lines.push(Line::from(""));

    section(&mut lines, "Theoretical");
    key(&mut lines, "m", "Next module preset");
    key(&mut lines, "i", "Chart interpretation notes");
    lines.push(Line::from(""));

    section(&mut lines, "Real data");
    key(&mut lines, "d", "Check a device against the recorded days");
    lines.push(Line::from(""));

    section(&mut lines, "Module presets");
    key(&mut lines, "SP1848-27145", "16 cm², 3.8 mm; geometry locked");
    key(&mut lines, "Generic", "1 cm², 4.0 mm; geometry locked");
    key(&mut lines, "Custom", "All fields editable");

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>14}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}

/// Plain-language notes for the four theoretical charts.
pub fn render_interpretation(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Interpretation [Esc]close ")
        .title_style(theme::accent_bold());

    let page = app.dashboard.page();
    let mut lines: Vec<Line> = Vec::new();
    for (id, title) in [
        (ids::TXT_PARAMS_TEMP, "Parameters vs temperature"),
        (ids::TXT_LOSSES, "Heat losses"),
        (ids::TXT_CYCLE, "Daily cycle"),
        (ids::TXT_TRANSFER, "Power transfer"),
    ] {
        let Some(text) = page.label(id) else {
            continue;
        };
        lines.push(Line::from(Span::styled(title, theme::accent_bold())));
        if text.is_empty() {
            lines.push(Line::from(Span::styled("Waiting for a simulation.", theme::muted())));
        } else {
            lines.push(Line::from(Span::styled(text, theme::secondary())));
        }
        lines.push(Line::from(""));
    }

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Device viability form.
pub fn render_device_form(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Check Device [Tab]field [Enter]submit [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let form = &app.device_form;
    let field = |label: &'static str, value: &str, active: bool| {
        let style = if active { theme::accent_bold() } else { theme::secondary() };
        Line::from(vec![
            Span::styled(format!("{label:>20}: "), theme::muted()),
            Span::styled(value.to_string(), style),
            Span::styled(if active { "_" } else { "" }, theme::accent()),
        ])
    };

    let text = vec![
        Line::from(""),
        field("Device name", &form.name, form.field == DeviceField::Name),
        field("Energy per day (Wh)", &form.energy, form.field == DeviceField::Energy),
        Line::from(""),
        Line::from(Span::styled(
            "Uses the scenario, source, data type, load and hours of the Real data tab.",
            theme::muted(),
        )),
    ];

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}
