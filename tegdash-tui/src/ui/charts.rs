//! Chart grid: draws the live chart instances of the active view.
//!
//! Line and scatter charts use ratatui's Braille canvas. A right-hand axis is
//! rescaled onto the left one and its range is shown in the legend. Doughnuts
//! become proportion bars and floating-bar charts a sideways box plot, since
//! a terminal cell grid cannot draw either faithfully.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use tegdash_core::chart::{
    AxisPosition, ChartConfig, ChartInstance, ChartKey, ChartRegistry, ChartType, Scale, Series,
};
use tegdash_core::page::Page;

use crate::theme;

/// Title shown before a chart has been created.
fn placeholder_title(key: ChartKey) -> &'static str {
    match key {
        ChartKey::ParamsTemp => "Parameters vs temperature",
        ChartKey::LossBreakdown => "Heat losses",
        ChartKey::DailyCycle => "Daily hot-side cycle",
        ChartKey::PowerTransfer => "Power transfer",
        ChartKey::Temperature => "Recorded temperature",
        ChartKey::Energy => "Daily energy",
        ChartKey::Seasonality => "Monthly energy distribution",
        ChartKey::Battery => "Battery level",
    }
}

/// Draw up to four charts in a two-column grid. Charts whose canvas is not on
/// the page take no space.
pub fn render_grid(
    f: &mut Frame,
    area: Rect,
    page: &Page,
    registry: &ChartRegistry,
    keys: &[ChartKey],
    loading: bool,
) {
    let visible: Vec<ChartKey> = keys
        .iter()
        .copied()
        .filter(|k| page.has_canvas(k.canvas_id()))
        .collect();
    if visible.is_empty() {
        return;
    }

    let rows = visible.len().div_ceil(2);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, pair) in visible.chunks(2).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, pair.len() as u32); pair.len()])
            .split(row_areas[row]);
        for (cell, key) in cells.iter().zip(pair) {
            render_cell(f, *cell, *key, registry.get(*key), loading);
        }
    }
}

fn render_cell(
    f: &mut Frame,
    area: Rect,
    key: ChartKey,
    instance: Option<&ChartInstance>,
    loading: bool,
) {
    let title = instance
        .map(|i| i.config.title.as_str())
        .unwrap_or(placeholder_title(key));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {title}{} ", if loading { " …" } else { "" }))
        .title_style(theme::accent());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(instance) = instance else {
        let text = if loading { "Loading..." } else { "No data yet" };
        f.render_widget(Paragraph::new(Span::styled(text, theme::muted())), inner);
        return;
    };

    let config = &instance.config;
    if config.datasets.iter().all(|d| d.series.is_empty()) {
        f.render_widget(Paragraph::new(Span::styled("No data", theme::muted())), inner);
        return;
    }
    match config.chart_type {
        ChartType::Doughnut => render_proportions(f, inner, config),
        ChartType::Bar => render_box_plot(f, inner, config),
        ChartType::Line | ChartType::Scatter => render_xy(f, inner, config),
    }
}

// ── Line / scatter ─────────────────────────────────────────────────

fn span_or_unit(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    } else {
        (lo, hi)
    }
}

/// Tick text with enough decimals to tell the ends of the range apart.
pub fn tick(value: f64, span: f64) -> String {
    let decimals = if span >= 100.0 {
        0
    } else if span >= 1.0 {
        1
    } else {
        (-(span.log10().floor()) as usize + 1).min(6)
    };
    format!("{value:.decimals$}")
}

fn xy_points(series: &Series) -> Vec<(f64, f64)> {
    match series {
        Series::Values(v) => v.iter().enumerate().map(|(i, y)| (i as f64, *y)).collect(),
        Series::Points(p) => p.clone(),
        Series::Markers(m) => m
            .iter()
            .enumerate()
            .filter_map(|(i, y)| y.map(|y| (i as f64, y)))
            .collect(),
        Series::Ranges(_) => Vec::new(),
    }
}

/// Y bounds for one axis: fixed ends from the axis, the rest from the data,
/// padded 5% where the data decides.
fn axis_bounds(config: &ChartConfig, axis_id: &str) -> Option<(f64, f64)> {
    let data = config
        .datasets
        .iter()
        .filter(|d| d.y_axis == axis_id)
        .filter_map(|d| d.series.y_bounds())
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))?;
    let pad = (data.1 - data.0).abs() * 0.05;
    let axis = config.axis(axis_id);
    let lo = axis.and_then(|a| a.min).unwrap_or(data.0 - pad);
    let hi = axis.and_then(|a| a.max).unwrap_or(data.1 + pad);
    Some(span_or_unit(lo, hi))
}

fn render_xy(f: &mut Frame, area: Rect, config: &ChartConfig) {
    let Some((y_lo, y_hi)) = axis_bounds(config, "y") else {
        return;
    };

    let mut series: Vec<Vec<(f64, f64)>> = Vec::with_capacity(config.datasets.len());
    let mut names: Vec<String> = Vec::with_capacity(config.datasets.len());
    for ds in &config.datasets {
        let mut points = xy_points(&ds.series);
        let mut name = ds.label.clone();
        if ds.y_axis != "y" {
            if let Some((s_lo, s_hi)) = axis_bounds(config, ds.y_axis) {
                let scale = (y_hi - y_lo) / (s_hi - s_lo);
                for p in &mut points {
                    p.1 = y_lo + (p.1 - s_lo) * scale;
                }
                let span = s_hi - s_lo;
                name = format!("{name} [{}..{}]", tick(s_lo, span), tick(s_hi, span));
            }
        }
        series.push(points);
        names.push(name);
    }

    let x_scale = config.axis("x").map(|a| a.scale).unwrap_or(Scale::Category);
    let (x_lo, x_hi) = match x_scale {
        Scale::Category | Scale::Time => (0.0, config.labels.len().saturating_sub(1).max(1) as f64),
        Scale::Linear => series
            .iter()
            .flatten()
            .map(|p| p.0)
            .fold(None, |acc: Option<(f64, f64)>, x| match acc {
                None => Some((x, x)),
                Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
            })
            .map(|(lo, hi)| span_or_unit(lo, hi))
            .unwrap_or((0.0, 1.0)),
    };

    let datasets: Vec<Dataset> = config
        .datasets
        .iter()
        .zip(&series)
        .zip(&names)
        .map(|((ds, points), name)| {
            let (graph, marker) = match ds.kind(config.chart_type) {
                ChartType::Scatter => (GraphType::Scatter, symbols::Marker::Block),
                _ => (GraphType::Line, symbols::Marker::Braille),
            };
            let dataset = Dataset::default()
                .marker(marker)
                .graph_type(graph)
                .style(Style::default().fg(theme::hex(ds.color())))
                .data(points);
            if ds.legend {
                dataset.name(name.clone())
            } else {
                dataset
            }
        })
        .collect();

    let x_labels: Vec<Span> = match x_scale {
        Scale::Category | Scale::Time => {
            let labels = &config.labels;
            let picks = [0, labels.len() / 2, labels.len().saturating_sub(1)];
            let mut out: Vec<Span> = Vec::new();
            let mut last = None;
            for i in picks {
                if Some(i) != last {
                    if let Some(text) = labels.get(i) {
                        out.push(Span::styled(text.clone(), theme::muted()));
                    }
                    last = Some(i);
                }
            }
            out
        }
        Scale::Linear => vec![
            Span::styled(tick(x_lo, x_hi - x_lo), theme::muted()),
            Span::styled(tick(x_hi, x_hi - x_lo), theme::muted()),
        ],
    };
    let y_span = y_hi - y_lo;
    let y_labels = vec![
        Span::styled(tick(y_lo, y_span), theme::muted()),
        Span::styled(tick((y_lo + y_hi) / 2.0, y_span), theme::muted()),
        Span::styled(tick(y_hi, y_span), theme::muted()),
    ];

    let y_title = config
        .axes
        .iter()
        .find(|a| a.position == AxisPosition::Left)
        .map(|a| a.title.clone())
        .unwrap_or_default();
    let x_title = config.axis("x").map(|a| a.title.clone()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(x_title, theme::muted()))
                .style(theme::muted())
                .bounds([x_lo, x_hi])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(y_title, theme::muted()))
                .style(theme::muted())
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

// ── Doughnut ───────────────────────────────────────────────────────

/// One row per slice: share bar, percentage and raw value.
pub fn proportion_lines(config: &ChartConfig, width: usize) -> Vec<Line<'static>> {
    let Some(dataset) = config.datasets.first() else {
        return Vec::new();
    };
    let Series::Values(values) = &dataset.series else {
        return Vec::new();
    };
    let total: f64 = values.iter().filter(|v| v.is_finite()).sum();
    let label_width = config.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + 22).max(4);

    let mut lines = Vec::with_capacity(values.len() + 1);
    for (i, value) in values.iter().enumerate() {
        let share = if total > 0.0 { value / total } else { 0.0 };
        let filled = (share.clamp(0.0, 1.0) * bar_width as f64).round() as usize;
        let color = dataset
            .colors
            .get(i)
            .copied()
            .unwrap_or_else(|| dataset.color());
        let label = config.labels.get(i).cloned().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{label:>label_width$} "), theme::secondary()),
            Span::styled("█".repeat(filled), Style::default().fg(theme::hex(color))),
            Span::styled(" ".repeat(bar_width - filled), theme::muted()),
            Span::styled(format!(" {:>5.1}% ", share * 100.0), theme::text()),
            Span::styled(format!("{value:.3} W"), theme::muted()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("{:>label_width$} {total:.3} W", "Total"),
        theme::muted(),
    )));
    lines
}

fn render_proportions(f: &mut Frame, area: Rect, config: &ChartConfig) {
    let lines = proportion_lines(config, area.width as usize);
    f.render_widget(Paragraph::new(lines), area);
}

// ── Floating bars ──────────────────────────────────────────────────

/// Sideways box plot: one row per category. Thin ranges draw as `─`, wide
/// ranges as `█`, markers as `┃`.
pub fn box_plot_lines(config: &ChartConfig, width: usize) -> Vec<Line<'static>> {
    let data = config
        .datasets
        .iter()
        .filter_map(|d| d.series.y_bounds())
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)));
    let Some((data_lo, data_hi)) = data else {
        return Vec::new();
    };
    let axis = config.axis("y");
    let lo = axis.and_then(|a| a.min).unwrap_or(data_lo);
    let hi = axis.and_then(|a| a.max).unwrap_or(data_hi);
    let (lo, hi) = span_or_unit(lo, hi);

    let label_width = config.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let track = width.saturating_sub(label_width + 2).max(8);
    let column = |v: f64| -> usize {
        let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        (t * (track - 1) as f64).round() as usize
    };

    let mut lines = Vec::with_capacity(config.labels.len() + 1);
    for (row, label) in config.labels.iter().enumerate() {
        let mut cells: Vec<(char, Style)> = vec![(' ', Style::default()); track];
        for ds in &config.datasets {
            let style = Style::default().fg(theme::hex(ds.color()));
            match &ds.series {
                Series::Ranges(ranges) => {
                    if let Some(Some((a, b))) = ranges.get(row) {
                        let glyph = if ds.bar_proportion.unwrap_or(1.0) < 0.5 { '─' } else { '█' };
                        let (from, to) = (column(a.min(*b)), column(a.max(*b)));
                        for cell in &mut cells[from..=to] {
                            *cell = (glyph, style);
                        }
                    }
                }
                Series::Markers(markers) => {
                    if let Some(Some(m)) = markers.get(row) {
                        cells[column(*m)] = ('┃', style);
                    }
                }
                Series::Values(values) => {
                    if let Some(v) = values.get(row) {
                        cells[column(*v)] = ('●', style);
                    }
                }
                Series::Points(_) => {}
            }
        }
        let mut spans = vec![Span::styled(format!("{label:>label_width$} "), theme::secondary())];
        spans.extend(cells.into_iter().map(|(c, s)| Span::styled(c.to_string(), s)));
        lines.push(Line::from(spans));
    }

    let span = hi - lo;
    let left = tick(lo, span);
    let right = tick(hi, span);
    let gap = track.saturating_sub(left.chars().count() + right.chars().count());
    lines.push(Line::from(Span::styled(
        format!("{:label_width$} {left}{}{right}", "", " ".repeat(gap)),
        theme::muted(),
    )));
    lines
}

fn render_box_plot(f: &mut Frame, area: Rect, config: &ChartConfig) {
    let lines = box_plot_lines(config, area.width as usize);
    f.render_widget(Paragraph::new(lines), area);
}
