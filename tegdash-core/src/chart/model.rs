//! Backend-agnostic chart description.
//!
//! A [`ChartConfig`] carries everything a front end needs to draw a chart:
//! type, category labels, datasets and axes. Front ends only read it; the
//! chart families in [`super::families`] are the only writers.

/// Overall chart type, or a per-dataset override in mixed charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Doughnut,
    Scatter,
    Bar,
}

/// Data of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// One value per category label.
    Values(Vec<f64>),
    /// Free `(x, y)` points on linear axes.
    Points(Vec<(f64, f64)>),
    /// One floating `[low, high]` bar per category; `None` leaves a gap.
    Ranges(Vec<Option<(f64, f64)>>),
    /// One optional marker per category.
    Markers(Vec<Option<f64>>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Values(v) => v.len(),
            Series::Points(v) => v.len(),
            Series::Ranges(v) => v.len(),
            Series::Markers(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest and largest y value present, ignoring gaps.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let ys: Vec<f64> = match self {
            Series::Values(v) => v.clone(),
            Series::Points(v) => v.iter().map(|p| p.1).collect(),
            Series::Ranges(v) => v.iter().flatten().flat_map(|&(lo, hi)| [lo, hi]).collect(),
            Series::Markers(v) => v.iter().flatten().copied().collect(),
        };
        bounds(ys.into_iter())
    }
}

pub(crate) fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// One dataset of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    /// Hex colors. A single entry colors the whole dataset; doughnuts carry
    /// one per slice.
    pub colors: Vec<&'static str>,
    pub series: Series,
    /// Draw this dataset as a different type than the chart.
    pub render_as: Option<ChartType>,
    /// Id of the y axis this dataset is plotted against.
    pub y_axis: &'static str,
    /// Fill the area under a line.
    pub fill: bool,
    /// Share of the category slot a bar occupies.
    pub bar_proportion: Option<f64>,
    /// Hidden from the legend.
    pub legend: bool,
}

impl Dataset {
    pub fn new(label: impl Into<String>, color: &'static str, series: Series) -> Self {
        Self {
            label: label.into(),
            colors: vec![color],
            series,
            render_as: None,
            y_axis: "y",
            fill: false,
            bar_proportion: None,
            legend: true,
        }
    }

    pub fn color(&self) -> &'static str {
        self.colors.first().copied().unwrap_or("#cccccc")
    }

    pub fn on_axis(mut self, axis: &'static str) -> Self {
        self.y_axis = axis;
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn drawn_as(mut self, kind: ChartType) -> Self {
        self.render_as = Some(kind);
        self
    }

    pub fn bar_proportion(mut self, proportion: f64) -> Self {
        self.bar_proportion = Some(proportion);
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.legend = false;
        self
    }

    /// How this dataset is drawn inside a chart of type `chart`.
    pub fn kind(&self, chart: ChartType) -> ChartType {
        self.render_as.unwrap_or(chart)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Category,
    Linear,
    /// Dates; category labels are ISO dates.
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub id: &'static str,
    pub title: String,
    pub scale: Scale,
    pub position: AxisPosition,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Axis {
    pub fn x(scale: Scale, title: impl Into<String>) -> Self {
        Self {
            id: "x",
            title: title.into(),
            scale,
            position: AxisPosition::Bottom,
            min: None,
            max: None,
        }
    }

    pub fn y(id: &'static str, position: AxisPosition, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            scale: Scale::Linear,
            position,
            min: None,
            max: None,
        }
    }

    pub fn with_min(mut self, min: Option<f64>) -> Self {
        self.min = min;
        self
    }
}

/// Full description of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub title: String,
    /// Category labels (x values for category and time axes, slice names for
    /// doughnuts).
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub axes: Vec<Axis>,
    /// Share of each category slot used by its bars.
    pub category_proportion: Option<f64>,
}

impl ChartConfig {
    pub fn new(chart_type: ChartType, title: impl Into<String>) -> Self {
        Self {
            chart_type,
            title: title.into(),
            labels: Vec::new(),
            datasets: Vec::new(),
            axes: Vec::new(),
            category_proportion: None,
        }
    }

    pub fn axis(&self, id: &str) -> Option<&Axis> {
        self.axes.iter().find(|a| a.id == id)
    }

    pub fn axis_mut(&mut self, id: &str) -> Option<&mut Axis> {
        self.axes.iter_mut().find(|a| a.id == id)
    }

    pub fn dataset_mut(&mut self, index: usize) -> Option<&mut Dataset> {
        self.datasets.get_mut(index)
    }
}

/// A live chart bound to a canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    pub canvas: &'static str,
    pub config: ChartConfig,
    /// Bumped on every in-place update; front ends redraw when it changes.
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_bounds_skip_gaps_and_non_finite() {
        let ranges = Series::Ranges(vec![Some((1.0, 4.0)), None, Some((0.5, 2.0))]);
        assert_eq!(ranges.y_bounds(), Some((0.5, 4.0)));
        let markers = Series::Markers(vec![None, None]);
        assert_eq!(markers.y_bounds(), None);
        let values = Series::Values(vec![f64::NAN, 3.0]);
        assert_eq!(values.y_bounds(), Some((3.0, 3.0)));
    }

    #[test]
    fn dataset_kind_falls_back_to_chart_type() {
        let line = Dataset::new("a", "#ffffff", Series::Values(vec![]));
        assert_eq!(line.kind(ChartType::Scatter), ChartType::Scatter);
        let drawn = line.drawn_as(ChartType::Line);
        assert_eq!(drawn.kind(ChartType::Scatter), ChartType::Line);
    }
}
