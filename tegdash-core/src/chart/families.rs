//! The dashboard's chart families.
//!
//! Each family knows how to build its full configuration the first time and
//! how to mutate an existing configuration for new data. What an update may
//! touch differs per family: the daily cycle only swaps values, time series
//! replace labels and datasets, the seasonality chart replaces data and
//! axis options together.

use chrono::NaiveDate;

use super::model::{Axis, AxisPosition, ChartConfig, ChartType, Dataset, Scale, Series};
use crate::api::models::{
    BatteryPoint, DailyCycle, EnergyPoint, SeasonalityPoint, TemperaturePoint, TransferPoint,
};
use crate::sweep::SweepPoint;

pub mod colors {
    pub const ALPHA: &str = "#fbbf24";
    pub const RESISTANCE: &str = "#818cf8";
    pub const RADIATION: &str = "#ff6b6b";
    pub const CONDUCTION: &str = "#fbbf24";
    pub const HOT_SIDE: &str = "#f87171";
    pub const TRANSFER_CURVE: &str = "#a78bfa";
    pub const OPERATING_POINT: &str = "#fbbf24";
    pub const TAVG: &str = "#38bdf8";
    pub const TMIN: &str = "#818cf8";
    pub const ENERGY: &str = "#fbbf24";
    pub const BATTERY: &str = "#34d399";
    pub const RANGE: &str = "#a78bfa";
    pub const BOX: &str = "#8b5cf6";
    pub const MEDIAN: &str = "#fbbf24";
}

/// Builds and updates one kind of chart.
pub trait ChartFamily {
    type Input: ?Sized;

    /// Full configuration for a new chart.
    fn create(input: &Self::Input) -> ChartConfig;

    /// Apply new data to an existing chart.
    fn update(config: &mut ChartConfig, input: &Self::Input);
}

// ── Parameter vs temperature ───────────────────────────────────────

/// Seebeck coefficient (left axis) and internal resistance (right axis) over
/// the temperature sweep.
pub struct ParamsTempChart;

impl ParamsTempChart {
    /// Left axis bounds: 5% below the smallest alpha, 5% above the largest.
    pub fn alpha_bounds(points: &[SweepPoint]) -> Option<(f64, f64)> {
        super::model::bounds(points.iter().map(|p| p.alpha)).map(|(lo, hi)| (lo * 0.95, hi * 1.05))
    }

    fn labels(points: &[SweepPoint]) -> Vec<String> {
        points
            .iter()
            .map(|p| format!("{}°C", crate::labels::raw_value(p.temp_c)))
            .collect()
    }

    fn alpha(points: &[SweepPoint]) -> Series {
        Series::Values(points.iter().map(|p| p.alpha).collect())
    }

    fn resistance(points: &[SweepPoint]) -> Series {
        Series::Values(points.iter().map(|p| p.resistance).collect())
    }

    fn set_bounds(config: &mut ChartConfig, points: &[SweepPoint]) {
        let bounds = Self::alpha_bounds(points);
        if let Some(axis) = config.axis_mut("y") {
            axis.min = bounds.map(|b| b.0);
            axis.max = bounds.map(|b| b.1);
        }
    }
}

impl ChartFamily for ParamsTempChart {
    type Input = [SweepPoint];

    fn create(points: &[SweepPoint]) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Line, "Parameters vs temperature");
        config.labels = Self::labels(points);
        config.datasets = vec![
            Dataset::new("α (V/K)", colors::ALPHA, Self::alpha(points)),
            Dataset::new("R (Ω)", colors::RESISTANCE, Self::resistance(points)).on_axis("y1"),
        ];
        config.axes = vec![
            Axis::x(Scale::Category, "Temperature"),
            Axis::y("y", AxisPosition::Left, "α (V/K)"),
            Axis::y("y1", AxisPosition::Right, "R (Ω)"),
        ];
        Self::set_bounds(&mut config, points);
        config
    }

    fn update(config: &mut ChartConfig, points: &[SweepPoint]) {
        config.labels = Self::labels(points);
        if let Some(ds) = config.dataset_mut(0) {
            ds.series = Self::alpha(points);
        }
        if let Some(ds) = config.dataset_mut(1) {
            ds.series = Self::resistance(points);
        }
        Self::set_bounds(config, points);
    }
}

// ── Loss breakdown ─────────────────────────────────────────────────

/// Heat lost by radiation and by conduction, W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Losses {
    pub radiation: f64,
    pub conduction: f64,
}

pub struct LossChart;

impl ChartFamily for LossChart {
    type Input = Losses;

    fn create(losses: &Losses) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Doughnut, "Heat losses");
        config.labels = vec!["Radiation".into(), "Conduction".into()];
        let mut dataset = Dataset::new(
            "Losses (W)",
            colors::RADIATION,
            Series::Values(vec![losses.radiation, losses.conduction]),
        );
        dataset.colors = vec![colors::RADIATION, colors::CONDUCTION];
        config.datasets = vec![dataset];
        config
    }

    fn update(config: &mut ChartConfig, losses: &Losses) {
        if let Some(ds) = config.dataset_mut(0) {
            ds.series = Series::Values(vec![losses.radiation, losses.conduction]);
        }
    }
}

// ── Daily cycle ────────────────────────────────────────────────────

pub struct DailyCycleChart;

impl ChartFamily for DailyCycleChart {
    type Input = DailyCycle;

    fn create(cycle: &DailyCycle) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Line, "Daily hot-side cycle");
        config.labels = cycle.hours.iter().map(|h| format!("{h}:00")).collect();
        config.datasets = vec![Dataset::new(
            "T_h (°C)",
            colors::HOT_SIDE,
            Series::Values(cycle.hot_temps.clone()),
        )
        .filled()];
        config.axes = vec![
            Axis::x(Scale::Category, "Hour"),
            Axis::y("y", AxisPosition::Left, "Temperature (°C)"),
        ];
        config
    }

    fn update(config: &mut ChartConfig, cycle: &DailyCycle) {
        if let Some(ds) = config.dataset_mut(0) {
            ds.series = Series::Values(cycle.hot_temps.clone());
        }
    }
}

// ── Power transfer ─────────────────────────────────────────────────

/// The service's power curve plus the current operating point.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferInput {
    pub curve: Vec<TransferPoint>,
    pub load_ohm: f64,
    /// Power at the current load, mW.
    pub power_mw: f64,
}

pub struct TransferChart;

impl TransferChart {
    fn curve(input: &TransferInput) -> Series {
        Series::Points(input.curve.iter().map(|p| (p.x, p.y)).collect())
    }

    fn point(input: &TransferInput) -> Series {
        Series::Points(vec![(input.load_ohm, input.power_mw)])
    }
}

impl ChartFamily for TransferChart {
    type Input = TransferInput;

    fn create(input: &TransferInput) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Scatter, "Power transfer");
        config.datasets = vec![
            Dataset::new("Power curve", colors::TRANSFER_CURVE, Self::curve(input))
                .drawn_as(ChartType::Line),
            Dataset::new("Operating point", colors::OPERATING_POINT, Self::point(input)),
        ];
        config.axes = vec![
            Axis::x(Scale::Linear, "R_L (Ω)"),
            Axis::y("y", AxisPosition::Left, "Power (mW)"),
        ];
        config
    }

    fn update(config: &mut ChartConfig, input: &TransferInput) {
        if let Some(ds) = config.dataset_mut(0) {
            ds.series = Self::curve(input);
        }
        if let Some(ds) = config.dataset_mut(1) {
            ds.series = Self::point(input);
        }
    }
}

// ── Time series ────────────────────────────────────────────────────

/// A date-indexed series set.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesInput {
    pub title: &'static str,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<(&'static str, &'static str, Vec<f64>)>,
}

impl TimeSeriesInput {
    pub fn temperature(points: &[TemperaturePoint]) -> Self {
        Self {
            title: "Recorded temperature",
            dates: points.iter().map(|p| p.date).collect(),
            series: vec![
                ("T average", colors::TAVG, points.iter().map(|p| p.tavg).collect()),
                ("T minimum", colors::TMIN, points.iter().map(|p| p.tmin).collect()),
            ],
        }
    }

    pub fn energy(points: &[EnergyPoint]) -> Self {
        Self {
            title: "Daily energy",
            dates: points.iter().map(|p| p.date).collect(),
            series: vec![(
                "Energy (Wh)",
                colors::ENERGY,
                points.iter().map(|p| p.energy_wh).collect(),
            )],
        }
    }

    pub fn battery(points: &[BatteryPoint]) -> Self {
        Self {
            title: "Battery level",
            dates: points.iter().map(|p| p.date).collect(),
            series: vec![(
                "Level (Wh)",
                colors::BATTERY,
                points.iter().map(|p| p.level).collect(),
            )],
        }
    }

    fn labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect()
    }

    fn datasets(&self) -> Vec<Dataset> {
        self.series
            .iter()
            .map(|(label, color, values)| {
                Dataset::new(*label, *color, Series::Values(values.clone())).filled()
            })
            .collect()
    }
}

pub struct TimeSeriesChart;

impl ChartFamily for TimeSeriesChart {
    type Input = TimeSeriesInput;

    fn create(input: &TimeSeriesInput) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Line, input.title);
        config.labels = input.labels();
        config.datasets = input.datasets();
        config.axes = vec![
            Axis::x(Scale::Time, "Date"),
            Axis::y("y", AxisPosition::Left, ""),
        ];
        config
    }

    fn update(config: &mut ChartConfig, input: &TimeSeriesInput) {
        config.labels = input.labels();
        config.datasets = input.datasets();
    }
}

// ── Seasonality ────────────────────────────────────────────────────

/// Lower y bound of the seasonality chart: `floor(0.95 × smallest monthly
/// minimum)`, over months that have data.
pub fn seasonality_floor(points: &[SeasonalityPoint]) -> Option<f64> {
    super::model::bounds(points.iter().filter_map(|p| p.min)).map(|(lo, _)| (lo * 0.95).floor())
}

/// Monthly min/max range, interquartile box and median marker.
pub struct SeasonalityChart;

impl SeasonalityChart {
    fn datasets(points: &[SeasonalityPoint]) -> Vec<Dataset> {
        let pair = |a: Option<f64>, b: Option<f64>| a.zip(b);
        vec![
            Dataset::new(
                "Total range (min/max)",
                colors::RANGE,
                Series::Ranges(points.iter().map(|p| pair(p.min, p.max)).collect()),
            )
            .bar_proportion(0.2),
            Dataset::new(
                "Interquartile range (Q1/Q3)",
                colors::BOX,
                Series::Ranges(points.iter().map(|p| pair(p.q1, p.q3)).collect()),
            )
            .bar_proportion(0.6),
            Dataset::new(
                "Median",
                colors::MEDIAN,
                Series::Markers(points.iter().map(|p| p.median).collect()),
            )
            .drawn_as(ChartType::Scatter)
            .without_legend(),
        ]
    }

    fn axes(points: &[SeasonalityPoint]) -> Vec<Axis> {
        vec![
            Axis::x(Scale::Category, "Month"),
            Axis::y("y", AxisPosition::Left, "Energy (Wh)").with_min(seasonality_floor(points)),
        ]
    }
}

impl ChartFamily for SeasonalityChart {
    type Input = [SeasonalityPoint];

    fn create(points: &[SeasonalityPoint]) -> ChartConfig {
        let mut config = ChartConfig::new(ChartType::Bar, "Monthly energy distribution");
        config.category_proportion = Some(0.8);
        Self::update(&mut config, points);
        config
    }

    fn update(config: &mut ChartConfig, points: &[SeasonalityPoint]) {
        config.labels = points.iter().map(|p| p.month.clone()).collect();
        config.datasets = Self::datasets(points);
        config.axes = Self::axes(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::temperature_sweep;

    fn month(name: &str, min: Option<f64>) -> SeasonalityPoint {
        SeasonalityPoint {
            month: name.into(),
            min,
            q1: min.map(|m| m + 1.0),
            median: min.map(|m| m + 2.0),
            q3: min.map(|m| m + 3.0),
            max: min.map(|m| m + 4.0),
        }
    }

    #[test]
    fn params_temp_labels_and_bounds() {
        let sweep = temperature_sweep(16.0, 3.8);
        let config = ParamsTempChart::create(&sweep);
        assert_eq!(config.labels[0], "50°C");
        assert_eq!(config.labels[8], "250°C");
        let y = config.axis("y").unwrap();
        assert!((y.min.unwrap() - sweep[0].alpha * 0.95).abs() < 1e-12);
        assert!((y.max.unwrap() - sweep[8].alpha * 1.05).abs() < 1e-12);
        assert_eq!(config.datasets[1].y_axis, "y1");
    }

    #[test]
    fn daily_cycle_update_changes_values_only() {
        let cycle = DailyCycle {
            hours: (0..24).collect(),
            hot_temps: vec![20.0; 24],
            source: "fuego".into(),
        };
        let mut config = DailyCycleChart::create(&cycle);
        assert_eq!(config.labels[13], "13:00");
        let next = DailyCycle {
            hours: vec![1, 2],
            hot_temps: vec![150.0; 24],
            source: "industrial".into(),
        };
        DailyCycleChart::update(&mut config, &next);
        assert_eq!(config.labels.len(), 24);
        assert_eq!(config.datasets[0].series, Series::Values(vec![150.0; 24]));
    }

    #[test]
    fn transfer_point_is_second_dataset() {
        let input = TransferInput {
            curve: vec![TransferPoint { x: 1.0, y: 10.0 }, TransferPoint { x: 2.0, y: 12.0 }],
            load_ohm: 2.5,
            power_mw: 11.0,
        };
        let config = TransferChart::create(&input);
        assert_eq!(config.datasets[1].series, Series::Points(vec![(2.5, 11.0)]));
        assert_eq!(config.datasets[0].kind(config.chart_type), ChartType::Line);
    }

    #[test]
    fn seasonality_floor_ignores_empty_months() {
        let points = vec![month("January", Some(2.0)), month("February", None), month("March", Some(5.3))];
        assert_eq!(seasonality_floor(&points), Some(1.0));
        assert_eq!(seasonality_floor(&[month("May", None)]), None);
    }

    #[test]
    fn seasonality_update_replaces_axis_floor() {
        let mut config = SeasonalityChart::create(&[month("January", Some(10.0))]);
        assert_eq!(config.axis("y").unwrap().min, Some(9.0));
        assert_eq!(config.category_proportion, Some(0.8));
        SeasonalityChart::update(&mut config, &[month("January", Some(40.0))]);
        assert_eq!(config.axis("y").unwrap().min, Some(38.0));
        assert_eq!(config.datasets[0].bar_proportion, Some(0.2));
        assert_eq!(config.datasets[1].bar_proportion, Some(0.6));
    }

    #[test]
    fn time_series_update_replaces_everything() {
        let d = |day| NaiveDate::from_ymd_opt(2023, 1, day).unwrap();
        let first = TimeSeriesInput::energy(&[EnergyPoint { date: d(1), energy_wh: 1.0 }]);
        let mut config = TimeSeriesChart::create(&first);
        let second = TimeSeriesInput::energy(&[
            EnergyPoint { date: d(2), energy_wh: 2.0 },
            EnergyPoint { date: d(3), energy_wh: 3.0 },
        ]);
        TimeSeriesChart::update(&mut config, &second);
        assert_eq!(config.labels, ["2023-01-02", "2023-01-03"]);
        assert_eq!(config.datasets[0].series, Series::Values(vec![2.0, 3.0]));
        assert!(config.datasets[0].fill);
    }
}
