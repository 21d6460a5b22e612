//! Real-data export: one CSV per series plus the raw JSON response.
//!
//! `save_analysis` creates `analysis_{timestamp}/` under the output directory
//! containing:
//! - `analysis.json`: the full service response
//! - `temperature.csv`, `energy.csv`, `seasonality.csv`, `battery.csv`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tegdash_core::api::{BatteryPoint, EnergyPoint, RealAnalysisResult, SeasonalityPoint, TemperaturePoint};

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.3}")).unwrap_or_default()
}

/// Columns: date, tavg, tmin
pub fn export_temperature_csv(points: &[TemperaturePoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "tavg", "tmin"])?;
    for p in points {
        wtr.write_record([
            &p.date.to_string(),
            &format!("{:.1}", p.tavg),
            &format!("{:.1}", p.tmin),
        ])?;
    }
    finish(wtr)
}

/// Columns: date, energy_wh
pub fn export_energy_csv(points: &[EnergyPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "energy_wh"])?;
    for p in points {
        wtr.write_record([&p.date.to_string(), &format!("{:.3}", p.energy_wh)])?;
    }
    finish(wtr)
}

/// Columns: month, min, q1, median, q3, max. Months without data have empty
/// statistic cells.
pub fn export_seasonality_csv(points: &[SeasonalityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["month", "min", "q1", "median", "q3", "max"])?;
    for p in points {
        wtr.write_record([
            p.month.clone(),
            opt(p.min),
            opt(p.q1),
            opt(p.median),
            opt(p.q3),
            opt(p.max),
        ])?;
    }
    finish(wtr)
}

/// Columns: date, level_wh
pub fn export_battery_csv(points: &[BatteryPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "level_wh"])?;
    for p in points {
        wtr.write_record([&p.date.to_string(), &format!("{:.3}", p.level)])?;
    }
    finish(wtr)
}

/// Write the full export set and return the created directory.
pub fn save_analysis(result: &RealAnalysisResult, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("analysis_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create export dir: {}", run_dir.display()))?;

    let json = serde_json::to_string_pretty(result).context("failed to serialize analysis")?;
    std::fs::write(run_dir.join("analysis.json"), json)?;

    let files = [
        ("temperature.csv", export_temperature_csv(&result.temperature)?),
        ("energy.csv", export_energy_csv(&result.energy)?),
        ("seasonality.csv", export_seasonality_csv(&result.seasonality)?),
        ("battery.csv", export_battery_csv(&result.battery)?),
    ];
    for (name, content) in files {
        let path = run_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    tracing::info!(dir = %run_dir.display(), "analysis exported");
    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
    }

    fn sample() -> RealAnalysisResult {
        RealAnalysisResult {
            temperature: vec![TemperaturePoint {
                date: day(1),
                tavg: 8.0,
                tmin: -2.0,
            }],
            energy: vec![
                EnergyPoint {
                    date: day(1),
                    energy_wh: 3.2,
                },
                EnergyPoint {
                    date: day(2),
                    energy_wh: 3.45,
                },
            ],
            seasonality: vec![
                SeasonalityPoint {
                    month: "January".into(),
                    min: Some(2.1),
                    q1: Some(2.8),
                    median: Some(3.0),
                    q3: Some(3.3),
                    max: Some(4.0),
                },
                SeasonalityPoint {
                    month: "February".into(),
                    min: None,
                    q1: None,
                    median: None,
                    q3: None,
                    max: None,
                },
            ],
            battery: vec![BatteryPoint {
                date: day(1),
                level: 1.2,
            }],
        }
    }

    #[test]
    fn temperature_columns() {
        let csv = export_temperature_csv(&sample().temperature).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,tavg,tmin"));
        assert_eq!(lines.next(), Some("2023-01-01,8.0,-2.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn energy_rows_in_order() {
        let csv = export_energy_csv(&sample().energy).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows, ["date,energy_wh", "2023-01-01,3.200", "2023-01-02,3.450"]);
    }

    #[test]
    fn empty_month_has_blank_statistics() {
        let csv = export_seasonality_csv(&sample().seasonality).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[1], "January,2.100,2.800,3.000,3.300,4.000");
        assert_eq!(rows[2], "February,,,,,");
    }

    #[test]
    fn empty_series_writes_header_only() {
        let csv = export_battery_csv(&[]).unwrap();
        assert_eq!(csv, "date,level_wh\n");
    }

    #[test]
    fn save_analysis_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_analysis(&sample(), dir.path()).unwrap();

        for name in [
            "analysis.json",
            "temperature.csv",
            "energy.csv",
            "seasonality.csv",
            "battery.csv",
        ] {
            assert!(run_dir.join(name).exists(), "missing {name}");
        }

        let json = std::fs::read_to_string(run_dir.join("analysis.json")).unwrap();
        let loaded: RealAnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, sample());
    }
}
