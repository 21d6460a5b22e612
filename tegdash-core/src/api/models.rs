//! Response bodies of the simulation service.
//!
//! Field names follow the service's JSON; Rust names are the English
//! equivalents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A point of the power-transfer curve: load resistance (Ω) vs power (mW).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferPoint {
    pub x: f64,
    pub y: f64,
}

/// Result of `/api/simular-teoria`. Energies in Wh, voltages in V, current in
/// A, powers in W, efficiencies in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(rename = "E_load")]
    pub energy_load_wh: f64,
    #[serde(rename = "E_max")]
    pub energy_max_wh: f64,
    #[serde(rename = "deltaT")]
    pub delta_t: f64,
    #[serde(rename = "V_oc")]
    pub open_circuit_voltage: f64,
    #[serde(rename = "V_load")]
    pub load_voltage: f64,
    #[serde(rename = "I")]
    pub current: f64,
    #[serde(rename = "P_load")]
    pub power_load: f64,
    #[serde(rename = "P_max")]
    pub power_max: f64,
    #[serde(rename = "Q_h")]
    pub heat_flow: f64,
    pub efficiency_carnot: f64,
    pub efficiency_teg: f64,
    pub alpha: f64,
    #[serde(rename = "R_interno")]
    pub internal_resistance: f64,
    #[serde(rename = "K_termica")]
    pub thermal_conductance: f64,
    #[serde(rename = "perdidas_total")]
    pub losses_total: f64,
    #[serde(rename = "perdidas_radiacion")]
    pub losses_radiation: f64,
    #[serde(rename = "perdidas_conduccion")]
    pub losses_conduction: f64,
    #[serde(rename = "transferData")]
    pub transfer: Vec<TransferPoint>,
}

/// Result of `/api/ciclo-diario`: hot-side temperature per hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCycle {
    #[serde(rename = "horas")]
    pub hours: Vec<u32>,
    #[serde(rename = "T_h_valores")]
    pub hot_temps: Vec<f64>,
    #[serde(rename = "tipo_fuente")]
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub date: NaiveDate,
    pub tavg: f64,
    pub tmin: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyPoint {
    pub date: NaiveDate,
    pub energy_wh: f64,
}

/// Five-number summary of daily energy for one month. Months with no
/// recorded days carry nulls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    pub month: String,
    #[serde(rename = "minEnergy")]
    pub min: Option<f64>,
    #[serde(rename = "q1Energy")]
    pub q1: Option<f64>,
    #[serde(rename = "medianEnergy")]
    pub median: Option<f64>,
    #[serde(rename = "q3Energy")]
    pub q3: Option<f64>,
    #[serde(rename = "maxEnergy")]
    pub max: Option<f64>,
}

impl SeasonalityPoint {
    /// All five statistics, if the month has data.
    pub fn summary(&self) -> Option<[f64; 5]> {
        Some([self.min?, self.q1?, self.median?, self.q3?, self.max?])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryPoint {
    pub date: NaiveDate,
    /// State of charge, Wh.
    pub level: f64,
}

/// Result of `/api/analisis-real`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealAnalysisResult {
    #[serde(rename = "temperatureData")]
    pub temperature: Vec<TemperaturePoint>,
    #[serde(rename = "energyTimeline")]
    pub energy: Vec<EnergyPoint>,
    #[serde(rename = "seasonalityData")]
    pub seasonality: Vec<SeasonalityPoint>,
    #[serde(rename = "batteryHistory")]
    pub battery: Vec<BatteryPoint>,
}

/// Result of `/api/analizar-dispositivo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceViability {
    pub device: String,
    /// Daily energy the device needs, Wh.
    pub energy_needed: f64,
    pub viable_days: u32,
    pub total_days: u32,
    /// Share of viable days, percent (one decimal).
    pub percentage: f64,
    pub status: String,
}

impl DeviceViability {
    /// One-line card text, as appended to the device list.
    pub fn card(&self) -> String {
        format!(
            "{} ({} Wh/day) {}% {}/{} days {}",
            self.device,
            crate::labels::raw_value(self.energy_needed),
            crate::labels::raw_value(self.percentage),
            self.viable_days,
            self.total_days,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasonality_nulls_deserialize_as_none() {
        let json = r#"{"month":"March","minEnergy":null,"q1Energy":null,
            "medianEnergy":null,"q3Energy":null,"maxEnergy":null}"#;
        let point: SeasonalityPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.month, "March");
        assert!(point.summary().is_none());
    }

    #[test]
    fn real_analysis_parses_dates() {
        let json = r#"{
            "temperatureData": [{"date": "2023-01-02", "tavg": 8.5, "tmin": -1.0}],
            "energyTimeline": [{"date": "2023-01-02", "energy_wh": 1.25}],
            "seasonalityData": [],
            "batteryHistory": [{"date": "2023-01-02", "level": 0.0}]
        }"#;
        let result: RealAnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.temperature[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
        );
        assert_eq!(result.energy[0].energy_wh, 1.25);
    }

    #[test]
    fn device_card_shows_ratio_and_status() {
        let device = DeviceViability {
            device: "Radio".into(),
            energy_needed: 1.5,
            viable_days: 300,
            total_days: 365,
            percentage: 82.2,
            status: "Highly viable".into(),
        };
        assert_eq!(device.card(), "Radio (1.5 Wh/day) 82.2% 300/365 days Highly viable");
    }
}
