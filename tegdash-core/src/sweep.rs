//! Closed-form Seebeck coefficient and internal resistance over a fixed
//! temperature sweep, for bismuth-telluride modules.
//!
//! These approximations are evaluated locally so the parameter-vs-temperature
//! chart never depends on the simulation service.

const KELVIN_OFFSET: f64 = 273.15;
const REFERENCE_K: f64 = 300.0;

const ALPHA_BASE: f64 = 0.045;
const ALPHA_SLOPE: f64 = 0.000_08;

const RHO_300K: f64 = 1.2e-5;
const RHO_TEMP_COEF: f64 = 0.003;

/// First sweep temperature, °C.
pub const SWEEP_START_C: f64 = 50.0;
/// Sweep increment, °C.
pub const SWEEP_STEP_C: f64 = 25.0;
/// Number of sweep points (50..=250 °C).
pub const SWEEP_POINTS: usize = 9;

/// One sweep sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub temp_c: f64,
    /// Seebeck coefficient, V/K, rounded to 5 decimals.
    pub alpha: f64,
    /// Internal resistance, Ω, rounded to 3 decimals.
    pub resistance: f64,
}

/// Seebeck coefficient at `temp_c`.
pub fn seebeck_coefficient(temp_c: f64) -> f64 {
    ALPHA_BASE + ALPHA_SLOPE * (temp_c + KELVIN_OFFSET - REFERENCE_K)
}

/// Electrical resistivity at `temp_c`.
pub fn resistivity(temp_c: f64) -> f64 {
    RHO_300K * (1.0 + RHO_TEMP_COEF * (temp_c + KELVIN_OFFSET - REFERENCE_K))
}

/// Internal resistance `(rho · thickness[cm]) / area[cm²]`.
pub fn internal_resistance(temp_c: f64, area_cm2: f64, thickness_mm: f64) -> f64 {
    (resistivity(temp_c) * thickness_mm / 10.0) / area_cm2
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// The sweep temperatures, °C.
pub fn sweep_temperatures() -> impl Iterator<Item = f64> {
    (0..SWEEP_POINTS).map(|i| SWEEP_START_C + i as f64 * SWEEP_STEP_C)
}

/// Evaluate both curves across the sweep for a module geometry.
pub fn temperature_sweep(area_cm2: f64, thickness_mm: f64) -> Vec<SweepPoint> {
    sweep_temperatures()
        .map(|temp_c| SweepPoint {
            temp_c,
            alpha: round_to(seebeck_coefficient(temp_c), 5),
            resistance: round_to(internal_resistance(temp_c, area_cm2, thickness_mm), 3),
        })
        .collect()
}
