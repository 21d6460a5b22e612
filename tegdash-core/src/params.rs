//! Request parameter sets and the enumerations behind the select controls.
//!
//! Every parameter set is rebuilt from the current control state on each
//! refresh and serialized into URL query pairs with the key names the
//! simulation service expects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query pairs in the order they are sent.
pub type QueryPairs = Vec<(&'static str, String)>;

/// Render a number the way an HTML input reports its value: `16` not `16.0`.
fn q(value: f64) -> String {
    crate::labels::raw_value(value)
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal, $title:literal;)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const WIRE: &'static [&'static str] = &[$($wire),+];

            /// Value sent to the service.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Human-readable name.
            pub fn title(self) -> &'static str {
                match self {
                    $($name::$variant => $title,)+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.title())
            }
        }
    };
}

choice_enum! {
    /// Module preset selector.
    ModulePreset {
        Sp1848 => "sp1848", "SP1848-27145";
        Generic => "generico", "Generic 1 cm²";
        Custom => "personalizado", "Custom";
    }
}

choice_enum! {
    /// Heat source driving the daily hot-side cycle.
    SourceType {
        Fire => "fuego", "Wood fire";
        Waste => "residuos", "Waste burning";
        Industrial => "industrial", "Industrial";
    }
}

choice_enum! {
    /// Peak hot-side temperature scenario for the real-data analysis.
    Scenario {
        Pessimistic => "pesimista", "Pessimistic (80 °C)";
        Realistic => "realista", "Realistic (150 °C)";
        Optimistic => "optimista", "Optimistic (250 °C)";
    }
}

choice_enum! {
    /// Which recorded temperature is used as the cold side.
    DataType {
        Average => "tavg", "Daily average";
        Minimum => "tmin", "Daily minimum";
    }
}

/// Fixed module values written by a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetValues {
    pub area_cm2: f64,
    pub thickness_mm: f64,
    pub thermal_resistance: f64,
    pub emissivity: f64,
}

impl ModulePreset {
    /// The values this preset imposes, or `None` for the custom preset.
    pub fn values(self) -> Option<PresetValues> {
        match self {
            ModulePreset::Sp1848 => Some(PresetValues {
                area_cm2: 16.0,
                thickness_mm: 3.8,
                thermal_resistance: 0.5,
                emissivity: 0.8,
            }),
            ModulePreset::Generic => Some(PresetValues {
                area_cm2: 1.0,
                thickness_mm: 4.0,
                thermal_resistance: 0.5,
                emissivity: 0.8,
            }),
            ModulePreset::Custom => None,
        }
    }

    /// Whether area and thickness may be edited directly.
    pub fn allows_manual_geometry(self) -> bool {
        self == ModulePreset::Custom
    }
}

/// Inputs of the theoretical simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub area_cm2: f64,
    pub thickness_mm: f64,
    pub thermal_resistance: f64,
    pub emissivity: f64,
    pub hot_temp_c: f64,
    pub cold_temp_c: f64,
    pub load_ohm: f64,
    pub charge_hours: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            area_cm2: 16.0,
            thickness_mm: 3.8,
            thermal_resistance: 0.5,
            emissivity: 0.8,
            hot_temp_c: 150.0,
            cold_temp_c: 10.0,
            load_ohm: 2.5,
            charge_hours: 5.0,
        }
    }
}

impl SimulationParameters {
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("area", q(self.area_cm2)),
            ("espesor", q(self.thickness_mm)),
            ("R_th", q(self.thermal_resistance)),
            ("emitancia", q(self.emissivity)),
            ("Th", q(self.hot_temp_c)),
            ("Tc", q(self.cold_temp_c)),
            ("RL", q(self.load_ohm)),
            ("chargeHours", q(self.charge_hours)),
        ]
    }
}

/// Inputs of the daily-cycle series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCycleQuery {
    pub source: SourceType,
    pub peak_hot_c: f64,
    pub ambient_c: f64,
}

impl DailyCycleQuery {
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("tipo_fuente", self.source.as_str().to_string()),
            ("T_h_pico", q(self.peak_hot_c)),
            ("T_ambiente", q(self.ambient_c)),
        ]
    }
}

/// Inputs of the real-data analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealAnalysisParameters {
    pub scenario: Scenario,
    pub source: SourceType,
    pub data_type: DataType,
    pub load_ohm: f64,
    pub charge_hours: f64,
    pub battery_capacity_wh: f64,
    pub daily_consumption_wh: f64,
}

impl Default for RealAnalysisParameters {
    fn default() -> Self {
        Self {
            scenario: Scenario::Realistic,
            source: SourceType::Fire,
            data_type: DataType::Average,
            load_ohm: 5.0,
            charge_hours: 5.0,
            battery_capacity_wh: 10.0,
            daily_consumption_wh: 2.0,
        }
    }
}

impl RealAnalysisParameters {
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("scenarioTh", self.scenario.as_str().to_string()),
            ("tipoFuente", self.source.as_str().to_string()),
            ("dataType", self.data_type.as_str().to_string()),
            ("RL", q(self.load_ohm)),
            ("chargeHours", q(self.charge_hours)),
            ("batteryCapacity", q(self.battery_capacity_wh)),
            ("dailyConsumption", q(self.daily_consumption_wh)),
        ]
    }
}

/// A single-device viability lookup. Shares the scenario inputs of the
/// real-data tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceQuery {
    pub scenario: Scenario,
    pub source: SourceType,
    pub data_type: DataType,
    pub load_ohm: f64,
    pub charge_hours: f64,
    pub device_name: String,
    pub device_energy_wh: f64,
}

impl DeviceQuery {
    pub fn new(real: &RealAnalysisParameters, name: impl Into<String>, energy_wh: f64) -> Self {
        Self {
            scenario: real.scenario,
            source: real.source,
            data_type: real.data_type,
            load_ohm: real.load_ohm,
            charge_hours: real.charge_hours,
            device_name: name.into(),
            device_energy_wh: energy_wh,
        }
    }

    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("scenarioTh", self.scenario.as_str().to_string()),
            ("tipoFuente", self.source.as_str().to_string()),
            ("dataType", self.data_type.as_str().to_string()),
            ("RL", q(self.load_ohm)),
            ("chargeHours", q(self.charge_hours)),
            ("deviceName", self.device_name.clone()),
            ("deviceEnergy", q(self.device_energy_wh)),
        ]
    }
}
