//! Explanatory paragraphs shown beneath the theoretical charts.

use crate::api::models::SimulationResult;
use crate::labels::{fixed, raw_value};
use crate::params::SimulationParameters;

/// The four interpretation blocks of one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub params_temp: String,
    pub losses: String,
    pub cycle: String,
    pub transfer: String,
}

impl Interpretation {
    pub fn new(result: &SimulationResult, params: &SimulationParameters) -> Self {
        let params_temp = format!(
            "The current Seebeck coefficient (α) is {} V/K and the internal resistance (R) \
             is {} Ω.\n\n\
             A higher α raises the generated voltage (V_oc = α × ΔT), while a higher internal R \
             lowers the power delivered to the load. The curves show how both drift with the \
             hot-side temperature.",
            fixed(result.alpha, 5),
            fixed(result.internal_resistance, 3)
        );

        let losses = format!(
            "Radiative losses are {} W and conductive losses {} W (total loss: {} W).\n\n\
             Radiation grows with emissivity and the fourth power of temperature; conduction \
             depends on the insulation (R_th) and on ΔT. Every watt lost here is heat the module \
             never sees.",
            fixed(result.losses_radiation, 2),
            fixed(result.losses_conduction, 2),
            fixed(result.losses_total, 2)
        );

        let cycle = format!(
            "The cycle models the hot-side temperature (T_h) of the source over 24 hours against \
             a constant cold side of {}°C.\n\n\
             Daily energy is the integral of power over the active hours, so longer cycles and \
             higher peaks yield more energy.",
            raw_value(params.cold_temp_c)
        );

        let transfer = format!(
            "The module currently delivers {} mW into a {} Ω load.\n\n\
             Output power peaks when the load resistance equals the module's internal \
             resistance. An operating point far from the peak of the curve transfers power \
             sub-optimally.",
            fixed(result.power_load * 1000.0, 2),
            fixed(params.load_ohm, 1)
        );

        Self {
            params_temp,
            losses,
            cycle,
            transfer,
        }
    }
}
