//! Theoretical simulation tab.

use crate::api::models::{DailyCycle, SimulationResult};
use crate::api::{ApiClient, ApiError};
use crate::chart::{
    ChartKey, ChartRegistry, DailyCycleChart, LossChart, Losses, ParamsTempChart, TransferChart,
    TransferInput,
};
use crate::interpretation::Interpretation;
use crate::labels::{fixed, LabelFormat};
use crate::page::{ids, Page, PageError};
use crate::panel::{Change, ControlSpec, ParameterPanel};
use crate::params::{DailyCycleQuery, ModulePreset, SimulationParameters, SourceType};
use crate::sequence::{RequestSequencer, RequestToken};
use crate::sweep::temperature_sweep;

pub const CONTROLS: [ControlSpec; 9] = [
    ControlSpec::select(ids::IN_MODULE, "Module", ModulePreset::WIRE, 0),
    ControlSpec::slider(
        ids::IN_AREA,
        "Area",
        (0.5, 50.0, 0.5),
        16.0,
        (ids::VAL_AREA, LabelFormat::fixed(1, " cm²")),
    ),
    ControlSpec::slider(
        ids::IN_THICKNESS,
        "Thickness",
        (1.0, 10.0, 0.1),
        3.8,
        (ids::VAL_THICKNESS, LabelFormat::fixed(1, " mm")),
    ),
    ControlSpec::slider(
        ids::IN_THERMAL_RESISTANCE,
        "Thermal resistance",
        (0.05, 5.0, 0.05),
        0.5,
        (ids::VAL_THERMAL_RESISTANCE, LabelFormat::fixed(2, " K/W")),
    ),
    ControlSpec::slider(
        ids::IN_EMISSIVITY,
        "Emissivity",
        (0.05, 1.0, 0.05),
        0.8,
        (ids::VAL_EMISSIVITY, LabelFormat::fixed(2, "")),
    ),
    ControlSpec::slider(
        ids::IN_HOT_TEMP,
        "Hot side",
        (30.0, 300.0, 5.0),
        150.0,
        (ids::VAL_HOT_TEMP, LabelFormat::raw(" °C")),
    ),
    ControlSpec::slider(
        ids::IN_COLD_TEMP,
        "Cold side",
        (-20.0, 50.0, 1.0),
        10.0,
        (ids::VAL_COLD_TEMP, LabelFormat::raw(" °C")),
    ),
    ControlSpec::slider(
        ids::IN_LOAD,
        "Load resistance",
        (0.1, 20.0, 0.1),
        2.5,
        (ids::VAL_LOAD, LabelFormat::fixed(1, " Ω")),
    ),
    ControlSpec::slider(
        ids::IN_HOURS,
        "Charge hours",
        (1.0, 24.0, 1.0),
        5.0,
        (ids::VAL_HOURS, LabelFormat::raw(" h")),
    ),
];

/// A theoretical refresh in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoreticalRequest {
    pub token: RequestToken,
    pub params: SimulationParameters,
    pub cycle: DailyCycleQuery,
}

/// Simulation plus the daily cycle, when that fetch succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoreticalData {
    pub simulation: SimulationResult,
    pub cycle: Option<DailyCycle>,
}

impl TheoreticalRequest {
    /// Run the simulation, then the daily cycle. A cycle failure is logged and
    /// leaves the cycle chart untouched; it never fails the refresh.
    pub fn execute(&self, client: &ApiClient) -> Result<TheoreticalData, ApiError> {
        let simulation = client.simulate(&self.params)?;
        let cycle = match client.daily_cycle(&self.cycle) {
            Ok(cycle) => Some(cycle),
            Err(e) => {
                tracing::warn!(error = %e, "daily cycle fetch failed");
                None
            }
        };
        Ok(TheoreticalData { simulation, cycle })
    }
}

/// State of the theoretical tab.
#[derive(Debug, Clone)]
pub struct TheoreticalView {
    pub panel: ParameterPanel,
    pub charts: ChartRegistry,
    sequencer: RequestSequencer,
    applied: Option<RequestToken>,
    last_result: Option<SimulationResult>,
}

impl TheoreticalView {
    pub fn new(page: &Page) -> Result<Self, PageError> {
        Ok(Self {
            panel: ParameterPanel::bind(&CONTROLS, page)?,
            charts: ChartRegistry::new(),
            sequencer: RequestSequencer::new(),
            applied: None,
            last_result: None,
        })
    }

    pub fn module(&self) -> Result<ModulePreset, PageError> {
        let wire = self.panel.choice(ids::IN_MODULE)?;
        ModulePreset::parse(wire)
            .ok_or_else(|| PageError::MissingElement(format!("{}[{wire}]", ids::IN_MODULE)))
    }

    /// Apply a module preset: write its values, lock or unlock the geometry
    /// inputs, then report every control as changed.
    pub fn select_module(&mut self, preset: ModulePreset) -> Result<Vec<Change>, PageError> {
        self.panel.select(ids::IN_MODULE, preset.as_str())?;
        if let Some(values) = preset.values() {
            self.panel.write_number(ids::IN_AREA, values.area_cm2)?;
            self.panel.write_number(ids::IN_THICKNESS, values.thickness_mm)?;
            self.panel
                .write_number(ids::IN_THERMAL_RESISTANCE, values.thermal_resistance)?;
            self.panel.write_number(ids::IN_EMISSIVITY, values.emissivity)?;
        }
        self.lock_geometry(preset)?;
        Ok(self.panel.touch_all())
    }

    /// Lock area and thickness unless `preset` allows manual geometry. Values
    /// are left as they are.
    pub fn lock_geometry(&mut self, preset: ModulePreset) -> Result<(), PageError> {
        let locked = !preset.allows_manual_geometry();
        self.panel.set_disabled(ids::IN_AREA, locked)?;
        self.panel.set_disabled(ids::IN_THICKNESS, locked)
    }

    pub fn parameters(&self) -> Result<SimulationParameters, PageError> {
        let p = &self.panel;
        Ok(SimulationParameters {
            area_cm2: p.number(ids::IN_AREA)?,
            thickness_mm: p.number(ids::IN_THICKNESS)?,
            thermal_resistance: p.number(ids::IN_THERMAL_RESISTANCE)?,
            emissivity: p.number(ids::IN_EMISSIVITY)?,
            hot_temp_c: p.number(ids::IN_HOT_TEMP)?,
            cold_temp_c: p.number(ids::IN_COLD_TEMP)?,
            load_ohm: p.number(ids::IN_LOAD)?,
            charge_hours: p.number(ids::IN_HOURS)?,
        })
    }

    /// Snapshot the controls into a new request. `source` comes from the
    /// real tab's source select.
    pub fn begin_refresh(&mut self, source: SourceType) -> Result<TheoreticalRequest, PageError> {
        let params = self.parameters()?;
        let cycle = DailyCycleQuery {
            source,
            peak_hot_c: params.hot_temp_c,
            ambient_c: params.cold_temp_c,
        };
        let token = self.sequencer.issue();
        tracing::debug!(token = token.value(), "theoretical refresh");
        Ok(TheoreticalRequest {
            token,
            params,
            cycle,
        })
    }

    /// Whether a refresh has been issued but not yet applied.
    pub fn is_loading(&self) -> bool {
        self.sequencer.latest() != self.applied
    }

    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_ref()
    }

    /// Apply a completed refresh. Returns false for a stale response.
    ///
    /// On failure only the results container changes. On success the result
    /// cards, interpretations and all four charts are written.
    pub fn apply(
        &mut self,
        page: &mut Page,
        request: &TheoreticalRequest,
        outcome: &Result<TheoreticalData, ApiError>,
    ) -> bool {
        if !self.sequencer.is_current(request.token) {
            tracing::debug!(token = request.token.value(), "discarding stale theoretical response");
            return false;
        }
        self.applied = Some(request.token);

        let data = match outcome {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "theoretical refresh failed");
                page.set_text(ids::THEORY_RESULTS, format!("Error: {e}"));
                return true;
            }
        };
        let result = &data.simulation;
        let params = &request.params;

        write_cards(page, result);
        page.set_text(ids::THEORY_RESULTS, "");

        let text = Interpretation::new(result, params);
        page.set_label(ids::TXT_PARAMS_TEMP, text.params_temp);
        page.set_label(ids::TXT_LOSSES, text.losses);
        page.set_label(ids::TXT_CYCLE, text.cycle);
        page.set_label(ids::TXT_TRANSFER, text.transfer);

        let sweep = temperature_sweep(params.area_cm2, params.thickness_mm);
        self.charts
            .render::<ParamsTempChart>(page, ChartKey::ParamsTemp, &sweep);
        self.charts.render::<LossChart>(
            page,
            ChartKey::LossBreakdown,
            &Losses {
                radiation: result.losses_radiation,
                conduction: result.losses_conduction,
            },
        );
        if let Some(cycle) = &data.cycle {
            self.charts
                .render::<DailyCycleChart>(page, ChartKey::DailyCycle, cycle);
        }
        self.charts.render::<TransferChart>(
            page,
            ChartKey::PowerTransfer,
            &TransferInput {
                curve: result.transfer.clone(),
                load_ohm: params.load_ohm,
                power_mw: result.power_load * 1000.0,
            },
        );

        self.last_result = Some(result.clone());
        true
    }
}

fn write_cards(page: &mut Page, r: &SimulationResult) {
    page.set_label(ids::RES_ENERGY, fixed(r.energy_load_wh, 2));
    page.set_label(ids::RES_DELTA_T, fixed(r.delta_t, 1));
    page.set_label(ids::RES_VOLTAGE, fixed(r.load_voltage, 3));
    page.set_label(ids::RES_CURRENT, fixed(r.current * 1000.0, 2));
    page.set_label(ids::RES_POWER, fixed(r.power_load * 1000.0, 2));
    page.set_label(ids::RES_CARNOT, fixed(r.efficiency_carnot, 1));
    page.set_label(ids::RES_TEG, fixed(r.efficiency_teg, 2));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sp1848_locks_geometry() {
        let page = Page::standard();
        let mut view = TheoreticalView::new(&page).unwrap();
        view.panel.write_number(ids::IN_AREA, 30.0).unwrap();
        let changes = view.select_module(ModulePreset::Sp1848).unwrap();
        assert_eq!(changes.len(), CONTROLS.len());
        assert_eq!(view.panel.number(ids::IN_AREA).unwrap(), 16.0);
        assert!(view.panel.is_disabled(ids::IN_AREA));
        assert!(view.panel.is_disabled(ids::IN_THICKNESS));
        assert!(!view.panel.is_disabled(ids::IN_LOAD));
    }

    #[test]
    fn custom_unlocks_and_keeps_values() {
        let page = Page::standard();
        let mut view = TheoreticalView::new(&page).unwrap();
        view.select_module(ModulePreset::Generic).unwrap();
        view.select_module(ModulePreset::Custom).unwrap();
        assert_eq!(view.module().unwrap(), ModulePreset::Custom);
        assert_eq!(view.panel.number(ids::IN_AREA).unwrap(), 1.0);
        assert_eq!(view.panel.number(ids::IN_THICKNESS).unwrap(), 4.0);
        assert!(!view.panel.is_disabled(ids::IN_AREA));
        assert!(view.panel.set_number(ids::IN_AREA, 2.0).unwrap().is_some());
    }

    #[test]
    fn refresh_snapshots_cycle_query() {
        let page = Page::standard();
        let mut view = TheoreticalView::new(&page).unwrap();
        view.panel.set_number(ids::IN_HOT_TEMP, 200.0).unwrap();
        let request = view.begin_refresh(SourceType::Industrial).unwrap();
        assert_eq!(request.cycle.peak_hot_c, 200.0);
        assert_eq!(request.cycle.ambient_c, 10.0);
        assert_eq!(request.cycle.source, SourceType::Industrial);
        assert!(view.is_loading());
    }

    #[test]
    fn lock_geometry_keeps_values() {
        let page = Page::standard();
        let mut view = TheoreticalView::new(&page).unwrap();
        view.panel.write_number(ids::IN_THERMAL_RESISTANCE, 1.5).unwrap();
        view.lock_geometry(ModulePreset::Sp1848).unwrap();
        assert!(view.panel.is_disabled(ids::IN_AREA));
        assert_eq!(view.panel.number(ids::IN_THERMAL_RESISTANCE).unwrap(), 1.5);
        view.lock_geometry(ModulePreset::Custom).unwrap();
        assert!(!view.panel.is_disabled(ids::IN_THICKNESS));
    }

    #[test]
    fn cards_round_exact_halves_up() {
        let result: SimulationResult = serde_json::from_str(
            r#"{"E_load": 0.125, "E_max": 0.2, "deltaT": 140.25, "V_oc": 6.3,
            "V_load": 3.0625, "I": 0.0125, "P_load": 0.039, "P_max": 0.05, "Q_h": 3.0,
            "efficiency_carnot": 33.75, "efficiency_teg": 1.234, "alpha": 0.04685,
            "R_interno": 2.4, "K_termica": 0.1, "perdidas_total": 1.5,
            "perdidas_radiacion": 0.25, "perdidas_conduccion": 1.25, "transferData": []}"#,
        )
        .unwrap();
        let mut page = Page::standard();
        write_cards(&mut page, &result);
        assert_eq!(page.label(ids::RES_ENERGY), Some("0.13"));
        assert_eq!(page.label(ids::RES_DELTA_T), Some("140.3"));
        assert_eq!(page.label(ids::RES_VOLTAGE), Some("3.063"));
        assert_eq!(page.label(ids::RES_CARNOT), Some("33.8"));
        assert_eq!(page.label(ids::RES_TEG), Some("1.23"));
    }
}
