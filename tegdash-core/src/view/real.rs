//! Real-data analysis tab and the device viability list.

use crate::api::models::{DeviceViability, RealAnalysisResult};
use crate::api::ApiError;
use crate::chart::{ChartKey, ChartRegistry, SeasonalityChart, TimeSeriesChart, TimeSeriesInput};
use crate::labels::LabelFormat;
use crate::page::{ids, Page, PageError};
use crate::panel::{ControlSpec, ParameterPanel};
use crate::params::{DataType, DeviceQuery, RealAnalysisParameters, Scenario, SourceType};
use crate::sequence::{RequestSequencer, RequestToken};

pub const CONTROLS: [ControlSpec; 7] = [
    ControlSpec::select(ids::IN_SCENARIO, "Scenario", Scenario::WIRE, 1),
    ControlSpec::select(ids::IN_SOURCE, "Heat source", SourceType::WIRE, 0),
    ControlSpec::select(ids::IN_DATA_TYPE, "Cold side data", DataType::WIRE, 0),
    ControlSpec::slider(
        ids::IN_LOAD_REAL,
        "Load resistance",
        (0.1, 20.0, 0.1),
        5.0,
        (ids::VAL_LOAD_REAL, LabelFormat::fixed(1, " Ω")),
    ),
    ControlSpec::slider(
        ids::IN_HOURS_REAL,
        "Charge hours",
        (1.0, 24.0, 1.0),
        5.0,
        (ids::VAL_HOURS_REAL, LabelFormat::raw(" h")),
    ),
    ControlSpec::slider(
        ids::IN_BATTERY,
        "Battery capacity",
        (1.0, 100.0, 1.0),
        10.0,
        (ids::VAL_BATTERY, LabelFormat::raw(" Wh")),
    ),
    ControlSpec::slider(
        ids::IN_CONSUMPTION,
        "Daily consumption",
        (0.1, 20.0, 0.1),
        2.0,
        (ids::VAL_CONSUMPTION, LabelFormat::raw(" Wh")),
    ),
];

/// A real-data refresh in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct RealRequest {
    pub token: RequestToken,
    pub params: RealAnalysisParameters,
}

/// State of the real-data tab.
#[derive(Debug, Clone)]
pub struct RealView {
    pub panel: ParameterPanel,
    pub charts: ChartRegistry,
    sequencer: RequestSequencer,
    applied: Option<RequestToken>,
    devices: Vec<DeviceViability>,
    last_result: Option<RealAnalysisResult>,
}

fn parse_choice<T>(
    panel: &ParameterPanel,
    id: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, PageError> {
    let wire = panel.choice(id)?;
    parse(wire).ok_or_else(|| PageError::MissingElement(format!("{id}[{wire}]")))
}

impl RealView {
    pub fn new(page: &Page) -> Result<Self, PageError> {
        Ok(Self {
            panel: ParameterPanel::bind(&CONTROLS, page)?,
            charts: ChartRegistry::new(),
            sequencer: RequestSequencer::new(),
            applied: None,
            devices: Vec::new(),
            last_result: None,
        })
    }

    pub fn source(&self) -> Result<SourceType, PageError> {
        parse_choice(&self.panel, ids::IN_SOURCE, SourceType::parse)
    }

    pub fn parameters(&self) -> Result<RealAnalysisParameters, PageError> {
        let p = &self.panel;
        Ok(RealAnalysisParameters {
            scenario: parse_choice(p, ids::IN_SCENARIO, Scenario::parse)?,
            source: self.source()?,
            data_type: parse_choice(p, ids::IN_DATA_TYPE, DataType::parse)?,
            load_ohm: p.number(ids::IN_LOAD_REAL)?,
            charge_hours: p.number(ids::IN_HOURS_REAL)?,
            battery_capacity_wh: p.number(ids::IN_BATTERY)?,
            daily_consumption_wh: p.number(ids::IN_CONSUMPTION)?,
        })
    }

    pub fn begin_refresh(&mut self) -> Result<RealRequest, PageError> {
        let params = self.parameters()?;
        let token = self.sequencer.issue();
        tracing::debug!(token = token.value(), "real-data refresh");
        Ok(RealRequest { token, params })
    }

    /// Device lookup using the tab's current scenario inputs.
    pub fn device_query(&self, name: &str, energy_wh: f64) -> Result<DeviceQuery, PageError> {
        Ok(DeviceQuery::new(&self.parameters()?, name, energy_wh))
    }

    pub fn is_loading(&self) -> bool {
        self.sequencer.latest() != self.applied
    }

    pub fn devices(&self) -> &[DeviceViability] {
        &self.devices
    }

    pub fn last_result(&self) -> Option<&RealAnalysisResult> {
        self.last_result.as_ref()
    }

    /// Apply a completed refresh. Failures are logged only. Returns false for
    /// a stale response.
    pub fn apply(
        &mut self,
        page: &mut Page,
        request: &RealRequest,
        outcome: &Result<RealAnalysisResult, ApiError>,
    ) -> bool {
        if !self.sequencer.is_current(request.token) {
            tracing::debug!(token = request.token.value(), "discarding stale real-data response");
            return false;
        }
        self.applied = Some(request.token);

        let data = match outcome {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "real-data refresh failed");
                return true;
            }
        };
        tracing::debug!(
            temperature = data.temperature.len(),
            energy = data.energy.len(),
            battery = data.battery.len(),
            "real-data received"
        );

        self.charts.render::<TimeSeriesChart>(
            page,
            ChartKey::Temperature,
            &TimeSeriesInput::temperature(&data.temperature),
        );
        self.charts.render::<TimeSeriesChart>(
            page,
            ChartKey::Energy,
            &TimeSeriesInput::energy(&data.energy),
        );
        self.charts
            .render::<SeasonalityChart>(page, ChartKey::Seasonality, &data.seasonality);
        self.charts.render::<TimeSeriesChart>(
            page,
            ChartKey::Battery,
            &TimeSeriesInput::battery(&data.battery),
        );

        self.last_result = Some(data.clone());
        true
    }

    /// Append a device result card. Earlier cards are never replaced.
    pub fn apply_device(
        &mut self,
        page: &mut Page,
        outcome: &Result<DeviceViability, ApiError>,
    ) -> bool {
        match outcome {
            Ok(device) => {
                page.append(ids::DEVICE_CONTAINER, device.card());
                self.devices.push(device.clone());
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "device lookup failed");
                false
            }
        }
    }
}
