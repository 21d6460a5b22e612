//! Page element registry.
//!
//! The dashboard binds to a fixed set of element ids: inputs, labels, chart
//! canvases and text containers. The front end renders whatever the page
//! holds. Non-essential elements (labels, canvases, containers) can be removed
//! from a page, in which case writes to them are silently skipped. Inputs are
//! essential: binding a parameter panel to a page without one of its inputs
//! fails at startup.

use std::collections::BTreeMap;

use thiserror::Error;

/// Element ids, mirroring the dashboard markup.
pub mod ids {
    // Theoretical tab inputs
    pub const IN_MODULE: &str = "in-modulo";
    pub const IN_AREA: &str = "in-area";
    pub const IN_THICKNESS: &str = "in-espesor";
    pub const IN_THERMAL_RESISTANCE: &str = "in-r-th";
    pub const IN_EMISSIVITY: &str = "in-emitancia";
    pub const IN_HOT_TEMP: &str = "in-th";
    pub const IN_COLD_TEMP: &str = "in-tc";
    pub const IN_LOAD: &str = "in-rl";
    pub const IN_HOURS: &str = "in-horas";

    // Theoretical tab labels
    pub const VAL_AREA: &str = "val-area";
    pub const VAL_THICKNESS: &str = "val-espesor";
    pub const VAL_THERMAL_RESISTANCE: &str = "val-r-th";
    pub const VAL_EMISSIVITY: &str = "val-emitancia";
    pub const VAL_HOT_TEMP: &str = "val-th";
    pub const VAL_COLD_TEMP: &str = "val-tc";
    pub const VAL_LOAD: &str = "val-rl";
    pub const VAL_HOURS: &str = "val-horas";

    // Theoretical result cards
    pub const RES_ENERGY: &str = "res-energia";
    pub const RES_DELTA_T: &str = "res-deltaT";
    pub const RES_VOLTAGE: &str = "res-v-oc";
    pub const RES_CURRENT: &str = "res-corriente";
    pub const RES_POWER: &str = "res-potencia";
    pub const RES_CARNOT: &str = "res-eficiencia-carnot";
    pub const RES_TEG: &str = "res-eficiencia-teg";

    // Interpretation blocks
    pub const TXT_PARAMS_TEMP: &str = "interpretacion-params-temp";
    pub const TXT_LOSSES: &str = "interpretacion-perdidas";
    pub const TXT_CYCLE: &str = "interpretacion-ciclo";
    pub const TXT_TRANSFER: &str = "interpretacion-transferencia";

    // Containers
    pub const THEORY_RESULTS: &str = "teoria-resultados";
    pub const DEVICE_CONTAINER: &str = "device-viability-container";

    // Real tab inputs
    pub const IN_SCENARIO: &str = "in-scenario";
    pub const IN_SOURCE: &str = "in-fuente";
    pub const IN_DATA_TYPE: &str = "in-datatype";
    pub const IN_LOAD_REAL: &str = "in-rl-real";
    pub const IN_HOURS_REAL: &str = "in-horas-real";
    pub const IN_BATTERY: &str = "in-batt";
    pub const IN_CONSUMPTION: &str = "in-cons";

    // Real tab labels
    pub const VAL_LOAD_REAL: &str = "val-rl-real";
    pub const VAL_HOURS_REAL: &str = "val-horas-real";
    pub const VAL_BATTERY: &str = "val-batt";
    pub const VAL_CONSUMPTION: &str = "val-cons";

    // Canvases
    pub const CHART_PARAMS_TEMP: &str = "chart-params-temp";
    pub const CHART_LOSSES: &str = "chart-perdidas-pie";
    pub const CHART_DAILY_CYCLE: &str = "chart-ciclo-diario";
    pub const CHART_TRANSFER: &str = "chart-transferencia";
    pub const CHART_TEMPERATURE: &str = "chart-temp";
    pub const CHART_ENERGY: &str = "chart-energy";
    pub const CHART_SEASONALITY: &str = "chart-seasonality";
    pub const CHART_BATTERY: &str = "chart-battery";
}

/// Errors raised while binding to a page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("required element '{0}' is missing from the page")]
    MissingElement(String),

    #[error("element '{id}' is a {found}, expected {expected}")]
    WrongKind {
        id: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A single page element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A user input. Its value lives in the parameter panel that binds it.
    Input,
    /// A text label.
    Label(String),
    /// A chart canvas.
    Canvas,
    /// A container holding rendered blocks of text, in insertion order.
    Container(Vec<String>),
}

impl Element {
    fn kind(&self) -> &'static str {
        match self {
            Element::Input => "input",
            Element::Label(_) => "label",
            Element::Canvas => "canvas",
            Element::Container(_) => "container",
        }
    }
}

/// The set of elements a front end renders.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: BTreeMap<String, Element>,
}

impl Page {
    /// An empty page.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full dashboard layout: every input, label, canvas and container.
    pub fn standard() -> Self {
        use ids::*;

        let mut page = Self::empty();
        for id in [
            IN_MODULE, IN_AREA, IN_THICKNESS, IN_THERMAL_RESISTANCE, IN_EMISSIVITY,
            IN_HOT_TEMP, IN_COLD_TEMP, IN_LOAD, IN_HOURS, IN_SCENARIO, IN_SOURCE,
            IN_DATA_TYPE, IN_LOAD_REAL, IN_HOURS_REAL, IN_BATTERY, IN_CONSUMPTION,
        ] {
            page.insert(id, Element::Input);
        }
        for id in [
            VAL_AREA, VAL_THICKNESS, VAL_THERMAL_RESISTANCE, VAL_EMISSIVITY, VAL_HOT_TEMP,
            VAL_COLD_TEMP, VAL_LOAD, VAL_HOURS, VAL_LOAD_REAL, VAL_HOURS_REAL, VAL_BATTERY,
            VAL_CONSUMPTION, RES_ENERGY, RES_DELTA_T, RES_VOLTAGE, RES_CURRENT, RES_POWER,
            RES_CARNOT, RES_TEG, TXT_PARAMS_TEMP, TXT_LOSSES, TXT_CYCLE, TXT_TRANSFER,
        ] {
            page.insert(id, Element::Label(String::new()));
        }
        for id in [
            CHART_PARAMS_TEMP, CHART_LOSSES, CHART_DAILY_CYCLE, CHART_TRANSFER,
            CHART_TEMPERATURE, CHART_ENERGY, CHART_SEASONALITY, CHART_BATTERY,
        ] {
            page.insert(id, Element::Canvas);
        }
        page.insert(THEORY_RESULTS, Element::Container(Vec::new()));
        page.insert(DEVICE_CONTAINER, Element::Container(Vec::new()));
        page
    }

    /// Add or replace an element.
    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    /// Remove an element. Returns true if it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.elements.remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Fail unless `id` exists and is an input.
    pub fn require_input(&self, id: &str) -> Result<(), PageError> {
        match self.elements.get(id) {
            Some(Element::Input) => Ok(()),
            Some(other) => Err(PageError::WrongKind {
                id: id.to_string(),
                expected: "input",
                found: other.kind(),
            }),
            None => Err(PageError::MissingElement(id.to_string())),
        }
    }

    pub fn has_canvas(&self, id: &str) -> bool {
        matches!(self.elements.get(id), Some(Element::Canvas))
    }

    /// Write label text. No-op if the label is absent.
    pub fn set_label(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Label(current)) => {
                *current = text.into();
                true
            }
            _ => false,
        }
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Label(text)) => Some(text),
            _ => None,
        }
    }

    /// Replace a container's contents with a single block (or nothing when
    /// `text` is empty). No-op if the container is absent.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Container(blocks)) => {
                let text = text.into();
                blocks.clear();
                if !text.is_empty() {
                    blocks.push(text);
                }
                true
            }
            _ => false,
        }
    }

    /// Append a block to a container. No-op if the container is absent.
    pub fn append(&mut self, id: &str, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Container(blocks)) => {
                blocks.push(text.into());
                true
            }
            _ => false,
        }
    }

    pub fn container(&self, id: &str) -> Option<&[String]> {
        match self.elements.get(id) {
            Some(Element::Container(blocks)) => Some(blocks),
            _ => None,
        }
    }
}
