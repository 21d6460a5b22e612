//! One live chart per canvas.
//!
//! Charts are created on their first render and mutated in place afterwards.
//! A registry never holds two instances for the same canvas, and does nothing
//! for a chart whose canvas is not on the page.

use std::collections::BTreeMap;

use super::families::ChartFamily;
use super::model::{ChartConfig, ChartInstance};
use crate::page::{ids, Page};

/// The charts of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartKey {
    ParamsTemp,
    LossBreakdown,
    DailyCycle,
    PowerTransfer,
    Temperature,
    Energy,
    Seasonality,
    Battery,
}

impl ChartKey {
    pub const THEORETICAL: [ChartKey; 4] = [
        ChartKey::ParamsTemp,
        ChartKey::LossBreakdown,
        ChartKey::DailyCycle,
        ChartKey::PowerTransfer,
    ];

    pub const REAL: [ChartKey; 4] = [
        ChartKey::Temperature,
        ChartKey::Energy,
        ChartKey::Seasonality,
        ChartKey::Battery,
    ];

    /// Canvas element the chart is drawn on.
    pub fn canvas_id(self) -> &'static str {
        match self {
            ChartKey::ParamsTemp => ids::CHART_PARAMS_TEMP,
            ChartKey::LossBreakdown => ids::CHART_LOSSES,
            ChartKey::DailyCycle => ids::CHART_DAILY_CYCLE,
            ChartKey::PowerTransfer => ids::CHART_TRANSFER,
            ChartKey::Temperature => ids::CHART_TEMPERATURE,
            ChartKey::Energy => ids::CHART_ENERGY,
            ChartKey::Seasonality => ids::CHART_SEASONALITY,
            ChartKey::Battery => ids::CHART_BATTERY,
        }
    }
}

/// Live charts of one view.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    instances: BTreeMap<ChartKey, ChartInstance>,
    constructed: usize,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ChartKey) -> Option<&ChartInstance> {
        self.instances.get(&key)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total constructions over the registry's lifetime.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartKey, &ChartInstance)> {
        self.instances.iter().map(|(k, v)| (*k, v))
    }

    /// The chart for `key`, built by `factory` if it does not exist yet.
    /// `None` when the canvas is absent.
    pub fn get_or_create(
        &mut self,
        page: &Page,
        key: ChartKey,
        factory: impl FnOnce() -> ChartConfig,
    ) -> Option<&mut ChartInstance> {
        let canvas = key.canvas_id();
        if !page.has_canvas(canvas) {
            tracing::debug!(canvas, "canvas absent, skipping chart");
            return None;
        }
        if !self.instances.contains_key(&key) {
            self.constructed += 1;
            tracing::debug!(canvas, "creating chart");
        }
        Some(self.instances.entry(key).or_insert_with(|| ChartInstance {
            canvas,
            config: factory(),
            revision: 0,
        }))
    }

    /// Mutate an existing chart in place. Returns false when the chart does
    /// not exist or its canvas is absent.
    pub fn update(
        &mut self,
        page: &Page,
        key: ChartKey,
        mutator: impl FnOnce(&mut ChartConfig),
    ) -> bool {
        if !page.has_canvas(key.canvas_id()) {
            return false;
        }
        match self.instances.get_mut(&key) {
            Some(instance) => {
                mutator(&mut instance.config);
                instance.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Create or update `key` from family `F`. Returns false when the canvas
    /// is absent.
    pub fn render<F: ChartFamily + ?Sized>(
        &mut self,
        page: &Page,
        key: ChartKey,
        input: &F::Input,
    ) -> bool {
        if self.instances.contains_key(&key) {
            self.update(page, key, |config| F::update(config, input))
        } else {
            self.get_or_create(page, key, || F::create(input)).is_some()
        }
    }
}
