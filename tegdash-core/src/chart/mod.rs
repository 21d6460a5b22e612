//! Chart model, registry and families.

pub mod families;
pub mod model;
pub mod registry;

pub use families::{
    seasonality_floor, ChartFamily, DailyCycleChart, LossChart, Losses, ParamsTempChart,
    SeasonalityChart, TimeSeriesChart, TimeSeriesInput, TransferChart, TransferInput,
};
pub use model::{Axis, AxisPosition, ChartConfig, ChartInstance, ChartType, Dataset, Scale, Series};
pub use registry::{ChartKey, ChartRegistry};
