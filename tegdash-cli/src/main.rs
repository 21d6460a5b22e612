//! TEG Dashboard CLI: the simulation service without the terminal UI.
//!
//! Commands:
//! - `simulate`: one theoretical simulation, result cards and notes
//! - `cycle`: the 24-hour hot-side temperature cycle of a heat source
//! - `analyze`: recorded-data analysis, optional CSV export
//! - `device`: viability of a device over the recorded days
//! - `sweep`: Seebeck coefficient and internal resistance vs temperature
//!   (offline)

mod export;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tegdash_core::api::{DailyCycle, DeviceViability, RealAnalysisResult, SimulationResult};
use tegdash_core::interpretation::Interpretation;
use tegdash_core::params::{
    DailyCycleQuery, DataType, DeviceQuery, ModulePreset, RealAnalysisParameters, Scenario,
    SimulationParameters, SourceType,
};
use tegdash_core::sweep::temperature_sweep;
use tegdash_core::{ApiClient, DashboardConfig};

#[derive(Parser)]
#[command(
    name = "tegdash",
    about = "TEG Dashboard CLI: thermoelectric generator simulations from the shell"
)]
struct Cli {
    /// Simulation service base URL. Overrides the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds. Overrides the config file.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Config file. Defaults to <config dir>/tegdash/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one theoretical simulation.
    Simulate {
        /// Module preset: sp1848, generico, personalizado.
        #[arg(long, default_value = "sp1848", value_parser = parse_module)]
        module: ModulePreset,

        /// Area, cm² (personalizado only).
        #[arg(long)]
        area: Option<f64>,

        /// Thickness, mm (personalizado only).
        #[arg(long)]
        thickness: Option<f64>,

        /// Thermal resistance, K/W. Defaults to the preset value.
        #[arg(long)]
        r_th: Option<f64>,

        /// Emissivity. Defaults to the preset value.
        #[arg(long)]
        emissivity: Option<f64>,

        /// Hot side, °C.
        #[arg(long, default_value_t = 150.0)]
        hot: f64,

        /// Cold side, °C.
        #[arg(long, default_value_t = 10.0)]
        cold: f64,

        /// Load resistance, Ω.
        #[arg(long, default_value_t = 2.5)]
        load: f64,

        /// Charge hours per day.
        #[arg(long, default_value_t = 5.0)]
        hours: f64,

        /// Also print the interpretation notes.
        #[arg(long, default_value_t = false)]
        explain: bool,

        /// Print the raw service response as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the daily hot-side cycle of a heat source.
    Cycle {
        /// Heat source: fuego, residuos, industrial.
        #[arg(long, default_value = "fuego", value_parser = parse_source)]
        source: SourceType,

        /// Peak hot-side temperature, °C.
        #[arg(long, default_value_t = 150.0)]
        peak: f64,

        /// Ambient temperature, °C.
        #[arg(long, default_value_t = 10.0)]
        ambient: f64,
    },
    /// Analyze the recorded temperature history.
    Analyze {
        #[command(flatten)]
        real: RealArgs,

        /// Battery capacity, Wh.
        #[arg(long, default_value_t = 10.0)]
        battery: f64,

        /// Daily consumption, Wh.
        #[arg(long, default_value_t = 2.0)]
        consumption: f64,

        /// Write CSV files and the raw response under this directory.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Check whether a device can run on the harvested energy.
    Device {
        /// Device name.
        name: String,

        /// Energy the device needs per day, Wh.
        energy: f64,

        #[command(flatten)]
        real: RealArgs,
    },
    /// Seebeck coefficient and internal resistance from 50 to 250 °C. Works offline.
    Sweep {
        /// Module preset: sp1848, generico, personalizado.
        #[arg(long, default_value = "sp1848", value_parser = parse_module)]
        module: ModulePreset,

        /// Area, cm² (personalizado only).
        #[arg(long)]
        area: Option<f64>,

        /// Thickness, mm (personalizado only).
        #[arg(long)]
        thickness: Option<f64>,
    },
}

/// Parameters shared by `analyze` and `device`.
#[derive(Args)]
struct RealArgs {
    /// Hot-side scenario: pesimista, realista, optimista.
    #[arg(long, default_value = "realista", value_parser = parse_scenario)]
    scenario: Scenario,

    /// Heat source: fuego, residuos, industrial.
    #[arg(long, default_value = "fuego", value_parser = parse_source)]
    source: SourceType,

    /// Cold-side series: tavg, tmin.
    #[arg(long, default_value = "tavg", value_parser = parse_data_type)]
    data_type: DataType,

    /// Load resistance, Ω.
    #[arg(long, default_value_t = 5.0)]
    load: f64,

    /// Charge hours per day.
    #[arg(long, default_value_t = 5.0)]
    hours: f64,
}

impl RealArgs {
    fn params(&self) -> RealAnalysisParameters {
        RealAnalysisParameters {
            scenario: self.scenario,
            source: self.source,
            data_type: self.data_type,
            load_ohm: self.load,
            charge_hours: self.hours,
            ..RealAnalysisParameters::default()
        }
    }
}

fn choice<T>(value: &str, parse: fn(&str) -> Option<T>, valid: &[&str]) -> Result<T, String> {
    parse(value).ok_or_else(|| format!("unknown value '{value}'. Valid: {}", valid.join(", ")))
}

fn parse_module(s: &str) -> Result<ModulePreset, String> {
    choice(s, ModulePreset::parse, ModulePreset::WIRE)
}

fn parse_source(s: &str) -> Result<SourceType, String> {
    choice(s, SourceType::parse, SourceType::WIRE)
}

fn parse_scenario(s: &str) -> Result<Scenario, String> {
    choice(s, Scenario::parse, Scenario::WIRE)
}

fn parse_data_type(s: &str) -> Result<DataType, String> {
    choice(s, DataType::parse, DataType::WIRE)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("TEGDASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let connect = || {
        ApiClient::new(&config.api.base_url, config.api.timeout())
            .context("building the API client")
    };

    match cli.command {
        Commands::Simulate {
            module,
            area,
            thickness,
            r_th,
            emissivity,
            hot,
            cold,
            load,
            hours,
            explain,
            json,
        } => {
            let mut params = module_geometry(module, area, thickness)?;
            if let Some(values) = module.values() {
                params.thermal_resistance = values.thermal_resistance;
                params.emissivity = values.emissivity;
            }
            params.thermal_resistance = r_th.unwrap_or(params.thermal_resistance);
            params.emissivity = emissivity.unwrap_or(params.emissivity);
            params.hot_temp_c = hot;
            params.cold_temp_c = cold;
            params.load_ohm = load;
            params.charge_hours = hours;
            run_simulate(&connect()?, &params, explain, json)
        }
        Commands::Cycle {
            source,
            peak,
            ambient,
        } => {
            let query = DailyCycleQuery {
                source,
                peak_hot_c: peak,
                ambient_c: ambient,
            };
            let cycle = connect()?.daily_cycle(&query)?;
            print_cycle(&cycle);
            Ok(())
        }
        Commands::Analyze {
            real,
            battery,
            consumption,
            export,
        } => {
            let params = RealAnalysisParameters {
                battery_capacity_wh: battery,
                daily_consumption_wh: consumption,
                ..real.params()
            };
            let result = connect()?.analyze(&params)?;
            print_analysis(&result);
            if let Some(dir) = export {
                let run_dir = export::save_analysis(&result, &dir)?;
                println!("Export saved to: {}", run_dir.display());
            }
            Ok(())
        }
        Commands::Device { name, energy, real } => {
            if name.trim().is_empty() {
                bail!("device name must not be empty");
            }
            if !energy.is_finite() || energy <= 0.0 {
                bail!("device energy must be a positive number of Wh");
            }
            let query = DeviceQuery::new(&real.params(), name.trim(), energy);
            let device = connect()?.device_viability(&query)?;
            print_device(&device);
            Ok(())
        }
        Commands::Sweep {
            module,
            area,
            thickness,
        } => run_sweep(module, area, thickness),
    }
}

/// Config file, then command-line overrides.
fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match cli.config.clone().or_else(DashboardConfig::default_path) {
        Some(path) => DashboardConfig::load_or_default(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        config.api.timeout_secs = secs;
    }
    Ok(config)
}

/// Area and thickness for a preset. Only the custom preset accepts overrides.
fn module_geometry(
    module: ModulePreset,
    area: Option<f64>,
    thickness: Option<f64>,
) -> Result<SimulationParameters> {
    let mut params = SimulationParameters::default();
    match module.values() {
        Some(values) => {
            if area.is_some() || thickness.is_some() {
                bail!("--area and --thickness require --module personalizado");
            }
            params.area_cm2 = values.area_cm2;
            params.thickness_mm = values.thickness_mm;
        }
        None => {
            params.area_cm2 = area.unwrap_or(params.area_cm2);
            params.thickness_mm = thickness.unwrap_or(params.thickness_mm);
        }
    }
    if params.area_cm2 <= 0.0 || params.thickness_mm <= 0.0 {
        bail!("area and thickness must be positive");
    }
    Ok(params)
}

fn run_simulate(
    client: &ApiClient,
    params: &SimulationParameters,
    explain: bool,
    json: bool,
) -> Result<()> {
    let result = client.simulate(params)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_simulation(&result);
    if explain {
        let notes = Interpretation::new(&result, params);
        for (title, text) in [
            ("Parameters vs temperature", &notes.params_temp),
            ("Heat losses", &notes.losses),
            ("Daily cycle", &notes.cycle),
            ("Power transfer", &notes.transfer),
        ] {
            println!("--- {title} ---");
            println!("{text}");
            println!();
        }
    }
    Ok(())
}

fn run_sweep(module: ModulePreset, area: Option<f64>, thickness: Option<f64>) -> Result<()> {
    let params = module_geometry(module, area, thickness)?;
    println!(
        "Module: {} ({} cm², {} mm)",
        module.title(),
        params.area_cm2,
        params.thickness_mm
    );
    println!();
    println!("{:>8} {:>12} {:>10}", "T (°C)", "α (V/K)", "R (Ω)");
    println!("{}", "-".repeat(32));
    for point in temperature_sweep(params.area_cm2, params.thickness_mm) {
        println!(
            "{:>8.0} {:>12.5} {:>10.3}",
            point.temp_c, point.alpha, point.resistance
        );
    }
    Ok(())
}

fn print_simulation(r: &SimulationResult) {
    println!();
    println!("=== Simulation Result ===");
    println!("Energy/cycle:   {:.2} Wh (max {:.2} Wh)", r.energy_load_wh, r.energy_max_wh);
    println!("ΔT:             {:.1} °C", r.delta_t);
    println!("Voltage:        {:.3} V (open circuit {:.3} V)", r.load_voltage, r.open_circuit_voltage);
    println!("Current:        {:.2} mA", r.current * 1000.0);
    println!("Power:          {:.2} mW (max {:.2} mW)", r.power_load * 1000.0, r.power_max * 1000.0);
    println!("Heat flow:      {:.2} W", r.heat_flow);
    println!();
    println!("--- Efficiency ---");
    println!("Carnot:         {:.1}%", r.efficiency_carnot);
    println!("TEG:            {:.2}%", r.efficiency_teg);
    println!();
    println!("--- Module ---");
    println!("Seebeck α:      {:.5} V/K", r.alpha);
    println!("Internal R:     {:.3} Ω", r.internal_resistance);
    println!("Thermal K:      {:.3} W/K", r.thermal_conductance);
    println!(
        "Losses:         {:.2} W ({:.2} radiation, {:.2} conduction)",
        r.losses_total, r.losses_radiation, r.losses_conduction
    );
    println!();
}

fn print_cycle(cycle: &DailyCycle) {
    println!("Source: {}", cycle.source);
    println!("{:>6} {:>10}", "Hour", "T_h (°C)");
    println!("{}", "-".repeat(17));
    for (hour, temp) in cycle.hours.iter().zip(&cycle.hot_temps) {
        println!("{:>6} {:>10.1}", hour, temp);
    }
}

fn print_analysis(result: &RealAnalysisResult) {
    let days = result.energy.len();
    let total: f64 = result.energy.iter().map(|p| p.energy_wh).sum();
    let mean = if days > 0 { total / days as f64 } else { 0.0 };
    let months = result
        .seasonality
        .iter()
        .filter(|m| m.summary().is_some())
        .count();
    let min_battery = result
        .battery
        .iter()
        .map(|p| p.level)
        .fold(f64::INFINITY, f64::min);

    println!();
    println!("=== Real Data Analysis ===");
    if let (Some(first), Some(last)) = (result.temperature.first(), result.temperature.last()) {
        println!("Period:         {} to {}", first.date, last.date);
    }
    println!("Days:           {days}");
    println!("Total energy:   {total:.2} Wh");
    println!("Mean energy:    {mean:.3} Wh/day");
    println!("Months w/ data: {months}/{}", result.seasonality.len());
    if min_battery.is_finite() {
        println!("Lowest battery: {min_battery:.2} Wh");
    }
    println!();
}

fn print_device(device: &DeviceViability) {
    println!("{}", device.card());
}
