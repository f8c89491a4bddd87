mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliResult;
use serde::Serialize;
use sf_core::units::k;
use sf_core::{
    PressureUnit, TemperatureUnit, VolumeUnit, convert_pressure, convert_temperature,
    convert_volume, linspace,
};
use sf_diffusion::{BreakthroughRig, DiffusionParameters, EdgeSeries, RootSearchConfig};
use sf_eos::{EosVariant, GasState, MoleSolver};
use sf_fluids::{CoolPropProvider, Gas, GasPropertyProvider, TabulatedProvider};
use sf_sorption::{SaturationMethod, pseudo_saturation_pressure};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "SorpFlow CLI - gas sorption and breakthrough calculations", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Use tabulated gas constants with Z = 1 instead of CoolProp
    #[arg(long, global = true)]
    tabulated: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moles of gas in a volume
    Moles {
        #[arg(long)]
        pressure: f64,
        #[arg(long, default_value = "Pa_a")]
        pressure_unit: PressureUnit,
        #[arg(long)]
        volume: f64,
        #[arg(long, default_value = "m3")]
        volume_unit: VolumeUnit,
        #[arg(long)]
        temperature: f64,
        #[arg(long, default_value = "K")]
        temperature_unit: TemperatureUnit,
        #[arg(long)]
        gas: Gas,
        /// ideal, coolprop, vanderWaals, RedlichKwong or PengRobinson
        #[arg(long)]
        eos: EosVariant,
    },
    /// Positive roots of the sphere eigenvalue equation
    Roots {
        #[arg(long)]
        kc: f64,
        /// Number of eigenvalues, at most 10 000
        #[arg(short, long, default_value_t = DiffusionParameters::DEFAULT_ROOTS)]
        n: usize,
        /// Scan only [0, 10π] even if fewer than n roots fit
        #[arg(long)]
        fixed_grid: bool,
        /// False-position refinement steps per root
        #[arg(long, default_value_t = 0)]
        refine: usize,
    },
    /// Edge concentration series over a time grid
    Edge {
        #[arg(long)]
        rho_c0: f64,
        #[arg(long)]
        rho_i: f64,
        #[arg(long)]
        kc: f64,
        /// Particle radius [m]
        #[arg(long)]
        radius: f64,
        /// Number of eigenvalues, at most 10 000
        #[arg(short, long, default_value_t = DiffusionParameters::DEFAULT_ROOTS)]
        n: usize,
        /// Exponent coefficient; defaults to Kc
        #[arg(long)]
        decay: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        t_start: f64,
        #[arg(long)]
        t_end: f64,
        #[arg(long, default_value_t = 50)]
        points: usize,
    },
    /// Run a breakthrough rig described in YAML
    Breakthrough {
        rig_path: PathBuf,
        /// Unit for reported edge pressures
        #[arg(long, default_value = "bar_g")]
        unit: PressureUnit,
    },
    /// Convert a value between named units
    Convert {
        quantity: Quantity,
        value: f64,
        from: String,
        to: String,
    },
    /// Pseudo-saturation pressure of a supercritical gas
    Saturation {
        #[arg(long)]
        gas: Gas,
        #[arg(long)]
        temperature: f64,
        #[arg(long, default_value = "K")]
        temperature_unit: TemperatureUnit,
        /// dubinin, amankwah or reduced_kirchhoff
        #[arg(long)]
        method: String,
        /// Exponent for the amankwah method
        #[arg(long)]
        k: Option<f64>,
        #[arg(long, default_value = "Pa_a")]
        unit: PressureUnit,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Quantity {
    Pressure,
    Temperature,
    Volume,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let provider = make_provider(cli.tabulated);
    let out = Output { json: cli.json };

    match cli.command {
        Commands::Moles {
            pressure,
            pressure_unit,
            volume,
            volume_unit,
            temperature,
            temperature_unit,
            gas,
            eos,
        } => cmd_moles(
            &out,
            provider.as_ref(),
            convert_pressure(pressure, pressure_unit, PressureUnit::Pa_a)?,
            convert_volume(volume, volume_unit, VolumeUnit::CubicMeter)?,
            convert_temperature(temperature, temperature_unit, TemperatureUnit::K)?,
            gas,
            eos,
        ),
        Commands::Roots {
            kc,
            n,
            fixed_grid,
            refine,
        } => cmd_roots(&out, kc, n, fixed_grid, refine),
        Commands::Edge {
            rho_c0,
            rho_i,
            kc,
            radius,
            n,
            decay,
            t_start,
            t_end,
            points,
        } => {
            let mut params = DiffusionParameters::new(rho_c0, rho_i, kc, radius).with_roots(n);
            if let Some(d) = decay {
                params = params.with_decay_coefficient(d);
            }
            cmd_edge(&out, params, &linspace(t_start, t_end, points))
        }
        Commands::Breakthrough { rig_path, unit } => {
            cmd_breakthrough(&out, provider.as_ref(), &rig_path, unit)
        }
        Commands::Convert {
            quantity,
            value,
            from,
            to,
        } => cmd_convert(&out, quantity, value, &from, &to),
        Commands::Saturation {
            gas,
            temperature,
            temperature_unit,
            method,
            k: exponent,
            unit,
        } => {
            let method = SaturationMethod::from_name(&method, exponent)?;
            let t_k = convert_temperature(temperature, temperature_unit, TemperatureUnit::K)?;
            cmd_saturation(&out, provider.as_ref(), gas, t_k, method, unit)
        }
    }
}

fn make_provider(tabulated: bool) -> Box<dyn GasPropertyProvider> {
    if tabulated {
        Box::new(TabulatedProvider::new())
    } else {
        Box::new(CoolPropProvider::new())
    }
}

struct Output {
    json: bool,
}

impl Output {
    /// Emit `value` as JSON, or run `text` for the human-readable form.
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> CliResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct MolesOutput {
    gas: String,
    eos: String,
    provider: String,
    moles: f64,
    iterations: usize,
    relative_change: f64,
}

fn cmd_moles(
    out: &Output,
    provider: &dyn GasPropertyProvider,
    p_pa: f64,
    v_m3: f64,
    t_k: f64,
    gas: Gas,
    eos: EosVariant,
) -> CliResult<()> {
    let state = GasState::from_si(p_pa, v_m3, t_k, gas)?;
    let solution = MoleSolver::new(provider).solve(&state, eos)?;
    let result = MolesOutput {
        gas: gas.key().to_string(),
        eos: eos.label().to_string(),
        provider: provider.name().to_string(),
        moles: solution.moles,
        iterations: solution.iterations,
        relative_change: solution.relative_change(),
    };
    out.emit(&result, |r| {
        println!("{:.6e} mol of {} ({}, {})", r.moles, r.gas, r.eos, r.provider);
        if r.iterations > 0 {
            println!(
                "  {} iterations, last relative change {:.2e}",
                r.iterations, r.relative_change
            );
        }
    })
}

#[derive(Serialize)]
struct RootsOutput {
    kc: f64,
    roots: Vec<f64>,
}

fn cmd_roots(out: &Output, kc: f64, n: usize, fixed_grid: bool, refine: usize) -> CliResult<()> {
    let config = RootSearchConfig {
        extend_to_fit: !fixed_grid,
        refine_iterations: refine,
        ..RootSearchConfig::default()
    };
    let roots = sf_diffusion::find_roots_with(kc, n, &config)?;
    let result = RootsOutput {
        kc,
        roots: roots.into_vec(),
    };
    out.emit(&result, |r| {
        println!("Roots for Kc = {}:", r.kc);
        for (i, alpha) in r.roots.iter().enumerate() {
            println!("  {:>3}  {:.9}", i + 1, alpha);
        }
    })
}

#[derive(Serialize)]
struct EdgeOutput {
    equilibrium: f64,
    times_s: Vec<f64>,
    concentration: Vec<f64>,
}

fn cmd_edge(out: &Output, params: DiffusionParameters, times: &[f64]) -> CliResult<()> {
    let series = EdgeSeries::new(params)?;
    let result = EdgeOutput {
        equilibrium: series.equilibrium(),
        times_s: times.to_vec(),
        concentration: series.evaluate_par(times)?,
    };
    out.emit(&result, |r| {
        println!("time_s,concentration");
        for (t, c) in r.times_s.iter().zip(&r.concentration) {
            println!("{},{}", t, c);
        }
        println!("# equilibrium {}", r.equilibrium);
    })
}

#[derive(Serialize)]
struct BreakthroughOutput {
    rig: Option<String>,
    unit: String,
    capacity_ratio: f64,
    transport_coefficient: f64,
    initial_reservoir_pressure: f64,
    equilibrium_pressure: f64,
    times_h: Vec<f64>,
    edge_pressure: Vec<f64>,
}

fn cmd_breakthrough(
    out: &Output,
    provider: &dyn GasPropertyProvider,
    rig_path: &Path,
    unit: PressureUnit,
) -> CliResult<()> {
    let rig = BreakthroughRig::load_yaml(rig_path)?;
    tracing::debug!(path = %rig_path.display(), provider = provider.name(), "loaded rig");
    let report = rig.run(provider)?;
    let rt = sf_core::units::constants::R_J_PER_MOL_K * rig.temperature_k;
    let to_unit = |p: f64| convert_pressure(p, PressureUnit::Pa_a, unit);

    let result = BreakthroughOutput {
        rig: rig.name.clone(),
        unit: unit.label().to_string(),
        capacity_ratio: report.capacity_ratio,
        transport_coefficient: report.transport_coefficient,
        initial_reservoir_pressure: to_unit(report.rho_c0 * rt)?,
        equilibrium_pressure: to_unit(report.equilibrium_pressure_pa)?,
        times_h: report.times_s.iter().map(|t| t / 3600.0).collect(),
        edge_pressure: report
            .edge_pressure_pa
            .iter()
            .map(|&p| to_unit(p))
            .collect::<Result<_, _>>()?,
    };
    out.emit(&result, |r| {
        println!("Rig: {}", r.rig.as_deref().unwrap_or(&rig_path.display().to_string()));
        println!("  Kc = {:.4}, K = {:.4e}", r.capacity_ratio, r.transport_coefficient);
        println!(
            "  reservoir {:.4} {} -> equilibrium {:.4} {}",
            r.initial_reservoir_pressure, r.unit, r.equilibrium_pressure, r.unit
        );
        println!("time_h,edge_pressure_{}", r.unit);
        for (t, p) in r.times_h.iter().zip(&r.edge_pressure) {
            println!("{:.4},{:.6}", t, p);
        }
    })
}

#[derive(Serialize)]
struct ConvertOutput {
    value: f64,
    unit: String,
}

fn cmd_convert(
    out: &Output,
    quantity: Quantity,
    value: f64,
    from: &str,
    to: &str,
) -> CliResult<()> {
    let result = match quantity {
        Quantity::Pressure => {
            let to: PressureUnit = to.parse()?;
            ConvertOutput {
                value: convert_pressure(value, from.parse()?, to)?,
                unit: to.label().to_string(),
            }
        }
        Quantity::Temperature => {
            let to: TemperatureUnit = to.parse()?;
            ConvertOutput {
                value: convert_temperature(value, from.parse()?, to)?,
                unit: to.label().to_string(),
            }
        }
        Quantity::Volume => {
            let to: VolumeUnit = to.parse()?;
            ConvertOutput {
                value: convert_volume(value, from.parse()?, to)?,
                unit: to.label().to_string(),
            }
        }
    };
    out.emit(&result, |r| println!("{} {}", r.value, r.unit))
}

#[derive(Serialize)]
struct SaturationOutput {
    gas: String,
    method: String,
    temperature_k: f64,
    pressure: f64,
    unit: String,
}

fn cmd_saturation(
    out: &Output,
    provider: &dyn GasPropertyProvider,
    gas: Gas,
    t_k: f64,
    method: SaturationMethod,
    unit: PressureUnit,
) -> CliResult<()> {
    let ps = pseudo_saturation_pressure(method, gas, k(t_k), provider)?;
    let result = SaturationOutput {
        gas: gas.key().to_string(),
        method: method.label().to_string(),
        temperature_k: t_k,
        pressure: convert_pressure(ps.value, PressureUnit::Pa_a, unit)?,
        unit: unit.label().to_string(),
    };
    out.emit(&result, |r| {
        println!(
            "Pseudo-saturation pressure of {} at {} K ({}): {:.6e} {}",
            r.gas, r.temperature_k, r.method, r.pressure, r.unit
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_moles_with_original_names() {
        let cli = Cli::try_parse_from([
            "sf-cli",
            "--tabulated",
            "moles",
            "--pressure",
            "5",
            "--pressure-unit",
            "bar_a",
            "--volume",
            "59.1",
            "--volume-unit",
            "ml",
            "--temperature",
            "45",
            "--temperature-unit",
            "degC",
            "--gas",
            "CH4",
            "--eos",
            "PengRobinson",
        ])
        .unwrap();
        assert!(cli.tabulated);
        match cli.command {
            Commands::Moles {
                gas,
                eos,
                pressure_unit,
                ..
            } => {
                assert_eq!(gas, Gas::Methane);
                assert_eq!(eos, EosVariant::PengRobinson);
                assert_eq!(pressure_unit, PressureUnit::bar_a);
            }
            _ => panic!("expected moles"),
        }
    }

    #[test]
    fn rejects_unknown_eos() {
        let parsed = Cli::try_parse_from([
            "sf-cli",
            "moles",
            "--pressure",
            "1e5",
            "--volume",
            "1e-3",
            "--temperature",
            "300",
            "--gas",
            "methane",
            "--eos",
            "virial",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn breakthrough_defaults_to_gauge_bar() {
        let cli = Cli::try_parse_from(["sf-cli", "--json", "breakthrough", "rig.yaml"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Breakthrough { rig_path, unit } => {
                assert_eq!(rig_path, PathBuf::from("rig.yaml"));
                assert_eq!(unit, PressureUnit::bar_g);
            }
            _ => panic!("expected breakthrough"),
        }
    }

    #[test]
    fn moles_command_runs_offline() {
        let provider = TabulatedProvider::new();
        let out = Output { json: true };
        cmd_moles(
            &out,
            &provider,
            101_325.0,
            1e-3,
            298.15,
            Gas::Helium,
            EosVariant::VanDerWaals,
        )
        .unwrap();
    }

    #[test]
    fn saturation_requires_amankwah_exponent() {
        assert!(SaturationMethod::from_name("amankwah", None).is_err());
    }
}
