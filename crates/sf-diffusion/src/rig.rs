//! Gas breakthrough on a reference-cell/sample-cell rig.
//!
//! The reference cell is charged to `Pc` and opened onto a sample cell holding a crushed
//! sample at `Pi`. The mixed reservoir concentration then decays as gas diffuses into the
//! particles; the edge pressure is that concentration times `R·T`.

use crate::edge::{DiffusionParameters, EdgeSeries};
use crate::error::{DiffusionError, DiffusionResult};
use serde::{Deserialize, Serialize};
use sf_core::units::constants::R_J_PER_MOL_K;
use sf_core::units::{k, pa};
use sf_core::{PressureUnit, TemperatureUnit, convert_pressure, convert_temperature, linspace};
use sf_eos::{EosVariant, MoleSolver};
use sf_fluids::{Gas, GasPropertyProvider};
use std::path::Path;

/// Rig description as written in a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub gas: String,
    /// Equation of state used for the cell densities
    pub eos: String,
    pub temperature: f64,
    pub temperature_unit: String,
    pub initial_pressure: f64,
    pub charge_pressure: f64,
    pub pressure_unit: String,
    /// Reference cell volume Vr [m³]
    pub reference_volume_m3: f64,
    /// Gas volume of the sample cell Vc [m³]
    pub cell_volume_m3: f64,
    /// Sample mass M [kg]
    pub sample_mass_kg: f64,
    /// Bulk specific volume Vgb [m³/kg]
    pub bulk_specific_volume_m3_per_kg: f64,
    /// Porosity φ
    pub porosity: f64,
    /// Permeability k [m²]
    pub permeability_m2: f64,
    /// Dynamic viscosity μ [Pa·s]
    pub viscosity_pa_s: f64,
    /// Adsorption uptake Ka
    pub adsorption_uptake: f64,
    /// Particle radius Ra [m]
    pub particle_radius_m: f64,
    #[serde(default = "default_roots")]
    pub roots: usize,
    pub time: TimeGrid,
}

fn default_roots() -> usize {
    DiffusionParameters::DEFAULT_ROOTS
}

/// Evenly spaced output times [s].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeGrid {
    #[serde(default = "default_start")]
    pub start_s: f64,
    pub end_s: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_start() -> f64 {
    0.1
}

fn default_points() -> usize {
    100
}

impl TimeGrid {
    pub fn times(&self) -> Vec<f64> {
        linspace(self.start_s, self.end_s, self.points)
    }

    fn validate(&self) -> DiffusionResult<()> {
        if !self.start_s.is_finite() || !self.end_s.is_finite() || self.start_s < 0.0 {
            return Err(DiffusionError::Domain {
                what: "time grid must be finite and start at t >= 0",
            });
        }
        if self.end_s < self.start_s {
            return Err(DiffusionError::Domain {
                what: "time grid end precedes its start",
            });
        }
        if self.points == 0 {
            return Err(DiffusionError::Domain {
                what: "time grid needs at least one point",
            });
        }
        Ok(())
    }
}

/// Validated rig in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakthroughRig {
    pub name: Option<String>,
    pub gas: Gas,
    pub eos: EosVariant,
    pub temperature_k: f64,
    pub initial_pressure_pa: f64,
    pub charge_pressure_pa: f64,
    pub reference_volume_m3: f64,
    pub cell_volume_m3: f64,
    pub sample_mass_kg: f64,
    pub bulk_specific_volume_m3_per_kg: f64,
    pub porosity: f64,
    pub permeability_m2: f64,
    pub viscosity_pa_s: f64,
    pub adsorption_uptake: f64,
    pub particle_radius_m: f64,
    pub roots: usize,
    pub time: TimeGrid,
}

/// Outcome of a breakthrough run.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RigReport {
    /// Molar density in the sample cell before opening [mol/m³]
    pub rho_i: f64,
    /// Molar density in the charged reference cell [mol/m³]
    pub rho_c: f64,
    /// Mixed reservoir density at t = 0 [mol/m³]
    pub rho_c0: f64,
    pub capacity_ratio: f64,
    pub transport_coefficient: f64,
    pub equilibrium_pressure_pa: f64,
    pub times_s: Vec<f64>,
    pub edge_concentration: Vec<f64>,
    pub edge_pressure_pa: Vec<f64>,
}

fn positive(v: f64, what: &'static str) -> DiffusionResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(DiffusionError::Domain { what })
    }
}

impl BreakthroughRig {
    pub fn from_config(config: &RigConfig) -> DiffusionResult<Self> {
        let gas: Gas = config.gas.parse()?;
        let eos: EosVariant = config.eos.parse()?;
        let p_unit: PressureUnit = config.pressure_unit.parse()?;
        let t_unit: TemperatureUnit = config.temperature_unit.parse()?;

        let temperature_k = convert_temperature(config.temperature, t_unit, TemperatureUnit::K)?;
        let initial_pressure_pa =
            convert_pressure(config.initial_pressure, p_unit, PressureUnit::Pa_a)?;
        let charge_pressure_pa =
            convert_pressure(config.charge_pressure, p_unit, PressureUnit::Pa_a)?;

        if !(0.0..=1.0).contains(&config.porosity) {
            return Err(DiffusionError::Domain {
                what: "porosity must lie in [0, 1]",
            });
        }
        if !config.adsorption_uptake.is_finite() || config.adsorption_uptake < 0.0 {
            return Err(DiffusionError::Domain {
                what: "adsorption uptake must be non-negative and finite",
            });
        }
        if config.roots == 0 {
            return Err(DiffusionError::Domain {
                what: "at least one series term is required",
            });
        }
        config.time.validate()?;

        let rig = Self {
            name: config.name.clone(),
            gas,
            eos,
            temperature_k,
            initial_pressure_pa: positive(
                initial_pressure_pa,
                "initial pressure must be > 0 Pa abs",
            )?,
            charge_pressure_pa: positive(charge_pressure_pa, "charge pressure must be > 0 Pa abs")?,
            reference_volume_m3: positive(
                config.reference_volume_m3,
                "reference volume must be positive",
            )?,
            cell_volume_m3: positive(config.cell_volume_m3, "cell volume must be positive")?,
            sample_mass_kg: positive(config.sample_mass_kg, "sample mass must be positive")?,
            bulk_specific_volume_m3_per_kg: positive(
                config.bulk_specific_volume_m3_per_kg,
                "bulk specific volume must be positive",
            )?,
            porosity: config.porosity,
            permeability_m2: positive(config.permeability_m2, "permeability must be positive")?,
            viscosity_pa_s: positive(config.viscosity_pa_s, "viscosity must be positive")?,
            adsorption_uptake: config.adsorption_uptake,
            particle_radius_m: positive(
                config.particle_radius_m,
                "particle radius must be positive",
            )?,
            roots: config.roots,
            time: config.time,
        };
        positive(rig.storage_factor(), "porosity and uptake leave no storage")?;
        Ok(rig)
    }

    pub fn from_yaml_str(content: &str) -> DiffusionResult<Self> {
        let config: RigConfig = serde_yaml::from_str(content)?;
        Self::from_config(&config)
    }

    pub fn load_yaml(path: &Path) -> DiffusionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// φ + (1 − φ)·Ka
    fn storage_factor(&self) -> f64 {
        self.porosity + (1.0 - self.porosity) * self.adsorption_uptake
    }

    /// Kc = Vc / (Vgb·M·(φ + (1 − φ)·Ka))
    pub fn capacity_ratio(&self) -> f64 {
        self.cell_volume_m3
            / (self.bulk_specific_volume_m3_per_kg * self.sample_mass_kg * self.storage_factor())
    }

    /// K = k·ρc0·R·T / (μ·(φ + (1 − φ)·Ka))
    pub fn transport_coefficient(&self, rho_c0: f64) -> f64 {
        self.permeability_m2 * rho_c0 * R_J_PER_MOL_K * self.temperature_k
            / (self.viscosity_pa_s * self.storage_factor())
    }

    /// (ρi, ρc, ρc0): cell densities before opening and the mixed reservoir value.
    pub fn densities(
        &self,
        provider: &dyn GasPropertyProvider,
    ) -> DiffusionResult<(f64, f64, f64)> {
        let solver = MoleSolver::new(provider);
        let t = k(self.temperature_k);
        let rho_i = solver
            .molar_density(pa(self.initial_pressure_pa), t, self.gas, self.eos)?
            .value;
        let rho_c = solver
            .molar_density(pa(self.charge_pressure_pa), t, self.gas, self.eos)?
            .value;
        let vr = self.reference_volume_m3;
        let vc = self.cell_volume_m3;
        let rho_c0 = (rho_c * vr + rho_i * vc) / (vr + vc);
        Ok((rho_i, rho_c, rho_c0))
    }

    /// Edge concentration and pressure over the configured time grid.
    pub fn run(&self, provider: &dyn GasPropertyProvider) -> DiffusionResult<RigReport> {
        let (rho_i, rho_c, rho_c0) = self.densities(provider)?;
        let kc = self.capacity_ratio();
        let transport = self.transport_coefficient(rho_c0);

        let params = DiffusionParameters::new(rho_c0, rho_i, kc, self.particle_radius_m)
            .with_roots(self.roots)
            .with_decay_coefficient(transport);
        let series = EdgeSeries::new(params)?;

        let times_s = self.time.times();
        let edge_concentration = series.evaluate_par(&times_s)?;
        let rt = R_J_PER_MOL_K * self.temperature_k;
        let edge_pressure_pa = edge_concentration.iter().map(|rho| rho * rt).collect();

        tracing::info!(
            rig = self.name.as_deref().unwrap_or("unnamed"),
            gas = %self.gas,
            eos = self.eos.label(),
            kc,
            transport,
            points = times_s.len(),
            "breakthrough run"
        );

        Ok(RigReport {
            rho_i,
            rho_c,
            rho_c0,
            capacity_ratio: kc,
            transport_coefficient: transport,
            equilibrium_pressure_pa: series.equilibrium() * rt,
            times_s,
            edge_concentration,
            edge_pressure_pa,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_fluids::TabulatedProvider;

    const RIG: &str = r#"
name: methane-crushed-shale
gas: methane
eos: coolprop
temperature: 318
temperature_unit: K
initial_pressure: 1.0
charge_pressure: 5.0
pressure_unit: bar_a
reference_volume_m3: 5.91e-5
cell_volume_m3: 2.88e-5
sample_mass_kg: 1.51e-2
bulk_specific_volume_m3_per_kg: 3.71e-4
porosity: 5.08e-2
permeability_m2: 5.0e-22
viscosity_pa_s: 1.17e-5
adsorption_uptake: 0.5
particle_radius_m: 0.02
time:
  end_s: 18000
"#;

    #[test]
    fn parses_with_defaults() {
        let rig = BreakthroughRig::from_yaml_str(RIG).unwrap();
        assert_eq!(rig.gas, Gas::Methane);
        assert_eq!(rig.eos, EosVariant::RealGasFactor);
        assert_eq!(rig.roots, 20);
        assert_eq!(rig.time.points, 100);
        assert_eq!(rig.time.start_s, 0.1);
        assert!((rig.charge_pressure_pa - 5.0e5).abs() < 1e-6);
    }

    #[test]
    fn capacity_ratio_matches_hand_calculation() {
        let rig = BreakthroughRig::from_yaml_str(RIG).unwrap();
        let storage = 5.08e-2 + (1.0 - 5.08e-2) * 0.5;
        let expected = 2.88e-5 / (3.71e-4 * 1.51e-2 * storage);
        assert!((rig.capacity_ratio() - expected).abs() < 1e-12);
        assert!((rig.capacity_ratio() - 9.7848).abs() < 1e-3);
    }

    #[test]
    fn ideal_rig_mixes_pressures_by_volume() {
        let rig = BreakthroughRig::from_yaml_str(RIG).unwrap();
        let provider = TabulatedProvider::new();
        let report = rig.run(&provider).unwrap();

        let rt = R_J_PER_MOL_K * 318.0;
        let p_c0 = (5.0e5 * 5.91e-5 + 1.0e5 * 2.88e-5) / (5.91e-5 + 2.88e-5);
        assert!((report.rho_c0 * rt - p_c0).abs() / p_c0 < 1e-9);

        assert_eq!(report.times_s.len(), 100);
        assert_eq!(report.edge_pressure_pa.len(), 100);
        for pair in report.edge_pressure_pa.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        let first = report.edge_pressure_pa[0];
        assert!(first < p_c0 && first > report.equilibrium_pressure_pa);
    }

    #[test]
    fn unknown_gas_and_unit_are_errors() {
        let bad_gas = RIG.replace("gas: methane", "gas: unobtainium");
        assert!(matches!(
            BreakthroughRig::from_yaml_str(&bad_gas),
            Err(DiffusionError::Fluid(_))
        ));
        let bad_unit = RIG.replace("pressure_unit: bar_a", "pressure_unit: torr");
        assert!(matches!(
            BreakthroughRig::from_yaml_str(&bad_unit),
            Err(DiffusionError::Convert(_))
        ));
        let bad_eos = RIG.replace("eos: coolprop", "eos: virial");
        assert!(matches!(
            BreakthroughRig::from_yaml_str(&bad_eos),
            Err(DiffusionError::Eos(_))
        ));
    }

    #[test]
    fn rejects_non_physical_rig() {
        let bad = RIG.replace("porosity: 5.08e-2", "porosity: 1.5");
        assert!(matches!(
            BreakthroughRig::from_yaml_str(&bad),
            Err(DiffusionError::Domain { .. })
        ));
        let bad = RIG.replace("sample_mass_kg: 1.51e-2", "sample_mass_kg: 0");
        assert!(BreakthroughRig::from_yaml_str(&bad).is_err());
    }
}
