//! Equation-of-state variants and tabulated Van der Waals constants.

use crate::error::{EosError, EosResult};
use sf_fluids::Gas;
use std::fmt;

/// How moles are derived from a gas state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EosVariant {
    /// n = PV/(RT)
    Ideal,
    /// n = PV/(ZRT), Z from the property provider
    RealGasFactor,
    /// Fixed point on moles with tabulated (a, b)
    VanDerWaals,
    /// Generalized cubic with alpha = Tr^-1/2
    RedlichKwong,
    /// Generalized cubic with the acentric-factor alpha correlation
    PengRobinson,
}

impl EosVariant {
    pub const ALL: [EosVariant; 5] = [
        EosVariant::Ideal,
        EosVariant::RealGasFactor,
        EosVariant::VanDerWaals,
        EosVariant::RedlichKwong,
        EosVariant::PengRobinson,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::RealGasFactor => "real-gas-factor",
            Self::VanDerWaals => "van-der-waals",
            Self::RedlichKwong => "redlich-kwong",
            Self::PengRobinson => "peng-robinson",
        }
    }
}

impl fmt::Display for EosVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EosVariant {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "ideal" => Ok(Self::Ideal),
            "coolprop" | "z" | "realgasfactor" | "compressibility" => Ok(Self::RealGasFactor),
            "vanderwaals" | "vdw" => Ok(Self::VanDerWaals),
            "redlichkwong" | "rk" => Ok(Self::RedlichKwong),
            "pengrobinson" | "pr" => Ok(Self::PengRobinson),
            _ => Err(EosError::UnknownVariant {
                name: s.trim().to_string(),
            }),
        }
    }
}

/// Van der Waals constants for one gas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerWaalsConstants {
    /// Attraction parameter [Pa·m⁶/mol²]
    pub a: f64,
    /// Co-volume [m³/mol]
    pub b: f64,
}

impl VanDerWaalsConstants {
    /// Tabulated constants; only the rig gases are listed.
    pub fn of(gas: Gas) -> EosResult<Self> {
        match gas {
            Gas::Methane => Ok(Self {
                a: 0.2283,
                b: 4.278e-5,
            }),
            Gas::CarbonDioxide => Ok(Self {
                a: 0.364,
                b: 4.267e-5,
            }),
            Gas::Helium => Ok(Self {
                a: 0.00346,
                b: 2.38e-5,
            }),
            Gas::Nitrogen
            | Gas::Hydrogen
            | Gas::Argon
            | Gas::Oxygen
            | Gas::Ethane
            | Gas::Propane
            | Gas::Water => Err(EosError::UnknownGas {
                name: gas.key().to_string(),
                context: "no tabulated Van der Waals constants",
            }),
        }
    }
}
