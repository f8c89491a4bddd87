//! Gas definitions.

use crate::error::FluidError;
use std::fmt;

/// Gases handled in sorption experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gas {
    /// Methane (CH₄)
    Methane,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Helium (He), used for void-volume calibration
    Helium,
    /// Nitrogen (N₂)
    Nitrogen,
    /// Hydrogen (H₂)
    Hydrogen,
    /// Argon (Ar)
    Argon,
    /// Oxygen (O₂)
    Oxygen,
    /// Ethane (C₂H₆)
    Ethane,
    /// Propane (C₃H₈)
    Propane,
    /// Water vapour (H₂O)
    Water,
}

impl Gas {
    pub const ALL: [Gas; 10] = [
        Gas::Methane,
        Gas::CarbonDioxide,
        Gas::Helium,
        Gas::Nitrogen,
        Gas::Hydrogen,
        Gas::Argon,
        Gas::Oxygen,
        Gas::Ethane,
        Gas::Propane,
        Gas::Water,
    ];

    /// Canonical lowercase key, as used in rig sheets.
    pub fn key(&self) -> &'static str {
        match self {
            Gas::Methane => "methane",
            Gas::CarbonDioxide => "carbondioxide",
            Gas::Helium => "helium",
            Gas::Nitrogen => "nitrogen",
            Gas::Hydrogen => "hydrogen",
            Gas::Argon => "argon",
            Gas::Oxygen => "oxygen",
            Gas::Ethane => "ethane",
            Gas::Propane => "propane",
            Gas::Water => "water",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Gas::Methane => Pure::Methane,
            Gas::CarbonDioxide => Pure::CarbonDioxide,
            Gas::Helium => Pure::Helium,
            Gas::Nitrogen => Pure::Nitrogen,
            Gas::Hydrogen => Pure::Hydrogen,
            Gas::Argon => Pure::Argon,
            Gas::Oxygen => Pure::Oxygen,
            Gas::Ethane => Pure::Ethane,
            Gas::Propane => Pure::nPropane,
            Gas::Water => Pure::Water,
        }
    }

}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Gas {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "METHANE" | "CH4" => Ok(Gas::Methane),
            "CARBONDIOXIDE" | "CARBON DIOXIDE" | "CARBON_DIOXIDE" | "CO2" => {
                Ok(Gas::CarbonDioxide)
            }
            "HELIUM" | "HE" => Ok(Gas::Helium),
            "NITROGEN" | "N2" => Ok(Gas::Nitrogen),
            "HYDROGEN" | "H2" => Ok(Gas::Hydrogen),
            "ARGON" | "AR" => Ok(Gas::Argon),
            "OXYGEN" | "O2" => Ok(Gas::Oxygen),
            "ETHANE" | "C2H6" => Ok(Gas::Ethane),
            "PROPANE" | "N-PROPANE" | "C3H8" => Ok(Gas::Propane),
            "WATER" | "H2O" => Ok(Gas::Water),
            _ => Err(FluidError::UnknownGas {
                name: s.trim().to_string(),
            }),
        }
    }
}
