//! Named-unit conversion for rig measurements.
//!
//! Lab sheets record pressures in gauge or absolute bar, temperatures in Celsius and cell
//! volumes in millilitres. Everything is brought to SI here, before it reaches the solvers,
//! and converted back for reporting.
//!
//! Gauge pressures are referenced to one standard atmosphere (101 325 Pa).

use crate::units::constants::{P_ATM_PA, T_ZERO_C_K};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Unit tag not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: &'static str },

    /// Converted value is not physical (negative absolute pressure, T <= 0 K, ...)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },

    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },
}

/// Pressure units, absolute (`_a`) or gauge (`_g`).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureUnit {
    Pa_a,
    kPa_a,
    MPa_a,
    bar_a,
    bar_g,
    psi_a,
    psi_g,
    atm,
}

impl PressureUnit {
    const PSI_PA: f64 = 6_894.757_293;

    /// Multiplier to pascal, and whether the reading is gauge.
    fn scale(self) -> (f64, bool) {
        match self {
            Self::Pa_a => (1.0, false),
            Self::kPa_a => (1e3, false),
            Self::MPa_a => (1e6, false),
            Self::bar_a => (1e5, false),
            Self::bar_g => (1e5, true),
            Self::psi_a => (Self::PSI_PA, false),
            Self::psi_g => (Self::PSI_PA, true),
            Self::atm => (P_ATM_PA, false),
        }
    }

    /// Convert a reading in this unit to absolute pascal.
    pub fn to_pa_abs(self, value: f64) -> f64 {
        let (scale, gauge) = self.scale();
        let pa = value * scale;
        if gauge { pa + P_ATM_PA } else { pa }
    }

    /// Express an absolute pressure in pascal in this unit.
    pub fn from_pa_abs(self, pa_abs: f64) -> f64 {
        let (scale, gauge) = self.scale();
        let pa = if gauge { pa_abs - P_ATM_PA } else { pa_abs };
        pa / scale
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pa_a => "Pa_a",
            Self::kPa_a => "kPa_a",
            Self::MPa_a => "MPa_a",
            Self::bar_a => "bar_a",
            Self::bar_g => "bar_g",
            Self::psi_a => "psi_a",
            Self::psi_g => "psi_g",
            Self::atm => "atm",
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PressureUnit {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pa" | "pa_a" | "pascal" => Ok(Self::Pa_a),
            "kpa" | "kpa_a" => Ok(Self::kPa_a),
            "mpa" | "mpa_a" => Ok(Self::MPa_a),
            "bar" | "bar_a" | "bara" => Ok(Self::bar_a),
            "bar_g" | "barg" => Ok(Self::bar_g),
            "psi_a" | "psia" => Ok(Self::psi_a),
            "psi_g" | "psig" => Ok(Self::psi_g),
            "atm" => Ok(Self::atm),
            _ => Err(ConvertError::UnknownUnit {
                unit: s.to_string(),
                quantity: "Pressure",
            }),
        }
    }
}

/// Temperature units.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    K,
    degC,
    degF,
}

impl TemperatureUnit {
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Self::K => value,
            Self::degC => value + T_ZERO_C_K,
            Self::degF => (value + 459.67) * 5.0 / 9.0,
        }
    }

    pub fn from_kelvin(self, kelvin: f64) -> f64 {
        match self {
            Self::K => kelvin,
            Self::degC => kelvin - T_ZERO_C_K,
            Self::degF => kelvin * 9.0 / 5.0 - 459.67,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::K => "K",
            Self::degC => "degC",
            Self::degF => "degF",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "k" | "kelvin" => Ok(Self::K),
            "degc" | "c" | "°c" | "celsius" => Ok(Self::degC),
            "degf" | "f" | "°f" | "fahrenheit" => Ok(Self::degF),
            _ => Err(ConvertError::UnknownUnit {
                unit: s.to_string(),
                quantity: "Temperature",
            }),
        }
    }
}

/// Volume units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    CubicMeter,
    Liter,
    Milliliter,
    CubicCentimeter,
}

impl VolumeUnit {
    fn scale(self) -> f64 {
        match self {
            Self::CubicMeter => 1.0,
            Self::Liter => 1e-3,
            Self::Milliliter | Self::CubicCentimeter => 1e-6,
        }
    }

    pub fn to_m3(self, value: f64) -> f64 {
        value * self.scale()
    }

    pub fn from_m3(self, value_m3: f64) -> f64 {
        value_m3 / self.scale()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CubicMeter => "m3",
            Self::Liter => "l",
            Self::Milliliter => "ml",
            Self::CubicCentimeter => "cm3",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VolumeUnit {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m3" | "m^3" | "m³" => Ok(Self::CubicMeter),
            "l" | "liter" | "litre" => Ok(Self::Liter),
            "ml" | "milliliter" | "millilitre" => Ok(Self::Milliliter),
            "cm3" | "cm^3" | "cc" => Ok(Self::CubicCentimeter),
            _ => Err(ConvertError::UnknownUnit {
                unit: s.to_string(),
                quantity: "Volume",
            }),
        }
    }
}

fn finite(value: f64, what: &'static str) -> Result<f64, ConvertError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConvertError::NonFinite { what })
    }
}

/// Convert a pressure between named units. Negative absolute pressures are rejected.
pub fn convert_pressure(
    value: f64,
    from: PressureUnit,
    to: PressureUnit,
) -> Result<f64, ConvertError> {
    let pa_abs = from.to_pa_abs(finite(value, "pressure")?);
    if pa_abs < 0.0 {
        return Err(ConvertError::OutOfRange {
            value: pa_abs,
            reason: "absolute pressure cannot be negative",
        });
    }
    Ok(to.from_pa_abs(pa_abs))
}

/// Convert a temperature between named units. Values at or below 0 K are rejected.
pub fn convert_temperature(
    value: f64,
    from: TemperatureUnit,
    to: TemperatureUnit,
) -> Result<f64, ConvertError> {
    let kelvin = from.to_kelvin(finite(value, "temperature")?);
    if kelvin <= 0.0 {
        return Err(ConvertError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(to.from_kelvin(kelvin))
}

/// Convert a volume between named units. Negative volumes are rejected.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> Result<f64, ConvertError> {
    let v = from.to_m3(finite(value, "volume")?);
    if v < 0.0 {
        return Err(ConvertError::OutOfRange {
            value: v,
            reason: "volume cannot be negative",
        });
    }
    Ok(to.from_m3(v))
}
