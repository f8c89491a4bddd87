//! sf-core: stable foundation for sorpflow.
//!
//! Contains:
//! - units (uom SI types + constructors, physical constants)
//! - numeric (tolerant comparison, finiteness/positivity checks, linspace)
//! - convert (named engineering units <-> SI, gauge/absolute pressure)
//! - error (shared error types)

pub mod convert;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use convert::{
    ConvertError, PressureUnit, TemperatureUnit, VolumeUnit, convert_pressure,
    convert_temperature, convert_volume,
};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
