//! sf-fluids: gas property provision for sorpflow.
//!
//! Provides:
//! - Gas definitions for sorption work (CH4, CO2, He, N2, ...)
//! - `GasPropertyProvider` trait: critical constants, acentric factor, compressibility
//! - CoolProp backend for real-gas properties
//! - Tabulated fixture backend for tests and offline use
//!
//! # Architecture
//!
//! The solvers in `sf-eos` and `sf-diffusion` never look properties up on their own; they
//! receive a `&dyn GasPropertyProvider`. CoolProp (via `rfluids`) is the production
//! backend. `TabulatedProvider` carries published critical constants and a fixed
//! compressibility factor so solver behavior can be checked without a property database.
//!
//! # Example
//!
//! ```no_run
//! use sf_fluids::{CoolPropProvider, Gas, GasPropertyProvider};
//! use sf_core::units::{pa, k};
//!
//! let provider = CoolPropProvider::new();
//! let z = provider
//!     .compressibility_factor(pa(5.0e6), k(318.0), Gas::Methane)
//!     .unwrap();
//! println!("Z = {z:.4}");
//! ```

pub mod coolprop;
pub mod error;
pub mod gas;
pub mod provider;
pub mod tabulated;

// Re-exports for ergonomics
pub use coolprop::CoolPropProvider;
pub use error::{FluidError, FluidResult};
pub use gas::Gas;
pub use provider::GasPropertyProvider;
pub use tabulated::{CriticalConstants, TabulatedProvider};
