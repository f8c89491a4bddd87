//! Analytical radial diffusion for gas breakthrough on a sorption rig.
//!
//! Carslaw–Jaeger solution for a sphere in a well-stirred reservoir of limited volume:
//! eigenvalues of the boundary condition are located by a grid scan ([`roots`]), then summed
//! into the reservoir (edge) concentration series ([`edge`]). [`rig`] wires both to the
//! mole solver for a full breakthrough-rig scenario.

pub mod edge;
pub mod error;
pub mod rig;
pub mod roots;

pub use edge::{DiffusionParameters, EdgeSeries, edge_concentration, edge_concentration_series};
pub use error::{DiffusionError, DiffusionResult};
pub use rig::{BreakthroughRig, RigConfig, RigReport, TimeGrid};
pub use roots::{
    MAX_ROOTS, RootSearchConfig, RootSet, eigen_function, find_roots, find_roots_with,
};
