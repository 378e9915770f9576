//! One codec per parameter-file format.

pub mod deformations;
pub mod gdr_params;
pub mod level_density;
pub mod mass_yields;
pub mod rta;
pub mod spin_scaling;
pub mod tke_model;
