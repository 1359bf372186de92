//! Building blocks for sectional aerosol population-balance representations
//!
//! The crate covers the recurring numerical core of aerosol analysis: a
//! sectional discretization of particle mass space, closed-form log-normal
//! distribution math, projection of continuous distributions onto sections
//! (and the reconstruction of discrete dN/dlogd curves), and a coalescence
//! kernel blending the continuum and free-molecular asymptotic regimes
//! across the Knudsen-number range.

pub mod error;
pub mod logger;

pub mod routines {
    pub mod coalescence;
    pub mod datafile;
    pub mod distribution;
    pub mod grid;
    pub mod projection;
    pub mod settings;
    pub mod thermo;
}

pub mod prelude {
    pub use crate::error::Error;
    pub use crate::logger::setup_log;
    pub use crate::routines::coalescence::{
        blend, kernel, kernel_curve, BlendMode, PowerLawTerm, RegimeSpec,
    };
    pub use crate::routines::datafile::{read_matrix, read_params};
    pub use crate::routines::distribution::LogNormal;
    pub use crate::routines::grid::{Grid, GridType};
    pub use crate::routines::projection::{Projector, SectionalField};
    pub use crate::routines::settings::{read_settings, write_settings, Settings};
    pub use crate::routines::thermo::{
        continuum_prefactor, free_molecular_prefactor, mean_free_path, Constants, GasState,
        Species,
    };
}
