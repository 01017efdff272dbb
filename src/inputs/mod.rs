//! Engine inputs: the startup parameter record and its loaders

mod params;
pub mod loader;

pub use params::StartupParameters;
pub use loader::{
    load_default_startups, load_parameter_sets, load_parameter_sets_from_reader,
    load_parameters_json, parse_parameters_json, NamedParameters,
};
