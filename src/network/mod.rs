//! Bayesian network model and file loading

pub mod io;
pub mod model;

pub use io::{create_example_networks, load_network_from_file, parse_network_from_string};
pub use model::{Network, NetworkError, NetworkVariable};
