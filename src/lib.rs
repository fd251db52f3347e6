pub mod alphabet;
pub mod api;
pub mod cipher;
pub mod config;
pub mod consts;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod scorer;

pub use alphabet::Alphabet;
pub use cipher::Permutation;
pub use error::{SfResult, SubForgeError};
pub use model::TransitionModel;
pub use optimizer::{metropolis_hastings, metropolis_hastings_seeded};
// cmd and reports are binary modules, declared in main.rs.
