#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod cycle;
pub mod dump;
pub mod error;
pub mod generation;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod ops;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config};
pub use cycle::detect_cycle;
pub use error::GraphError;
pub use generation::{assign_generations, compute_generation};
pub use layout::{Connector, Layout, NodeLayout, layout};
pub use model::{LineTag, Person, Sex};
pub use normalize::normalize_and_link;
