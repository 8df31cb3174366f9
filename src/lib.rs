pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{HttpCompletionClient, HttpGeocodeClient, HttpOcrClient, HttpPlacesClient};
pub use config::{Cli, Command, ServicesConfig};
pub use core::analysis::AnalysisPipeline;
pub use core::locator::DoctorLocator;
pub use utils::error::{Result, RxError};
