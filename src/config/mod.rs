pub mod cli;
pub mod services;

pub use cli::{Cli, Command};
pub use services::ServicesConfig;
