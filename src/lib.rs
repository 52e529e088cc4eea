pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{DocumentReader, GitPublisher, NoopPublisher};
pub use crate::app::pipelines::IntakePipeline;
pub use crate::config::{CliConfig, IntakeConfig};
pub use crate::core::engine::IntakeEngine;
pub use crate::utils::error::{IntakeError, Result};
