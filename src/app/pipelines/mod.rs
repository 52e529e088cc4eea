pub mod intake_pipeline;

pub use intake_pipeline::IntakePipeline;
