pub mod classifier;
pub mod engine;
pub mod fields;
pub mod profile;

pub use crate::domain::model::{
    CandidateProfile, CandidateRecord, FileOutcome, IngestReport, PublishStep, PublishSummary,
    Relocation,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Publisher, TextExtractor};
pub use crate::domain::vocabulary::{RoleEntry, RoleVocabulary};
pub use crate::utils::error::Result;
