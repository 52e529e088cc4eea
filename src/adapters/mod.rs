// Adapters layer: concrete implementations for the filesystem, documents and git.

pub mod datastore;
pub mod git;
pub mod relocator;
pub mod scanner;
pub mod text;

pub use datastore::JsonDatastore;
pub use git::{GitPublisher, NoopPublisher};
pub use relocator::FileRelocator;
pub use scanner::scan_inbox;
pub use text::DocumentReader;
