mod document;
mod error;
mod requirement;

pub use document::ManifestDocument;
pub use error::ManifestError;
pub use requirement::rewrite_requirement;
