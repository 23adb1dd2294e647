//! Trait for document generators.

use super::{GeneratedDocument, GeneratorError};

pub trait Generator<Req> {
    /// Generate a document from the request.
    fn generate(&self, request: &Req) -> Result<GeneratedDocument, GeneratorError>;
}
