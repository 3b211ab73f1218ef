mod gemini;

pub use gemini::*;

use async_trait::async_trait;

use crate::structs::ContentError;

/// Handle to a file registered with the provider's file store.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRef {
    pub uri: String,
    pub mime_type: String,
}

/// One piece of content sent with a generation call.
#[derive(Debug, Clone)]
pub enum RequestPart {
    Text(String),
    File(FileRef),
}

/// The external generative-content API. Behind a trait so the provider can
/// be swapped or mocked in tests.
#[async_trait]
pub trait ContentProvider {
    async fn upload(&self, data: Vec<u8>, mime_type: &str) -> Result<FileRef, ContentError>;

    async fn generate(
        &self,
        parts: &[RequestPart],
        system_instruction: &str,
    ) -> Result<String, ContentError>;
}
