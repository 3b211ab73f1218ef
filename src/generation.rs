use tracing::{debug, info};

use crate::apis::{ContentProvider, RequestPart};
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::structs::{ContentError, GenerationRequest};

/// Run one submission through prompt building, the optional attachment
/// upload and the generation call.
pub async fn run_generation(
    provider: &impl ContentProvider,
    request: &GenerationRequest,
) -> Result<String, ContentError> {
    // Validate required fields before touching the network
    if request.topic.trim().is_empty() {
        return Err(ContentError::Validation("Topic is required".to_string()));
    }

    let prompt = build_prompt(request);
    debug!("Built prompt ({} chars)", prompt.len());

    let mut parts = vec![RequestPart::Text(prompt)];

    // Register the attachment with the provider first, the generation call
    // only carries the returned handle
    if let Some(attachment) = &request.attachment {
        let file = provider
            .upload(attachment.data.clone(), &attachment.mime_type)
            .await?;
        parts.push(RequestPart::File(file));
    }

    let text = provider.generate(&parts, SYSTEM_INSTRUCTION).await?;
    info!("Generation finished ({} chars)", text.len());

    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::apis::FileRef;
    use crate::structs::{Attachment, ContentType, Language};

    #[derive(Default)]
    struct MockProvider {
        uploads: AtomicUsize,
        generations: AtomicUsize,
        fail_upload: bool,
    }

    #[async_trait]
    impl ContentProvider for MockProvider {
        async fn upload(&self, _data: Vec<u8>, mime_type: &str) -> Result<FileRef, ContentError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail_upload {
                return Err(ContentError::Upload("rejected".to_string()));
            }
            Ok(FileRef {
                uri: "https://provider.test/files/abc123".to_string(),
                mime_type: mime_type.to_string(),
            })
        }

        async fn generate(
            &self,
            parts: &[RequestPart],
            _system_instruction: &str,
        ) -> Result<String, ContentError> {
            self.generations.fetch_add(1, Ordering::SeqCst);
            assert!(matches!(parts.first(), Some(RequestPart::Text(_))));
            Ok(format!("generated from {} part(s)", parts.len()))
        }
    }

    fn request(topic: &str, attachment: Option<Attachment>) -> GenerationRequest {
        GenerationRequest {
            topic: topic.to_string(),
            content_type: ContentType::BlogPost,
            tone: None,
            age_group: None,
            brand_voice: None,
            objective: None,
            language: Language::English,
            attachment,
        }
    }

    fn attachment() -> Attachment {
        Attachment {
            data: b"not really a png".to_vec(),
            mime_type: "image/png".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_topic_fails_without_provider_calls() {
        let provider = MockProvider::default();
        let err = run_generation(&provider, &request("  ", None))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Validation(_)));
        assert_eq!(provider.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(provider.generations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn text_only_request_skips_upload() {
        let provider = MockProvider::default();
        let text = run_generation(&provider, &request("bees", None))
            .await
            .unwrap();

        assert_eq!(text, "generated from 1 part(s)");
        assert_eq!(provider.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(provider.generations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn attachment_is_uploaded_then_referenced() {
        let provider = MockProvider::default();
        let text = run_generation(&provider, &request("bees", Some(attachment())))
            .await
            .unwrap();

        assert_eq!(text, "generated from 2 part(s)");
        assert_eq!(provider.uploads.load(Ordering::SeqCst), 1);
        assert_eq!(provider.generations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_upload_stops_before_generation() {
        let provider = MockProvider {
            fail_upload: true,
            ..MockProvider::default()
        };
        let err = run_generation(&provider, &request("bees", Some(attachment())))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Upload(_)));
        assert_eq!(provider.uploads.load(Ordering::SeqCst), 1);
        assert_eq!(provider.generations.load(Ordering::SeqCst), 0);
    }
}
