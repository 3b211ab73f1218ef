use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::{ContentProvider, FileRef, RequestPart};
use crate::structs::ContentError;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub const GEMINI_MODEL: &str = "gemini-2.5-flash-preview-04-17";

pub struct GeminiClient {
    client: ReqwestClient,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: ReqwestClient, api_key: String) -> Self {
        Self::with_base_url(client, api_key, GEMINI_BASE_URL.to_string())
    }

    pub fn with_base_url(client: ReqwestClient, api_key: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: Option<UploadedFile>,
}

// uri and mimeType are checked for presence, an upload that comes back
// without either is unusable for the generation call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    uri: Option<String>,
    mime_type: Option<String>,
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn upload(&self, data: Vec<u8>, mime_type: &str) -> Result<FileRef, ContentError> {
        info!(
            "Uploading {} bytes ({}) to the Gemini file store",
            data.len(),
            mime_type
        );

        let metadata = json!({ "file": { "display_name": "attachment" } });
        let form = multipart::Form::new()
            .part(
                "metadata",
                multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(|e| ContentError::Upload(format!("invalid metadata part: {e}")))?,
            )
            .part(
                "file",
                multipart::Part::bytes(data)
                    .mime_str(mime_type)
                    .map_err(|e| ContentError::Upload(format!("invalid mime type: {e}")))?,
            );

        let response = self
            .client
            .post(format!(
                "{}/upload/v1beta/files?uploadType=multipart&key={}",
                self.base_url, self.api_key
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending upload request: {e}");
                ContentError::Upload(format!("error sending request: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Upload failed with status code {status}: {body}");
            return Err(ContentError::Upload(format!("status code: {status}")));
        }

        let upload = response.json::<UploadResponse>().await.map_err(|e| {
            error!("Error parsing upload response: {e}");
            ContentError::Upload(format!("error parsing response: {e}"))
        })?;

        let file = upload
            .file
            .ok_or_else(|| ContentError::Upload("no file in upload response".to_string()))?;

        match (file.uri, file.mime_type) {
            (Some(uri), Some(mime_type)) => {
                debug!("Upload complete: {uri}");
                Ok(FileRef { uri, mime_type })
            }
            _ => Err(ContentError::Upload(
                "incomplete file handle in upload response".to_string(),
            )),
        }
    }

    async fn generate(
        &self,
        parts: &[RequestPart],
        system_instruction: &str,
    ) -> Result<String, ContentError> {
        info!("Starting Gemini generation with {} part(s)", parts.len());

        let request_parts = parts
            .iter()
            .map(|part| match part {
                RequestPart::Text(text) => json!({ "text": text }),
                RequestPart::File(file) => json!({
                    "fileData": { "fileUri": file.uri, "mimeType": file.mime_type }
                }),
            })
            .collect::<Vec<_>>();

        let request_body = json!({
            "contents": [{ "role": "user", "parts": request_parts }],
            "systemInstruction": { "parts": [{ "text": system_instruction }] }
        });

        let now = std::time::Instant::now();

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url, GEMINI_MODEL, self.api_key
            ))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending generation request: {e}");
                ContentError::Generation(format!("error sending request: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Generation failed with status code {status}: {body}");
            return Err(ContentError::Generation(format!("status code: {status}")));
        }

        let json_response = response.json::<Value>().await.map_err(|e| {
            error!("Error parsing generation response: {e}");
            ContentError::Generation(format!("error parsing response: {e}"))
        })?;

        let candidate = json_response["candidates"]
            .get(0)
            .ok_or_else(|| ContentError::Generation("no candidates in response".to_string()))?;

        // The generated text is spread over the candidate's text parts
        let mut text = String::new();
        if let Some(candidate_parts) = candidate["content"]["parts"].as_array() {
            for part in candidate_parts {
                if let Some(chunk) = part["text"].as_str() {
                    text.push_str(chunk);
                }
            }
        }

        let elapsed = now.elapsed().as_secs_f32();
        info!(
            "Generated response using Gemini. Generation took {}s",
            (elapsed * 10.0).round() / 10.0
        );

        Ok(text)
    }
}
