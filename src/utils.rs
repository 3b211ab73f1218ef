use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::debug;

use crate::structs::{Attachment, GenerationRequest, SubmitPayload};

/// Parse the JSON form submission out of the request body and decode the
/// attached image, if any.
pub fn parse_submission(req: &lambda_http::Request) -> Result<GenerationRequest> {
    let payload: SubmitPayload =
        serde_json::from_slice(req.body()).context("invalid JSON body")?;
    debug!("Parsed submission for topic: {}", payload.topic);

    // An empty image field means the form was submitted without one
    let attachment = match payload.image.as_deref() {
        Some(image) if !image.is_empty() => Some(decode_data_url(image)?),
        _ => None,
    };

    Ok(GenerationRequest {
        topic: payload.topic,
        content_type: payload.content_type,
        tone: payload.tone,
        age_group: payload.age_group,
        brand_voice: payload.brand_voice,
        objective: payload.objective,
        language: payload.language,
        attachment,
    })
}

/// Decode a `data:<mime>;base64,<payload>` string as produced by the form's
/// FileReader.
pub fn decode_data_url(data_url: &str) -> Result<Attachment> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("not a data URL"))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| anyhow!("missing base64 payload"))?;
    if mime_type.is_empty() {
        return Err(anyhow!("missing mime type"));
    }

    let data = BASE64.decode(payload).context("invalid base64 payload")?;

    Ok(Attachment {
        data,
        mime_type: mime_type.to_string(),
    })
}
