use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// One form submission as the browser sends it. The optional image travels
/// as a data URL in the `image` field.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub topic: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub brand_voice: Option<String>,
    #[serde(default)]
    pub objective: Option<Objective>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub image: Option<String>,
}

/// A submission with the image decoded, ready for the generation pipeline.
#[derive(Debug)]
pub struct GenerationRequest {
    pub topic: String,
    pub content_type: ContentType,
    pub tone: Option<Tone>,
    pub age_group: Option<AgeGroup>,
    pub brand_voice: Option<String>,
    pub objective: Option<Objective>,
    pub language: Language,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub data: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    BlogPost,
    SocialMedia,
    ProductDescription,
    Email,
    AdCopy,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContentType::BlogPost => write!(f, "blog-post"),
            ContentType::SocialMedia => write!(f, "social-media"),
            ContentType::ProductDescription => write!(f, "product-description"),
            ContentType::Email => write!(f, "email"),
            ContentType::AdCopy => write!(f, "ad-copy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Professional,
    Casual,
    Humorous,
    Formal,
    Persuasive,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tone::Professional => write!(f, "professional"),
            Tone::Casual => write!(f, "casual"),
            Tone::Humorous => write!(f, "humorous"),
            Tone::Formal => write!(f, "formal"),
            Tone::Persuasive => write!(f, "persuasive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGroup {
    General,
    Children,
    Teenagers,
    Adults,
    Seniors,
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AgeGroup::General => write!(f, "general"),
            AgeGroup::Children => write!(f, "children"),
            AgeGroup::Teenagers => write!(f, "teenagers"),
            AgeGroup::Adults => write!(f, "adults"),
            AgeGroup::Seniors => write!(f, "seniors"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    Awareness,
    Conversion,
    Engagement,
    Education,
    Fundraising,
    Loyalty,
    Lead,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Objective::Awareness => write!(f, "awareness"),
            Objective::Conversion => write!(f, "conversion"),
            Objective::Engagement => write!(f, "engagement"),
            Objective::Education => write!(f, "education"),
            Objective::Fundraising => write!(f, "fundraising"),
            Objective::Loyalty => write!(f, "loyalty"),
            Objective::Lead => write!(f, "lead"),
        }
    }
}

// Older form revisions don't send a language, those default to Burmese
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    English,
    #[default]
    Burmese,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::Burmese => write!(f, "burmese"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{0}")]
    Validation(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("generation failed: {0}")]
    Generation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_form_field_names() {
        let payload: SubmitPayload = serde_json::from_str(
            r#"{
                "topic": "electric bikes",
                "contentType": "blog-post",
                "tone": "casual",
                "ageGroup": "adults",
                "brandVoice": "",
                "objective": "awareness",
                "language": "english"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.topic, "electric bikes");
        assert_eq!(payload.content_type, ContentType::BlogPost);
        assert_eq!(payload.tone, Some(Tone::Casual));
        assert_eq!(payload.age_group, Some(AgeGroup::Adults));
        assert_eq!(payload.objective, Some(Objective::Awareness));
        assert_eq!(payload.language, Language::English);
        assert!(payload.image.is_none());
    }

    #[test]
    fn missing_language_defaults_to_burmese() {
        let payload: SubmitPayload =
            serde_json::from_str(r#"{"topic": "bees", "contentType": "email"}"#).unwrap();
        assert_eq!(payload.language, Language::Burmese);
    }

    #[test]
    fn unknown_enum_token_is_rejected() {
        let res = serde_json::from_str::<SubmitPayload>(
            r#"{"topic": "bees", "contentType": "newsletter"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn display_matches_form_tokens() {
        assert_eq!(ContentType::ProductDescription.to_string(), "product-description");
        assert_eq!(Tone::Persuasive.to_string(), "persuasive");
        assert_eq!(AgeGroup::Seniors.to_string(), "seniors");
        assert_eq!(Objective::Lead.to_string(), "lead");
        assert_eq!(Language::Burmese.to_string(), "burmese");
    }
}
