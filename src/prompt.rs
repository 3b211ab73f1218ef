use crate::structs::GenerationRequest;

/// Fixed instruction sent alongside every generation call, describing the
/// markdown template the model should produce.
pub const SYSTEM_INSTRUCTION: &str = "\
**OUTPUT FORMAT:**
* **Title:** Create 5 clickable, scroll-stopping and relevant titles for the content.
* **Content:** Write the content based on the provided topic, content type, tone, age group, brand voice and objective. Ensure it is engaging and relevant to the audience.
* **Call to Action:** End the content with a clear call to action that matches the objective.
* **Image Description:** If an image was provided, describe it and how it relates to the content.

**Instructions:**
1. Generate content based on the provided Topic, Content Type and Objective.
2. Ensure the content is tailored to the specified Audience Age and Tone.
3. Strictly adhere to the described Brand Voice throughout the writing.
4. If an image is provided, integrate the content seamlessly with the visual element.
5. Review and refine the output to ensure it is high-quality, engaging and free of grammatical errors or typos.";

/// Build the user prompt for a submission. Sections appear in a fixed order;
/// optional fields that are absent produce no clause at all.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = format!(
        "**Role:** You are an expert content writer specializing in {content_type} for the {topic}. \
         Your goal is to create compelling content that achieves the specified objective while \
         adhering to the defined brand voice and targeting the intended audience.\n\n\
         **Topic:** {topic}\n\n\
         **Content Type:** {content_type}\n\n\
         **Image (if applicable):** If the content is intended to accompany an image or if an image \
         is a central part of the topic, analyse the image. Evaluate its relevance to the topic and \
         how the content should relate to it. Then write the content accordingly.\n\n\
         **Language:** {language}.\n",
        content_type = request.content_type,
        topic = request.topic,
        language = request.language,
    );

    if let Some(tone) = request.tone {
        prompt.push_str(&format!("* **Tone:** {tone}.\n"));
    }

    if let Some(age_group) = request.age_group {
        prompt.push_str(&format!("* **Age:** {age_group}.\n"));
    }

    if let Some(brand_voice) = request.brand_voice.as_deref() {
        if !brand_voice.trim().is_empty() {
            prompt.push_str(&format!("* **Brand Voice:** {brand_voice}.\n"));
        }
    }

    if let Some(objective) = request.objective {
        prompt.push_str(&format!("* **Objective:** {objective}.\n"));
    }

    prompt
}
