pub const ATS_SYSTEM: &str =
    "You are an ATS compliance expert. Respond with a single JSON object and nothing else.";

pub const REVIEWER_SYSTEM: &str =
    "You are an expert resume evaluator. Respond with a single JSON object and nothing else.";

/// Template placeholder: `{resume}`
pub const ATS_PROMPT_TEMPLATE: &str = r#"Analyze this resume for ATS compliance and return a detailed analysis in this JSON format:
{
  "overall_score": "string",
  "sections": {
    "contact_info": { "status": "string", "issues": ["string"], "recommendations": ["string"] },
    "summary": { "status": "string", "issues": ["string"], "recommendations": ["string"] },
    "skills": { "status": "string", "issues": ["string"], "recommendations": ["string"] },
    "experience": { "status": "string", "issues": ["string"], "recommendations": ["string"] },
    "education": { "status": "string", "issues": ["string"], "recommendations": ["string"] },
    "certifications": { "status": "string", "issues": ["string"], "recommendations": ["string"] }
  },
  "keyword_analysis": {
    "matched_keywords": ["string"],
    "missing_keywords": ["string"],
    "recommendations": ["string"]
  },
  "formatting_analysis": {
    "readability_score": "string",
    "font_consistency": "string",
    "bullet_point_usage": "string",
    "section_spacing": "string",
    "recommendations": ["string"]
  },
  "final_recommendations": ["string"]
}

Resume:
{resume}"#;

/// Template placeholders: `{role}`, `{resume}`
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Evaluate this resume for the role of {role} and return the following JSON format:
{
  "normal_evaluation": {
    "overall_feedback": {
      "tone": "string",
      "grammar_and_spelling": "string",
      "flow_and_readability": "string"
    },
    "strengths": ["string"],
    "weaknesses": ["string"],
    "detailed_feedback": {
      "summary_section": { "feedback": "string", "suggestions": ["string"] },
      "experience_section": { "feedback": "string", "suggestions": ["string"] },
      "skills_section": { "feedback": "string", "suggestions": ["string"] },
      "education_section": { "feedback": "string", "suggestions": ["string"] },
      "certifications_section": { "feedback": "string", "suggestions": ["string"] }
    },
    "recommendations": ["string"]
  }
}

Resume:
{resume}"#;

// The resume is substituted last so text inside it is never read as a
// placeholder.
pub fn build_ats_prompt(resume: &str) -> String {
    ATS_PROMPT_TEMPLATE.replace("{resume}", resume)
}

pub fn build_review_prompt(role: &str, resume: &str) -> String {
    REVIEW_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{resume}", resume)
}
