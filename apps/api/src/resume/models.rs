use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Both reviews of one uploaded resume.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeEvaluation {
    pub ats_evaluation: AtsEvaluation,
    pub normal_evaluation: NormalEvaluation,
    /// The role the resume was judged against.
    pub role: String,
}

// ────────────────────────────────────────────────────────────────────────────
// ATS review
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtsEvaluation {
    /// Free-form score such as "7/10". Models sometimes answer with a bare
    /// number, which is kept as its decimal text.
    #[serde(deserialize_with = "score_text")]
    pub overall_score: String,
    #[serde(default)]
    pub sections: AtsSections,
    #[serde(default)]
    pub keyword_analysis: KeywordAnalysis,
    #[serde(default)]
    pub formatting_analysis: FormattingAnalysis,
    #[serde(default)]
    pub final_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsSections {
    pub contact_info: SectionReview,
    pub summary: SectionReview,
    pub skills: SectionReview,
    pub experience: SectionReview,
    pub education: SectionReview,
    pub certifications: SectionReview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionReview {
    pub status: String,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordAnalysis {
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingAnalysis {
    pub readability_score: String,
    pub font_consistency: String,
    pub bullet_point_usage: String,
    pub section_spacing: String,
    pub recommendations: Vec<String>,
}

fn score_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "overall_score must be text or a number, got {other}"
        ))),
    }
}

fn review(status: &str, issues: &[&str], recommendations: &[&str]) -> SectionReview {
    SectionReview {
        status: status.to_string(),
        issues: owned(issues),
        recommendations: owned(recommendations),
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl AtsEvaluation {
    /// Generic review returned when the model's answer cannot be used.
    pub fn fallback() -> Self {
        AtsEvaluation {
            overall_score: "7/10".to_string(),
            sections: AtsSections {
                contact_info: review(
                    "good",
                    &["No LinkedIn profile mentioned"],
                    &[
                        "Add your LinkedIn profile",
                        "Consider adding a professional email address",
                    ],
                ),
                summary: review(
                    "acceptable",
                    &["Could be more specific to the role"],
                    &[
                        "Tailor your summary to the specific job role",
                        "Include key achievements",
                    ],
                ),
                skills: review(
                    "good",
                    &[],
                    &[
                        "Consider organizing skills by category",
                        "Highlight most relevant skills first",
                    ],
                ),
                experience: review(
                    "good",
                    &["Dates could be more consistent"],
                    &[
                        "Use consistent date format",
                        "Quantify achievements where possible",
                    ],
                ),
                education: review("good", &[], &["Consider adding relevant coursework"]),
                certifications: review(
                    "acceptable",
                    &["No recent certifications"],
                    &[
                        "Add any relevant certifications",
                        "Consider pursuing role-specific certifications",
                    ],
                ),
            },
            keyword_analysis: KeywordAnalysis {
                matched_keywords: owned(&["project management", "team leadership", "communication"]),
                missing_keywords: owned(&["agile", "scrum", "stakeholder management"]),
                recommendations: owned(&[
                    "Include more industry-specific keywords",
                    "Add missing technical skills",
                ]),
            },
            formatting_analysis: FormattingAnalysis {
                readability_score: "good".to_string(),
                font_consistency: "excellent".to_string(),
                bullet_point_usage: "good".to_string(),
                section_spacing: "acceptable".to_string(),
                recommendations: owned(&[
                    "Ensure consistent spacing between sections",
                    "Use standard margins",
                ]),
            },
            final_recommendations: owned(&[
                "Tailor resume more specifically to the target role",
                "Add more quantifiable achievements",
                "Include relevant certifications",
                "Add LinkedIn profile and professional social media links",
            ]),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Role-specific review
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalEvaluation {
    pub overall_feedback: OverallFeedback,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub detailed_feedback: DetailedFeedback,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The model is asked to wrap its review in a `normal_evaluation` key.
#[derive(Debug, Deserialize)]
pub(crate) struct NormalEnvelope {
    pub normal_evaluation: NormalEvaluation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallFeedback {
    pub tone: String,
    pub grammar_and_spelling: String,
    pub flow_and_readability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedFeedback {
    pub summary_section: SectionFeedback,
    pub experience_section: SectionFeedback,
    pub skills_section: SectionFeedback,
    pub education_section: SectionFeedback,
    pub certifications_section: SectionFeedback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionFeedback {
    pub feedback: String,
    pub suggestions: Vec<String>,
}

fn feedback(text: &str, suggestions: &[&str]) -> SectionFeedback {
    SectionFeedback {
        feedback: text.to_string(),
        suggestions: owned(suggestions),
    }
}

impl NormalEvaluation {
    pub fn fallback() -> Self {
        NormalEvaluation {
            overall_feedback: OverallFeedback {
                tone: "Professional and clear".to_string(),
                grammar_and_spelling: "Generally good with minor improvements needed".to_string(),
                flow_and_readability: "Well-structured and easy to follow".to_string(),
            },
            strengths: owned(&[
                "Clear presentation of experience",
                "Good use of action verbs",
                "Relevant skills highlighted",
                "Professional formatting",
            ]),
            weaknesses: owned(&[
                "Some achievements could be more specific",
                "Technical skills section could be more detailed",
                "Limited demonstration of soft skills",
            ]),
            detailed_feedback: DetailedFeedback {
                summary_section: feedback(
                    "Good overview but could be more targeted",
                    &["Add specific career objectives", "Highlight unique value proposition"],
                ),
                experience_section: feedback(
                    "Well-structured with clear responsibilities",
                    &["Add more quantifiable achievements", "Include specific technologies used"],
                ),
                skills_section: feedback(
                    "Good range of technical skills",
                    &["Group skills by category", "Add proficiency levels"],
                ),
                education_section: feedback(
                    "Clear and well-presented",
                    &["Add relevant coursework", "Include academic achievements"],
                ),
                certifications_section: feedback(
                    "Basic information provided",
                    &["Add dates of certification", "Include upcoming certifications"],
                ),
            },
            recommendations: owned(&[
                "Add more industry-specific keywords",
                "Include more quantifiable results",
                "Enhance technical skills section",
                "Add professional development section",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numeric_score_is_kept_as_text() {
        let ats: AtsEvaluation = serde_json::from_value(json!({ "overall_score": 8 })).unwrap();
        assert_eq!(ats.overall_score, "8");
        assert!(ats.sections.skills.issues.is_empty());

        let ats: AtsEvaluation =
            serde_json::from_value(json!({ "overall_score": "6/10" })).unwrap();
        assert_eq!(ats.overall_score, "6/10");
    }

    #[test]
    fn test_ats_review_requires_a_score() {
        assert!(serde_json::from_value::<AtsEvaluation>(json!({ "sections": {} })).is_err());
        assert!(
            serde_json::from_value::<AtsEvaluation>(json!({ "overall_score": [7, 10] })).is_err()
        );
    }

    #[test]
    fn test_normal_review_is_read_from_its_envelope() {
        let envelope: NormalEnvelope = serde_json::from_value(json!({
            "normal_evaluation": {
                "overall_feedback": { "tone": "Confident" },
                "strengths": ["Clear impact statements"]
            }
        }))
        .unwrap();

        let review = envelope.normal_evaluation;
        assert_eq!(review.overall_feedback.tone, "Confident");
        assert_eq!(review.strengths, vec!["Clear impact statements"]);
        assert!(review.detailed_feedback.skills_section.suggestions.is_empty());

        assert!(serde_json::from_value::<NormalEnvelope>(json!({ "strengths": [] })).is_err());
    }

    #[test]
    fn test_fallbacks_are_fully_populated() {
        let ats = AtsEvaluation::fallback();
        assert_eq!(ats.overall_score, "7/10");
        assert_eq!(ats.sections.certifications.status, "acceptable");
        assert_eq!(ats.final_recommendations.len(), 4);

        let normal = NormalEvaluation::fallback();
        assert_eq!(normal.strengths.len(), 4);
        assert_eq!(
            normal.detailed_feedback.skills_section.feedback,
            "Good range of technical skills"
        );
    }
}
