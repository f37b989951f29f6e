use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Body of `POST /api/v1/roadmap`.
#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    pub topic: String,
}

impl RoadmapRequest {
    pub fn validate(self) -> Result<String, AppError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }
        Ok(topic.to_string())
    }
}

/// A staged learning plan. `stages` is the only field a reply must carry;
/// everything else defaults when the model leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub stages: Vec<Stage>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub career_path: CareerPath,
}

impl Roadmap {
    /// Returned when the model's answer cannot be used.
    pub fn minimal(topic: &str) -> Self {
        Roadmap {
            title: topic.to_string(),
            description: "Unable to generate detailed roadmap at this time.".to_string(),
            stages: Vec::new(),
            tools: Vec::new(),
            certifications: Vec::new(),
            career_path: CareerPath {
                salary_range: "Not available".to_string(),
                ..CareerPath::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stage {
    /// Beginner, Intermediate or Advanced.
    pub level: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<Skill>,
    pub resources: Vec<Resource>,
    pub timeframe: String,
    pub projects: Vec<Project>,
    pub best_practices: Vec<BestPractice>,
    pub common_pitfalls: Vec<Pitfall>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub importance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub description: String,
    pub format: String,
    pub difficulty: String,
    pub estimated_time: String,
    pub prerequisites: Vec<String>,
    pub cost: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub features: Vec<String>,
    pub skills_practiced: Vec<String>,
    pub difficulty: String,
    pub estimated_time: String,
    pub resources: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestPractice {
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pitfall {
    pub issue: String,
    pub solution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    pub name: String,
    pub category: String,
    pub description: String,
    pub url: String,
    pub setup_guide: String,
    pub alternatives: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub provider: String,
    pub level: String,
    pub description: String,
    pub url: String,
    pub cost: String,
    pub validity: String,
    pub preparation_resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerPath {
    pub roles: Vec<String>,
    pub skills_required: Vec<String>,
    pub progression: Vec<String>,
    pub salary_range: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sparse_reply_fills_defaults() {
        let roadmap: Roadmap = serde_json::from_value(json!({
            "title": "Rust",
            "stages": [{
                "level": "Beginner",
                "title": "Ownership",
                "resources": [{ "name": "The Book", "type": "Documentation" }]
            }]
        }))
        .unwrap();

        assert_eq!(roadmap.stages.len(), 1);
        assert_eq!(roadmap.stages[0].resources[0].kind, "Documentation");
        assert!(roadmap.stages[0].projects.is_empty());
        assert!(roadmap.tools.is_empty());
        assert!(roadmap.career_path.roles.is_empty());
    }

    #[test]
    fn test_stages_are_required() {
        assert!(serde_json::from_value::<Roadmap>(json!({ "title": "Rust" })).is_err());
        assert!(serde_json::from_value::<Roadmap>(json!({ "stages": "soon" })).is_err());
    }

    #[test]
    fn test_minimal_roadmap_wire_shape() {
        let json = serde_json::to_value(Roadmap::minimal("Kubernetes")).unwrap();
        assert_eq!(json["title"], "Kubernetes");
        assert_eq!(json["stages"], json!([]));
        assert_eq!(json["career_path"]["salary_range"], "Not available");
        assert_eq!(json["career_path"]["skills_required"], json!([]));
    }

    #[test]
    fn test_blank_topic_is_rejected() {
        let request = RoadmapRequest {
            topic: "  ".to_string(),
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }
}
