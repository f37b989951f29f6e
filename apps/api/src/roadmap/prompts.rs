/// Template placeholder: `{topic}`
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Create a comprehensive, detailed learning roadmap for "{topic}". It must cover:

1. A clear progression from beginner to advanced levels
2. Required skills and technologies, each explained
3. Learning resources: official documentation, interactive tutorials, video courses, books, practice exercises
4. Best practices and industry standards
5. Common pitfalls and how to avoid them
6. Project ideas of increasing complexity
7. Recommended tools and environment setup
8. Estimated time frames for each stage
9. Career progression opportunities
10. Industry certifications where applicable

Respond with a single JSON object in exactly this format:
{
  "title": "Main topic title",
  "description": "Overview of the learning path",
  "stages": [
    {
      "level": "Beginner|Intermediate|Advanced",
      "title": "Stage title",
      "description": "What this stage covers",
      "skills": [
        { "name": "Skill name", "description": "What the skill is", "importance": "Why it matters" }
      ],
      "resources": [
        {
          "name": "Resource name",
          "type": "Documentation|Tutorial|Course|Book|Video",
          "url": "URL if applicable",
          "description": "What the resource offers",
          "format": "Text|Video|Interactive",
          "difficulty": "Beginner|Intermediate|Advanced",
          "estimated_time": "Time to complete",
          "prerequisites": ["Prerequisite"],
          "cost": "Free|Paid|Subscription"
        }
      ],
      "timeframe": "Estimated time for this stage",
      "projects": [
        {
          "name": "Project name",
          "description": "Project description",
          "learning_objectives": ["What you will learn"],
          "features": ["Feature to implement"],
          "skills_practiced": ["Skill practiced"],
          "difficulty": "Beginner|Intermediate|Advanced",
          "estimated_time": "Time to complete",
          "resources": ["Helpful resource"],
          "next_steps": ["How to extend the project"]
        }
      ],
      "best_practices": [
        { "title": "Practice", "description": "Explanation", "examples": ["Good and bad examples"] }
      ],
      "common_pitfalls": [
        { "issue": "Pitfall", "solution": "How to avoid or resolve it" }
      ]
    }
  ],
  "tools": [
    {
      "name": "Tool name",
      "category": "Category",
      "description": "What it does",
      "url": "Official site",
      "setup_guide": "Basic setup instructions",
      "alternatives": ["Alternative"],
      "pros": ["Advantage"],
      "cons": ["Disadvantage"]
    }
  ],
  "certifications": [
    {
      "name": "Certification name",
      "provider": "Provider",
      "level": "Beginner|Intermediate|Advanced",
      "description": "What it covers",
      "url": "Official page",
      "cost": "Cost",
      "validity": "How long it is valid",
      "preparation_resources": ["Study resource"]
    }
  ],
  "career_path": {
    "roles": ["Job role"],
    "skills_required": ["Required skill"],
    "progression": ["Career step"],
    "salary_range": "Typical salary range"
  }
}"#;

pub fn build_roadmap_prompt(topic: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE.replace("{topic}", topic)
}
