use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A language the execution service accepts, keyed by its Judge0 id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub id: u32,
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        id: 52,
        name: "C++ (GCC 9.2.0)",
    },
    Language {
        id: 71,
        name: "Python (3.8.1)",
    },
    Language {
        id: 62,
        name: "Java (OpenJDK 13.0.1)",
    },
];

pub fn find_language(id: u32) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.id == id)
}

/// Judge0 status ids below this are "In Queue" (1) and "Processing" (2).
const FIRST_TERMINAL_STATUS: u32 = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub source_code: String,
    pub language_id: u32,
    #[serde(default)]
    pub stdin: Option<String>,
}

impl ExecuteRequest {
    pub fn validate(&self) -> Result<&'static Language, AppError> {
        if self.source_code.trim().is_empty() {
            return Err(AppError::Validation("sourceCode cannot be empty".to_string()));
        }
        find_language(self.language_id).ok_or_else(|| {
            AppError::Validation(format!("unsupported languageId {}", self.language_id))
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewSubmission<'a> {
    pub source_code: &'a str,
    pub language_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionToken {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// Submission state as reported by `GET /submissions/:token`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResult {
    pub status: Option<SubmissionStatus>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
}

impl SubmissionResult {
    pub fn is_terminal(&self) -> bool {
        self.status
            .as_ref()
            .is_some_and(|s| s.id >= FIRST_TERMINAL_STATUS)
    }
}

/// What the API returns once a run finishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    pub status: SubmissionStatus,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
}

impl ExecutionOutcome {
    /// Only called on terminal results, which always carry a status.
    pub(crate) fn from_terminal(result: SubmissionResult) -> Self {
        Self {
            status: result.status.unwrap_or(SubmissionStatus {
                id: FIRST_TERMINAL_STATUS,
                description: String::new(),
            }),
            stdout: result.stdout,
            stderr: result.stderr,
            compile_output: result.compile_output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_status(id: Option<u32>) -> SubmissionResult {
        SubmissionResult {
            status: id.map(|id| SubmissionStatus {
                id,
                description: String::new(),
            }),
            stdout: None,
            stderr: None,
            compile_output: None,
        }
    }

    #[test]
    fn test_queue_and_processing_are_not_terminal() {
        assert!(!result_with_status(Some(1)).is_terminal());
        assert!(!result_with_status(Some(2)).is_terminal());
        assert!(!result_with_status(None).is_terminal());
    }

    #[test]
    fn test_accepted_and_errors_are_terminal() {
        // 3 Accepted, 6 Compilation Error, 11 Runtime Error (NZEC)
        for id in [3, 6, 11] {
            assert!(result_with_status(Some(id)).is_terminal(), "status {id}");
        }
    }

    #[test]
    fn test_known_languages() {
        assert_eq!(find_language(71).unwrap().name, "Python (3.8.1)");
        assert!(find_language(999).is_none());
    }

    #[test]
    fn test_validate_rejects_blank_source_and_unknown_language() {
        let blank = ExecuteRequest {
            source_code: "  \n".into(),
            language_id: 71,
            stdin: None,
        };
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));

        let unknown = ExecuteRequest {
            source_code: "print(1)".into(),
            language_id: 4,
            stdin: None,
        };
        assert!(matches!(unknown.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let raw = r#"{"status": {"id": 6, "description": "Compilation Error"},
                      "stdout": null, "stderr": null, "compile_output": "main.cpp:1: error"}"#;
        let result: SubmissionResult = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(ExecutionOutcome::from_terminal(result)).unwrap();
        assert_eq!(json["compileOutput"], "main.cpp:1: error");
        assert_eq!(json["status"]["description"], "Compilation Error");
    }
}
