//! Turns an uploaded resume file into plain text.
//!
//! PDF parsing is CPU-bound and synchronous, so it runs on the blocking
//! pool via `tokio::task::spawn_blocking`.

use tracing::{debug, warn};

use crate::errors::AppError;

/// Upload size accepted by the evaluate route.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
}

impl ResumeFormat {
    /// Picks the format from the file extension, case-insensitively.
    pub fn from_filename(name: &str) -> Result<Self, AppError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "txt" | "md" => Ok(ResumeFormat::PlainText),
            _ => Err(AppError::Validation(format!(
                "Unsupported resume file '{name}': upload a .pdf, .txt or .md file"
            ))),
        }
    }
}

pub async fn extract_text(bytes: Vec<u8>, format: ResumeFormat) -> Result<String, AppError> {
    let text = match format {
        ResumeFormat::Pdf => {
            let size = bytes.len();
            let parsed = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            })?;
            parsed.map_err(|e| {
                warn!("PDF extraction failed for a {size} byte upload: {e}");
                AppError::Validation("Could not read text from the uploaded PDF".to_string())
            })?
        }
        ResumeFormat::PlainText => String::from_utf8(bytes).map_err(|_| {
            AppError::Validation("Resume text must be UTF-8 encoded".to_string())
        })?,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "The uploaded resume contains no text".to_string(),
        ));
    }
    debug!("Extracted {} characters of resume text", text.len());
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ResumeFormat::from_filename("cv.PDF").unwrap(), ResumeFormat::Pdf);
        assert_eq!(
            ResumeFormat::from_filename("jane.doe.txt").unwrap(),
            ResumeFormat::PlainText
        );
        assert_eq!(ResumeFormat::from_filename("cv.md").unwrap(), ResumeFormat::PlainText);
        assert!(matches!(
            ResumeFormat::from_filename("cv.docx"),
            Err(AppError::Validation(_))
        ));
        assert!(ResumeFormat::from_filename("resume").is_err());
    }

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let text = extract_text(b"  Jane Doe\nRust engineer\n\n".to_vec(), ResumeFormat::PlainText)
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[tokio::test]
    async fn test_blank_or_binary_text_is_rejected() {
        let blank = extract_text(b" \n\t".to_vec(), ResumeFormat::PlainText).await;
        assert!(matches!(blank, Err(AppError::Validation(_))));

        let binary = extract_text(vec![0xff, 0xfe, 0x00], ResumeFormat::PlainText).await;
        assert!(matches!(binary, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_rejected() {
        let result = extract_text(b"not really a pdf".to_vec(), ResumeFormat::Pdf).await;
        assert!(result.is_err());
    }
}
