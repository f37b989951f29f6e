// Resume evaluation: text extraction from an upload, then an ATS review and
// a role-specific review from the model.

pub mod evaluator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod upload;
