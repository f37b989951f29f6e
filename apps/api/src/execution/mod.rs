// Judged code execution via a hosted Judge0 instance.
// Submit, then poll at a fixed interval until the submission reaches a
// terminal status. No cancellation, no ceiling, no backoff.

pub mod client;
pub mod handlers;
pub mod models;
