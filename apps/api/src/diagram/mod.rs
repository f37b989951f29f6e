// Diagram generation: prompt → model (or rule-based layout) → shape
// descriptors → `whiteboard::importer` → pushed to the client over a socket
// keyed by the client id handed out at request time.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod hub;
pub mod models;
pub mod prompts;
