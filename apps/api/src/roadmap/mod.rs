// Learning roadmaps: one model call per topic, parsed into a typed plan.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
