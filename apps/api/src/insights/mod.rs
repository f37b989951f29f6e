// Industry insights: a cache-aside layer over the generative-AI collaborator.
// A record is served while `now < nextUpdate`; otherwise it is regenerated
// and upserted with a fresh 7-day window.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod service;
pub mod store;
