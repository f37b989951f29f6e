// Interview records: authenticated create, list-own, get-by-id.
// Create-only; there is no update or delete path.

pub mod handlers;
pub mod models;
pub mod repository;
