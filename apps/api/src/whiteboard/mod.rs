// Whiteboard import: translates loosely-typed shape descriptors (as produced
// by the diagram generator) into typed canvas records.

pub mod handlers;
pub mod importer;
pub mod styles;
