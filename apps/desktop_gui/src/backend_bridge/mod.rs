//! Bridge between the egui thread and the async prediction backend.

pub mod commands;
pub mod runtime;
