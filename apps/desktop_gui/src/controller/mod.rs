//! Controller layer: UI events, form state transitions, view models, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod view;
