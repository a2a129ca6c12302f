// src/ui/mod.rs
pub mod chart;
pub mod view;

pub use view::{show_water_drop_view, ViewAction};
