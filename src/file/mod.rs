// src/file/mod.rs
pub mod points;

pub use points::load_points;
