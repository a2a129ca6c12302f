// src/state/mod.rs
pub mod controller;
pub mod view_state;

pub use controller::ViewController;
pub use view_state::ViewState;
