// src/state/view_state.rs
use crate::analysis::ResultSet;

pub const ANALYSIS_FAILED_MESSAGE: &str = "Error processing video with Python.";
pub const LOAD_FAILED_PREFIX: &str = "Error processing data: ";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    // Initial prompt, shown until the first run completes
    Loading,
    Error(String),
    Loaded(ResultSet),
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl ViewState {
    pub fn analysis_failed() -> Self {
        ViewState::Error(ANALYSIS_FAILED_MESSAGE.to_string())
    }

    pub fn load_failed(description: impl std::fmt::Display) -> Self {
        ViewState::Error(format!("{}{}", LOAD_FAILED_PREFIX, description))
    }

    #[cfg(test)]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn result_set(&self) -> Option<&ResultSet> {
        match self {
            ViewState::Loaded(results) => Some(results),
            _ => None,
        }
    }
}
