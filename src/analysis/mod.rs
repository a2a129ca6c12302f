// src/analysis/mod.rs
pub mod curve;
pub mod invoker;
pub mod point;
pub mod python;

// Re-export commonly used types
pub use curve::describe_curve;
pub use invoker::{AnalysisInvoker, AnalysisRequest};
pub use point::{DataPoint, ResultSet};
pub use python::PythonInvoker;
