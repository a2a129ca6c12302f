// src/analysis/point.rs
use chrono::{DateTime, Utc};

/// One (time, fitted value) sample read back from the analysis CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub time: f64,
    pub fitted_curve: f64,
}

impl DataPoint {
    pub fn new(time: f64, fitted_curve: f64) -> Self {
        Self { time, fitted_curve }
    }

    pub fn as_plot_point(&self) -> [f64; 2] {
        [self.time, self.fitted_curve]
    }
}

/// Points from one successful load, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub points: Vec<DataPoint>,
    pub skipped_rows: usize,
    pub finished_at: DateTime<Utc>,
}

impl ResultSet {
    pub fn new(points: Vec<DataPoint>, skipped_rows: usize) -> Self {
        Self {
            points,
            skipped_rows,
            finished_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
