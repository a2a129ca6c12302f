// src/analysis/curve.rs
use super::DataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Empty,
    Flat,
    Decreasing,
    Increasing,
    Mixed,
}

/// Shape of the fitted curve, used for the chart's accessible description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSummary {
    pub trend: Trend,
    pub start: f64,
    pub end: f64,
    pub min: f64,
    pub max: f64,
    // Most of the change happens in the first half of the series
    pub settling: bool,
}

pub fn describe_curve(points: &[DataPoint]) -> CurveSummary {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.fitted_curve, last.fitted_curve),
        _ => {
            return CurveSummary {
                trend: Trend::Empty,
                start: 0.0,
                end: 0.0,
                min: 0.0,
                max: 0.0,
                settling: false,
            }
        }
    };

    let (min, max) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.fitted_curve), hi.max(p.fitted_curve))
    });
    let tolerance = 1e-9 * (max - min).abs().max(1.0);

    let mut rises = false;
    let mut falls = false;
    for pair in points.windows(2) {
        let delta = pair[1].fitted_curve - pair[0].fitted_curve;
        if delta > tolerance {
            rises = true;
        } else if delta < -tolerance {
            falls = true;
        }
    }

    let trend = match (rises, falls) {
        (false, false) => Trend::Flat,
        (false, true) => Trend::Decreasing,
        (true, false) => Trend::Increasing,
        (true, true) => Trend::Mixed,
    };

    let settling = match trend {
        Trend::Decreasing | Trend::Increasing => {
            let mid = points[points.len() / 2].fitted_curve;
            (mid - first).abs() > (last - mid).abs()
        }
        _ => false,
    };

    CurveSummary {
        trend,
        start: first,
        end: last,
        min,
        max,
        settling,
    }
}

impl CurveSummary {
    pub fn accessibility_value(&self) -> String {
        match (self.trend, self.settling) {
            (Trend::Empty, _) => "The chart has no data points.".to_string(),
            (Trend::Flat, _) => format!("The fitted curve stays level at {:.3}.", self.start),
            (Trend::Decreasing, true) => format!(
                "The chart displays an exponential decay curve from {:.3} to {:.3}. \
                 The distance changes rapidly and then stabilizes over time.",
                self.start, self.end
            ),
            (Trend::Decreasing, false) => format!(
                "The fitted curve decreases steadily from {:.3} to {:.3}.",
                self.start, self.end
            ),
            (Trend::Increasing, true) => format!(
                "The fitted curve rises quickly from {:.3} and levels off near {:.3}.",
                self.start, self.end
            ),
            (Trend::Increasing, false) => format!(
                "The fitted curve increases from {:.3} to {:.3}.",
                self.start, self.end
            ),
            (Trend::Mixed, _) => format!(
                "The fitted curve varies between {:.3} and {:.3}, starting at {:.3} and ending at {:.3}.",
                self.min, self.max, self.start, self.end
            ),
        }
    }
}
