// src/analysis/invoker.rs
use std::path::{Path, PathBuf};

/// Input video and the CSV artifact the analysis is expected to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    video_path: PathBuf,
    output_csv_path: PathBuf,
}

impl AnalysisRequest {
    pub fn new(video_path: impl Into<PathBuf>, output_csv_path: impl Into<PathBuf>) -> Self {
        Self {
            video_path: video_path.into(),
            output_csv_path: output_csv_path.into(),
        }
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    pub fn output_csv_path(&self) -> &Path {
        &self.output_csv_path
    }
}

/// Capability that turns a video into a CSV artifact.
///
/// `run` may block for as long as the analysis takes. Returning `true` means
/// the CSV at `output_csv_path` was written; `false` is the only failure
/// signal, with no further detail crossing this boundary.
pub trait AnalysisInvoker: Send + Sync {
    fn run(&self, video_path: &Path, output_csv_path: &Path) -> bool;

    fn run_request(&self, request: &AnalysisRequest) -> bool {
        self.run(request.video_path(), request.output_csv_path())
    }
}

impl<F> AnalysisInvoker for F
where
    F: Fn(&Path, &Path) -> bool + Send + Sync,
{
    fn run(&self, video_path: &Path, output_csv_path: &Path) -> bool {
        self(video_path, output_csv_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_act_as_invokers() {
        let seen = Mutex::new(Vec::new());
        let invoker = |video: &Path, csv: &Path| {
            seen.lock().unwrap().push((video.to_path_buf(), csv.to_path_buf()));
            true
        };

        let request = AnalysisRequest::new("in.mp4", "out.csv");
        assert!(invoker.run_request(&request));
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[(PathBuf::from("in.mp4"), PathBuf::from("out.csv"))]
        );
    }
}
