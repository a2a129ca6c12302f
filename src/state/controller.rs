// src/state/controller.rs
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{error, info, warn};

use super::ViewState;
use crate::analysis::{AnalysisInvoker, AnalysisRequest, ResultSet};
use crate::file::load_points;

/// One full run: invoke the analysis, then read back its CSV.
pub fn run_pipeline(invoker: &dyn AnalysisInvoker, request: &AnalysisRequest) -> ViewState {
    if !invoker.run_request(request) {
        warn!(video = %request.video_path().display(), "analysis reported failure");
        return ViewState::analysis_failed();
    }

    match load_points(request.output_csv_path()) {
        Ok(parsed) => ViewState::Loaded(ResultSet::new(parsed.points, parsed.skipped)),
        Err(e) => {
            error!(path = %e.path().display(), "failed to read analysis output: {}", e);
            ViewState::load_failed(e)
        }
    }
}

/// Owns the view state and the single outstanding run, if any.
///
/// Runs execute on a worker thread. Their outcome is applied only in `poll`
/// (or `wait`), so the state changes at exactly one point. A trigger while a
/// run is outstanding is rejected.
pub struct ViewController {
    invoker: Arc<dyn AnalysisInvoker>,
    request: AnalysisRequest,
    state: ViewState,
    pending: Option<Receiver<ViewState>>,
    completed_runs: usize,
}

impl ViewController {
    pub fn new(invoker: Arc<dyn AnalysisInvoker>, request: AnalysisRequest) -> Self {
        Self {
            invoker,
            request,
            state: ViewState::default(),
            pending: None,
            completed_runs: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    /// Starts a run. Returns `false` if one is already in flight.
    pub fn trigger(&mut self) -> bool {
        if self.is_running() {
            warn!("analysis already running; ignoring trigger");
            return false;
        }

        let (tx, rx) = channel();
        let invoker = Arc::clone(&self.invoker);
        let request = self.request.clone();

        let spawned = thread::Builder::new()
            .name("analysis".to_string())
            .spawn(move || {
                let outcome = run_pipeline(invoker.as_ref(), &request);
                // Receiver gone means the controller was dropped
                let _ = tx.send(outcome);
            });

        match spawned {
            Ok(_) => {
                info!(video = %self.request.video_path().display(), "analysis started");
                self.pending = Some(rx);
                true
            }
            Err(e) => {
                error!("failed to start analysis worker: {}", e);
                self.apply(ViewState::analysis_failed());
                false
            }
        }
    }

    /// Applies a finished run's outcome. Returns `true` if the state changed.
    pub fn poll(&mut self) -> bool {
        let outcome = match &self.pending {
            Some(rx) => match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    error!("analysis worker exited without a result");
                    ViewState::analysis_failed()
                }
            },
            None => return false,
        };

        self.pending = None;
        self.apply(outcome);
        true
    }

    /// Blocks until the outstanding run finishes, then applies it.
    #[cfg(test)]
    pub fn wait(&mut self) {
        if let Some(rx) = self.pending.take() {
            let outcome = rx.recv().unwrap_or_else(|_| {
                error!("analysis worker exited without a result");
                ViewState::analysis_failed()
            });
            self.apply(outcome);
        }
    }

    fn apply(&mut self, state: ViewState) {
        self.completed_runs += 1;
        match &state {
            ViewState::Loaded(results) => info!(
                points = results.len(),
                skipped = results.skipped_rows,
                "analysis results loaded"
            ),
            ViewState::Error(message) => warn!("{}", message),
            ViewState::Loading => {}
        }
        self.state = state;
    }
}
