// src/analysis/python.rs
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::AnalysisInvoker;
use crate::config::PythonSettings;

// Arguments after `-c` land in sys.argv[1..]
const BOOTSTRAP: &str = "\
import importlib, sys
module_dir, module_name, function_name, video_path, output_csv = sys.argv[1:6]
sys.path.insert(0, module_dir)
module = importlib.import_module(module_name)
sys.exit(0 if getattr(module, function_name)(video_path, output_csv) else 1)
";

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("Failed to start {interpreter}: {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Analysis exited with {status}")]
    Failed { status: std::process::ExitStatus },
}

/// Runs the analysis routine as a Python subprocess.
#[derive(Debug, Clone)]
pub struct PythonInvoker {
    interpreter: String,
    module: String,
    function: String,
    module_dir: PathBuf,
}

impl PythonInvoker {
    pub fn new(settings: &PythonSettings) -> Self {
        Self {
            interpreter: settings.interpreter.clone(),
            module: settings.module.clone(),
            function: settings.function.clone(),
            module_dir: settings.module_dir.clone(),
        }
    }

    pub fn command(&self, video_path: &Path, output_csv_path: &Path) -> Command {
        let mut command = Command::new(&self.interpreter);
        command
            .arg("-c")
            .arg(BOOTSTRAP)
            .arg(&self.module_dir)
            .arg(&self.module)
            .arg(&self.function)
            .arg(video_path)
            .arg(output_csv_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    pub fn execute(&self, video_path: &Path, output_csv_path: &Path) -> Result<Output, InvokeError> {
        let output = self
            .command(video_path, output_csv_path)
            .output()
            .map_err(|source| InvokeError::Spawn {
                interpreter: self.interpreter.clone(),
                source,
            })?;

        let failed = !output.status.success();
        log_stream("stdout", &output.stdout, failed);
        log_stream("stderr", &output.stderr, failed);

        if !failed {
            Ok(output)
        } else {
            Err(InvokeError::Failed { status: output.status })
        }
    }
}

impl AnalysisInvoker for PythonInvoker {
    fn run(&self, video_path: &Path, output_csv_path: &Path) -> bool {
        info!(
            video = %video_path.display(),
            output = %output_csv_path.display(),
            module = %self.module,
            "running analysis"
        );
        match self.execute(video_path, output_csv_path) {
            Ok(_) => true,
            Err(e) => {
                warn!("analysis failed: {}", e);
                false
            }
        }
    }
}

// A failed run's output carries the analysis error text
fn log_stream(name: &str, bytes: &[u8], failed: bool) {
    let text = String::from_utf8_lossy(bytes);
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if failed {
            warn!(stream = name, "{}", line);
        } else {
            debug!(stream = name, "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    // Runs `f` with a subscriber that only records warnings and above
    fn warnings_during(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    fn settings(interpreter: &str) -> PythonSettings {
        PythonSettings {
            interpreter: interpreter.to_string(),
            ..PythonSettings::default()
        }
    }

    #[test]
    fn command_passes_paths_as_arguments() {
        let invoker = PythonInvoker::new(&PythonSettings::default());
        let command = invoker.command(Path::new("drop.mp4"), Path::new("drop.csv"));

        assert_eq!(command.get_program(), "python3");
        let args: Vec<_> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args[0], "-c");
        assert_eq!(
            &args[2..],
            &[".", "PythonWaterDrop", "analyze_water_drop", "drop.mp4", "drop.csv"]
        );
    }

    #[test]
    fn missing_interpreter_reports_failure() {
        let invoker = PythonInvoker::new(&settings("waterdrop-no-such-interpreter"));
        assert!(matches!(
            invoker.execute(Path::new("a.mp4"), Path::new("a.csv")),
            Err(InvokeError::Spawn { .. })
        ));
        assert!(!invoker.run(Path::new("a.mp4"), Path::new("a.csv")));
    }

    #[test]
    fn failed_run_output_is_logged_as_warning() {
        let logged = warnings_during(|| {
            log_stream("stdout", b"could not broadcast input array\n\n", true);
        });
        assert!(logged.contains("could not broadcast input array"));
        assert!(logged.contains("WARN"));
    }

    #[test]
    fn successful_run_output_stays_at_debug() {
        let logged = warnings_during(|| {
            log_stream("stdout", b"fps = 30\n", false);
        });
        assert!(!logged.contains("fps = 30"));
    }
}
