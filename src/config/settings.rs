// src/config/settings.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::analysis::AnalysisRequest;

pub const SETTINGS_FILE: &str = "waterdrop.toml";
pub const ENV_PREFIX: &str = "WATERDROP";

pub const DEFAULT_VIDEO_PATH: &str = "droplet_video.mp4";
pub const DEFAULT_OUTPUT_CSV_PATH: &str = "droplet_data.csv";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub video_path: PathBuf,
    pub output_csv_path: PathBuf,
    pub python: PythonSettings,
}

/// How the analysis routine is reached: `module.function(video, csv)` run by `interpreter`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PythonSettings {
    pub interpreter: String,
    pub module: String,
    pub function: String,
    pub module_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from(DEFAULT_VIDEO_PATH),
            output_csv_path: PathBuf::from(DEFAULT_OUTPUT_CSV_PATH),
            python: PythonSettings::default(),
        }
    }
}

impl Default for PythonSettings {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            module: "PythonWaterDrop".to_string(),
            function: "analyze_water_drop".to_string(),
            module_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Defaults, then the user config dir, then the working directory, then `WATERDROP_*` env vars.
    pub fn load() -> Result<Self> {
        let mut files = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            files.push(dir.join("waterdrop").join(SETTINGS_FILE));
        }
        files.push(PathBuf::from(SETTINGS_FILE));
        Self::load_from(&files, Some(environment()))
    }

    pub fn load_from(files: &[PathBuf], env: Option<Environment>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("video_path", path_string(&defaults.video_path))?
            .set_default("output_csv_path", path_string(&defaults.output_csv_path))?
            .set_default("python.interpreter", defaults.python.interpreter)?
            .set_default("python.module", defaults.python.module)?
            .set_default("python.function", defaults.python.function)?
            .set_default("python.module_dir", path_string(&defaults.python.module_dir))?;

        for path in files {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
        if let Some(env) = env {
            builder = builder.add_source(env);
        }

        builder
            .build()
            .context("Failed to assemble settings")?
            .try_deserialize()
            .context("Failed to parse settings")
    }

    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(&self.video_path, &self.output_csv_path)
    }
}

/// `WATERDROP_VIDEO_PATH`, `WATERDROP_PYTHON__INTERPRETER`, ...
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
