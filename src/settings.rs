//! Study settings loaded from TOML.
//!
//! ```toml
//! expression = "x^3 - 2*x - 5"
//! a = 2.0
//! b = 3.0
//! precision = 1e-6                                   # optional
//! tolerance_levels = [1e-3, 1e-5, 1e-7, 1e-9, 1e-11] # optional
//! scan_step = 0.1                                    # optional
//! max_iter = 100                                     # optional
//!
//! [logging]
//! level = "info"                                     # optional
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::root_finding::algorithms::DEFAULT_MAX_ITER;
use crate::root_finding::bench::DEFAULT_TOLERANCE_LEVELS;
use crate::root_finding::interval::DEFAULT_STEP;
use crate::study::StudyRequest;


#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}


#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudySettings {
    pub expression: String,
    pub a: f64,
    pub b: f64,
    #[serde(default = "default_precision")]
    pub precision: f64,
    #[serde(default = "default_tolerance_levels")]
    pub tolerance_levels: Vec<f64>,
    #[serde(default = "default_scan_step")]
    pub scan_step: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default)]
    pub logging: LoggingSettings,
}


#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}


fn default_precision() -> f64 {
    1e-6
}

fn default_tolerance_levels() -> Vec<f64> {
    DEFAULT_TOLERANCE_LEVELS.to_vec()
}

fn default_scan_step() -> f64 {
    DEFAULT_STEP
}

fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

fn default_log_level() -> String {
    "info".to_string()
}


impl Default for StudySettings {
    fn default() -> Self {
        Self {
            expression: "x^3 - 2*x - 5".to_string(),
            a: 2.0,
            b: 3.0,
            precision: default_precision(),
            tolerance_levels: default_tolerance_levels(),
            scan_step: default_scan_step(),
            max_iter: default_max_iter(),
            logging: LoggingSettings::default(),
        }
    }
}


fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid { field, reason: reason.into() }
}

fn positive_finite(field: &'static str, v: f64) -> Result<(), SettingsError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {v}")))
    }
}


impl StudySettings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks the settings and builds the study request.
    ///
    /// # Errors
    /// - [`SettingsError::Invalid`] : blank expression, non-finite or
    ///   unordered bounds, non-positive precision/step/levels, empty
    ///   levels, `max_iter = 0`
    pub fn into_request(self) -> Result<StudyRequest, SettingsError> {
        if self.expression.trim().is_empty() {
            return Err(invalid("expression", "must not be blank"));
        }
        if !(self.a.is_finite() && self.b.is_finite()) {
            return Err(invalid("a", format!("bounds must be finite, got [{}, {}]", self.a, self.b)));
        }
        if self.a >= self.b {
            return Err(invalid("b", format!("must be greater than a, got [{}, {}]", self.a, self.b)));
        }
        positive_finite("precision", self.precision)?;
        positive_finite("scan_step", self.scan_step)?;
        if self.tolerance_levels.is_empty() {
            return Err(invalid("tolerance_levels", "must not be empty"));
        }
        for &level in &self.tolerance_levels {
            positive_finite("tolerance_levels", level)?;
        }
        if self.max_iter == 0 {
            return Err(invalid("max_iter", "must be >= 1"));
        }

        Ok(StudyRequest {
            expression: self.expression,
            a: self.a,
            b: self.b,
            precision: self.precision,
            tolerance_levels: self.tolerance_levels,
            scan_step: self.scan_step,
            max_iter: self.max_iter,
        })
    }
}
