use serde::Serialize;
use strum::{AsRefStr, Display};

/// Severity of a validation finding
///
/// Only [`LogType::Error`] affects the exit status of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogType {
    Error,
    Warning,
}

/// A single classified finding produced while validating one playlist file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogItem {
    #[serde(rename = "type")]
    pub log_type: LogType,
    pub line: usize,
    pub message: String,
}

impl LogItem {
    pub fn error<S: Into<String>>(line: usize, message: S) -> Self {
        Self {
            log_type: LogType::Error,
            line,
            message: message.into(),
        }
    }

    pub fn warning<S: Into<String>>(line: usize, message: S) -> Self {
        Self {
            log_type: LogType::Warning,
            line,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.log_type == LogType::Error
    }
}
