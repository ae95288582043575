use thiserror::Error;

/// Failures the formatter can run into while handling a call.
///
/// None of these ever replace the caller's error: the orchestrator turns them
/// into a bracketed `[smarterr <class>: <message>]` annotation appended to the
/// detail of a fallback diagnostic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmarterrError {
    #[error("filesystem not configured; call smarterr::set_filesystem before first use")]
    Initialization,

    #[error("{path}: {message}")]
    ConfigLoad { path: String, message: String },

    #[error("{message}")]
    Template { name: String, message: String },

    #[error("invalid regex {pattern:?}: {message}")]
    Regex { pattern: String, message: String },

    #[error("{0}")]
    Semantic(String),

    #[error("{0}")]
    Panic(String),
}

pub type SmarterrResult<T> = Result<T, SmarterrError>;

impl SmarterrError {
    pub fn config_load(path: impl Into<String>, message: impl ToString) -> Self {
        SmarterrError::ConfigLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn template(name: impl Into<String>, message: impl ToString) -> Self {
        SmarterrError::Template {
            name: name.into(),
            message: message.to_string(),
        }
    }

    pub fn regex(pattern: impl Into<String>, message: impl ToString) -> Self {
        SmarterrError::Regex {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }

    pub fn semantic(message: impl Into<String>) -> Self {
        SmarterrError::Semantic(message.into())
    }

    /// Failure-class label used inside bracketed annotations.
    pub fn class(&self) -> String {
        match self {
            SmarterrError::Initialization => "initialization".to_string(),
            SmarterrError::ConfigLoad { .. } => "config load".to_string(),
            SmarterrError::Template { name, .. } => format!("{name} template error"),
            SmarterrError::Regex { .. } => "regex".to_string(),
            SmarterrError::Semantic(_) => "semantic".to_string(),
            SmarterrError::Panic(_) => "panic".to_string(),
        }
    }

    /// `[smarterr <class>: <message>]`
    pub fn annotation(&self) -> String {
        format!("[smarterr {}: {}]", self.class(), self)
    }
}
