use std::fmt;

/// Result type for survey operations
pub type Result<T> = std::result::Result<T, SurveyError>;

/// Main error type for the survey tooling
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyError {
    /// Invalid parameter value (descriptor preconditions, config values)
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// IO errors (file operations)
    IoError(String),

    /// Serialization/deserialization errors
    SerializationError(String),

    /// A single run could not be read or updated in the tracking store
    Tracker {
        run: String,
        reason: String,
    },

    /// The requested project does not exist in the tracking store
    ProjectNotFound {
        project: String,
        entity: Option<String>,
    },
}

impl fmt::Display for SurveyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            SurveyError::IoError(msg) => write!(f, "IO error: {}", msg),
            SurveyError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            SurveyError::Tracker { run, reason } => {
                write!(f, "Tracking store error for run '{}': {}", run, reason)
            }
            SurveyError::ProjectNotFound { project, entity } => match entity {
                Some(entity) => write!(f, "Project not found: {}/{}", entity, project),
                None => write!(f, "Project not found: {}", project),
            },
        }
    }
}

impl std::error::Error for SurveyError {}

// Conversion from std::io::Error
impl From<std::io::Error> for SurveyError {
    fn from(err: std::io::Error) -> Self {
        SurveyError::IoError(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SurveyError {
    fn from(err: serde_json::Error) -> Self {
        SurveyError::SerializationError(err.to_string())
    }
}

// Helper functions for common error patterns
impl SurveyError {
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        SurveyError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn tracker<S: Into<String>>(run: S, reason: S) -> Self {
        SurveyError::Tracker {
            run: run.into(),
            reason: reason.into(),
        }
    }
}
