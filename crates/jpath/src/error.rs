use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JPathError {
    /// The path text is malformed. Raised only while compiling.
    #[error("JPath syntax error in '{path}' at offset {offset}: {message}")]
    Syntax {
        path: String,
        offset: usize,
        message: String,
    },

    /// A hand-assembled plan breaks an invariant the compiler always upholds.
    #[error("Invalid query plan: {0}")]
    InvalidPlan(String),
}

impl JPathError {
    pub(crate) fn syntax(path: &str, offset: usize, message: impl Into<String>) -> Self {
        JPathError::Syntax {
            path: path.to_string(),
            offset,
            message: message.into(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, JPathError::Syntax { .. })
    }
}
