use std::fmt;

#[derive(Debug)]
pub enum JantenError {
    /// Tile code or hand shorthand parse failure.
    Parse { input: String, message: String },
    /// A request for an action that legality generation would not offer.
    IllegalAction { message: String },
    /// A game-state snapshot that cannot be evaluated (wrong hand size etc).
    InvalidState { message: String },
}

impl fmt::Display for JantenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JantenError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            JantenError::IllegalAction { message } => {
                write!(f, "Illegal action: {}", message)
            }
            JantenError::InvalidState { message } => {
                write!(f, "Invalid state: {}", message)
            }
        }
    }
}

impl std::error::Error for JantenError {}

pub type JantenResult<T> = Result<T, JantenError>;
