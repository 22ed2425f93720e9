use thiserror::Error;

/// Top-level error type for the Pig engine
#[derive(Error, Debug)]
pub enum PigError {
    #[error("Invalid player type '{kind}'. Choose 'human' or 'computer'.")]
    InvalidArgument { kind: String },

    #[error("Invalid input '{input}'. Please choose 'r' to roll or 'h' to hold.")]
    InvalidInput { input: String },

    #[error("Not enough players: need at least {min}, got {found}")]
    NotEnoughPlayers { min: usize, found: usize },

    #[error("Input closed before the game finished")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type PigResult<T> = Result<T, PigError>;

impl PigError {
    pub fn invalid_argument(kind: impl Into<String>) -> Self {
        Self::InvalidArgument { kind: kind.into() }
    }

    pub fn invalid_input(input: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
        }
    }
}
