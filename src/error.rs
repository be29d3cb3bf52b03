use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpiralError>;

#[derive(Debug, Error)]
pub enum SpiralError {
    #[error("circulation factor must be a positive finite number, got {0}")]
    InvalidCirculationFactor(f64),

    #[error("granularity must be a positive finite number of degrees, got {0}")]
    InvalidGranularity(f64),

    #[error("reference width must be at least one column")]
    InvalidWidth,

    #[error("inset must be a finite number of columns, got {0}")]
    InvalidInset(f64),

    #[error("spiral radius {0} does not fit the drawing grid")]
    RadiusOutOfRange(f64),

    #[error("sweep needs {steps} steps, more than the limit of {limit}; use a coarser granularity")]
    TooManySteps { steps: f64, limit: usize },

    #[error("failed to write drawing: {0}")]
    Io(#[from] std::io::Error),
}

impl SpiralError {
    /// True when the reader on the other end of stdout went away (e.g. `| head`).
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SpiralError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}
