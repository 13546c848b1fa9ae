use thiserror::Error;

/// Errors reported at the boundaries of the crate.
///
/// The per-sample math never fails; these only surface from calls that take
/// caller-provided buffers, build chains, cross threads, or parse presets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("output buffer holds {output} samples but input has {input}")]
    BufferLengthMismatch { input: usize, output: usize },
    #[error("effect chain is full ({capacity} effects)")]
    ChainFull { capacity: usize },
    #[error("parameter queue is full")]
    QueueFull,
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("preset error: {0}")]
    Preset(String),
}

impl Error {
    pub fn preset(message: impl Into<String>) -> Self {
        Error::Preset(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
