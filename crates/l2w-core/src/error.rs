use thiserror::Error;

/// Contract violations detected at the engine's call boundary.
///
/// These are programmer or configuration errors. Voice contention and fade-out
/// eviction are normal behavior and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("canvas bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: i32, height: i32 },
    #[error("voice bank is empty")]
    EmptyVoiceBank,
    #[error("voice index {index} is outside a bank of {len} voices")]
    InvalidVoiceIndex { index: usize, len: usize },
}
