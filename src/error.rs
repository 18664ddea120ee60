use thiserror::Error;

/// Per-frame extraction outcomes that skip the cycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The sensor had no frame ready. Expected, skipped silently.
    #[error("no body frame available")]
    Unavailable,

    #[error("frame reports {count} bodies but only {capacity} slots exist")]
    SlotOverflow { count: usize, capacity: usize },
}

/// A single datagram could not be delivered. Never fatal.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode bundle: {0}")]
    Encode(String),

    #[error("failed to send datagram: {0}")]
    Send(#[from] std::io::Error),
}

/// Startup configuration problems. The frame loop must not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid destination host: {0:?}")]
    InvalidHost(String),

    #[error("invalid destination port: {0}")]
    InvalidPort(u32),

    #[error("unknown joint name: {0:?}")]
    UnknownJoint(String),

    #[error("could not resolve destination {0}")]
    Unresolvable(String),

    #[error("z_floor must be finite and positive, got {0}")]
    InvalidZFloor(f32),
}
