use std::io;

use thiserror::Error;

/// Failure of a single device-control request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to open control socket: {0}")]
    Socket(#[source] io::Error),

    #[error("device-control command {command:#x} on {interface} failed: {source}")]
    Request {
        interface: String,
        command: u32,
        #[source]
        source: io::Error,
    },

    #[error("request buffer of {0} bytes cannot hold a command code")]
    BufferTooSmall(usize),

    #[error("response of {len} bytes is shorter than the {needed} bytes its layout requires")]
    Truncated { needed: usize, len: usize },

    #[error("device-control requests are not supported on this platform")]
    Unsupported,
}

#[derive(Debug, Error)]
pub enum LinkSettingsError {
    #[error("link settings unavailable for {interface} (modern: {modern}; legacy: {legacy})")]
    Unavailable {
        interface: String,
        modern: TransportError,
        legacy: TransportError,
    },
}

/// Failure of the external device-attribute dump.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}")]
    Status { program: String, status: String },

    #[error("{program} produced non UTF-8 output")]
    Utf8 { program: String },
}

/// Failures that abort the whole gather.
#[derive(Debug, Error)]
pub enum GatherError {
    #[error("failed to enumerate network interfaces: {0}")]
    Enumeration(#[source] io::Error),
}
