//! Error-construction macros over the message catalog.
//!
//! Repositories and the settings store return `anyhow::Error` values built
//! from [`Message`](super::Message) variants so that all error text lives
//! in one place.

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Early return with an error created from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
