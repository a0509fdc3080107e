//! Transport module - TCP stream handling for the remote link.

mod tcp;

pub use tcp::{bind, connect, resolve, DEFAULT_ADDRESS};
