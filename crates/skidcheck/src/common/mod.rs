//! Common types shared by every component of the checker.
//!
//! This module provides:
//! 1. **Channels:** Identification of the input and output channels.
//! 2. **Samples:** Immutable snapshots of a channel's valid, ready and data wires.
//! 3. **Payloads:** Width masking for fixed-width data values.
//! 4. **Error Handling:** Protocol, integrity, liveness and configuration errors.

/// Error types and failure classes.
pub mod error;

/// Channel identifiers, samples and payload helpers.
pub mod signal;

pub use error::{ConfigError, FailureClass, VerifyError};
pub use signal::{ChannelId, ChannelSample, mask, payload_mask};
