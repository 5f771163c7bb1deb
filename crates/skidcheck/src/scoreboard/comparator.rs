//! Scoreboard comparison.

use tracing::{error, info};

use super::Scoreboard;
use crate::common::VerifyError;

/// Compares the input and output scoreboards as ordered value sequences.
///
/// Lengths are checked first; with equal lengths the first divergent index is reported.
/// Cycle numbers are ignored: only content and order must match.
///
/// # Errors
///
/// Returns [`VerifyError::LengthMismatch`] or [`VerifyError::DataMismatch`].
///
/// # Returns
///
/// The number of matching transactions.
pub fn compare(input: &Scoreboard, output: &Scoreboard) -> Result<usize, VerifyError> {
    info!(
        input = input.len(),
        output = output.len(),
        "comparing scoreboards"
    );

    if input.len() != output.len() {
        let err = VerifyError::LengthMismatch {
            input: input.len(),
            output: output.len(),
        };
        error!("{err}");
        return Err(err);
    }

    let mismatch = input
        .entries()
        .iter()
        .zip(output.entries())
        .find(|(sent, received)| sent.value != received.value);

    if let Some((sent, received)) = mismatch {
        let err = VerifyError::DataMismatch {
            index: sent.index,
            input: sent.value,
            output: received.value,
        };
        error!(sent_cycle = sent.cycle, received_cycle = received.cycle, "{err}");
        return Err(err);
    }

    Ok(input.len())
}
