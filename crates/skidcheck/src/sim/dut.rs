//! Signal surface of the device under test.
//!
//! This module defines how the checker talks to the DUT. It provides:
//! 1. **`DutHandle`:** The fixed capability contract every DUT backend implements
//!    (simulator bridge, behavioural model, or mock).
//! 2. **`ChannelView`:** Typed per-channel access that enforces the single-writer rule:
//!    the testbench may write `in_valid`, `in_data` and `out_ready`, and nothing else.

use super::clock::ClockEdge;
use crate::common::{ChannelId, ChannelSample, VerifyError, mask};

/// Handle to the device under test.
///
/// Getters return the value currently visible on the wire, after combinational
/// settling. Setters are only ever called by the owner of the signal.
pub trait DutHandle {
    /// Drives `rst` (or `arst` for asynchronously reset builds).
    fn set_reset(&mut self, asserted: bool);
    /// Delivers a clock edge on `clk`.
    fn clock_edge(&mut self, edge: ClockEdge);

    /// Drives `in_valid`.
    fn set_in_valid(&mut self, valid: bool);
    /// Drives `in_data`.
    fn set_in_data(&mut self, data: u64);
    /// Drives `out_ready`.
    fn set_out_ready(&mut self, ready: bool);

    /// Reads `in_valid`.
    fn in_valid(&self) -> bool;
    /// Reads `in_data`.
    fn in_data(&self) -> u64;
    /// Reads `in_ready` (DUT output).
    fn in_ready(&self) -> bool;
    /// Reads `out_valid` (DUT output).
    fn out_valid(&self) -> bool;
    /// Reads `out_data` (DUT output).
    fn out_data(&self) -> u64;
    /// Reads `out_ready`.
    fn out_ready(&self) -> bool;
}

/// Typed accessor for one channel's `valid`, `ready` and `data` wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelView {
    id: ChannelId,
    width: u32,
}

impl ChannelView {
    /// The upstream channel (`in_*`).
    pub const fn input(width: u32) -> Self {
        Self {
            id: ChannelId::Input,
            width,
        }
    }

    /// The downstream channel (`out_*`).
    pub const fn output(width: u32) -> Self {
        Self {
            id: ChannelId::Output,
            width,
        }
    }

    /// Which channel this view accesses.
    pub const fn id(&self) -> ChannelId {
        self.id
    }

    /// Payload width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Current `valid`.
    pub fn valid<D: DutHandle + ?Sized>(&self, dut: &D) -> bool {
        match self.id {
            ChannelId::Input => dut.in_valid(),
            ChannelId::Output => dut.out_valid(),
        }
    }

    /// Current `ready`.
    pub fn ready<D: DutHandle + ?Sized>(&self, dut: &D) -> bool {
        match self.id {
            ChannelId::Input => dut.in_ready(),
            ChannelId::Output => dut.out_ready(),
        }
    }

    /// Current `data`, masked to the channel width.
    pub fn data<D: DutHandle + ?Sized>(&self, dut: &D) -> u64 {
        let raw = match self.id {
            ChannelId::Input => dut.in_data(),
            ChannelId::Output => dut.out_data(),
        };
        mask(raw, self.width)
    }

    /// Snapshot of all three wires.
    pub fn sample<D: DutHandle + ?Sized>(&self, dut: &D) -> ChannelSample {
        ChannelSample::new(self.valid(dut), self.ready(dut), self.data(dut))
    }

    /// Drives `valid` and `data` as the sender of this channel.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::NotSignalOwner`] on the output channel, whose sender is the DUT.
    pub fn drive<D: DutHandle + ?Sized>(
        &self,
        dut: &mut D,
        valid: bool,
        data: u64,
    ) -> Result<(), VerifyError> {
        match self.id {
            ChannelId::Input => {
                dut.set_in_valid(valid);
                dut.set_in_data(mask(data, self.width));
                Ok(())
            }
            ChannelId::Output => Err(VerifyError::NotSignalOwner { signal: "out_valid" }),
        }
    }

    /// Drives `ready` as the receiver of this channel.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::NotSignalOwner`] on the input channel, whose receiver is the DUT.
    pub fn set_ready<D: DutHandle + ?Sized>(&self, dut: &mut D, ready: bool) -> Result<(), VerifyError> {
        match self.id {
            ChannelId::Input => Err(VerifyError::NotSignalOwner { signal: "in_ready" }),
            ChannelId::Output => {
                dut.set_out_ready(ready);
                Ok(())
            }
        }
    }
}
