//! Transaction scoreboards.
//!
//! A [`Scoreboard`] is an ordered, append-only log of the transfers observed on one channel.
//! The orchestrator creates one per channel, moves each into its
//! [`TransactionCapture`](crate::monitor::TransactionCapture) for the run, and hands both to the
//! [`comparator`] once the captures have stopped.

/// End-of-run reconciliation of the input and output scoreboards.
pub mod comparator;

pub use comparator::compare;

use serde::Serialize;

use crate::common::ChannelId;

/// One completed handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Position in the channel's transfer sequence, starting at zero.
    pub index: u64,
    /// Transferred payload.
    pub value: u64,
    /// Cycle the transfer was sampled on.
    pub cycle: u64,
}

/// Ordered log of the transactions seen on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    channel: ChannelId,
    entries: Vec<Transaction>,
}

impl Scoreboard {
    /// Creates an empty scoreboard for `channel`.
    pub const fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            entries: Vec::new(),
        }
    }

    /// The channel this log belongs to.
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Appends a transfer with the next sequence index and returns it.
    pub fn record(&mut self, value: u64, cycle: u64) -> Transaction {
        let txn = Transaction {
            index: self.entries.len() as u64,
            value,
            cycle,
        };
        self.entries.push(txn);
        txn
    }

    /// All transactions, oldest first.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Transferred payloads in order.
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|t| t.value).collect()
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been transferred.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
