// src/encode/params.rs

use super::payload::{LENGTH_HEADER_BITS, SENTINEL_BITS};

/// How the end of a hidden message is marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// Message bits followed by the 16-bit sentinel.
    #[default]
    Sentinel,
    /// 32-bit big-endian byte count, then the message bits.
    LengthPrefix,
}

impl Framing {
    /// Bits spent on framing on top of the message itself.
    pub fn overhead_bits(self) -> usize {
        match self {
            Framing::Sentinel => SENTINEL_BITS,
            Framing::LengthPrefix => LENGTH_HEADER_BITS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StegoParams {
    pub framing: Framing,
    pub parallel: bool, // only honoured with the `rayon` feature
}

impl StegoParams {
    /// Total payload bits for a message of `message_len` characters.
    pub fn payload_bits(&self, message_len: usize) -> usize {
        message_len * 8 + self.framing.overhead_bits()
    }

    /// Longest message that fits a carrier of `capacity` bytes.
    pub fn max_message_len(&self, capacity: usize) -> usize {
        capacity.saturating_sub(self.framing.overhead_bits()) / 8
    }
}
