// src/encode/payload.rs

//! Conversion between text messages and the bit sequences hidden in a carrier.
//!
//! Characters are encoded as Latin-1: every code point up to U+00FF is one
//! byte, anything above is rejected. Bytes are emitted most-significant bit
//! first.
//!
//! Two framings are supported:
//!
//! - [`Framing::Sentinel`]: message bits followed by the 16-bit
//!   [`SENTINEL`]. The decoder stops at the first byte boundary where the
//!   next 16 bits equal the sentinel, so a message containing the byte pair
//!   `0xFF 0xFE` comes back cut short.
//! - [`Framing::LengthPrefix`]: a 32-bit big-endian byte count, then the
//!   message bits. No sentinel and no collision.

use super::params::Framing;
use crate::utils::error::{Result, StegoError};
use bitvec::prelude::*;
use byteorder::{BigEndian, ByteOrder};
use log::debug;

/// Bit sequence as written into a carrier, MSB first within each byte.
pub type PayloadBits = BitVec<u8, Msb0>;

/// End-of-message marker for sentinel framing (`1111111111111110`).
pub const SENTINEL: [u8; 2] = [0xFF, 0xFE];

/// Number of bits taken by [`SENTINEL`].
pub const SENTINEL_BITS: usize = 16;

/// Number of bits taken by the length header in [`Framing::LengthPrefix`].
pub const LENGTH_HEADER_BITS: usize = 32;

/// Maps a message onto single bytes, rejecting code points above U+00FF.
pub fn to_latin1(message: &str) -> Result<Vec<u8>> {
    message
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| StegoError::UnsupportedCharacter { ch, index })
        })
        .collect()
}

/// Inverse of [`to_latin1`]. Every byte value is a valid character.
pub fn from_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Number of payload bits needed for a message of `message_len` characters
/// under sentinel framing.
#[inline]
pub fn payload_len(message_len: usize) -> usize {
    message_len * 8 + SENTINEL_BITS
}

/// Encodes `message` followed by the sentinel.
///
/// The result is exactly [`payload_len`]`(message.chars().count())` bits long.
pub fn encode(message: &str) -> Result<PayloadBits> {
    let bytes = to_latin1(message)?;

    let mut bits = PayloadBits::with_capacity(payload_len(bytes.len()));
    for byte in bytes.iter().chain(SENTINEL.iter()) {
        bits.extend_from_bitslice(byte.view_bits::<Msb0>());
    }

    debug!("Encoded {} characters into {} payload bits", bytes.len(), bits.len());
    Ok(bits)
}

/// Decodes a sentinel-framed message from a stream of bits.
///
/// Bits are consumed lazily, so an extractor over a large carrier is only
/// read as far as the sentinel.
///
/// # Errors
///
/// [`StegoError::TruncatedPayload`] if the bits run out before a sentinel.
pub fn decode<I>(bits: I) -> Result<String>
where
    I: IntoIterator<Item = bool>,
{
    let mut reader = ByteReader::new(bits.into_iter());
    let mut bytes: Vec<u8> = Vec::new();

    while let Some(byte) = reader.next_byte() {
        if bytes.last() == Some(&SENTINEL[0]) && byte == SENTINEL[1] {
            bytes.pop();
            debug!(
                "Sentinel found after {} bits, {} characters decoded",
                reader.consumed,
                bytes.len()
            );
            return Ok(from_latin1(&bytes));
        }
        bytes.push(byte);
    }

    Err(StegoError::TruncatedPayload {
        bits: reader.consumed,
    })
}

/// Encodes `message` behind a 32-bit big-endian byte count.
pub fn encode_length_prefixed(message: &str) -> Result<PayloadBits> {
    let bytes = to_latin1(message)?;
    let len = u32::try_from(bytes.len()).map_err(|_| StegoError::CapacityExceeded {
        needed: bytes.len().saturating_mul(8).saturating_add(LENGTH_HEADER_BITS),
        capacity: (u32::MAX as usize).saturating_mul(8).saturating_add(LENGTH_HEADER_BITS),
    })?;

    let mut header = [0u8; 4];
    BigEndian::write_u32(&mut header, len);

    let mut bits = PayloadBits::with_capacity(LENGTH_HEADER_BITS + bytes.len() * 8);
    bits.extend_from_bitslice(header.view_bits::<Msb0>());
    bits.extend_from_bitslice(bytes.view_bits::<Msb0>());

    debug!(
        "Encoded {} characters behind a length header, {} payload bits",
        bytes.len(),
        bits.len()
    );
    Ok(bits)
}

/// Decodes a length-prefixed message from a stream of bits.
///
/// # Errors
///
/// [`StegoError::TruncatedPayload`] if the stream ends inside the header or
/// before the announced number of bytes.
pub fn decode_length_prefixed<I>(bits: I) -> Result<String>
where
    I: IntoIterator<Item = bool>,
{
    let mut reader = ByteReader::new(bits.into_iter());

    let mut header = [0u8; 4];
    for slot in header.iter_mut() {
        *slot = reader.next_byte().ok_or(StegoError::TruncatedPayload {
            bits: reader.consumed,
        })?;
    }
    let len = BigEndian::read_u32(&header) as usize;
    debug!("Length header announces {} bytes", len);

    let mut bytes = Vec::new();
    for _ in 0..len {
        match reader.next_byte() {
            Some(byte) => bytes.push(byte),
            None => {
                return Err(StegoError::TruncatedPayload {
                    bits: reader.consumed,
                })
            }
        }
    }

    Ok(from_latin1(&bytes))
}

/// Encodes `message` with the given framing.
pub fn encode_framed(message: &str, framing: Framing) -> Result<PayloadBits> {
    match framing {
        Framing::Sentinel => encode(message),
        Framing::LengthPrefix => encode_length_prefixed(message),
    }
}

/// Decodes a message written with the given framing.
pub fn decode_framed<I>(bits: I, framing: Framing) -> Result<String>
where
    I: IntoIterator<Item = bool>,
{
    match framing {
        Framing::Sentinel => decode(bits),
        Framing::LengthPrefix => decode_length_prefixed(bits),
    }
}

/// Packs a bit stream into bytes, MSB first.
struct ByteReader<I> {
    bits: I,
    consumed: usize,
}

impl<I: Iterator<Item = bool>> ByteReader<I> {
    fn new(bits: I) -> Self {
        Self { bits, consumed: 0 }
    }

    /// Returns the next full byte, or `None` if fewer than 8 bits remain.
    fn next_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for _ in 0..8 {
            let bit = self.bits.next()?;
            self.consumed += 1;
            byte = (byte << 1) | u8::from(bit);
        }
        Some(byte)
    }
}
