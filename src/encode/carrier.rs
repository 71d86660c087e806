// src/encode/carrier.rs

//! Writing payload bits into, and reading them out of, the least significant
//! bits of a byte carrier.
//!
//! Bit `i` of the payload lands in bit 0 of `carrier[i]`. The other seven bits
//! of every byte are never touched, and bytes past the end of the payload are
//! left as they were. Each position depends only on its own carrier byte and
//! payload bit, which is what lets the `rayon` variants split the carrier into
//! independent chunks.

use super::payload::PayloadBits;
use crate::utils::error::{Result, StegoError};
use bitvec::prelude::*;
use log::{debug, warn};
use std::iter::FusedIterator;
use std::slice;

/// Carrier bytes handed to each rayon worker. Multiple of 8 so that chunks
/// line up with payload bytes.
#[cfg(feature = "rayon")]
pub const PARALLEL_CHUNK: usize = 4096;

/// Number of payload bits a carrier can hold.
#[inline]
pub fn capacity(carrier: &[u8]) -> usize {
    carrier.len()
}

fn check_capacity(carrier: &[u8], bits: &BitSlice<u8, Msb0>) -> Result<()> {
    let needed = bits.len();
    let capacity = capacity(carrier);
    if needed > capacity {
        warn!(
            "Payload of {} bits does not fit a carrier of {} bytes",
            needed, capacity
        );
        return Err(StegoError::CapacityExceeded { needed, capacity });
    }
    debug!("Embedding {} bits into a carrier of {} bytes", needed, capacity);
    Ok(())
}

#[inline]
fn write_lsbs(carrier: &mut [u8], bits: &BitSlice<u8, Msb0>) {
    for (byte, bit) in carrier.iter_mut().zip(bits.iter().by_vals()) {
        *byte = (*byte & 0xFE) | u8::from(bit);
    }
}

/// Overwrites the low bit of `carrier[i]` with `bits[i]`.
///
/// # Errors
///
/// [`StegoError::CapacityExceeded`] when there are more bits than carrier
/// bytes. The carrier is unchanged in that case.
pub fn embed(carrier: &mut [u8], bits: &BitSlice<u8, Msb0>) -> Result<()> {
    check_capacity(carrier, bits)?;
    write_lsbs(carrier, bits);
    Ok(())
}

/// Same result as [`embed`], with the carrier split across rayon workers.
#[cfg(feature = "rayon")]
pub fn embed_parallel(carrier: &mut [u8], bits: &BitSlice<u8, Msb0>) -> Result<()> {
    use rayon::prelude::*;

    check_capacity(carrier, bits)?;
    carrier[..bits.len()]
        .par_chunks_mut(PARALLEL_CHUNK)
        .enumerate()
        .for_each(|(n, chunk)| {
            let start = n * PARALLEL_CHUNK;
            write_lsbs(chunk, &bits[start..start + chunk.len()]);
        });
    Ok(())
}

/// Lazily yields the low bit of every carrier byte, in index order.
///
/// The iterator is `Clone`, so the same carrier can be read more than once
/// without re-borrowing it.
#[derive(Debug, Clone)]
pub struct Lsbs<'a> {
    bytes: slice::Iter<'a, u8>,
}

impl Iterator for Lsbs<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        self.bytes.next().map(|&b| b & 1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bytes.size_hint()
    }
}

impl ExactSizeIterator for Lsbs<'_> {}
impl FusedIterator for Lsbs<'_> {}

/// Returns the carrier's low bits as a lazy sequence of `carrier.len()` bits.
pub fn extract(carrier: &[u8]) -> Lsbs<'_> {
    Lsbs {
        bytes: carrier.iter(),
    }
}

/// Collects every low bit of the carrier, packing eight carrier bytes per
/// output byte on rayon workers.
#[cfg(feature = "rayon")]
pub fn extract_parallel(carrier: &[u8]) -> PayloadBits {
    use rayon::prelude::*;

    let mut bits = PayloadBits::repeat(false, carrier.len());
    bits.as_raw_mut_slice()
        .par_iter_mut()
        .zip(carrier.par_chunks(8))
        .for_each(|(packed, bytes)| {
            *packed = bytes
                .iter()
                .enumerate()
                .fold(0u8, |acc, (k, &b)| acc | ((b & 1) << (7 - k)));
        });
    bits
}

/// Collects every low bit of the carrier.
pub fn extract_all(carrier: &[u8]) -> PayloadBits {
    extract(carrier).collect()
}
