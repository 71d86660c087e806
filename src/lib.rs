//! # LSB Steganography Library
//!
//! Hides short text messages in the least significant bits of a flat byte
//! buffer, typically the pixel samples of a lossless image, and reads them
//! back.
//!
//! This library is organized into several modules:
//! - `utils`: error handling
//! - `encode`: the payload codec and the carrier embedder/extractor
//! - `image`: loading and saving carriers through the `image` crate
//!   (`image` feature)
//!
//! ```
//! let mut carrier = vec![0u8; 32];
//! lsb_stego::hide(&mut carrier, "Hi")?;
//! assert_eq!(lsb_stego::reveal(&carrier)?, "Hi");
//! # Ok::<(), lsb_stego::StegoError>(())
//! ```

// Re-export commonly used types at the crate root
pub use utils::error::{Result, StegoError};

pub mod utils {
    pub mod error;
}

pub mod encode;

#[cfg(feature = "image")]
pub mod image {
    pub mod adapter;

    pub use self::adapter::{hide_in_file, load, reveal_from_file, save, CarrierShape, Channels};
}

// Public API exports
pub use encode::{Framing, StegoParams};

use encode::{carrier, payload};
use log::debug;

// Constants
pub const STEGO_VERSION: &str = "0.1.0";

/// Hides `message` in the low bits of `carrier` using sentinel framing.
///
/// # Errors
///
/// - [`StegoError::UnsupportedCharacter`] for characters above U+00FF.
/// - [`StegoError::CapacityExceeded`] if `carrier` is shorter than
///   `8 * message.len() + 16` bytes; nothing is written then.
pub fn hide(carrier: &mut [u8], message: &str) -> Result<()> {
    hide_with(carrier, message, &StegoParams::default())
}

/// Reads a sentinel-framed message back out of `carrier`.
///
/// # Errors
///
/// [`StegoError::TruncatedPayload`] if no sentinel is found.
pub fn reveal(carrier: &[u8]) -> Result<String> {
    reveal_with(carrier, &StegoParams::default())
}

/// [`hide`] with explicit framing and execution mode.
pub fn hide_with(carrier: &mut [u8], message: &str, params: &StegoParams) -> Result<()> {
    let bits = payload::encode_framed(message, params.framing)?;

    #[cfg(feature = "rayon")]
    if params.parallel {
        return carrier::embed_parallel(carrier, &bits);
    }

    carrier::embed(carrier, &bits)
}

/// [`reveal`] with explicit framing and execution mode.
pub fn reveal_with(carrier: &[u8], params: &StegoParams) -> Result<String> {
    debug!(
        "Revealing {:?}-framed message from {} carrier bytes",
        params.framing,
        carrier.len()
    );

    #[cfg(feature = "rayon")]
    if params.parallel {
        let bits = carrier::extract_parallel(carrier);
        return payload::decode_framed(bits.iter().by_vals(), params.framing);
    }

    payload::decode_framed(carrier::extract(carrier), params.framing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(STEGO_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_hide_reveal_default() {
        let mut carrier: Vec<u8> = (0..=255).collect();
        hide(&mut carrier, "crate root").unwrap();
        assert_eq!(reveal(&carrier).unwrap(), "crate root");
    }

    #[test]
    fn test_hide_reveal_length_prefix() {
        let params = StegoParams {
            framing: Framing::LengthPrefix,
            ..Default::default()
        };
        let mut carrier = vec![0x55u8; 128];
        hide_with(&mut carrier, "\u{FF}\u{FE}", &params).unwrap();
        assert_eq!(reveal_with(&carrier, &params).unwrap(), "\u{FF}\u{FE}");
    }

    #[test]
    fn test_parallel_flag_gives_same_result() {
        let sequential = StegoParams::default();
        let parallel = StegoParams {
            parallel: true,
            ..Default::default()
        };

        let mut a = vec![0xA5u8; 512];
        let mut b = a.clone();
        hide_with(&mut a, "same either way", &sequential).unwrap();
        hide_with(&mut b, "same either way", &parallel).unwrap();

        assert_eq!(a, b);
        assert_eq!(reveal_with(&b, &parallel).unwrap(), "same either way");
    }
}
