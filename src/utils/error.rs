use std::io;
use thiserror::Error;

/// Main error type for the steganography codec.
#[derive(Error, Debug)]
pub enum StegoError {
    /// The payload needs more carrier bytes than are available.
    #[error("Capacity exceeded: payload needs {needed} bits but the carrier holds {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },
    /// The carrier ran out of bits before the payload was complete.
    #[error("Truncated payload: no complete message found in {bits} bits")]
    TruncatedPayload { bits: usize },
    /// A message character has no single-byte representation.
    #[error("Unsupported character {ch:?} at position {index}")]
    UnsupportedCharacter { ch: char, index: usize },
    /// A buffer does not match the image dimensions it is saved with.
    #[error("Shape mismatch: expected {expected} bytes, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The image backend failed to decode or encode a file
    #[cfg(feature = "image")]
    #[error("Image error: {0}")]
    Image(#[from] ::image::ImageError),
}

/// A specialized `Result` type for steganography operations.
pub type Result<T> = std::result::Result<T, StegoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        assert_eq!(
            StegoError::Io(io_error).to_string(),
            "I/O error: file not found"
        );

        assert_eq!(
            StegoError::CapacityExceeded { needed: 32, capacity: 31 }.to_string(),
            "Capacity exceeded: payload needs 32 bits but the carrier holds 31"
        );

        assert_eq!(
            StegoError::TruncatedPayload { bits: 8 }.to_string(),
            "Truncated payload: no complete message found in 8 bits"
        );

        assert_eq!(
            StegoError::UnsupportedCharacter { ch: '€', index: 3 }.to_string(),
            "Unsupported character '€' at position 3"
        );

        assert_eq!(
            StegoError::ShapeMismatch { expected: 12, actual: 11 }.to_string(),
            "Shape mismatch: expected 12 bytes, got 11"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: StegoError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, StegoError::Io(_)));
    }
}
