pub mod carrier;
pub mod params;
pub mod payload;

// Re-export commonly used encoding functionality
pub use carrier::{capacity, embed, extract, extract_all, Lsbs};
#[cfg(feature = "rayon")]
pub use carrier::{embed_parallel, extract_parallel};
pub use params::{Framing, StegoParams};
pub use payload::{decode, encode, payload_len, PayloadBits, SENTINEL};

// Re-export error types for convenience
pub use crate::utils::error::{Result, StegoError};
