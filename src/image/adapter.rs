// src/image/adapter.rs

//! Moving carriers between image files and flat byte buffers.
//!
//! Pixels are flattened row by row with channels interleaved, the same layout
//! `image` uses for its raw buffers. Only lossless formats keep a hidden
//! message intact; the output format follows the file extension.

use crate::utils::error::{Result, StegoError};
use ::image::ColorType;
use log::{debug, info};
use std::path::Path;

/// Sample layout of a flattened 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Luma => 1,
            Channels::LumaAlpha => 2,
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    fn color_type(self) -> ColorType {
        match self {
            Channels::Luma => ColorType::L8,
            Channels::LumaAlpha => ColorType::La8,
            Channels::Rgb => ColorType::Rgb8,
            Channels::Rgba => ColorType::Rgba8,
        }
    }
}

/// Dimensions needed to turn a flat carrier back into an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierShape {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
}

impl CarrierShape {
    /// Number of carrier bytes an image of this shape holds.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels.count()
    }
}

/// Decodes an image file into a flat 8-bit buffer.
///
/// Grayscale and RGB images keep their channel layout (with or without
/// alpha). Higher bit depths are reduced to 8 bits per channel.
pub fn load<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, CarrierShape)> {
    let img = ::image::open(path.as_ref())?;
    let (width, height) = (img.width(), img.height());

    let (channels, bytes) = match img.color() {
        ColorType::L8 | ColorType::L16 => (Channels::Luma, img.into_luma8().into_raw()),
        ColorType::La8 | ColorType::La16 => {
            (Channels::LumaAlpha, img.into_luma_alpha8().into_raw())
        }
        color if color.has_alpha() => (Channels::Rgba, img.into_rgba8().into_raw()),
        _ => (Channels::Rgb, img.into_rgb8().into_raw()),
    };

    let shape = CarrierShape {
        width,
        height,
        channels,
    };
    debug!(
        "Loaded {} as {}x{} {:?}, {} carrier bytes",
        path.as_ref().display(),
        width,
        height,
        channels,
        bytes.len()
    );
    Ok((bytes, shape))
}

/// Encodes `carrier` as an image of the given shape.
///
/// # Errors
///
/// [`StegoError::ShapeMismatch`] if the buffer length differs from
/// [`CarrierShape::byte_len`]; the file is not created then.
pub fn save<P: AsRef<Path>>(carrier: &[u8], shape: CarrierShape, path: P) -> Result<()> {
    let expected = shape.byte_len();
    if carrier.len() != expected {
        return Err(StegoError::ShapeMismatch {
            expected,
            actual: carrier.len(),
        });
    }

    ::image::save_buffer(
        path.as_ref(),
        carrier,
        shape.width,
        shape.height,
        shape.channels.color_type(),
    )?;
    debug!("Saved {} carrier bytes to {}", carrier.len(), path.as_ref().display());
    Ok(())
}

/// Loads `input`, hides `message` in its pixels and writes the result to
/// `output`.
pub fn hide_in_file<P, Q>(input: P, message: &str, output: Q) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (mut carrier, shape) = load(input)?;
    crate::hide(&mut carrier, message)?;
    save(&carrier, shape, output.as_ref())?;

    info!(
        "Message of {} characters hidden in {}",
        message.chars().count(),
        output.as_ref().display()
    );
    Ok(())
}

/// Loads `path` and returns the message hidden in its pixels.
pub fn reveal_from_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let (carrier, _) = load(path.as_ref())?;
    let message = crate::reveal(&carrier)?;

    info!(
        "Revealed {} characters from {}",
        message.chars().count(),
        path.as_ref().display()
    );
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8])
        })
    }

    #[test]
    fn test_load_rgb_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        gradient(10, 6).save(&path).unwrap();

        let (bytes, shape) = load(&path).unwrap();
        assert_eq!(shape.channels, Channels::Rgb);
        assert_eq!((shape.width, shape.height), (10, 6));
        assert_eq!(bytes.len(), shape.byte_len());
        assert_eq!(bytes, gradient(10, 6).into_raw());
    }

    #[test]
    fn test_load_keeps_alpha_and_gray() {
        let dir = tempfile::tempdir().unwrap();

        let rgba_path = dir.path().join("rgba.png");
        RgbaImage::new(4, 4).save(&rgba_path).unwrap();
        let (_, shape) = load(&rgba_path).unwrap();
        assert_eq!(shape.channels, Channels::Rgba);
        assert_eq!(shape.byte_len(), 64);

        let gray_path = dir.path().join("gray.png");
        GrayImage::from_pixel(5, 5, Luma([200])).save(&gray_path).unwrap();
        let (bytes, shape) = load(&gray_path).unwrap();
        assert_eq!(shape.channels, Channels::Luma);
        assert_eq!(bytes, vec![200u8; 25]);
    }

    #[test]
    fn test_save_rejects_wrong_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let shape = CarrierShape {
            width: 2,
            height: 2,
            channels: Channels::Rgb,
        };

        let err = save(&[0u8; 11], shape, &path).unwrap_err();
        assert!(matches!(
            err,
            StegoError::ShapeMismatch {
                expected: 12,
                actual: 11
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cover = dir.path().join("cover.png");
        let stego = dir.path().join("stego.png");
        gradient(32, 32).save(&cover).unwrap();

        let secret = "This is not the real secret message.";
        hide_in_file(&cover, secret, &stego).unwrap();
        assert_eq!(reveal_from_file(&stego).unwrap(), secret);

        let (before, _) = load(&cover).unwrap();
        let (after, _) = load(&stego).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a & 0xFE, b & 0xFE);
        }
    }

    #[test]
    fn test_hide_in_small_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cover = dir.path().join("tiny.png");
        let stego = dir.path().join("never.png");
        // 2x2 RGB is 12 bytes, less than the 16-bit sentinel alone.
        gradient(2, 2).save(&cover).unwrap();

        let err = hide_in_file(&cover, "", &stego).unwrap_err();
        assert!(matches!(
            err,
            StegoError::CapacityExceeded {
                needed: 16,
                capacity: 12
            }
        ));
        assert!(!stego.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path().join("missing.png")).is_err());
    }
}
