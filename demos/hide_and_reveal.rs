//! Hides a message in a generated PNG and reads it back.
//!
//! Run with `RUST_LOG=debug cargo run --example hide_and_reveal [cover.png]`.
//! Without an argument a gradient cover image is written to the temp dir.

use image::{Rgb, RgbImage};
use lsb_stego::image::{hide_in_file, load, reveal_from_file};
use lsb_stego::StegoParams;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = env::temp_dir();
    let cover = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let path = out_dir.join("stego_cover.png");
            RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 4) as u8, (y * 5) as u8, 128]))
                .save(&path)?;
            path
        }
    };
    let stego = out_dir.join("stego_output.png");

    let (carrier, shape) = load(&cover)?;
    println!(
        "Cover {}: {}x{}, room for {} characters",
        cover.display(),
        shape.width,
        shape.height,
        StegoParams::default().max_message_len(carrier.len())
    );

    let secret = "This is not the real secret message.";
    hide_in_file(&cover, secret, &stego)?;
    println!("Message hidden in {}", stego.display());

    let revealed = reveal_from_file(&stego)?;
    println!("Extracted: {}", revealed);

    Ok(())
}
