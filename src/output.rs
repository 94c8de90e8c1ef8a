//! Rendered image output.
//!
//! Three formats, chosen by file extension in the binary: plain-text PPM and
//! PNG for gamma-corrected 8-bit images, EXR for the linear radiance buffer
//! with full HDR precision.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{info, warn};

/// Write an 8-bit image as plain-text PPM (P3).
///
/// Emits the `P3`, dimensions, and `255` header lines, then one `R G B`
/// triple per line, rows top to bottom.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_ppm<W: Write>(out: &mut W, image: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width(), image.height())?;
    writeln!(out, "255")?;

    for pixel in image.pixels() {
        writeln!(out, "{} {} {}", pixel[0], pixel[1], pixel[2])?;
    }

    Ok(())
}

/// Save an 8-bit image as a PPM file.
pub fn save_ppm(image: &ImageBuffer<Rgb<u8>, Vec<u8>>, output_path: &str) {
    match try_save_ppm(image, output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save PPM image: {}", e),
    }
}

fn try_save_ppm(image: &ImageBuffer<Rgb<u8>, Vec<u8>>, output_path: &str) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(output_path)?);
    write_ppm(&mut out, image)?;
    out.flush()
}

/// Save an 8-bit image as PNG.
pub fn save_png(image: &ImageBuffer<Rgb<u8>, Vec<u8>>, output_path: &str) {
    match image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save a linear f32 image as EXR with full HDR precision.
///
/// No gamma correction or clamping is applied; EXR stores the radiance
/// values exactly as rendered.
pub fn save_exr(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let result = write_rgb_file(
        output_path,
        image.width() as usize,
        image.height() as usize,
        |x, y| {
            let pixel = image.get_pixel(x as u32, y as u32);
            (pixel[0], pixel[1], pixel[2])
        },
    );

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
