//! Test fixtures and constants.

use image::{Rgb, RgbImage};

/// Colours that are exact entries of the embedded DMC table
pub mod threads {
    /// DMC 310 Black
    pub const BLACK: [u8; 3] = [0, 0, 0];

    /// DMC 321 Red
    pub const RED: [u8; 3] = [199, 43, 59];

    /// DMC 797 Royal Blue
    pub const BLUE: [u8; 3] = [19, 71, 125];
}

/// Encode an image as PNG bytes
pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image.clone())
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .expect("Failed to encode PNG");
    bytes
}

/// Single-colour image
pub fn solid(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Vertical stripes, one colour per equal-width band
pub fn stripes(width: u32, height: u32, colors: &[[u8; 3]]) -> RgbImage {
    let band = width / colors.len() as u32;
    RgbImage::from_fn(width, height, |x, _| {
        let idx = ((x / band.max(1)) as usize).min(colors.len() - 1);
        Rgb(colors[idx])
    })
}

/// Small thread table in the on-disk format
pub const SMALL_TABLE: &str = "floss_id, color_name, r_value, g_value, b_value, hex_code\r\n\
    310, Black, 0, 0, 0, 000000\r\n\
    321, Red, 199, 43, 59, C72B3B\r\n\
    B5200, Snow White, 255, 255, 255, FFFFFF\r\n";
