//! QR decoding for picked label photos.
//!
//! The scanner preview stretches the picture over the whole viewport, so a
//! code's position in the image maps linearly onto screen coordinates.

use anyhow::{Context, Result};
use cantinho_client::scanner::{Point, ScanResult};

/// A code found in an image, positioned in image pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCode {
    pub data: String,
    pub center: Point,
}

/// Decoded picture: its pixel size and every QR code that decoded cleanly
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub codes: Vec<DecodedCode>,
}

impl DecodedImage {
    /// Codes as scan results in viewport coordinates
    pub fn scans(&self, viewport_width: f32, viewport_height: f32) -> Vec<ScanResult> {
        self.codes
            .iter()
            .map(|code| ScanResult {
                data: code.data.clone(),
                origin: to_viewport(
                    code.center,
                    (self.width, self.height),
                    (viewport_width, viewport_height),
                ),
            })
            .collect()
    }
}

pub fn to_viewport(point: Point, image: (u32, u32), viewport: (f32, f32)) -> Point {
    let (image_width, image_height) = image;
    if image_width == 0 || image_height == 0 {
        return Point { x: 0.0, y: 0.0 };
    }
    Point {
        x: point.x * viewport.0 / image_width as f32,
        y: point.y * viewport.1 / image_height as f32,
    }
}

pub fn decode_qr_codes(bytes: &[u8]) -> Result<DecodedImage> {
    let luma = image::load_from_memory(bytes)
        .context("Failed to read image")?
        .to_luma8();
    let (width, height) = luma.dimensions();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    let mut codes = Vec::new();
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_, data)) => {
                let (sum_x, sum_y) = grid
                    .bounds
                    .iter()
                    .fold((0i64, 0i64), |(sx, sy), p| (sx + i64::from(p.x), sy + i64::from(p.y)));
                codes.push(DecodedCode {
                    data,
                    center: Point {
                        x: sum_x as f32 / 4.0,
                        y: sum_y as f32 / 4.0,
                    },
                });
            }
            Err(e) => log::warn!("Skipping unreadable QR grid: {:?}", e),
        }
    }

    log::info!(
        "Decoded {} QR code(s) from {}x{} image",
        codes.len(),
        width,
        height
    );
    Ok(DecodedImage {
        width,
        height,
        codes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn blank_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::GrayImage::from_pixel(width, height, image::Luma([255u8]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn blank_image_has_no_codes() {
        let decoded = decode_qr_codes(&blank_png(64, 48)).unwrap();

        assert_eq!(decoded.width, 64);
        assert_eq!(decoded.height, 48);
        assert!(decoded.codes.is_empty());
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(decode_qr_codes(b"definitely not a picture").is_err());
    }

    #[test]
    fn image_center_maps_to_viewport_center() {
        let p = to_viewport(Point { x: 500.0, y: 250.0 }, (1000, 500), (400.0, 800.0));
        assert_eq!(p, Point { x: 200.0, y: 400.0 });
    }

    #[test]
    fn empty_image_maps_to_origin() {
        let p = to_viewport(Point { x: 10.0, y: 10.0 }, (0, 0), (400.0, 800.0));
        assert_eq!(p, Point { x: 0.0, y: 0.0 });
    }

    #[test]
    fn scans_use_viewport_coordinates() {
        let decoded = DecodedImage {
            width: 200,
            height: 100,
            codes: vec![DecodedCode {
                data: "CAN-1".to_string(),
                center: Point { x: 100.0, y: 50.0 },
            }],
        };

        let scans = decoded.scans(600.0, 300.0);

        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].data, "CAN-1");
        assert_eq!(scans[0].origin, Point { x: 300.0, y: 150.0 });
    }
}
