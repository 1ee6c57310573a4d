//! QR code rendering for Solana Pay links.
use std::io::Cursor;

use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};
#[cfg(test)]
use mockall::automock;
use qrcode::QrCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(String),

    #[error("PNG encoding failed: {0}")]
    Image(String),
}

#[cfg_attr(test, automock)]
pub trait QrRendererTrait: Send + Sync {
    /// Renders `payload` as a PNG image.
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, QrError>;
}

/// Black-on-white QR code with white bands on the left and right, so the
/// image fits the wide aspect ratio of chat link previews.
pub struct QrCodePngRenderer {
    horizontal_padding: u32,
}

impl QrCodePngRenderer {
    pub fn new(horizontal_padding: u32) -> Self {
        Self { horizontal_padding }
    }
}

impl QrRendererTrait for QrCodePngRenderer {
    fn render_png(&self, payload: &str) -> Result<Vec<u8>, QrError> {
        let code = QrCode::new(payload.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;
        let symbol = code.render::<Luma<u8>>().quiet_zone(true).build();

        let (width, height) = symbol.dimensions();
        let mut canvas =
            ImageBuffer::from_pixel(width + 2 * self.horizontal_padding, height, Luma([255u8]));
        imageops::overlay(&mut canvas, &symbol, i64::from(self.horizontal_padding), 0);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| QrError::Image(e.to_string()))?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_render_png_adds_horizontal_padding() {
        let renderer = QrCodePngRenderer::new(110);
        let png = renderer
            .render_png("solana:https%3A%2F%2Frelay.example%2Fsign%2FcreateTransferSol%3Famount%3D1")
            .unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        let (width, height) = decoded.dimensions();
        assert_eq!(width, height + 220);
        assert_eq!(decoded.get_pixel(0, 0), &Luma([255u8]));
        assert_eq!(decoded.get_pixel(width - 1, height / 2), &Luma([255u8]));
    }

    #[test]
    fn test_render_png_rejects_oversized_payload() {
        let renderer = QrCodePngRenderer::new(0);
        let payload = "x".repeat(8000);
        assert!(matches!(
            renderer.render_png(&payload),
            Err(QrError::Encode(_))
        ));
    }
}
