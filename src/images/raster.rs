/// Decoded 8-bit RGBA pixels, row-major, 4 bytes per pixel.
#[derive(Clone, Debug)]
pub struct RgbaPixels {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaPixels {
    /// Split into an RGB colour plane and an 8-bit alpha plane.
    pub fn split_planes(&self) -> (Vec<u8>, Vec<u8>) {
        let count = self.pixels.len() / 4;
        let mut rgb = Vec::with_capacity(count * 3);
        let mut alpha = Vec::with_capacity(count);
        for px in self.pixels.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }
        (rgb, alpha)
    }
}

/// Pixel decoder for images whose encoded form cannot be embedded directly
/// (RGBA, palette, sub-8-bit or interlaced PNGs).
pub trait RasterDecoder: Send + Sync {
    fn decode_rgba(&self, bytes: &[u8]) -> Option<RgbaPixels>;
}

/// Decoder backed by the `image` crate's PNG codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngRasterDecoder;

impl RasterDecoder for PngRasterDecoder {
    fn decode_rgba(&self, bytes: &[u8]) -> Option<RgbaPixels> {
        let cursor = std::io::Cursor::new(bytes);
        let reader = image::ImageReader::with_format(
            std::io::BufReader::new(cursor),
            image::ImageFormat::Png,
        );
        match reader.decode() {
            Ok(decoded) => {
                let rgba: image::RgbaImage = decoded.to_rgba8();
                let (width, height) = (rgba.width(), rgba.height());
                Some(RgbaPixels {
                    width,
                    height,
                    pixels: rgba.into_raw(),
                })
            }
            Err(e) => {
                log::warn!("PNG decode failed: {e}");
                None
            }
        }
    }
}
