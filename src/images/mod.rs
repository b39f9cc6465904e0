//! Conversion of document images into PDF image XObject payloads.

mod data_url;
mod jpeg;
mod png;
mod raster;

use std::collections::HashMap;

pub use raster::{PngRasterDecoder, RasterDecoder, RgbaPixels};

use crate::model::{Block, DrawingBlock, ImageBlock, ParagraphBlock, Run};

use data_url::decode_data_url;
use jpeg::read_jpeg_info;
use png::read_png_info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRgb,
    DeviceGray,
    DeviceCmyk,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFilter {
    DctDecode,
    FlateDecode,
}

/// `/DecodeParms` for a Flate stream carrying raw PNG scanlines
/// (Predictor 15, 8 bits per component).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PngPredictor {
    pub colors: u8,
    pub columns: u32,
}

/// 8-bit DeviceGray alpha plane paired with an image.
#[derive(Clone, Debug)]
pub struct SoftMask {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
pub struct PdfImageResource {
    /// XObject resource name (`Im1`, `Im2`, ...).
    pub name: String,
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    /// `None` means `data` holds raw, unfiltered samples.
    pub filter: Option<ImageFilter>,
    pub decode_parms: Option<PngPredictor>,
    pub smask: Option<SoftMask>,
}

/// Which document element an image resource was built for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// Image block, or drawing block of kind `image`.
    Block(String),
    /// Inline image run inside a paragraph (or a list item's paragraph).
    Run {
        block_id: String,
        item_id: Option<String>,
        run_index: usize,
    },
}

/// Image resources resolved for one render, in resource-name order.
#[derive(Clone, Debug, Default)]
pub struct ImageTable {
    resources: Vec<PdfImageResource>,
    by_key: HashMap<ImageKey, usize>,
}

impl ImageTable {
    pub fn get(&self, key: &ImageKey) -> Option<&PdfImageResource> {
        self.by_key.get(key).map(|&i| &self.resources[i])
    }

    pub fn for_block(&self, block_id: &str) -> Option<&PdfImageResource> {
        self.get(&ImageKey::Block(block_id.to_string()))
    }

    pub fn resources(&self) -> &[PdfImageResource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn push(&mut self, key: ImageKey, resource: PdfImageResource) {
        self.by_key.insert(key, self.resources.len());
        self.resources.push(resource);
    }

    fn next_name(&self) -> String {
        format!("Im{}", self.resources.len() + 1)
    }
}

/// Build an embeddable resource for an image block.
///
/// JPEGs are embedded untouched under DCTDecode; 8-bit non-interlaced RGB or
/// gray PNGs hand their IDAT stream to FlateDecode with PNG predictors.
/// Every other PNG goes through `decoder` and comes back as a raw RGB plane
/// plus a soft mask. Unsupported sources yield `None`.
pub fn build_image_resource(
    block: &ImageBlock,
    name: String,
    decoder: Option<&dyn RasterDecoder>,
) -> Option<PdfImageResource> {
    let src = block.src.as_deref()?;
    let Some(url) = decode_data_url(src) else {
        log::warn!("Image {}: source is not a base64 data URL; omitted", block.id);
        return None;
    };
    match url.mime.as_str() {
        "image/jpeg" | "image/jpg" => {
            let Some(info) = read_jpeg_info(&url.bytes) else {
                log::warn!("Image {}: no JPEG frame header found; omitted", block.id);
                return None;
            };
            let color_space = match info.components {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCmyk,
                _ => ColorSpace::DeviceRgb,
            };
            log::debug!("Image {} -> {name}: DCT passthrough {}x{}", block.id, info.width, info.height);
            Some(PdfImageResource {
                name,
                data: url.bytes,
                width: info.width,
                height: info.height,
                color_space,
                bits_per_component: 8,
                filter: Some(ImageFilter::DctDecode),
                decode_parms: None,
                smask: None,
            })
        }
        "image/png" => {
            let Some(info) = read_png_info(&url.bytes) else {
                log::warn!("Image {}: malformed PNG; omitted", block.id);
                return None;
            };
            if let Some(colors) = info.passthrough_colors() {
                log::debug!("Image {} -> {name}: Flate passthrough {}x{}", block.id, info.width, info.height);
                return Some(PdfImageResource {
                    name,
                    width: info.width,
                    height: info.height,
                    color_space: if colors == 3 {
                        ColorSpace::DeviceRgb
                    } else {
                        ColorSpace::DeviceGray
                    },
                    bits_per_component: 8,
                    filter: Some(ImageFilter::FlateDecode),
                    decode_parms: Some(PngPredictor {
                        colors,
                        columns: info.width,
                    }),
                    smask: None,
                    data: info.idat,
                });
            }
            let Some(decoder) = decoder else {
                log::warn!("Image {}: PNG needs pixel decoding but raster fallback is disabled; omitted", block.id);
                return None;
            };
            let decoded = decoder.decode_rgba(&url.bytes)?;
            log::debug!("Image {} -> {name}: raster fallback {}x{}", block.id, decoded.width, decoded.height);
            let (rgb, alpha) = decoded.split_planes();
            Some(PdfImageResource {
                name,
                data: rgb,
                width: decoded.width,
                height: decoded.height,
                color_space: ColorSpace::DeviceRgb,
                bits_per_component: 8,
                filter: None,
                decode_parms: None,
                smask: Some(SoftMask {
                    data: alpha,
                    width: decoded.width,
                    height: decoded.height,
                }),
            })
        }
        other => {
            log::warn!("Image {}: unsupported MIME type {other:?}; omitted", block.id);
            None
        }
    }
}

fn collect_run_images(
    table: &mut ImageTable,
    paragraph: &ParagraphBlock,
    block_id: &str,
    item_id: Option<&str>,
    decoder: Option<&dyn RasterDecoder>,
) {
    for (run_index, run) in paragraph.runs.iter().enumerate() {
        let Run::Image(img) = run else { continue };
        let synthetic = ImageBlock {
            id: format!("{block_id}:run{run_index}"),
            src: img.src.clone(),
            width: Some(img.width),
            height: Some(img.height),
            alt: None,
        };
        if let Some(resource) = build_image_resource(&synthetic, table.next_name(), decoder) {
            let key = ImageKey::Run {
                block_id: block_id.to_string(),
                item_id: item_id.map(str::to_string),
                run_index,
            };
            table.push(key, resource);
        }
    }
}

/// Resolve every image in the document, naming resources in block order.
pub(crate) fn collect_images(blocks: &[Block], decoder: Option<&dyn RasterDecoder>) -> ImageTable {
    let mut table = ImageTable::default();
    for block in blocks {
        match block {
            Block::Image(img) => {
                if let Some(resource) = build_image_resource(img, table.next_name(), decoder) {
                    table.push(ImageKey::Block(img.id.clone()), resource);
                }
            }
            Block::Drawing(DrawingBlock::Image(drawing)) => {
                let synthetic = drawing.as_image_block();
                if let Some(resource) = build_image_resource(&synthetic, table.next_name(), decoder) {
                    table.push(ImageKey::Block(drawing.id.clone()), resource);
                }
            }
            Block::Paragraph(para) => {
                collect_run_images(&mut table, para, &para.id, None, decoder);
            }
            Block::List(list) => {
                for item in &list.items {
                    collect_run_images(&mut table, &item.paragraph, &list.id, Some(&item.id), decoder);
                }
            }
            Block::Drawing(_) | Block::Table(_) => {}
        }
    }
    table
}
