const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub(crate) const COLOR_TYPE_GRAYSCALE: u8 = 0;
pub(crate) const COLOR_TYPE_TRUECOLOR: u8 = 2;

/// IHDR fields plus the concatenated IDAT payload (still zlib-compressed).
#[derive(Clone, Debug)]
pub(crate) struct PngInfo {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: u8,
    pub(crate) interlaced: bool,
    pub(crate) idat: Vec<u8>,
}

impl PngInfo {
    /// Components per pixel when the IDAT stream can be handed to a PDF
    /// Flate filter with PNG predictors as-is: 8-bit, non-interlaced
    /// truecolor or grayscale.
    pub(crate) fn passthrough_colors(&self) -> Option<u8> {
        if self.bit_depth != 8 || self.interlaced {
            return None;
        }
        match self.color_type {
            COLOR_TYPE_TRUECOLOR => Some(3),
            COLOR_TYPE_GRAYSCALE => Some(1),
            _ => None,
        }
    }
}

/// Walk `length + type + data + crc` chunks. CRCs are not verified.
pub(crate) fn read_png_info(data: &[u8]) -> Option<PngInfo> {
    if data.len() < 8 || data[..8] != PNG_SIGNATURE {
        return None;
    }
    let mut header: Option<(u32, u32, u8, u8, bool)> = None;
    let mut idat = Vec::new();
    let mut pos = 8usize;
    while pos + 8 <= data.len() {
        let len = u32::from_be_bytes(data[pos..pos + 4].try_into().ok()?) as usize;
        let kind = &data[pos + 4..pos + 8];
        let body_start = pos + 8;
        let body = data.get(body_start..body_start.checked_add(len)?)?;
        match kind {
            b"IHDR" => {
                if body.len() < 13 {
                    return None;
                }
                let width = u32::from_be_bytes(body[0..4].try_into().ok()?);
                let height = u32::from_be_bytes(body[4..8].try_into().ok()?);
                header = Some((width, height, body[8], body[9], body[12] != 0));
            }
            b"IDAT" => idat.extend_from_slice(body),
            b"IEND" => break,
            _ => {}
        }
        pos = body_start + len + 4;
    }
    let (width, height, bit_depth, color_type, interlaced) = header?;
    if width == 0 || height == 0 || idat.is_empty() {
        return None;
    }
    Some(PngInfo {
        width,
        height,
        bit_depth,
        color_type,
        interlaced,
        idat,
    })
}
