mod content;
mod drawing;
mod page;
mod paragraph;
mod table;
mod text;

use std::borrow::Cow;

use pdf_writer::{Filter, Name, Pdf, Rect, Ref};

use crate::fonts::StandardFont;
use crate::geometry::Rgb;
use crate::images::{ColorSpace, ImageFilter, ImageTable, PdfImageResource};

pub(crate) use drawing::GraphicsStates;
pub(crate) use page::{PageContext, PageFields, render_page};

/// Fill used where an image or drawing has nothing embeddable.
pub(crate) const PLACEHOLDER_GRAY: Rgb = [0xd9, 0xd9, 0xd9];

/// A finished page: its media box in points and its content stream.
pub(crate) struct PageData {
    pub(crate) width_pt: f32,
    pub(crate) height_pt: f32,
    pub(crate) content: String,
}

fn deflate(data: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec_zlib(data, 6)
}

/// Stream payload and filter for an image: encoded sources pass through,
/// raw samples are deflated only when stream compression is on.
fn image_payload(resource: &PdfImageResource, compress: bool) -> (Cow<'_, [u8]>, Option<Filter>) {
    match resource.filter {
        Some(ImageFilter::DctDecode) => (Cow::Borrowed(&resource.data), Some(Filter::DctDecode)),
        Some(ImageFilter::FlateDecode) => (Cow::Borrowed(&resource.data), Some(Filter::FlateDecode)),
        None if compress => (Cow::Owned(deflate(&resource.data)), Some(Filter::FlateDecode)),
        None => (Cow::Borrowed(&resource.data), None),
    }
}

/// Serialise pages, images, the four standard fonts and any alpha graphics
/// states into a PDF 1.4 file.
///
/// Objects are numbered catalog, page tree, pages, content streams, images,
/// soft masks, fonts, graphics states. Every page shares one resource set.
pub(crate) fn build_pdf_document(
    pages: &[PageData],
    images: &ImageTable,
    gstates: &GraphicsStates,
    compress: bool,
) -> Vec<u8> {
    let mut pdf = Pdf::new();
    pdf.set_version(1, 4);
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
    let image_ids: Vec<Ref> = images.resources().iter().map(|_| alloc()).collect();
    let smask_ids: Vec<Option<Ref>> = images
        .resources()
        .iter()
        .map(|r| r.smask.as_ref().map(|_| alloc()))
        .collect();
    let font_ids: Vec<(StandardFont, Ref)> = StandardFont::ALL.iter().map(|&f| (f, alloc())).collect();
    let gstate_ids: Vec<(String, f32, Ref)> = gstates.entries().map(|(name, alpha)| (name, alpha, alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    for (i, data) in pages.iter().enumerate() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, data.width_pt, data.height_pt))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (font, font_ref) in &font_ids {
                fonts.pair(Name(font.resource_name().as_bytes()), *font_ref);
            }
        }
        if !images.is_empty() {
            let mut xobjects = resources.x_objects();
            for (resource, xobj_ref) in images.resources().iter().zip(&image_ids) {
                xobjects.pair(Name(resource.name.as_bytes()), *xobj_ref);
            }
        }
        if !gstate_ids.is_empty() {
            let mut states = resources.ext_g_states();
            for (name, _, state_ref) in &gstate_ids {
                states.pair(Name(name.as_bytes()), *state_ref);
            }
        }
    }

    for (i, data) in pages.iter().enumerate() {
        if compress {
            pdf.stream(content_ids[i], &deflate(data.content.as_bytes()))
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_ids[i], data.content.as_bytes());
        }
    }

    for (i, resource) in images.resources().iter().enumerate() {
        let (payload, filter) = image_payload(resource, compress);
        let mut xobj = pdf.image_xobject(image_ids[i], &payload);
        if let Some(filter) = filter {
            xobj.filter(filter);
        }
        xobj.width(resource.width as i32);
        xobj.height(resource.height as i32);
        match resource.color_space {
            ColorSpace::DeviceRgb => xobj.color_space().device_rgb(),
            ColorSpace::DeviceGray => xobj.color_space().device_gray(),
            ColorSpace::DeviceCmyk => xobj.color_space().device_cmyk(),
        }
        xobj.bits_per_component(resource.bits_per_component as i32);
        if let Some(parms) = resource.decode_parms {
            xobj.insert(Name(b"DecodeParms"))
                .dict()
                .pair(Name(b"Predictor"), 15)
                .pair(Name(b"Colors"), parms.colors as i32)
                .pair(Name(b"BitsPerComponent"), resource.bits_per_component as i32)
                .pair(Name(b"Columns"), parms.columns as i32);
        }
        if let Some(mask_ref) = smask_ids[i] {
            xobj.s_mask(mask_ref);
        }
        drop(xobj);

        if let (Some(mask), Some(mask_ref)) = (&resource.smask, smask_ids[i]) {
            let payload: Cow<'_, [u8]> = if compress {
                Cow::Owned(deflate(&mask.data))
            } else {
                Cow::Borrowed(&mask.data)
            };
            let mut smask = pdf.image_xobject(mask_ref, &payload);
            if compress {
                smask.filter(Filter::FlateDecode);
            }
            smask.width(mask.width as i32);
            smask.height(mask.height as i32);
            smask.color_space().device_gray();
            smask.bits_per_component(8);
        }
    }

    for (font, font_ref) in &font_ids {
        pdf.type1_font(*font_ref)
            .base_font(Name(font.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (_, alpha, state_ref) in &gstate_ids {
        pdf.ext_graphics(*state_ref)
            .non_stroking_alpha(*alpha)
            .stroking_alpha(*alpha);
    }

    pdf.finish()
}
