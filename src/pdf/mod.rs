mod fit;
mod layout;
mod table;

use image::{ExtendedColorType, ImageDecoder};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::assets::BrandImages;
use crate::error::Error;
use crate::fonts::register_fonts;
use crate::model::{Document, EmbeddedImage, ImageFormat};
use crate::options::{Placement, RenderOptions};

pub use fit::Fit;

const LOGO_NAME: &str = "Im1";
const FOOTER_NAME: &str = "Im2";

fn image_error(e: image::ImageError) -> Error {
    Error::Image(e.to_string())
}

/// Colour model stored in the JPEG header, before any decoder conversion.
/// DCT data is passed through as is, so only gray and RGB/YCbCr are accepted.
fn jpeg_is_gray(data: &[u8]) -> Result<bool, Error> {
    let decoder = image::codecs::jpeg::JpegDecoder::new(std::io::Cursor::new(data))
        .map_err(image_error)?;
    match decoder.original_color_type() {
        ExtendedColorType::L8 => Ok(true),
        ExtendedColorType::Rgb8 => Ok(false),
        other => Err(Error::Image(format!(
            "unsupported JPEG colour model {other:?}; save the image as RGB or grayscale"
        ))),
    }
}

/// Write `img` as an image XObject. PNG pixels are re-encoded as Flate RGB
/// with a separate soft mask when any pixel is translucent; JPEG data is
/// passed through untouched.
fn embed_image(
    img: &EmbeddedImage,
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<Ref, Error> {
    let xobj_ref = alloc();

    match img.format {
        ImageFormat::Jpeg => {
            let gray = jpeg_is_gray(&img.data)?;
            let mut xobj = pdf.image_xobject(xobj_ref, &img.data);
            xobj.filter(Filter::DctDecode);
            xobj.width(img.pixel_width as i32);
            xobj.height(img.pixel_height as i32);
            if gray {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        ImageFormat::Png => {
            let cursor = std::io::Cursor::new(&img.data);
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(cursor),
                image::ImageFormat::Png,
            );
            let rgba: image::RgbaImage = reader.decode().map_err(image_error)?.to_rgba8();
            let (w, h) = (rgba.width(), rgba.height());
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let rgb_data: Vec<u8> = rgba
                .pixels()
                .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                .collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w as i32);
                mask.height(h as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }

    Ok(xobj_ref)
}

/// Stretch the named image XObject over `placement`.
fn draw_image(content: &mut Content, name: &str, placement: &Placement) {
    content.save_state();
    content.transform([
        placement.width,
        0.0,
        0.0,
        placement.height,
        placement.x,
        placement.y,
    ]);
    content.x_object(Name(name.as_bytes()));
    content.restore_state();
}

/// Logo and footer banner sit at fixed page positions and never scale with the body.
fn render_header_footer(content: &mut Content, options: &RenderOptions) {
    let geometry = &options.geometry;
    draw_image(content, LOGO_NAME, &geometry.logo);
    draw_image(content, FOOTER_NAME, &geometry.footer);
}

/// Render the composed certificate onto exactly one page.
pub(crate) fn render(
    doc: &Document,
    images: &BrandImages,
    title: &str,
    options: &RenderOptions,
) -> Result<(Vec<u8>, Fit), Error> {
    let t0 = std::time::Instant::now();
    let geometry = &options.geometry;

    // Fit first: an overflow under the fail policy aborts before any output exists.
    let body = fit::layout_body(doc, geometry.frame_width());
    let fit = fit::fit_scale(
        body.width,
        body.height,
        geometry.frame_width(),
        geometry.frame_height(),
        options.min_scale,
        options.overflow,
    )?;
    let t_layout = t0.elapsed();

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let info_id = alloc();

    let fonts = register_fonts(&mut pdf, &mut alloc);
    let t_fonts = t0.elapsed();

    let logo_ref = embed_image(&images.logo, &mut pdf, &mut alloc)?;
    let footer_ref = embed_image(&images.footer, &mut pdf, &mut alloc)?;
    let t_images = t0.elapsed();

    let mut content = Content::new();
    fit::render_body(&mut content, doc, &body, geometry, fit);
    render_header_footer(&mut content, options);
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr(concat!("coa-pdf ", env!("CARGO_PKG_VERSION"))));

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, geometry.page_width, geometry.page_height))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = page.resources();
        {
            let mut font_dict = resources.fonts();
            for (font, font_ref) in &fonts {
                font_dict.pair(Name(font.pdf_name().as_bytes()), *font_ref);
            }
        }
        let mut xobjects = resources.x_objects();
        xobjects.pair(Name(LOGO_NAME.as_bytes()), logo_ref);
        xobjects.pair(Name(FOOTER_NAME.as_bytes()), footer_ref);
    }
    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: layout={:.1}ms, font_embed={:.1}ms, images={:.1}ms, assembly={:.1}ms",
        t_layout.as_secs_f64() * 1000.0,
        (t_fonts - t_layout).as_secs_f64() * 1000.0,
        (t_images - t_fonts).as_secs_f64() * 1000.0,
        (t_assembly - t_images).as_secs_f64() * 1000.0,
    );
    log::info!(
        "Body {:.1}x{:.1}pt in {:.1}x{:.1}pt frame, scale {:.3}{}",
        body.width,
        body.height,
        geometry.frame_width(),
        geometry.frame_height(),
        fit.scale,
        if fit.clipped { " (clipped)" } else { "" }
    );

    Ok((pdf.finish(), fit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    fn embedded_jpeg(img: image::DynamicImage) -> Vec<u8> {
        let (w, h) = (img.width(), img.height());
        let image = EmbeddedImage {
            data: jpeg_bytes(img),
            format: ImageFormat::Jpeg,
            pixel_width: w,
            pixel_height: h,
        };
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };
        embed_image(&image, &mut pdf, &mut alloc).unwrap();
        pdf.finish()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn gray_jpeg_keeps_gray_colour_space() {
        let img =
            image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(8, 8, image::Luma([90])));
        let bytes = embedded_jpeg(img);
        assert!(contains(&bytes, b"/DCTDecode"));
        assert!(contains(&bytes, b"/DeviceGray"));
        assert!(!contains(&bytes, b"/DeviceRGB"));
    }

    #[test]
    fn colour_jpeg_is_rgb() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            8,
            image::Rgb([200, 30, 40]),
        ));
        let bytes = embedded_jpeg(img);
        assert!(contains(&bytes, b"/DeviceRGB"));
    }

    #[test]
    fn header_colour_model_is_read_without_full_decode() {
        let gray =
            image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(4, 4, image::Luma([10])));
        let rgb =
            image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3])));
        assert!(jpeg_is_gray(&jpeg_bytes(gray)).unwrap());
        assert!(!jpeg_is_gray(&jpeg_bytes(rgb)).unwrap());
    }

    #[test]
    fn truncated_jpeg_is_an_image_error() {
        let err = jpeg_is_gray(&[0xFF, 0xD8, 0xFF]).unwrap_err();
        assert!(matches!(err, Error::Image(_)), "got {err:?}");
    }
}
