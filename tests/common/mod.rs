#![allow(dead_code)]

use std::path::Path;

use coa_pdf::{Assets, FOOTER_FILE, LOGO_FILE};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object};
use tempfile::TempDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Logo with a transparent border so the soft-mask path is exercised.
fn write_logo(path: &Path) {
    let img = image::RgbaImage::from_fn(60, 30, |x, y| {
        if x < 2 || y < 2 || x >= 58 || y >= 28 {
            image::Rgba([0, 0, 0, 0])
        } else {
            image::Rgba([30, 110, 50, 255])
        }
    });
    img.save(path).expect("write logo fixture");
}

fn write_footer(path: &Path) {
    image::RgbImage::from_pixel(200, 32, image::Rgb([200, 220, 200]))
        .save(path)
        .expect("write footer fixture");
}

/// Temporary asset directory holding a generated logo and footer banner.
/// Keep the `TempDir` alive for as long as the assets are used.
pub fn brand_assets() -> (TempDir, Assets) {
    let dir = tempfile::tempdir().expect("create temp dir");
    write_logo(&dir.path().join(LOGO_FILE));
    write_footer(&dir.path().join(FOOTER_FILE));
    let assets = Assets::from_dir(dir.path());
    (dir, assets)
}

pub fn load(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("output parses as PDF")
}

pub fn page_count(bytes: &[u8]) -> usize {
    load(bytes).get_pages().len()
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(f) => *f as f32,
        other => panic!("expected a number, got {other:?}"),
    }
}

fn first_page(doc: &Document) -> &Dictionary {
    let (_, page_id) = doc.get_pages().into_iter().next().expect("at least one page");
    doc.get_object(page_id)
        .and_then(Object::as_dict)
        .expect("page dictionary")
}

/// Width and height of the first page's media box.
pub fn media_box(bytes: &[u8]) -> (f32, f32) {
    let doc = load(bytes);
    let page = first_page(&doc);
    let rect = page
        .get(b"MediaBox")
        .and_then(Object::as_array)
        .expect("media box");
    let v: Vec<f32> = rect.iter().map(number).collect();
    (v[2] - v[0], v[3] - v[1])
}

/// Names of the image XObjects registered on the first page.
pub fn xobject_names(bytes: &[u8]) -> Vec<String> {
    let doc = load(bytes);
    let page = first_page(&doc);
    let resources = page
        .get(b"Resources")
        .and_then(Object::as_dict)
        .expect("inline resources");
    let xobjects = resources
        .get(b"XObject")
        .and_then(Object::as_dict)
        .expect("XObject dictionary");
    xobjects
        .iter()
        .map(|(name, _)| String::from_utf8_lossy(name).into_owned())
        .collect()
}

/// Decompressed content stream of the first page.
pub fn page_content(bytes: &[u8]) -> Vec<u8> {
    let doc = load(bytes);
    let (_, page_id) = doc.get_pages().into_iter().next().expect("at least one page");
    doc.get_page_content(page_id).expect("page content")
}

/// True when `text` is drawn as a single string operand somewhere on the page.
pub fn shows(bytes: &[u8], text: &str) -> bool {
    let needle = format!("({text})");
    let content = page_content(bytes);
    content
        .windows(needle.len())
        .any(|w| w == needle.as_bytes())
}

/// Operands of the first `cm` operator in the page content: the body transform.
pub fn first_transform(bytes: &[u8]) -> [f32; 6] {
    let content = Content::decode(&page_content(bytes)).expect("decodable content stream");
    let op = content
        .operations
        .iter()
        .find(|op| op.operator == "cm")
        .expect("a cm operator");
    let v: Vec<f32> = op.operands.iter().map(number).collect();
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}
