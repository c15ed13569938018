//! Deterministic inputs for tests and benches: small PDFs and a minimal
//! TrueType program covering printable ASCII.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const FONT_UNITS_PER_EM: u16 = 1000;
const FONT_ADVANCE: u16 = 600;
const FIRST_CHAR: u16 = 0x20;
const LAST_CHAR: u16 = 0x7E;

/// PDF with `pages` US-Letter pages. MediaBox and Resources live on the page
/// tree root, so pages inherit them.
pub fn sample_pdf(pages: usize) -> Vec<u8> {
    build_pdf(pages, [0, 0, 612, 792], false)
}

/// Single page carrying its own MediaBox and Resources.
pub fn sized_pdf(media_box: [i64; 4]) -> Vec<u8> {
    build_pdf(1, media_box, true)
}

fn build_pdf(pages: usize, media_box: [i64; 4], box_on_page: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let media: Vec<Object> = media_box.iter().map(|v| Object::Integer(*v)).collect();

    let mut kids = Vec::with_capacity(pages);
    for index in 0..pages {
        // Leave the graphics state dirty on purpose: the stamp must not inherit it.
        let content = Content {
            operations: vec![
                Operation::new("rg", vec![1.into(), 0.into(), 0.into()]),
                Operation::new(
                    "re",
                    vec![72.into(), 72.into(), (100 + index as i64).into(), 50.into()],
                ),
                Operation::new("f", vec![]),
                Operation::new("cm", vec![2.into(), 0.into(), 0.into(), 2.into(), 0.into(), 0.into()]),
            ],
        };
        let bytes = content.encode().expect("fixture content encodes");
        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if box_on_page {
            page.set("MediaBox", media.clone());
            page.set("Resources", dictionary! {});
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut tree = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    if !box_on_page {
        tree.set("MediaBox", media);
        tree.set("Resources", dictionary! {});
    }
    doc.objects.insert(pages_id, Object::Dictionary(tree));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("fixture pdf saves");
    out
}

/// TrueType program with `cmap`, `head`, `hhea`, `hmtx` and `maxp` only.
/// U+0020..U+007E map to glyphs 1..95, every glyph is 600 units wide.
pub fn sample_font() -> Vec<u8> {
    let num_glyphs = LAST_CHAR - FIRST_CHAR + 2;

    let mut head = Vec::with_capacity(54);
    put32(&mut head, 0x0001_0000);
    put32(&mut head, 0x0001_0000);
    put32(&mut head, 0);
    put32(&mut head, 0x5F0F_3CF5);
    put16(&mut head, 0x000B);
    put16(&mut head, FONT_UNITS_PER_EM);
    head.extend_from_slice(&[0u8; 16]);
    for v in [0i16, -200, 600, 800] {
        put16(&mut head, v as u16);
    }
    put16(&mut head, 0); // macStyle
    put16(&mut head, 8); // lowestRecPPEM
    put16(&mut head, 2); // fontDirectionHint
    put16(&mut head, 0); // indexToLocFormat
    put16(&mut head, 0); // glyphDataFormat

    let mut hhea = Vec::with_capacity(36);
    put32(&mut hhea, 0x0001_0000);
    for v in [800i16, -200, 0] {
        put16(&mut hhea, v as u16);
    }
    put16(&mut hhea, FONT_ADVANCE);
    for v in [0i16, 0, 600, 1, 0, 0, 0, 0, 0, 0, 0] {
        put16(&mut hhea, v as u16);
    }
    put16(&mut hhea, num_glyphs);

    let mut maxp = Vec::with_capacity(6);
    put32(&mut maxp, 0x0000_5000);
    put16(&mut maxp, num_glyphs);

    let mut hmtx = Vec::with_capacity(num_glyphs as usize * 4);
    for _ in 0..num_glyphs {
        put16(&mut hmtx, FONT_ADVANCE);
        put16(&mut hmtx, 0);
    }

    let mut cmap = Vec::new();
    put16(&mut cmap, 0);
    put16(&mut cmap, 1);
    put16(&mut cmap, 3);
    put16(&mut cmap, 1);
    put32(&mut cmap, 12);
    // format 4, two segments: printable ASCII and the 0xFFFF terminator
    for v in [4u16, 32, 0, 4, 4, 1, 0] {
        put16(&mut cmap, v);
    }
    for v in [LAST_CHAR, 0xFFFF, 0, FIRST_CHAR, 0xFFFF] {
        put16(&mut cmap, v);
    }
    put16(&mut cmap, (1i16 - FIRST_CHAR as i16) as u16);
    put16(&mut cmap, 1);
    put16(&mut cmap, 0);
    put16(&mut cmap, 0);

    assemble_sfnt(&[
        (*b"cmap", cmap),
        (*b"head", head),
        (*b"hhea", hhea),
        (*b"hmtx", hmtx),
        (*b"maxp", maxp),
    ])
}

/// Tables must be passed sorted by tag.
fn assemble_sfnt(tables: &[([u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let mut pow2 = 1u16;
    let mut selector = 0u16;
    while pow2 * 2 <= num_tables {
        pow2 *= 2;
        selector += 1;
    }

    let mut out = Vec::new();
    put32(&mut out, 0x0001_0000);
    put16(&mut out, num_tables);
    put16(&mut out, pow2 * 16);
    put16(&mut out, selector);
    put16(&mut out, num_tables * 16 - pow2 * 16);

    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in tables {
        out.extend_from_slice(tag);
        put32(&mut out, checksum(data));
        put32(&mut out, offset as u32);
        put32(&mut out, data.len() as u32);
        offset += padded(data.len());
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
        out.resize(out.len() + padded(data.len()) - data.len(), 0);
    }
    out
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |acc, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        acc.wrapping_add(u32::from_be_bytes(word))
    })
}

fn put16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn put32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}
