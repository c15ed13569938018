//! TrueType loading and PDF font embedding.
//!
//! Fonts are embedded whole as a `Type0`/`CIDFontType2` pair with
//! `Identity-H` encoding, so shown strings are sequences of 2-byte glyph ids.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use ttf_parser::{name_id, Face};

use crate::error::TransformError;

const FALLBACK_FONT_NAME: &str = "EmbeddedFont";
const BFCHAR_CHUNK: usize = 100;

/// Where the stamp font comes from. Read once per stamp.
pub trait FontSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, TransformError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileFontSource {
    path: PathBuf,
}

impl FileFontSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FontSource for FileFontSource {
    fn fetch(&self) -> Result<Vec<u8>, TransformError> {
        std::fs::read(&self.path).map_err(|e| {
            TransformError::Resource(format!("font_read_failed:{}:{e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Font bytes already held in memory (bundled asset, tests).
#[derive(Debug, Clone)]
pub struct StaticFontSource {
    label: String,
    bytes: Arc<[u8]>,
}

impl StaticFontSource {
    pub fn new(label: &str, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            label: label.to_string(),
            bytes: bytes.into(),
        }
    }
}

impl FontSource for StaticFontSource {
    fn fetch(&self) -> Result<Vec<u8>, TransformError> {
        Ok(self.bytes.to_vec())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    pub ch: char,
    pub gid: u16,
    /// Advance in PDF glyph space (1/1000 em).
    pub advance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedText {
    pub glyphs: Vec<ShapedGlyph>,
}

impl ShapedText {
    /// String operand for `Tj` under Identity-H: big-endian glyph ids.
    pub fn code_units(&self) -> Vec<u8> {
        self.glyphs.iter().flat_map(|g| g.gid.to_be_bytes()).collect()
    }
}

/// A parsed TrueType program plus the metrics the PDF font objects need.
#[derive(Debug, Clone)]
pub struct FontProgram {
    data: Vec<u8>,
    postscript_name: String,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    cap_height: i16,
    bbox: [i16; 4],
}

impl FontProgram {
    pub fn parse(data: Vec<u8>) -> Result<Self, TransformError> {
        let face =
            Face::parse(&data, 0).map_err(|e| TransformError::Resource(format!("font_invalid:{e}")))?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(TransformError::Resource("font_invalid:units_per_em".into()));
        }
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .map(|n| sanitize_font_name(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FALLBACK_FONT_NAME.to_string());
        let rect = face.global_bounding_box();
        let ascent = face.ascender();
        let descent = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascent);

        Ok(Self {
            postscript_name,
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox: [rect.x_min, rect.y_min, rect.x_max, rect.y_max],
            data,
        })
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// Map characters to glyphs one-to-one. No shaping: the stamp text is plain Latin.
    pub fn shape(&self, text: &str) -> Result<ShapedText, TransformError> {
        let face = Face::parse(&self.data, 0)
            .map_err(|e| TransformError::Resource(format!("font_invalid:{e}")))?;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let gid = face
                .glyph_index(ch)
                .filter(|g| g.0 != 0)
                .ok_or_else(|| {
                    TransformError::Resource(format!("font_missing_glyph:U+{:04X}", ch as u32))
                })?;
            let advance = face.glyph_hor_advance(gid).unwrap_or(0);
            glyphs.push(ShapedGlyph {
                ch,
                gid: gid.0,
                advance: self.scale(i64::from(advance)),
            });
        }
        Ok(ShapedText { glyphs })
    }

    fn scale(&self, units: i64) -> i64 {
        let upem = i64::from(self.units_per_em);
        (units * 1000 + upem / 2).div_euclid(upem)
    }

    /// Add the font object graph to `doc` and return the `Type0` font id.
    pub fn embed(&self, doc: &mut Document, used: &ShapedText) -> Result<ObjectId, TransformError> {
        let compressed = deflate(&self.data)?;
        let font_file = Stream::new(
            dictionary! {
                "Length1" => self.data.len() as i64,
                "Filter" => "FlateDecode",
            },
            compressed,
        );
        let font_file_id = doc.add_object(font_file);

        let bbox: Vec<Object> = self
            .bbox
            .iter()
            .map(|v| Object::Integer(self.scale(i64::from(*v))))
            .collect();
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(self.postscript_name.as_bytes().to_vec()),
            "Flags" => 32,
            "FontBBox" => bbox,
            "ItalicAngle" => 0,
            "Ascent" => self.scale(i64::from(self.ascent)),
            "Descent" => self.scale(i64::from(self.descent)),
            "CapHeight" => self.scale(i64::from(self.cap_height)),
            "StemV" => 80,
            "FontFile2" => font_file_id,
        });

        let widths: BTreeMap<u16, i64> = used.glyphs.iter().map(|g| (g.gid, g.advance)).collect();
        let mut w_array = Vec::with_capacity(widths.len() * 2);
        for (gid, width) in &widths {
            w_array.push(Object::Integer(i64::from(*gid)));
            w_array.push(Object::Array(vec![Object::Integer(*width)]));
        }

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => Object::Name(self.postscript_name.as_bytes().to_vec()),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0,
            },
            "FontDescriptor" => descriptor_id,
            "W" => w_array,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            to_unicode_cmap(used).into_bytes(),
        ));

        Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => Object::Name(self.postscript_name.as_bytes().to_vec()),
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        }))
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, TransformError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| TransformError::Resource(format!("font_compress_failed:{e}")))
}

fn to_unicode_cmap(used: &ShapedText) -> String {
    let mapping: BTreeMap<u16, char> = used.glyphs.iter().map(|g| (g.gid, g.ch)).collect();
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let entries: Vec<(u16, char)> = mapping.into_iter().collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
        for (gid, ch) in chunk {
            let mut units = [0u16; 2];
            let utf16: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04X}"))
                .collect();
            let _ = writeln!(cmap, "<{gid:04X}> <{utf16}>");
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

fn sanitize_font_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
