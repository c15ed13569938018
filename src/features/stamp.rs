use std::borrow::Cow;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::features::font::FontProgram;

const FONT_RESOURCE_PREFIX: &str = "FSig";
const MAX_TREE_DEPTH: usize = 32;
// US Letter, used when no MediaBox is reachable from the page.
const FALLBACK_PAGE_SIZE: (f64, f64) = (612.0, 792.0);

/// Appearance of the stamp text. Coordinates are PDF user space units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StampSpec {
    pub text: Cow<'static, str>,
    pub font_size: f64,
    /// RGB, each component in 0..=1.
    pub color: [f64; 3],
    /// Distance from the right page edge to the text origin.
    pub offset_right: f64,
    /// Baseline height above the bottom page edge.
    pub offset_bottom: f64,
}

impl StampSpec {
    pub const fn new() -> Self {
        Self {
            text: Cow::Borrowed("Signed PDF"),
            font_size: 24.0,
            color: [0.0, 0.53, 0.71],
            offset_right: 140.0,
            offset_bottom: 30.0,
        }
    }
}

impl Default for StampSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// Burn `spec.text` onto the first page of `pdf`, returning a new file.
///
/// The input is never modified. Output is byte-for-byte reproducible for the
/// same inputs, and stamping an already stamped file adds a second text object.
pub fn apply_stamp(
    pdf: &[u8],
    font_data: Vec<u8>,
    spec: &StampSpec,
) -> Result<Vec<u8>, TransformError> {
    let mut doc =
        Document::load_mem(pdf).map_err(|e| TransformError::Parse(format!("load:{e}")))?;
    let page_id = doc
        .get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| TransformError::Parse("no_pages".into()))?;

    let program = FontProgram::parse(font_data)?;
    let shaped = program.shape(&spec.text)?;
    let (page_width, _) = page_dimensions(&doc, page_id)?;
    let x = page_width - spec.offset_right;
    let y = spec.offset_bottom;

    let font_id = program.embed(&mut doc, &shaped)?;
    let font_name = register_font(&mut doc, page_id, font_id)?;

    let [r, g, b] = spec.color;
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font_name), spec.font_size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(shaped.code_units(), StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| TransformError::Write(format!("content_encode:{e}")))?;
    append_isolated_content(&mut doc, page_id, encoded)?;

    log::debug!(
        "stamped page {:?} at ({x}, {y}) with {} glyphs of {}",
        page_id,
        shaped.glyphs.len(),
        program.postscript_name()
    );

    let mut out = Vec::with_capacity(pdf.len() + 4096);
    doc.save_to(&mut out)
        .map_err(|e| TransformError::Write(format!("save:{e}")))?;
    Ok(out)
}

/// Add `font_id` to the page's font resources under a fresh name.
///
/// Resources are copied onto the page itself, so shared or inherited
/// dictionaries of other pages stay untouched.
fn register_font(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<Vec<u8>, TransformError> {
    let mut resources = effective_resources(doc, page_id)?;
    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc
            .get_object(*id)
            .and_then(Object::as_dict)
            .map(|d| d.clone())
            .map_err(|_| TransformError::Parse("font_resources_invalid".into()))?,
        Ok(_) => return Err(TransformError::Parse("font_resources_invalid".into())),
        Err(_) => Dictionary::new(),
    };

    let name = unused_resource_name(&fonts);
    fonts.set(name.clone(), font_id);
    resources.set("Font", fonts);

    page_dict_mut(doc, page_id)?.set("Resources", resources);
    Ok(name)
}

fn unused_resource_name(fonts: &Dictionary) -> Vec<u8> {
    let mut index = 0usize;
    loop {
        let candidate = if index == 0 {
            FONT_RESOURCE_PREFIX.to_string()
        } else {
            format!("{FONT_RESOURCE_PREFIX}{index}")
        };
        if !fonts.has(candidate.as_bytes()) {
            return candidate.into_bytes();
        }
        index += 1;
    }
}

/// The page's own Resources or the nearest inherited ones, resolved and cloned.
fn effective_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary, TransformError> {
    let mut current = Some(page_id);
    let mut depth = 0;
    while let Some(id) = current {
        if depth > MAX_TREE_DEPTH {
            return Err(TransformError::Parse("page_tree_too_deep".into()));
        }
        let dict = doc
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|_| TransformError::Parse("page_missing_dict".into()))?;
        match dict.get(b"Resources") {
            Ok(Object::Dictionary(res)) => return Ok(res.clone()),
            Ok(Object::Reference(res_id)) => {
                return doc
                    .get_object(*res_id)
                    .and_then(Object::as_dict)
                    .map(|d| d.clone())
                    .map_err(|_| TransformError::Parse("resources_invalid".into()));
            }
            _ => {}
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
    Ok(Dictionary::new())
}

/// Wrap the existing page content in `q … Q` and append `content` after it.
fn append_isolated_content(
    doc: &mut Document,
    page_id: ObjectId,
    content: Vec<u8>,
) -> Result<(), TransformError> {
    let existing = page_dict_mut(doc, page_id)?.get(b"Contents").ok().cloned();
    let mut streams: Vec<Object> = match existing {
        Some(Object::Reference(id)) => match doc.get_object(id) {
            Ok(Object::Array(items)) => items.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(items)) => items,
        _ => Vec::new(),
    };

    if !streams.is_empty() {
        // Streams are concatenated when read, and the last operator of the
        // existing content may not be followed by whitespace.
        let open = doc.add_object(Stream::new(dictionary! {}, b"q\n".to_vec()));
        let close = doc.add_object(Stream::new(dictionary! {}, b"\nQ\n".to_vec()));
        streams.insert(0, Object::Reference(open));
        streams.push(Object::Reference(close));
    }
    let stamp_id = doc.add_object(Stream::new(dictionary! {}, content));
    streams.push(Object::Reference(stamp_id));

    page_dict_mut(doc, page_id)?.set("Contents", streams);
    Ok(())
}

fn page_dict_mut(doc: &mut Document, page_id: ObjectId) -> Result<&mut Dictionary, TransformError> {
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|_| TransformError::Parse("page_missing_dict".into()))
}

/// Width and height of the page's MediaBox, following the page tree upwards.
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f64, f64), TransformError> {
    let mut current = Some(page_id);
    let mut depth = 0;
    while let Some(id) = current {
        if depth > MAX_TREE_DEPTH {
            break;
        }
        let dict = doc
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|_| TransformError::Parse("page_missing_dict".into()))?;
        if let Some((w, h)) = extract_media_box(doc, dict) {
            return Ok((w, h));
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }
    Ok(FALLBACK_PAGE_SIZE)
}

fn extract_media_box(doc: &Document, dict: &Dictionary) -> Option<(f64, f64)> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let llx = obj_to_f64(&arr[0])?;
    let lly = obj_to_f64(&arr[1])?;
    let urx = obj_to_f64(&arr[2])?;
    let ury = obj_to_f64(&arr[3])?;
    Some(((urx - llx).abs(), (ury - lly).abs()))
}

pub(crate) fn obj_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some((*f).into()),
        _ => None,
    }
}
