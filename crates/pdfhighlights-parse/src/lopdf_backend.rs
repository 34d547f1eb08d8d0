//! lopdf-based implementation of [`PdfBackend`].

use pdfhighlights_core::{ExtractOptions, PdfError, RawAnnotation, Rgb};

use crate::backend::PdfBackend;
use crate::encoding::decode_text_string;
use crate::error::BackendError;
use crate::handler::TextHandler;
use crate::interpreter::{GraphicsState, interpret_content};
use crate::text_state::TextState;

/// A parsed document with its page order resolved.
pub struct LopdfDocument {
    inner: lopdf::Document,
    /// Page object ids, 0-based page order.
    page_ids: Vec<lopdf::ObjectId>,
}

impl LopdfDocument {
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LopdfPage {
    pub object_id: lopdf::ObjectId,
    /// 0-based page index.
    pub index: usize,
}

/// The default backend.
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<LopdfDocument, BackendError> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }

        // get_pages is keyed by 1-based page number.
        let page_ids = inner.get_pages().into_values().collect();
        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &LopdfDocument) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &LopdfDocument, index: usize) -> Result<LopdfPage, BackendError> {
        let object_id = doc.page_ids.get(index).copied().ok_or_else(|| {
            BackendError::Parse(format!(
                "page index {index} out of range (0..{})",
                doc.page_ids.len()
            ))
        })?;
        Ok(LopdfPage { object_id, index })
    }

    fn page_annotations(
        doc: &LopdfDocument,
        page: &LopdfPage,
    ) -> Result<Vec<RawAnnotation>, BackendError> {
        read_annotations(&doc.inner, page.object_id)
    }

    fn page_text_runs(
        doc: &LopdfDocument,
        page: &LopdfPage,
        handler: &mut dyn TextHandler,
        options: &ExtractOptions,
    ) -> Result<(), BackendError> {
        let inner = &doc.inner;
        let page_dict = page_dict(inner, page.object_id)?;
        let content = page_content_bytes(inner, page_dict)?;
        let resources = page_resources(inner, page.object_id)?;

        interpret_content(
            inner,
            &content,
            resources,
            handler,
            options,
            0,
            &mut GraphicsState::new(),
            &mut TextState::new(),
        )
    }
}

pub(crate) fn object_to_f64(obj: &lopdf::Object) -> Result<f64, BackendError> {
    match obj {
        lopdf::Object::Integer(i) => Ok(*i as f64),
        lopdf::Object::Real(r) => Ok(f64::from(*r)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Follow an indirect reference; anything else is returned as is.
pub(crate) fn resolve_ref<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> &'a lopdf::Object {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Stream content with its filters applied.
pub(crate) fn decode_stream(stream: &lopdf::Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("stream decompression failed: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

fn page_dict(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> Result<&lopdf::Dictionary, BackendError> {
    doc.get_object(page_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))
}

/// Look up `key` on the page, then up the `/Parent` chain.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: lopdf::ObjectId,
    key: &[u8],
) -> Result<Option<&'a lopdf::Object>, BackendError> {
    let mut current = page_id;
    // Bounded walk: a /Parent cycle must not hang.
    for _ in 0..64 {
        let dict = page_dict(doc, current)?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent") {
            Ok(parent) => {
                current = parent
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Ok(None)
}

/// `/Contents` as one byte buffer; arrays are joined with a space.
fn page_content_bytes(
    doc: &lopdf::Document,
    page_dict: &lopdf::Dictionary,
) -> Result<Vec<u8>, BackendError> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    let streams: Vec<&lopdf::Object> = match resolve_ref(doc, contents) {
        lopdf::Object::Array(items) => items.iter().map(|o| resolve_ref(doc, o)).collect(),
        single => vec![single],
    };

    let mut content = Vec::new();
    for obj in streams {
        let stream = obj
            .as_stream()
            .map_err(|e| BackendError::Parse(format!("/Contents entry is not a stream: {e}")))?;
        if !content.is_empty() {
            content.push(b' ');
        }
        content.extend_from_slice(&decode_stream(stream)?);
    }
    Ok(content)
}

fn page_resources(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<&lopdf::Dictionary, BackendError> {
    static EMPTY_DICT: std::sync::LazyLock<lopdf::Dictionary> =
        std::sync::LazyLock::new(lopdf::Dictionary::new);

    match resolve_inherited(doc, page_id, b"Resources")? {
        Some(obj) => resolve_ref(doc, obj)
            .as_dict()
            .map_err(|_| BackendError::Parse("/Resources is not a dictionary".to_string())),
        None => Ok(&EMPTY_DICT),
    }
}

fn read_annotations(
    doc: &lopdf::Document,
    page_id: lopdf::ObjectId,
) -> Result<Vec<RawAnnotation>, BackendError> {
    let Ok(annots) = page_dict(doc, page_id)?.get(b"Annots") else {
        return Ok(Vec::new());
    };
    let annots = resolve_ref(doc, annots)
        .as_array()
        .map_err(|e| BackendError::Parse(format!("/Annots is not an array: {e}")))?;

    Ok(annots
        .iter()
        .filter_map(|entry| resolve_ref(doc, entry).as_dict().ok())
        .filter_map(|dict| read_annotation(doc, dict))
        .collect())
}

fn read_annotation(doc: &lopdf::Document, dict: &lopdf::Dictionary) -> Option<RawAnnotation> {
    let subtype = resolve_ref(doc, dict.get(b"Subtype").ok()?).as_name().ok()?;
    let mut annot = RawAnnotation::new(&String::from_utf8_lossy(subtype));

    annot.quad_points = number_array(doc, dict, b"QuadPoints").filter(|values| !values.is_empty());
    annot.color = number_array(doc, dict, b"C").and_then(|c| Rgb::from_components(&c));
    annot.author = text_entry(doc, dict, b"T");
    annot.modification_date = text_entry(doc, dict, b"M");
    Some(annot)
}

/// An array of numbers; `None` if absent or any element is not a number.
fn number_array(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<Vec<f64>> {
    resolve_ref(doc, dict.get(key).ok()?)
        .as_array()
        .ok()?
        .iter()
        .map(|o| object_to_f64(resolve_ref(doc, o)).ok())
        .collect()
}

fn text_entry(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match resolve_ref(doc, dict.get(key).ok()?) {
        lopdf::Object::String(bytes, _) => Some(decode_text_string(bytes)),
        lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}
