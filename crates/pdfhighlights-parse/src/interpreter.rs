//! Content stream interpreter.
//!
//! Walks the operations of a page (and any Form XObjects it paints) keeping
//! the graphics and text state, and reports one [`TextRun`] per show-text
//! operator to a [`TextHandler`]. Everything that does not affect where text
//! lands (paths, colour, images, marked content) is ignored.

use std::collections::HashMap;

use pdfhighlights_core::{
    Ctm, ExtractOptions, ExtractWarning, ExtractWarningCode, PdfError, TextRun,
};

use crate::content::{Operand, Operation, parse_content};
use crate::error::BackendError;
use crate::font::LoadedFont;
use crate::handler::TextHandler;
use crate::lopdf_backend::{decode_stream, object_to_f64, resolve_ref};
use crate::text_state::{TextParams, TextState};

/// `TJ` adjustments more negative than this (thousandths of an em) read as a
/// word gap.
const WORD_GAP_ADJUSTMENT: f64 = -250.0;

/// CTM plus the `q`/`Q` stack.
#[derive(Debug, Clone, Default)]
pub(crate) struct GraphicsState {
    ctm: Ctm,
    stack: Vec<(Ctm, TextParams)>,
}

impl GraphicsState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn save(&mut self, text: &TextParams) {
        self.stack.push((self.ctm, text.clone()));
    }

    fn restore(&mut self, text: &mut TextParams) {
        if let Some((ctm, params)) = self.stack.pop() {
            self.ctm = ctm;
            *text = params;
        }
    }

    fn concat(&mut self, m: [f64; 6]) {
        self.ctm = Ctm::from_array(m).concat(&self.ctm);
    }
}

/// One element of a show-text operation.
enum Shown<'a> {
    Bytes(&'a [u8]),
    Adjust(f64),
}

/// Interpret one content stream against `resources`.
///
/// `depth` counts Form XObject nesting; the page itself is depth 0.
///
/// # Errors
///
/// Fails when the stream cannot be lexed or Form XObject nesting exceeds
/// [`ExtractOptions::max_recursion_depth`].
#[allow(clippy::too_many_arguments)]
pub(crate) fn interpret_content(
    doc: &lopdf::Document,
    stream_bytes: &[u8],
    resources: &lopdf::Dictionary,
    handler: &mut dyn TextHandler,
    options: &ExtractOptions,
    depth: usize,
    gstate: &mut GraphicsState,
    tstate: &mut TextState,
) -> Result<(), BackendError> {
    interpret_stream(
        doc,
        stream_bytes,
        resources,
        handler,
        options,
        depth,
        gstate,
        tstate,
        None,
    )
}

/// [`interpret_content`] for a stream that may run with a font selected by
/// its caller. `inherited` is used while the current font name has not been
/// set by a `Tf` in this stream.
#[allow(clippy::too_many_arguments)]
fn interpret_stream(
    doc: &lopdf::Document,
    stream_bytes: &[u8],
    resources: &lopdf::Dictionary,
    handler: &mut dyn TextHandler,
    options: &ExtractOptions,
    depth: usize,
    gstate: &mut GraphicsState,
    tstate: &mut TextState,
    inherited: Option<&LoadedFont>,
) -> Result<(), BackendError> {
    if depth > options.max_recursion_depth {
        return Err(BackendError::Core(PdfError::ResourceLimitExceeded {
            limit_name: "max_recursion_depth".to_string(),
            limit_value: options.max_recursion_depth,
            actual_value: depth,
        }));
    }

    let operations = parse_content(stream_bytes)?;
    let mut fonts: HashMap<String, LoadedFont> = HashMap::new();

    for (op_index, op) in operations.iter().enumerate() {
        match op.operator.as_str() {
            "q" => gstate.save(&tstate.params),
            "Q" => gstate.restore(&mut tstate.params),
            "cm" => {
                if let Some(m) = op.numbers::<6>() {
                    gstate.concat(m);
                }
            }

            "BT" => tstate.begin_text(),
            "ET" => {}
            "Tf" => {
                if let Some(name) = op.operands.first().and_then(Operand::as_name) {
                    tstate.params.font_name = name.to_string();
                    ensure_font(doc, resources, name, &mut fonts, handler, options, op_index);
                }
                if let Some(size) = op.number(1) {
                    tstate.params.font_size = size;
                }
            }
            "Tm" => {
                if let Some(m) = op.numbers::<6>() {
                    tstate.set_text_matrix(m);
                }
            }
            "Td" => {
                if let Some([tx, ty]) = op.numbers::<2>() {
                    tstate.move_line(tx, ty);
                }
            }
            "TD" => {
                if let Some([tx, ty]) = op.numbers::<2>() {
                    tstate.move_line_set_leading(tx, ty);
                }
            }
            "T*" => tstate.next_line(),
            "Tc" => set_param(op, &mut tstate.params.char_spacing),
            "Tw" => set_param(op, &mut tstate.params.word_spacing),
            "Tz" => set_param(op, &mut tstate.params.h_scaling),
            "TL" => set_param(op, &mut tstate.params.leading),
            "Ts" => set_param(op, &mut tstate.params.rise),

            "Tj" => {
                if let Some(bytes) = op.operands.first().and_then(Operand::as_bytes) {
                    let font = current_font(&mut fonts, inherited, &tstate.params.font_name);
                    show(&[Shown::Bytes(bytes)], font, gstate, tstate, handler);
                }
            }
            "'" => {
                tstate.next_line();
                if let Some(bytes) = op.operands.first().and_then(Operand::as_bytes) {
                    let font = current_font(&mut fonts, inherited, &tstate.params.font_name);
                    show(&[Shown::Bytes(bytes)], font, gstate, tstate, handler);
                }
            }
            "\"" => {
                if let Some([aw, ac]) = op.numbers::<2>() {
                    tstate.params.word_spacing = aw;
                    tstate.params.char_spacing = ac;
                }
                tstate.next_line();
                if let Some(bytes) = op.operands.get(2).and_then(Operand::as_bytes) {
                    let font = current_font(&mut fonts, inherited, &tstate.params.font_name);
                    show(&[Shown::Bytes(bytes)], font, gstate, tstate, handler);
                }
            }
            "TJ" => {
                if let Some(Operand::Array(items)) = op.operands.first() {
                    let shown: Vec<Shown<'_>> = items
                        .iter()
                        .filter_map(|item| match item {
                            Operand::String(bytes) => Some(Shown::Bytes(bytes.as_slice())),
                            other => other.as_f64().map(Shown::Adjust),
                        })
                        .collect();
                    let font = current_font(&mut fonts, inherited, &tstate.params.font_name);
                    show(&shown, font, gstate, tstate, handler);
                }
            }

            "Do" => {
                if let Some(name) = op.operands.first().and_then(Operand::as_name) {
                    let font = fonts.get(&tstate.params.font_name).or(inherited);
                    paint_xobject(
                        doc, resources, name, handler, options, depth, gstate, tstate, font,
                        op_index,
                    )?;
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn set_param(op: &Operation, slot: &mut f64) {
    if let Some(v) = op.number(0) {
        *slot = v;
    }
}

#[allow(clippy::too_many_arguments)]
fn ensure_font(
    doc: &lopdf::Document,
    resources: &lopdf::Dictionary,
    name: &str,
    fonts: &mut HashMap<String, LoadedFont>,
    handler: &mut dyn TextHandler,
    options: &ExtractOptions,
    op_index: usize,
) {
    if fonts.contains_key(name) {
        return;
    }

    let dict = resources
        .get(b"Font")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|fonts| fonts.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());

    let loaded = match dict.map(|d| LoadedFont::load(doc, d)) {
        Some(Ok(font)) => {
            if !font.has_text_mapping() && options.collect_warnings {
                handler.on_warning(
                    ExtractWarning::new(
                        ExtractWarningCode::EncodingFallback,
                        "composite font without ToUnicode; codes read as Unicode",
                    )
                    .at_operator(op_index)
                    .with_font(name),
                );
            }
            font
        }
        Some(Err(err)) => {
            if options.collect_warnings {
                handler.on_warning(
                    ExtractWarning::new(ExtractWarningCode::MissingFont, err.to_string())
                        .at_operator(op_index)
                        .with_font(name),
                );
            }
            LoadedFont::fallback(name)
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(font = name, "font not found in resources");
            if options.collect_warnings {
                handler.on_warning(
                    ExtractWarning::new(
                        ExtractWarningCode::MissingFont,
                        "font not found in resources, using default metrics",
                    )
                    .at_operator(op_index)
                    .with_font(name),
                );
            }
            LoadedFont::fallback(name)
        }
    };
    fonts.insert(name.to_string(), loaded);
}

/// Font for the current font name: loaded in this stream, else inherited
/// from the calling stream, else default metrics.
fn current_font<'a>(
    fonts: &'a mut HashMap<String, LoadedFont>,
    inherited: Option<&'a LoadedFont>,
    name: &str,
) -> &'a LoadedFont {
    match inherited {
        Some(font) if !fonts.contains_key(name) => font,
        _ => &*fonts
            .entry(name.to_string())
            .or_insert_with(|| LoadedFont::fallback(name)),
    }
}

/// Lay out a show-text operation and report it as one run.
///
/// The run starts at the pen position before the first glyph and is as wide
/// as the distance the pen travelled.
fn show(
    shown: &[Shown<'_>],
    font: &LoadedFont,
    gstate: &GraphicsState,
    tstate: &mut TextState,
    handler: &mut dyn TextHandler,
) {
    let start = tstate.origin(&gstate.ctm);
    let mut text = String::new();

    for item in shown {
        match item {
            Shown::Bytes(bytes) => {
                for glyph in font.decode(bytes) {
                    text.push_str(&glyph.text);
                    let advance = tstate.glyph_advance(glyph.width, glyph.is_word_space);
                    tstate.advance(advance);
                }
            }
            Shown::Adjust(adjustment) => {
                if *adjustment < WORD_GAP_ADJUSTMENT
                    && !text.is_empty()
                    && !text.ends_with(char::is_whitespace)
                {
                    text.push(' ');
                }
                let advance = tstate.adjustment_advance(*adjustment);
                tstate.advance(advance);
            }
        }
    }

    if text.is_empty() {
        return;
    }
    let end = tstate.origin(&gstate.ctm);
    handler.on_text_run(TextRun::new(text, start.x, start.y, start.distance(&end)));
}

#[allow(clippy::too_many_arguments)]
fn paint_xobject(
    doc: &lopdf::Document,
    resources: &lopdf::Dictionary,
    name: &str,
    handler: &mut dyn TextHandler,
    options: &ExtractOptions,
    depth: usize,
    gstate: &mut GraphicsState,
    tstate: &mut TextState,
    font: Option<&LoadedFont>,
    op_index: usize,
) -> Result<(), BackendError> {
    let stream = resources
        .get(b"XObject")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .and_then(|xobjects| xobjects.get(name.as_bytes()).ok())
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_stream().ok());

    let Some(stream) = stream else {
        if options.collect_warnings {
            handler.on_warning(
                ExtractWarning::new(
                    ExtractWarningCode::MalformedObject,
                    format!("XObject /{name} not found"),
                )
                .at_operator(op_index),
            );
        }
        return Ok(());
    };

    let is_form = stream
        .dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        == Some(b"Form".as_slice());
    if !is_form {
        return Ok(());
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(xobject = name, depth = depth + 1, "entering form xobject");

    let form_resources = stream
        .dict
        .get(b"Resources")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .unwrap_or(resources);

    let content = decode_stream(stream)
        .map_err(|e| BackendError::Interpreter(format!("Form XObject /{name}: {e}")))?;

    gstate.save(&tstate.params);
    if let Some(matrix) = stream
        .dict
        .get(b"Matrix")
        .ok()
        .and_then(|o| o.as_array().ok())
        .and_then(|arr| {
            let values: Vec<f64> = arr.iter().filter_map(|v| object_to_f64(v).ok()).collect();
            <[f64; 6]>::try_from(values).ok()
        })
    {
        gstate.concat(matrix);
    }

    // The form gets its own text object; the caller's is restored afterwards.
    let saved_text = tstate.clone();
    let result = interpret_stream(
        doc,
        &content,
        form_resources,
        handler,
        options,
        depth + 1,
        gstate,
        tstate,
        font,
    );
    *tstate = saved_text;
    gstate.restore(&mut tstate.params);
    result
}
