//! [`DocumentSource`] backed by lopdf.
//!
//! Walks each page's content stream, turns text-showing operators into
//! positioned spans and groups spans sharing a baseline into layout lines.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::{DocumentSource, Metadata, SpanLine};
use crate::error::{Error, Result};
use crate::model::{Span, StyleFlags};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Info dictionary entries exposed as metadata.
const INFO_KEYS: &[(&[u8], &str)] = &[
    (b"Title", "title"),
    (b"Author", "author"),
    (b"Subject", "subject"),
    (b"Keywords", "keywords"),
    (b"Creator", "creator"),
    (b"Producer", "producer"),
];

/// A PDF document opened with lopdf.
///
/// The parsed document is owned by the source and released when the
/// source is dropped.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
    metadata: Metadata,
    version: String,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = check_header(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not be readable");
        }

        let pages = doc.get_pages().into_values().collect();
        let metadata = read_info(&doc);

        Ok(Self {
            doc,
            pages,
            metadata,
            version,
        })
    }

    /// PDF version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    fn page_spans(&self, page_id: ObjectId) -> std::result::Result<Vec<PlacedSpan>, String> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| e.to_string())?;
        let content = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| e.to_string())?;
        let content = Content::decode(&content).map_err(|e| e.to_string())?;

        let mut walker = ContentWalker::new(&self.doc, &fonts);
        for op in &content.operations {
            walker.apply(op);
        }
        Ok(walker.spans)
    }
}

impl DocumentSource for LopdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn page_lines(&self, index: usize) -> Result<Vec<SpanLine>> {
        let page_id = *self
            .pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index + 1, self.pages.len()))?;

        let spans = self
            .page_spans(page_id)
            .map_err(|message| Error::page(index + 1, message))?;
        Ok(group_into_lines(spans))
    }
}

/// Verify the `%PDF-x.y` header and return the version.
fn check_header(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC.len() + 3 || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + 3];
    if !(version[0].is_ascii_digit() && version[1] == b'.' && version[2].is_ascii_digit()) {
        return Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(version).to_string())
}

fn read_info(doc: &LopdfDocument) -> Metadata {
    let mut metadata = Metadata::new();

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };

    if let Some(info) = info {
        for (key, name) in INFO_KEYS {
            if let Some(value) = string_entry(info, key) {
                metadata.insert((*name).to_string(), value);
            }
        }
    }

    metadata
}

fn string_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        _ => None,
    }
}

/// Decode bytes without a font encoding: UTF-16BE with BOM, then UTF-8,
/// then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// A span with its baseline position on the page.
#[derive(Debug, Clone)]
struct PlacedSpan {
    span: Span,
    x: f32,
    y: f32,
}

/// Text state while walking a content stream.
struct ContentWalker<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    font: Option<&'a Dictionary>,
    font_flags: StyleFlags,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
    line_matrix: TextMatrix,
    in_text: bool,
    spans: Vec<PlacedSpan>,
}

impl<'a> ContentWalker<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font: None,
            font_flags: StyleFlags::empty(),
            font_size: 12.0,
            leading: 0.0,
            matrix: TextMatrix::IDENTITY,
            line_matrix: TextMatrix::IDENTITY,
            in_text: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::IDENTITY;
                self.line_matrix = TextMatrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let (Some(Object::Name(name)), Some(size)) =
                    (operands.first(), operands.get(1).and_then(number))
                {
                    self.set_font(name, size);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let (Some(tx), Some(ty)) = (
                    operands.first().and_then(number),
                    operands.get(1).and_then(number),
                ) {
                    if op.operator == "TD" {
                        self.leading = -ty;
                    }
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                let values: Vec<f32> = operands.iter().filter_map(number).collect();
                if values.len() >= 6 {
                    self.line_matrix = TextMatrix([
                        values[0], values[1], values[2], values[3], values[4], values[5],
                    ]);
                    self.matrix = self.line_matrix;
                }
            }
            "T*" => self.move_line(0.0, -self.leading),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.push_text(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.push_text(text);
                }
            }
            "'" | "\"" => {
                self.move_line(0.0, -self.leading);
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.push_text(text);
                }
            }
            _ => {}
        }
    }

    fn set_font(&mut self, name: &[u8], size: f32) {
        self.font_size = size;
        match self.fonts.get(name).copied() {
            Some(font) => {
                let base_font = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_default();
                self.font_flags = StyleFlags::from_font_name(&base_font);
                self.font = Some(font);
            }
            None => {
                self.font_flags = StyleFlags::from_font_name(&String::from_utf8_lossy(name));
                self.font = None;
            }
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = self.line_matrix.translate(tx, ty);
        self.matrix = self.line_matrix;
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self.font.and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(ref encoding) => LopdfDocument::decode_text(encoding, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a TJ array. Kerning adjustments beyond 200 thousandths of an
    /// em are word gaps and become spaces (except inside CJK runs).
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let Some(adjustment) = number(other) else {
                        continue;
                    };
                    if -adjustment > 200.0 {
                        if let Some(last) = combined.chars().last() {
                            if !last.is_whitespace() && !is_spaceless_script_char(last) {
                                combined.push(' ');
                            }
                        }
                    }
                }
            }
        }
        combined
    }

    fn push_text(&mut self, text: String) {
        if !self.in_text || text.trim().is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        let font_size = self.font_size * self.matrix.vertical_scale();
        self.spans.push(PlacedSpan {
            span: Span::new(text, font_size).with_flags(self.font_flags),
            x,
            y,
        });
    }
}

/// Text matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMatrix([f32; 6]);

impl TextMatrix {
    const IDENTITY: TextMatrix = TextMatrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Pre-multiply by a translation, as `Td` does.
    fn translate(self, tx: f32, ty: f32) -> Self {
        let [a, b, c, d, e, f] = self.0;
        TextMatrix([a, b, c, d, tx * a + ty * c + e, tx * b + ty * d + f])
    }

    fn position(&self) -> (f32, f32) {
        (self.0[4], self.0[5])
    }

    fn vertical_scale(&self) -> f32 {
        let [_, _, c, d, _, _] = self.0;
        let scale = (c * c + d * d).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Group spans into layout lines by baseline, top to bottom, each line
/// ordered left to right.
fn group_into_lines(mut spans: Vec<PlacedSpan>) -> Vec<SpanLine> {
    // PDF y grows upwards
    spans.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<Vec<PlacedSpan>> = Vec::new();
    let mut current: Vec<PlacedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .map(|mut line| {
            line.sort_by(|a, b| a.x.total_cmp(&b.x));
            line.into_iter().map(|placed| placed.span).collect()
        })
        .collect()
}

/// Characters of scripts written without word spaces (Han, Kana, CJK
/// punctuation). Hangul is excluded: Korean uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2EBEF
        | 0x3040..=0x30FF
        | 0x3000..=0x303F)
}
