//! Span and line types.

use bitflags::bitflags;

bitflags! {
    /// Font style flags attached to a span.
    ///
    /// Bit positions follow the common page-parser convention
    /// (superscript = 1, italic = 2, serif = 4, monospace = 8, bold = 16).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u32 {
        const SUPERSCRIPT = 1 << 0;
        const ITALIC = 1 << 1;
        const SERIF = 1 << 2;
        const MONOSPACE = 1 << 3;
        const BOLD = 1 << 4;
    }
}

impl StyleFlags {
    /// Infer style flags from a base font name (e.g., "Helvetica-BoldOblique").
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = StyleFlags::empty();

        if name.contains("bold") || name.contains("black") || name.contains("heavy") {
            flags |= StyleFlags::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= StyleFlags::ITALIC;
        }
        if name.contains("mono") || name.contains("courier") {
            flags |= StyleFlags::MONOSPACE;
        }
        if !name.contains("sans") && (name.contains("times") || name.contains("serif")) {
            flags |= StyleFlags::SERIF;
        }

        flags
    }
}

/// A contiguous run of text sharing one font size and style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Style flags
    pub flags: StyleFlags,
}

impl Span {
    /// Create a plain span.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            flags: StyleFlags::empty(),
        }
    }

    /// Set style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the span as bold.
    pub fn bold(mut self) -> Self {
        self.flags |= StyleFlags::BOLD;
        self
    }

    /// Whether the span carries any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A logical line of text merged from the spans of one layout line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Trimmed, space-joined text of the non-empty spans
    pub text: String,
    /// Largest font size among the non-empty spans
    pub font_size: f32,
    /// Union of the style flags of the non-empty spans
    pub flags: StyleFlags,
    /// Whether the bold bit is set
    pub is_bold: bool,
    /// Whether the text is upper-case (has cased letters, none lower-case)
    pub is_uppercase: bool,
}

impl Line {
    /// Merge spans into a line.
    ///
    /// Whitespace-only spans contribute neither text, size nor style.
    /// Returns `None` when no span carries text.
    pub fn from_spans(spans: &[Span]) -> Option<Self> {
        let mut parts: Vec<&str> = Vec::new();
        let mut font_size: f32 = 0.0;
        let mut flags = StyleFlags::empty();

        for span in spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            parts.push(text);
            font_size = font_size.max(span.font_size);
            flags |= span.flags;
        }

        if parts.is_empty() {
            return None;
        }

        let text = parts.join(" ");
        let is_uppercase = is_uppercase(&text);

        Some(Self {
            text,
            font_size,
            flags,
            is_bold: flags.contains(StyleFlags::BOLD),
            is_uppercase,
        })
    }

    /// Number of characters (not bytes) in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// True when the text has at least one cased letter and no lower-case ones.
fn is_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
