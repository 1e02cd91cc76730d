//! JSON rendering for outlines.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 4-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
///
/// Non-ASCII text is written as-is, not escaped.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            outline.serialize(&mut ser)?;
            buf
        }
        JsonFormat::Compact => serde_json::to_vec(outline)?,
    };

    String::from_utf8(bytes).map_err(|e| Error::Render(format!("JSON is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel};

    fn sample() -> Outline {
        Outline::new(
            "Spec v1",
            vec![Heading::new(HeadingLevel::H1, "1. Introduction", 2)],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
    "title": "Spec v1 ",
    "outline": [
        {
            "level": "H1",
            "text": "1. Introduction",
            "page": 2
        }
    ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with(r#"{"title":"Spec v1 ","outline":["#));
    }

    #[test]
    fn test_non_ascii_kept() {
        let outline = Outline::new("報告書", vec![]);
        let json = to_json(&outline, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"報告書 ","outline":[]}"#);
    }
}
