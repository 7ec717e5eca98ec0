//! Minimal indented XML writer shared by the XMI and Ecore serializers.

use crate::error::SerializeError;

const INDENT: &str = "  ";

pub(crate) struct XmlWriter {
    out: String,
}

impl XmlWriter {
    /// Starts a document with the XML prolog.
    pub(crate) fn with_prolog() -> Self {
        let mut out = String::with_capacity(16 * 1024);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        Self { out }
    }

    /// Writes a start tag, or a self-closing tag when `empty` is set.
    /// Attribute values are escaped here; callers pass raw text.
    ///
    /// Nothing is written if a value holds a character XML 1.0 cannot carry.
    pub(crate) fn start(
        &mut self,
        depth: usize,
        name: &str,
        attrs: &[(&str, String)],
        empty: bool,
    ) -> Result<(), SerializeError> {
        for (key, value) in attrs {
            if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
                return Err(SerializeError::UnrepresentableChar {
                    element: name.to_owned(),
                    attribute: (*key).to_owned(),
                    code: u32::from(c),
                });
            }
        }
        self.indent(depth);
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value));
            self.out.push('"');
        }
        self.out.push_str(if empty { "/>\n" } else { ">\n" });
        Ok(())
    }

    pub(crate) fn end(&mut self, depth: usize, name: &str) {
        self.indent(depth);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }
}

/// Returns `true` for characters of the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Escapes text for use inside a double-quoted attribute value.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a float as an `xsd:float` lexical value, always with a fractional
/// part or exponent (`1.5`, `0.0`, `1e21`).
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_owned()
    } else {
        format!("{value:?}")
    }
}
