//! Markup parser for one safety-sheet file.
//!
//! The sheets are legacy windows-1252 HTML. The substance title is located
//! with a two-tier heuristic: prefer a `<font size="3">` heading-equivalent,
//! fall back to the first `<b>` element. The body is the full visible text of
//! the document with structural markup discarded; when a title was found its
//! *first* occurrence is removed from the body.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static TITLE_FONT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"font[size="3"]"#).expect("static selector"));
static TITLE_BOLD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("b").expect("static selector"));

/// Result of parsing one sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedSheet {
    /// Substance title; `None` when neither heuristic tier matched.
    pub substance: Option<String>,
    /// Visible document text, title removed, trimmed. May be empty; empty
    /// records are rejected by the pipeline, not here.
    pub body: String,
}

/// Decodes raw sheet bytes as windows-1252 and parses the markup.
///
/// Decoding never fails the file: invalid bytes are substituted by the
/// decoder.
pub fn parse_sheet_bytes(raw: &[u8]) -> ParsedSheet {
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(raw);
    parse_sheet(&text)
}

/// Parses one sheet from already-decoded markup text.
pub fn parse_sheet(html: &str) -> ParsedSheet {
    let doc = Html::parse_document(html);

    let substance = doc
        .select(&TITLE_FONT)
        .next()
        .or_else(|| doc.select(&TITLE_BOLD).next())
        .map(|el| element_text(&el))
        .filter(|s| !s.is_empty());

    let mut body = visible_text(&doc);
    if let Some(title) = &substance {
        body = body.replacen(title.as_str(), "", 1).trim().to_string();
    }

    ParsedSheet { substance, body }
}

/// Joins the text nodes of one element with single spaces, trimmed.
fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full visible text of the document: text nodes trimmed, empty ones
/// dropped, joined with single spaces.
fn visible_text(doc: &Html) -> String {
    doc.root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_heading_wins_over_bold() {
        let html = r#"<html><body>
            <font size="3">ACETONE</font>
            <b>Fire hazard</b>
            <p>Highly flammable liquid and vapour.</p>
        </body></html>"#;
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance.as_deref(), Some("ACETONE"));
        assert_eq!(parsed.body, "Fire hazard Highly flammable liquid and vapour.");
    }

    #[test]
    fn bold_is_the_fallback_tier() {
        let html = "<html><body><b>ETHANOL</b><p>Colourless liquid.</p></body></html>";
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance.as_deref(), Some("ETHANOL"));
        assert_eq!(parsed.body, "Colourless liquid.");
    }

    #[test]
    fn wrong_font_size_is_not_a_heading() {
        let html = r#"<html><body><font size="2">AMMONIA</font> solution</body></html>"#;
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance, None);
        assert_eq!(parsed.body, "AMMONIA solution");
    }

    #[test]
    fn only_first_title_occurrence_is_removed() {
        let html = r#"<html><body>
            <font size="3">ACETONE</font>
            <p>ACETONE is volatile. Store ACETONE in a cool place.</p>
        </body></html>"#;
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance.as_deref(), Some("ACETONE"));
        // The heading occurrence disappears; both body mentions survive.
        assert_eq!(
            parsed.body,
            "ACETONE is volatile. Store ACETONE in a cool place."
        );
    }

    #[test]
    fn no_title_leaves_body_unchanged() {
        let html = "<html><body><p>Unlabelled fragment.</p></body></html>";
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance, None);
        assert_eq!(parsed.body, "Unlabelled fragment.");
    }

    #[test]
    fn title_only_document_yields_empty_body() {
        let html = r#"<html><body><font size="3">ACETONE</font></body></html>"#;
        let parsed = parse_sheet(html);
        assert_eq!(parsed.substance.as_deref(), Some("ACETONE"));
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn windows_1252_bytes_decode() {
        // "MÉTHANOL" with É as the single windows-1252 byte 0xC9.
        let raw = b"<html><body><font size=\"3\">M\xC9THANOL</font><p>Alcool.</p></body></html>";
        let parsed = parse_sheet_bytes(raw);
        assert_eq!(parsed.substance.as_deref(), Some("M\u{c9}THANOL"));
        assert_eq!(parsed.body, "Alcool.");
    }
}
