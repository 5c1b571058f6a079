//! Context assembler: retrieved hits → annotated context block.

use sds_store::SheetHit;

/// Placeholder when a hit carries no substance metadata.
pub const SUBSTANCE_PLACEHOLDER: &str = "unspecified substance";

/// Placeholder when a hit carries no origin-file metadata.
pub const FILE_PLACEHOLDER: &str = "unspecified file";

/// Maps each hit to an annotated block and joins the blocks with a blank
/// line, preserving retrieval order.
///
/// This assembled string is the only context surface the model sees; it is
/// never truncated or re-ordered downstream.
pub fn assemble_context(hits: &[SheetHit]) -> String {
    hits.iter()
        .map(|h| {
            format!(
                "[SUBSTANCE: {}, FILE: {}]\n{}",
                h.substance.as_deref().unwrap_or(SUBSTANCE_PLACEHOLDER),
                h.origin_file.as_deref().unwrap_or(FILE_PLACEHOLDER),
                h.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Origin files of the hits, in retrieval order. Duplicates are kept; hits
/// without file metadata contribute nothing.
pub fn retrieved_files(hits: &[SheetHit]) -> Vec<String> {
    hits.iter()
        .filter_map(|h| h.origin_file.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(text: &str, substance: Option<&str>, file: Option<&str>) -> SheetHit {
        SheetHit {
            score: 0.5,
            text: text.to_string(),
            substance: substance.map(str::to_string),
            origin_file: file.map(str::to_string),
        }
    }

    #[test]
    fn blocks_are_annotated_and_blank_line_separated() {
        let hits = vec![
            hit("Flammable liquid.", Some("ACETONE"), Some("X123.HTM")),
            hit("Colourless.", Some("ETHANOL"), Some("X044.HTM")),
        ];
        let ctx = assemble_context(&hits);
        assert_eq!(
            ctx,
            "[SUBSTANCE: ACETONE, FILE: X123.HTM]\nFlammable liquid.\n\n\
             [SUBSTANCE: ETHANOL, FILE: X044.HTM]\nColourless."
        );
    }

    #[test]
    fn missing_metadata_uses_fixed_placeholders() {
        let hits = vec![hit("Orphan text.", None, None)];
        let ctx = assemble_context(&hits);
        assert_eq!(
            ctx,
            "[SUBSTANCE: unspecified substance, FILE: unspecified file]\nOrphan text."
        );
    }

    #[test]
    fn files_keep_order_and_duplicates() {
        let hits = vec![
            hit("a", None, Some("X123.HTM")),
            hit("b", None, None),
            hit("c", None, Some("X123.HTM")),
        ];
        assert_eq!(retrieved_files(&hits), vec!["X123.HTM", "X123.HTM"]);
    }
}
