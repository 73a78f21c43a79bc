//! Line-granular parsing of generated text.
//!
//! The model is asked for one `question<TAB>answer` record per line. Parsing
//! is best-effort: every line without a tab is dropped on its own, and only
//! a reply with no records at all is treated as a failure (by the pipeline,
//! not here).

use tracing::debug;

use super::types::QAPair;

/// Extract tab-separated records from `raw`, preserving line order.
///
/// Each line is split at its first tab; both halves are trimmed and kept
/// even when empty. Lines with no tab are skipped.
pub fn parse_records(raw: &str) -> Vec<QAPair> {
    let mut dropped = 0usize;
    let records: Vec<QAPair> = raw
        .lines()
        .filter_map(|line| {
            let Some((question, answer)) = line.split_once('\t') else {
                if !line.trim().is_empty() {
                    dropped += 1;
                }
                return None;
            };
            Some(QAPair::new(question.trim(), answer.trim()))
        })
        .collect();

    if dropped > 0 {
        debug!(kept = records.len(), dropped, "dropped unusable response lines");
    }
    records
}

/// Rewrite leading `*` / `-` bullet markers to `•` for display.
pub fn normalize_bullets(text: &str) -> String {
    text.lines()
        .map(|line| {
            let indent_len = line.len() - line.trim_start().len();
            let (indent, rest) = line.split_at(indent_len);
            match rest.strip_prefix("* ").or_else(|| rest.strip_prefix("- ")) {
                Some(body) => format!("{indent}• {body}"),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_in_order() {
        let records = parse_records("Q1\tA1\nQ2\tA2");
        assert_eq!(records, vec![QAPair::new("Q1", "A1"), QAPair::new("Q2", "A2")]);
    }

    #[test]
    fn drops_lines_without_tab() {
        let records = parse_records("ignore me\nQ1\tA1");
        assert_eq!(records, vec![QAPair::new("Q1", "A1")]);
    }

    #[test]
    fn splits_at_first_tab_only() {
        let records = parse_records("What?\tThis\tand that");
        assert_eq!(records, vec![QAPair::new("What?", "This\tand that")]);
    }

    #[test]
    fn trims_fields_and_handles_crlf() {
        let records = parse_records("  1. The _____ is hot.  \t Answer: Sun \r\n");
        assert_eq!(records, vec![QAPair::new("1. The _____ is hot.", "Answer: Sun")]);
    }

    #[test]
    fn keeps_records_with_empty_side() {
        let records = parse_records("Q1\t\n\tA2\nQ\tA");
        assert_eq!(
            records,
            vec![QAPair::new("Q1", ""), QAPair::new("", "A2"), QAPair::new("Q", "A")]
        );
    }

    #[test]
    fn no_tab_lines_yields_nothing() {
        assert!(parse_records("just prose\nmore prose").is_empty());
        assert!(parse_records("").is_empty());
    }

    #[test]
    fn normalize_bullets_rewrites_markers() {
        let text = "* Photosynthesis - light to sugar\n- Respiration\n• Already fine\nplain";
        assert_eq!(
            normalize_bullets(text),
            "• Photosynthesis - light to sugar\n• Respiration\n• Already fine\nplain"
        );
    }

    #[test]
    fn normalize_bullets_keeps_indent() {
        assert_eq!(normalize_bullets("  * nested"), "  • nested");
    }
}
