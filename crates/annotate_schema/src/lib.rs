// crates/annotate_schema/src/lib.rs

//! Inserts the rename annotation above every bare `type` field of a prisma
//! schema.
//!
//! The rewrite is a single line scan. A line is annotated when
//!
//! * its first token is the reserved field name (ASCII case-insensitive),
//! * the nearest brace before it is a `{` and the nearest brace after it is a
//!   `}`, i.e. it sits directly inside a block, and
//! * the line directly above it is not a `///` comment.
//!
//! Everything else is copied through byte-for-byte, so running the
//! annotator on its own output changes nothing.

mod braces;

use braces::{brace_positions, Brace};
use schema_marker::{DOC_COMMENT_PREFIX, RENAME_MARKER, RESERVED_FIELD};

/// The field to look for and the comment line to put above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnnotationRule<'a> {
    pub field: &'a str,
    pub marker: &'a str,
}

impl Default for AnnotationRule<'static> {
    fn default() -> Self {
        Self {
            field: RESERVED_FIELD,
            marker: RENAME_MARKER,
        }
    }
}

/// Output of a rewrite pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotated {
    /// The rewritten document.
    pub document: String,
    /// 1-based line numbers (in the input) of every field that got a marker.
    pub inserted: Vec<usize>,
}

/// Annotates every bare `type` field with `/// @prs.rename = _type`.
///
/// Never fails; a document without matching fields comes back unchanged.
pub fn annotate(document: &str) -> String {
    annotate_with_rule(document, &AnnotationRule::default()).document
}

/// Same as [`annotate`], for an arbitrary field/marker pair, and reports
/// which lines were annotated.
pub fn annotate_with_rule(document: &str, rule: &AnnotationRule<'_>) -> Annotated {
    BlockScanner::new(document, rule).run()
}

// === Private Implementation === //

struct BlockScanner<'d, 'r> {
    document: &'d str,
    rule: &'r AnnotationRule<'r>,
    braces: Vec<(usize, Brace)>,
    /// Index of the first brace not yet passed.
    cursor: usize,
    depth: usize,
    last_brace: Option<Brace>,
}

impl<'d, 'r> BlockScanner<'d, 'r> {
    fn new(document: &'d str, rule: &'r AnnotationRule<'r>) -> Self {
        Self {
            document,
            rule,
            braces: brace_positions(document),
            cursor: 0,
            depth: 0,
            last_brace: None,
        }
    }

    fn run(mut self) -> Annotated {
        let document = self.document;
        let mut output = String::with_capacity(document.len());
        let mut inserted = Vec::new();
        let mut previous: Option<&str> = None;
        let mut offset = 0;

        for (index, line) in document.split_inclusive('\n').enumerate() {
            let body = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            let content = body.trim_start();
            let indent = &body[..body.len() - content.len()];

            self.advance_to(offset + indent.len());

            if self.inside_block() && self.is_target(content) && !self.is_annotated(previous) {
                log::debug!(
                    "annotating `{}` field on line {} (depth {})",
                    self.rule.field,
                    index + 1,
                    self.depth
                );
                output.push_str(indent);
                output.push_str(self.rule.marker);
                output.push_str(line_ending(line));
                inserted.push(index + 1);
            }

            output.push_str(line);
            previous = Some(body);
            offset += line.len();
        }

        Annotated {
            document: output,
            inserted,
        }
    }

    /// Consumes every brace that starts before `position`.
    fn advance_to(&mut self, position: usize) {
        while let Some(&(at, brace)) = self.braces.get(self.cursor) {
            if at >= position {
                break;
            }
            match brace {
                Brace::Open => self.depth += 1,
                Brace::Close => self.depth = self.depth.saturating_sub(1),
            }
            self.last_brace = Some(brace);
            self.cursor += 1;
        }
    }

    /// The current position is bounded by `{` behind and `}` ahead with no
    /// other brace in between.
    fn inside_block(&self) -> bool {
        let next_brace = self.braces.get(self.cursor).map(|&(_, brace)| brace);
        self.last_brace == Some(Brace::Open) && next_brace == Some(Brace::Close)
    }

    /// First whitespace-delimited token of the line is the field name.
    fn is_target(&self, content: &str) -> bool {
        content
            .split(char::is_whitespace)
            .next()
            .map_or(false, |token| token.eq_ignore_ascii_case(self.rule.field))
    }

    fn is_annotated(&self, previous: Option<&str>) -> bool {
        previous.map_or(false, |line| {
            let line = line.trim();
            line.starts_with(DOC_COMMENT_PREFIX) || line == self.rule.marker.trim()
        })
    }
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotates_type_field() {
        let input = "model User {\n  id Int @id\n  type String\n}";
        let expected = "model User {\n  id Int @id\n  /// @prs.rename = _type\n  type String\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_existing_marker_is_left_alone() {
        let input = "model User {\n  id Int @id\n  /// @prs.rename = _type\n  type String\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_any_doc_comment_suppresses_insertion() {
        let input = "model User {\n  /// Kind of account\n  type String\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_plain_comment_does_not_suppress() {
        let input = "model User {\n  // Kind of account\n  type String\n}";
        let expected =
            "model User {\n  // Kind of account\n  /// @prs.rename = _type\n  type String\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_blank_line_breaks_the_guard() {
        let input = "model User {\n  /// Kind of account\n\n  type String\n}";
        let expected =
            "model User {\n  /// Kind of account\n\n  /// @prs.rename = _type\n  type String\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_substring_does_not_match() {
        let input = "model User {\n  typeName String\n  subtype String\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_type_in_value_position_does_not_match() {
        let input = "model User {\n  kind type\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_case_insensitive_match() {
        let input = "model User {\n  Type String\n  TYPE Int\n}";
        let expected = "model User {\n  /// @prs.rename = _type\n  Type String\n  /// @prs.rename = _type\n  TYPE Int\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_two_blocks_are_annotated_independently() {
        let input = "model A {\n  type String\n}\n\ntype B {\n  type Int\n}\n";
        let expected = "model A {\n  /// @prs.rename = _type\n  type String\n}\n\ntype B {\n  /// @prs.rename = _type\n  type Int\n}\n";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_top_level_type_keyword_is_ignored() {
        let input = "type Address {\n  street String\n}\n";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_indentation_is_matched() {
        let input = "model A {\n\ttype String\n}";
        let expected = "model A {\n\t/// @prs.rename = _type\n\ttype String\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_crlf_line_endings_are_preserved() {
        let input = "model A {\r\n  type String\r\n}\r\n";
        let expected = "model A {\r\n  /// @prs.rename = _type\r\n  type String\r\n}\r\n";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_nested_block_after_inner_close_is_not_bounded() {
        // The nearest brace before the field is the inner `}`.
        let input = "outer {\n  inner {\n    id Int\n  }\n  type String\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_innermost_block_is_annotated() {
        let input = "outer {\n  inner {\n    type String\n  }\n}";
        let expected = "outer {\n  inner {\n    /// @prs.rename = _type\n    type String\n  }\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_field_opening_a_block_is_not_bounded() {
        let input = "outer {\n  type {\n    id Int\n  }\n}";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_brace_in_default_string_is_ignored() {
        let input = "model A {\n  meta Json @default(\"{}\")\n  type String\n}";
        let expected =
            "model A {\n  meta Json @default(\"{}\")\n  /// @prs.rename = _type\n  type String\n}";
        assert_eq!(annotate(input), expected);
    }

    #[test]
    fn test_unclosed_block_is_left_alone() {
        let input = "model A {\n  type String\n";
        assert_eq!(annotate(input), input);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(annotate(""), "");
    }

    #[test]
    fn test_report_lists_input_line_numbers() {
        let input = "model A {\n  type String\n}\nmodel B {\n  id Int\n  type Int\n}";
        let annotated = annotate_with_rule(input, &AnnotationRule::default());
        assert_eq!(annotated.inserted, vec![2, 6]);
    }

    #[test]
    fn test_custom_rule() {
        let rule = AnnotationRule {
            field: "match",
            marker: "/// @prs.rename = _match",
        };
        let input = "model A {\n  match String\n  type String\n}";
        let annotated = annotate_with_rule(input, &rule);
        assert_eq!(
            annotated.document,
            "model A {\n  /// @prs.rename = _match\n  match String\n  type String\n}"
        );
        assert_eq!(annotated.inserted, vec![2]);
    }

    #[test]
    fn test_custom_rule_is_idempotent() {
        let rule = AnnotationRule {
            field: "match",
            marker: " @@rename(match) ",
        };
        let input = "model A {\n  match String\n}";
        let once = annotate_with_rule(input, &rule);
        let twice = annotate_with_rule(&once.document, &rule);
        assert_eq!(once.inserted, vec![2]);
        assert_eq!(twice.document, once.document);
        assert!(twice.inserted.is_empty());
    }
}
