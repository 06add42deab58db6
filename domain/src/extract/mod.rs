//! Lenient structured-output extraction
//!
//! Model responses are free-form text that should contain one JSON object
//! somewhere inside. These functions locate the first balanced
//! brace-delimited block, apply a fixed pre-clean (strip `//` line
//! comments, replace bare `null` tokens with `0`), and hand the fragment
//! to a strict `serde_json` parse. Nothing from the model is ever
//! evaluated; brace balance and serde are the only things trusted.

use thiserror::Error;

/// Errors from structured-output extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No balanced brace-delimited block found")]
    NotFound,

    #[error("Malformed block: closing brace precedes any opening brace")]
    UnbalancedClose,

    #[error("Fragment is not a valid JSON object: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extract the substring between the first balanced set of curly braces.
///
/// Handles nested braces correctly. The returned slice excludes the outer
/// braces. Fails if no balanced top-level run exists, or if a `}` appears
/// before any `{` at the top level.
///
/// # Example
///
/// ```
/// use council_domain::extract::extract_first_curly_balanced;
///
/// let inner = extract_first_curly_balanced("noise {outer {inner} more} trailing").unwrap();
/// assert_eq!(inner, "outer {inner} more");
/// assert!(extract_first_curly_balanced("no braces here").is_err());
/// assert!(extract_first_curly_balanced("} {valid}").is_err());
/// ```
pub fn extract_first_curly_balanced(text: &str) -> Result<&str, ExtractError> {
    let mut start = None;
    let mut depth: i64 = 0;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = Some(i + 1);
                }
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0
                    && let Some(s) = start
                {
                    return Ok(&text[s..i]);
                }
                if depth < 0 {
                    return Err(ExtractError::UnbalancedClose);
                }
            }
            _ => {}
        }
    }

    Err(ExtractError::NotFound)
}

/// Apply the fixed pre-clean to a raw fragment.
///
/// Strips everything from `//` to end of line (outside string literals)
/// and replaces bare `null` tokens with `0` so sloppy model output still
/// parses as JSON. The clean is intentionally minimal; anything beyond
/// these two repairs must fail the strict parse instead.
pub fn clean_fragment(fragment: &str) -> String {
    let stripped = strip_line_comments(fragment);
    replace_null_tokens(&stripped)
}

/// Parse a raw model response into a JSON object value.
///
/// Combines extraction, pre-clean, and a strict parse of the re-wrapped
/// fragment. The caller decides whether a failure means skip, retry, or
/// abort.
pub fn parse_object(text: &str) -> Result<serde_json::Value, ExtractError> {
    let inner = extract_first_curly_balanced(text)?;
    let cleaned = clean_fragment(inner);
    let value = serde_json::from_str(&format!("{{{}}}", cleaned))?;
    Ok(value)
}

/// Remove `//` comments outside of string literals, per line.
fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let mut in_string = false;
        let mut escaped = false;
        let mut prev_slash = false;
        let mut cut = line.len();

        for (i, ch) in line.char_indices() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    in_string = false;
                }
                prev_slash = false;
                continue;
            }
            match ch {
                '"' => {
                    in_string = true;
                    prev_slash = false;
                }
                '/' => {
                    if prev_slash {
                        cut = i - 1;
                        break;
                    }
                    prev_slash = true;
                }
                _ => prev_slash = false,
            }
        }

        if cut < line.len() {
            out.push_str(line[..cut].trim_end());
            if line.ends_with('\n') {
                out.push('\n');
            }
        } else {
            out.push_str(line);
        }
    }

    out
}

/// Replace bare `null` tokens with `0`, skipping string literals.
fn replace_null_tokens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = text.char_indices();

    while let Some((i, ch)) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }
        if ch == 'n'
            && text[i..].starts_with("null")
            && !boundary_is_word(text, i, true)
            && !boundary_is_word(text, i + 4, false)
        {
            out.push('0');
            // Consume "ull"
            chars.nth(2);
            continue;
        }
        out.push(ch);
    }

    out
}

/// Check the character just before (`before` = true) or at a byte offset
/// for being part of a word, so "nullable" and "annull" stay untouched
fn boundary_is_word(text: &str, i: usize, before: bool) -> bool {
    let ch = if before {
        text[..i].chars().next_back()
    } else {
        text[i..].chars().next()
    };
    ch.is_some_and(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_first_curly_balanced ====================

    #[test]
    fn test_extract_nested() {
        let inner = extract_first_curly_balanced("noise {outer {inner} more} trailing").unwrap();
        assert_eq!(inner, "outer {inner} more");
    }

    #[test]
    fn test_extract_no_braces() {
        assert!(matches!(
            extract_first_curly_balanced("no braces here"),
            Err(ExtractError::NotFound)
        ));
    }

    #[test]
    fn test_extract_close_before_open() {
        assert!(matches!(
            extract_first_curly_balanced("} {valid}"),
            Err(ExtractError::UnbalancedClose)
        ));
    }

    #[test]
    fn test_extract_unclosed() {
        assert!(matches!(
            extract_first_curly_balanced("start { never closed"),
            Err(ExtractError::NotFound)
        ));
    }

    #[test]
    fn test_extract_first_of_several() {
        assert_eq!(extract_first_curly_balanced("{a} {b}").unwrap(), "a");
    }

    // ==================== pre-clean ====================

    #[test]
    fn test_strip_trailing_comment() {
        let cleaned = clean_fragment("\"accuracy\": 4, // solid\n\"clarity\": 5");
        assert_eq!(cleaned, "\"accuracy\": 4,\n\"clarity\": 5");
    }

    #[test]
    fn test_comment_inside_string_preserved() {
        let cleaned = clean_fragment("\"source\": \"https://example.com\" // real comment");
        assert_eq!(cleaned, "\"source\": \"https://example.com\"");
    }

    #[test]
    fn test_null_becomes_zero() {
        assert_eq!(clean_fragment("\"grounding\": null"), "\"grounding\": 0");
    }

    #[test]
    fn test_null_inside_string_or_word_preserved() {
        assert_eq!(clean_fragment("\"note\": \"null result\""), "\"note\": \"null result\"");
        assert_eq!(clean_fragment("\"nullable\": 1"), "\"nullable\": 1");
    }

    // ==================== parse_object ====================

    #[test]
    fn test_parse_object_with_commentary() {
        let text = r#"Sure! Here is my evaluation:
{"scores": {"accuracy": 4, "clarity": null}, // rubric
 "confidence_estimate": 0.8}
Hope that helps."#;
        let value = parse_object(text).unwrap();
        assert_eq!(value["scores"]["accuracy"], 4);
        assert_eq!(value["scores"]["clarity"], 0);
        assert_eq!(value["confidence_estimate"], 0.8);
    }

    #[test]
    fn test_parse_object_invalid_json() {
        // Brace-balanced but structurally broken
        let err = parse_object("{not json at all}").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_parse_object_trailing_garbage_tolerated() {
        let value = parse_object("prefix {\"a\": 1} suffix {\"b\": 2}").unwrap();
        assert_eq!(value["a"], 1);
        assert!(value.get("b").is_none());
    }
}
