//! Cross-reference extraction from section text.
//!
//! Citations are resolved in three passes over a working copy of the text.
//! Each pass rewrites what it resolved, so later and cruder patterns only
//! see plain `มาตรา N` tokens:
//!
//! 1. ranges (`มาตรา 5 ถึงมาตรา 8`) become one token per section,
//! 2. conjunctions (`มาตรา 5 (1) และ (2)`) become one token per sub-item,
//! 3. simple citations (`มาตรา 5`, `มาตรา 5(1)`, `มาตรา 5 ทวิ`) are collected.
//!
//! The result drops the citing section's own number, is deduplicated and
//! sorted.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::config::{MAX_RANGE_SPAN, ORDINAL_WORDS};
use crate::error::{ParserError, Result};

/// Regex alternation of the ordinal words, longest first.
///
/// Thai runs words together, so the alternation carries no word boundary.
static ORDINAL_ALTERNATION: LazyLock<String> = LazyLock::new(|| {
    let mut words: Vec<&str> = ORDINAL_WORDS.to_vec();
    words.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
    words
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|")
});

/// `มาตรา A ถึงมาตรา B`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"มาตรา (\d+(?:/\d+)?) ถึงมาตรา (\d+(?:/\d+)?)").expect("valid regex")
});

/// `มาตรา N [ordinal] (k1) และ (k2) ...`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONJUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"มาตรา \d+(?:/\d+)?(?:\s*(?:{}))?\s*\(\d+\)(?:\s*และ\s*\(\d+\))+",
        *ORDINAL_ALTERNATION
    ))
    .expect("valid regex")
});

/// Main-section token at the start of a conjunction.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CONJUNCTION_MAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^มาตรา \d+(?:/\d+)?(?:\s*(?:{}))?",
        *ORDINAL_ALTERNATION
    ))
    .expect("valid regex")
});

/// Parenthesised sub-item number.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUB_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("valid regex"));

/// `มาตรา N[/M][(k)][ ordinal[(k)]]`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SIMPLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"มาตรา \d+/?\d*\(?\d*/?\d*\)?(?:\s*(?:{})(?:\(\d+\))?)?",
        *ORDINAL_ALTERNATION
    ))
    .expect("valid regex")
});

/// Extract the sections cited by `content`.
///
/// # Arguments
/// * `content` - Raw section text
/// * `section_no` - Number of the citing section, dropped from the result
///
/// # Returns
/// Deduplicated, sorted section identifiers such as `"5"`, `"10/1"`,
/// `"5(1)"` or `"5 ทวิ"`.
///
/// # Errors
/// [`ParserError::RangeMismatch`] for a sub-index range whose endpoints
/// name different main sections.
///
/// # Examples
/// ```
/// use lawtree_parser::reference::extract_references;
///
/// let refs = extract_references("ให้นำมาตรา 5 ถึงมาตรา 8 มาใช้บังคับ", "5").unwrap();
/// assert_eq!(refs, vec!["6", "7", "8"]);
/// ```
pub fn extract_references(content: &str, section_no: &str) -> Result<Vec<String>> {
    let text = expand_ranges(content)?;
    let text = expand_conjunctions(&text);

    let references: BTreeSet<String> = simple_citations(&text)
        .into_iter()
        .filter(|reference| reference != section_no.trim())
        .collect();

    Ok(references.into_iter().collect())
}

/// Replace every range citation with one `มาตรา n` token per section.
pub fn expand_ranges(text: &str) -> Result<String> {
    let mut error = None;
    let expanded = RANGE_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        match expand_range(&caps[1], &caps[2]) {
            Ok(tokens) => tokens,
            Err(e) => {
                if error.is_none() {
                    error = Some(e);
                }
                caps[0].to_string()
            }
        }
    });

    match error {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn expand_range(start: &str, end: &str) -> Result<String> {
    let numbers: Vec<String> = match (start.split_once('/'), end.split_once('/')) {
        (Some((start_main, start_sub)), Some((end_main, end_sub))) => {
            if start_main != end_main {
                return Err(ParserError::RangeMismatch {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            let Some(subs) = bounded_range(parse_number(start_sub), parse_number(end_sub)) else {
                return Ok(endpoint_tokens(start, end));
            };
            subs.map(|sub| format!("{start_main}/{sub}")).collect()
        }
        _ => {
            let main_of = |number: &str| {
                parse_number(number.split_once('/').map_or(number, |(main, _)| main))
            };
            let Some(mains) = bounded_range(main_of(start), main_of(end)) else {
                return Ok(endpoint_tokens(start, end));
            };
            mains.map(|main| main.to_string()).collect()
        }
    };

    Ok(numbers
        .iter()
        .map(|number| format!("มาตรา {number}"))
        .collect::<Vec<_>>()
        .join(" "))
}

/// Inclusive range, or `None` when an endpoint is unreadable, reversed or
/// too wide to expand.
fn bounded_range(start: Option<u32>, end: Option<u32>) -> Option<std::ops::RangeInclusive<u32>> {
    let (Some(start), Some(end)) = (start, end) else {
        tracing::debug!("Range endpoint out of bounds");
        return None;
    };
    if start > end || end - start > MAX_RANGE_SPAN {
        tracing::debug!(start, end, "Range not expanded");
        return None;
    }
    Some(start..=end)
}

fn endpoint_tokens(start: &str, end: &str) -> String {
    format!("มาตรา {start} มาตรา {end}")
}

fn parse_number(number: &str) -> Option<u32> {
    number.parse().ok()
}

/// Replace every conjunction citation with one `มาตรา N(k)` token per sub-item.
#[must_use]
pub fn expand_conjunctions(text: &str) -> String {
    replace_unparenthesized(&CONJUNCTION_PATTERN, text, |matched| {
        let main = CONJUNCTION_MAIN
            .find(matched)
            .map_or(matched, |m| m.as_str())
            .trim();
        SUB_ITEM
            .find_iter(matched)
            .map(|item| format!("{main}{}", item.as_str()))
            .collect::<Vec<_>>()
            .join(" และ ")
    })
}

/// Collect simple citations, keyword stripped, in text order.
///
/// Citations directly preceded by `(` are not references.
#[must_use]
pub fn simple_citations(text: &str) -> Vec<String> {
    SIMPLE_PATTERN
        .find_iter(text)
        .filter(|m| !preceded_by_paren(text, m.start()))
        .map(|m| clean_brackets(m.as_str().replacen("มาตรา", "", 1).trim()))
        .filter(|reference| !reference.is_empty())
        .collect()
}

/// Drop parentheses unless the token holds a balanced pair.
fn clean_brackets(token: &str) -> String {
    if token.contains('(') && token.contains(')') {
        token.to_string()
    } else {
        token.replace(['(', ')'], "")
    }
}

fn preceded_by_paren(text: &str, start: usize) -> bool {
    text[..start].ends_with('(')
}

fn replace_unparenthesized(
    pattern: &Regex,
    text: &str,
    mut replace: impl FnMut(&str) -> String,
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if preceded_by_paren(text, m.start()) {
            continue;
        }
        result.push_str(&text[last..m.start()]);
        result.push_str(&replace(m.as_str()));
        last = m.end();
    }
    result.push_str(&text[last..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_excludes_self() {
        let refs = extract_references("มาตรา 5 ถึงมาตรา 8", "5").unwrap();
        assert_eq!(refs, vec!["6", "7", "8"]);
    }

    #[test]
    fn test_range_from_other_section() {
        let refs = extract_references("ตามมาตรา 5 ถึงมาตรา 8", "20").unwrap();
        assert_eq!(refs, vec!["5", "6", "7", "8"]);
    }

    #[test]
    fn test_sub_index_range() {
        let refs = extract_references("มาตรา 10/1 ถึงมาตรา 10/3", "1").unwrap();
        assert_eq!(refs, vec!["10/1", "10/2", "10/3"]);

        let refs = extract_references("มาตรา 10/1 ถึงมาตรา 10/3", "10/2").unwrap();
        assert_eq!(refs, vec!["10/1", "10/3"]);
    }

    #[test]
    fn test_sub_index_range_mismatch_is_error() {
        let err = extract_references("มาตรา 10/1 ถึงมาตรา 11/3", "1").unwrap_err();
        match err {
            ParserError::RangeMismatch { start, end } => {
                assert_eq!(start, "10/1");
                assert_eq!(end, "11/3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mixed_range_expands_main_numbers() {
        let refs = extract_references("มาตรา 10/1 ถึงมาตรา 12", "1").unwrap();
        assert_eq!(refs, vec!["10", "11", "12"]);
    }

    #[test]
    fn test_reversed_range_keeps_endpoints() {
        let refs = extract_references("มาตรา 8 ถึงมาตรา 5", "1").unwrap();
        assert_eq!(refs, vec!["5", "8"]);
    }

    #[test]
    fn test_range_overflow_keeps_endpoints() {
        let refs = extract_references("ตามมาตรา 5 ถึงมาตรา 99999999999", "1").unwrap();
        assert_eq!(refs, vec!["5", "99999999999"]);

        let refs = extract_references("มาตรา 3/1 ถึงมาตรา 3/99999999999", "1").unwrap();
        assert_eq!(refs, vec!["3/1", "3/99999999999"]);
    }

    #[test]
    fn test_conjunction() {
        let text = expand_conjunctions("ตามมาตรา 5 (1) และ (2)");
        assert_eq!(text, "ตามมาตรา 5(1) และ มาตรา 5(2)");

        let refs = extract_references("ตามมาตรา 5 (1) และ (2)", "1").unwrap();
        assert_eq!(refs, vec!["5(1)", "5(2)"]);
    }

    #[test]
    fn test_conjunction_without_space_and_three_items() {
        let refs = extract_references("มาตรา 7(1) และ (2) และ (4)", "1").unwrap();
        assert_eq!(refs, vec!["7(1)", "7(2)", "7(4)"]);
    }

    #[test]
    fn test_conjunction_with_ordinal() {
        let refs = extract_references("มาตรา 5 ทวิ (1) และ (3)", "1").unwrap();
        assert_eq!(refs, vec!["5 ทวิ(1)", "5 ทวิ(3)"]);
    }

    #[test]
    fn test_simple_references() {
        let refs = extract_references(
            "ตามมาตรา 12 หรือมาตรา 3/1 และมาตรา 12 แห่งประมวลกฎหมาย",
            "1",
        )
        .unwrap();
        assert_eq!(refs, vec!["12", "3/1"]);
    }

    #[test]
    fn test_simple_reference_with_ordinal() {
        let refs = extract_references("ตามมาตรา 5 ทวิ แห่งพระราชบัญญัตินี้", "1").unwrap();
        assert_eq!(refs, vec!["5 ทวิ"]);
    }

    #[test]
    fn test_ordinal_followed_by_word() {
        let refs = extract_references("ตามมาตรา 5 ทวิแห่งพระราชบัญญัตินี้", "1").unwrap();
        assert_eq!(refs, vec!["5 ทวิ"]);

        let refs = extract_references("มาตรา 7 ตรี(2)และมาตรา 9 จัตวาให้", "1").unwrap();
        assert_eq!(refs, vec!["7 ตรี(2)", "9 จัตวา"]);
    }

    #[test]
    fn test_longest_ordinal_wins() {
        let refs = extract_references("ตามมาตรา 4 สัตตรสแห่งประมวลกฎหมาย", "1").unwrap();
        assert_eq!(refs, vec!["4 สัตตรส"]);
    }

    #[test]
    fn test_balanced_brackets_kept() {
        let refs = extract_references("ตามมาตรา 5(2) แล้ว", "1").unwrap();
        assert_eq!(refs, vec!["5(2)"]);
    }

    #[test]
    fn test_unbalanced_brackets_stripped() {
        assert_eq!(clean_brackets("5("), "5");
        assert_eq!(clean_brackets("5)"), "5");
        assert_eq!(clean_brackets("5(1)"), "5(1)");
    }

    #[test]
    fn test_parenthesised_citation_skipped() {
        let refs = extract_references("(มาตรา 9 แก้ไขเพิ่มเติม) ตามมาตรา 10", "1").unwrap();
        assert_eq!(refs, vec!["10"]);
    }

    #[test]
    fn test_self_reference_dropped() {
        let refs = extract_references("มาตรา 4 บทบัญญัติแห่งมาตรา 4 นี้", "4").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_no_references() {
        let refs = extract_references("ให้รัฐมนตรีรักษาการตามพระราชบัญญัตินี้", "1").unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_expand_ranges_leaves_other_text() {
        let text = expand_ranges("ตามมาตรา 1 ถึงมาตรา 3 แล้ว").unwrap();
        assert_eq!(text, "ตามมาตรา 1 มาตรา 2 มาตรา 3 แล้ว");
    }

    #[test]
    fn test_simple_citations_in_order() {
        let citations = simple_citations("มาตรา 9 และมาตรา 2");
        assert_eq!(citations, vec!["9", "2"]);
    }
}
