// src/utils/text.rs - Whitespace, case and punctuation canonicalization
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// True for an absent string or one that is only whitespace.
pub fn is_blank(s: Option<&str>) -> bool {
    s.map_or(true, |s| s.trim().is_empty())
}

/// Collapse whitespace runs to a single space and trim, keeping case and punctuation.
///
/// Returns `None` when there is nothing left, so callers can tell "absent" apart
/// from a real display string.
pub fn normalize(s: Option<&str>) -> Option<String> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    Some(WHITESPACE_RUN.replace_all(s, " ").into_owned())
}

/// Lookup key for a name: non-word runs become one space, lowercased and trimmed.
/// Never meant for display.
pub fn tokenize(s: &str) -> String {
    NON_WORD_RUN
        .replace_all(s, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Capitalize every word of the normalized string. Gives `""` (not `None`) for
/// blank input.
pub fn title_case_location(s: Option<&str>) -> String {
    let Some(normalized) = normalize(s) else {
        return String::new();
    };
    normalized
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Push `element` unless it is blank or already in `list`.
pub fn add_unique(list: &mut Vec<String>, element: &str) -> bool {
    if is_blank(Some(element)) || list.iter().any(|existing| existing == element) {
        return false;
    }
    list.push(element.to_string());
    true
}

/// Flatten a map of lists into one list without duplicates, skipping `excludes`.
/// Order follows `keys`, then the order inside each list.
pub fn flatten<'a>(
    map: &'a HashMap<String, Vec<Option<String>>>,
    keys: &[&str],
    excludes: &[&str],
) -> Vec<&'a str> {
    let mut result: Vec<&str> = Vec::new();
    for key in keys {
        if excludes.contains(key) {
            continue;
        }
        for value in map.get(*key).into_iter().flatten().flatten() {
            if !result.contains(&value.as_str()) {
                result.push(value.as_str());
            }
        }
    }
    result
}
