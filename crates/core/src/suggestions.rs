//! Parsing of free-form suggestion lists returned by a reviewer model.

use regex::Regex;
use std::sync::LazyLock;

/// Leading list numbering such as "1. ", "2) " or "3 - ".
static NUMBERING_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9.\-) ]+").unwrap());

/// Extract suggestions from a model response.
///
/// Tries the JSON array spanning the first `[` to the last `]` first, then
/// falls back to numbered lines. If neither yields anything the whole
/// response becomes the only suggestion.
pub fn parse_suggestions(response: &str) -> Vec<String> {
    if let Some(list) = json_array(response) {
        match serde_json::from_str::<Vec<String>>(list) {
            Ok(suggestions) => return suggestions,
            Err(e) => log::warn!("Could not parse suggestions as JSON: {}", e),
        }
    }

    let suggestions: Vec<String> = response
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .map(|line| NUMBERING_REGEX.replace(line, "").to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if suggestions.is_empty() {
        vec![response.to_string()]
    } else {
        suggestions
    }
}

fn json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let response = "Here you go:\n[\"Use larger fonts\", \"Add a chart\"]\nGood luck";
        assert_eq!(
            parse_suggestions(response),
            vec!["Use larger fonts", "Add a chart"]
        );
    }

    #[test]
    fn test_numbered_lines_fallback() {
        let response = "Suggestions:\n1. Cut the text\n2) Add visuals\n  3 - Fix contrast\n- not numbered";
        assert_eq!(
            parse_suggestions(response),
            vec!["Cut the text", "Add visuals", "Fix contrast"]
        );
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let response = "[not json]\n1. Keep it short";
        assert_eq!(parse_suggestions(response), vec!["Keep it short"]);
    }

    #[test]
    fn test_whole_response_when_nothing_matches() {
        let response = "Looks fine overall.";
        assert_eq!(parse_suggestions(response), vec!["Looks fine overall."]);
    }

    #[test]
    fn test_numbering_only_lines_dropped() {
        assert_eq!(parse_suggestions("1.\n2. Real"), vec!["Real"]);
    }
}
