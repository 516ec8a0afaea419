//! Course code extraction from assistant replies.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([A-Z]{2,3}\.[0-9]{5})\*\*").unwrap());
static STRICT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]{2,3}\.[0-9]{5})").unwrap());
static LOOSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]{2,3})[.\s_-]*([0-9]{5})").unwrap());

/// Pulls catalog codes (`AB.12345`) out of free text.
///
/// Bold-marked codes win when present; otherwise plain codes; otherwise
/// loosely separated ones (`AB 12345`, `AB-12345`) normalized to `AB.12345`.
/// Duplicates are dropped, keeping first-seen order.
pub fn extract_course_codes(message: &str) -> Vec<String> {
    let bold = dedup(
        BOLD_CODE_REGEX
            .captures_iter(message)
            .map(|caps| caps[1].to_string()),
    );
    if !bold.is_empty() {
        return bold;
    }

    let strict = dedup(
        STRICT_CODE_REGEX
            .captures_iter(message)
            .map(|caps| caps[1].to_string()),
    );
    if !strict.is_empty() {
        return strict;
    }

    dedup(
        LOOSE_CODE_REGEX
            .captures_iter(message)
            .map(|caps| format!("{}.{}", &caps[1], &caps[2])),
    )
}

fn dedup(codes: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for code in codes {
        if !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_codes_take_priority() {
        let msg = "Take **CS.20004** and **MAS.10001**, maybe PH.10001 later. **CS.20004** again.";
        assert_eq!(extract_course_codes(msg), vec!["CS.20004", "MAS.10001"]);
    }

    #[test]
    fn test_strict_codes() {
        let msg = "1. CS.20004 Discrete Math\n2. EE.20001 Circuits\n3. CS.20004";
        assert_eq!(extract_course_codes(msg), vec!["CS.20004", "EE.20001"]);
    }

    #[test]
    fn test_loose_codes_normalized() {
        let msg = "Try CS 20004, then EE-20001 or MAS_10001.";
        assert_eq!(
            extract_course_codes(msg),
            vec!["CS.20004", "EE.20001", "MAS.10001"]
        );
    }

    #[test]
    fn test_no_codes() {
        assert!(extract_course_codes("I have no recommendations.").is_empty());
    }
}
