//! WCAG metadata carried in rule tags.

/// Conformance level of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WcagLevel {
    A,
    AA,
    AAA,
}

/// Level from a version/level tag such as `wcag2a`, `wcag21aa` or `wcag2aaa`.
pub fn level_of_tag(tag: &str) -> Option<WcagLevel> {
    let rest = tag.strip_prefix("wcag")?;
    let letters = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    // Version digits are required and at most two (2, 21, 22).
    let digits = rest.len() - letters.len();
    if !(1..=2).contains(&digits) {
        return None;
    }
    match letters {
        "a" => Some(WcagLevel::A),
        "aa" => Some(WcagLevel::AA),
        "aaa" => Some(WcagLevel::AAA),
        _ => None,
    }
}

/// Level of a rule: the first level tag in its tag list.
pub fn level_of(tags: &[String]) -> Option<WcagLevel> {
    tags.iter().find_map(|tag| level_of_tag(tag))
}

/// Success criterion from a criterion tag: `wcag143` is `1.4.3`,
/// `wcag1410` is `1.4.10`.
pub fn criterion_of_tag(tag: &str) -> Option<String> {
    let digits = tag.strip_prefix("wcag")?;
    if digits.len() < 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (principle, rest) = digits.split_at(1);
    let (guideline, criterion) = rest.split_at(1);
    Some(format!("{}.{}.{}", principle, guideline, criterion))
}

/// All criteria named by a rule's tags, in tag order, without duplicates.
pub fn criteria(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for criterion in tags.iter().filter_map(|tag| criterion_of_tag(tag)) {
        if !out.contains(&criterion) {
            out.push(criterion);
        }
    }
    out
}
