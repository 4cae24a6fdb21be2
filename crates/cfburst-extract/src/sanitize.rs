/// Strip non-printable code points from a single path segment.
///
/// Keeps every printable code point, spaces included, in original order.
/// Compound-file entry names routinely open with control characters
/// (`\u{1}CompObj`, `\u{5}SummaryInformation`); those bytes are dropped.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}
