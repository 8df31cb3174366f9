/// Collapse the OCR output into one line: newlines become spaces, then each
/// occurrence of two consecutive spaces becomes one. The collapse is
/// deliberately shallow; longer runs of spaces are only halved, matching the
/// behavior the rest of the pipeline was built against.
pub fn normalize_extracted(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace('\n', " ")
        .replace('\r', " ")
        .replace("  ", " ")
}
