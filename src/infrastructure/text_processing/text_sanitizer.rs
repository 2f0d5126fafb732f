use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").expect("valid hyphenation regex")
});

/// Normalises text pulled out of a PDF page: NFKC, re-joined hyphenated line
/// breaks, control characters dropped, runs of spaces collapsed and runs of
/// blank lines reduced to one paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut out = String::with_capacity(de_hyphenated.len());
    let mut pending_break: Option<&str> = None;

    for line in de_hyphenated.lines().map(str::trim) {
        if line.is_empty() {
            if !out.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }
        if !out.is_empty() {
            out.push_str(pending_break.take().unwrap_or("\n"));
        }
        push_collapsed(line, &mut out);
    }

    out
}

fn push_collapsed(line: &str, out: &mut String) {
    let mut in_space = false;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
}
