use unicode_normalization::UnicodeNormalization;

/// Canonical form for stored transcripts.
///
/// Uses NFC rather than NFKC so Arabic-script presentation forms and the
/// zero-width non-joiner used in Persian survive untouched.
pub fn normalize_transcript(raw: &str) -> String {
    let composed: String = raw.nfc().collect();

    let mut result = String::with_capacity(composed.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in composed.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prev_was_blank = true;
            continue;
        }

        if !first_content {
            result.push_str(if prev_was_blank { "\n\n" } else { "\n" });
        }
        collapse_internal_whitespace(trimmed, &mut result);
        prev_was_blank = false;
        first_content = false;
    }

    result
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
