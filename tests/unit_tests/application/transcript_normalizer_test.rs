use medscribe::application::services::normalize_transcript;

#[test]
fn given_ragged_whitespace_when_normalizing_then_collapsed_and_trimmed() {
    let normalized = normalize_transcript("  Blood   pressure\t 120 over 80  ");

    assert_eq!(normalized, "Blood pressure 120 over 80");
}

#[test]
fn given_blank_lines_between_paragraphs_when_normalizing_then_single_paragraph_break_kept() {
    let normalized = normalize_transcript("Subjective.\n\n\n\nObjective.\nVitals stable.");

    assert_eq!(normalized, "Subjective.\n\nObjective.\nVitals stable.");
}

#[test]
fn given_decomposed_accents_when_normalizing_then_composed() {
    let normalized = normalize_transcript("cafe\u{0301}");

    assert_eq!(normalized, "caf\u{00e9}");
}

#[test]
fn given_persian_text_with_zwnj_when_normalizing_then_zwnj_preserved() {
    let normalized = normalize_transcript("می\u{200c}خواهم");

    assert_eq!(normalized, "می\u{200c}خواهم");
}

#[test]
fn given_only_whitespace_when_normalizing_then_empty() {
    assert_eq!(normalize_transcript(" \n\t\n "), "");
}
