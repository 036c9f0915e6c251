use medscribe::application::services::LexiconCorrector;
use medscribe::domain::{LexiconEntry, LexiconSource};

fn entry(id: i64, term: &str, correction: &str) -> LexiconEntry {
    LexiconEntry {
        id,
        term: term.to_string(),
        correction: correction.to_string(),
        frequency: 0,
        source: LexiconSource::Fda,
    }
}

#[test]
fn given_misheard_drug_name_when_correcting_then_replaced_case_insensitively() {
    let corrector = LexiconCorrector::new(&[entry(1, "metaformin", "metformin")]);

    let corrected = corrector.apply("Started Metaformin 500mg twice daily");

    assert_eq!(corrected.text, "Started metformin 500mg twice daily");
    assert_eq!(corrected.applied, vec![1]);
}

#[test]
fn given_term_inside_longer_word_when_correcting_then_left_alone() {
    let corrector = LexiconCorrector::new(&[entry(1, "asa", "aspirin")]);

    let corrected = corrector.apply("Patient from Kasama takes asa daily");

    assert_eq!(corrected.text, "Patient from Kasama takes aspirin daily");
}

#[test]
fn given_overlapping_terms_when_correcting_then_longest_term_applies_first() {
    let corrector = LexiconCorrector::new(&[
        entry(1, "lip", "LIP"),
        entry(2, "lip itor", "Lipitor"),
    ]);

    let corrected = corrector.apply("prescribed lip itor");

    assert_eq!(corrected.text, "prescribed Lipitor");
    assert_eq!(corrected.applied, vec![2]);
}

#[test]
fn given_correction_with_dollar_sign_when_correcting_then_inserted_literally() {
    let corrector = LexiconCorrector::new(&[entry(1, "copay", "$20 copay")]);

    let corrected = corrector.apply("the copay was paid");

    assert_eq!(corrected.text, "the $20 copay was paid");
}

#[test]
fn given_persian_term_when_correcting_then_matches_on_word_boundaries() {
    let corrector = LexiconCorrector::new(&[entry(7, "استامینوفن", "استامینوفن ۵۰۰")]);

    let corrected = corrector.apply("بیمار استامینوفن مصرف کرد");

    assert_eq!(corrected.text, "بیمار استامینوفن ۵۰۰ مصرف کرد");
    assert_eq!(corrected.applied, vec![7]);
}

#[test]
fn given_no_matching_terms_when_correcting_then_text_unchanged_and_nothing_applied() {
    let corrector = LexiconCorrector::new(&[entry(1, "metaformin", "metformin")]);

    let corrected = corrector.apply("No medication changes");

    assert_eq!(corrected.text, "No medication changes");
    assert!(corrected.applied.is_empty());
}

#[test]
fn given_blank_terms_when_building_then_ignored() {
    let corrector = LexiconCorrector::new(&[entry(1, "   ", "x")]);

    assert!(corrector.is_empty());
}

#[test]
fn given_correction_containing_shorter_term_when_correcting_then_correction_not_rewritten() {
    let corrector = LexiconCorrector::new(&[
        entry(1, "hypertension", "high BP"),
        entry(2, "bp", "blood pressure"),
    ]);

    let corrected = corrector.apply("history of hypertension");

    assert_eq!(corrected.text, "history of high BP");
    assert_eq!(corrected.applied, vec![1]);
}

#[test]
fn given_both_terms_in_original_text_when_correcting_then_each_replaced_once() {
    let corrector = LexiconCorrector::new(&[
        entry(1, "hypertension", "high BP"),
        entry(2, "bp", "blood pressure"),
    ]);

    let corrected = corrector.apply("hypertension, bp 150/90, BP rechecked");

    assert_eq!(
        corrected.text,
        "high BP, blood pressure 150/90, blood pressure rechecked"
    );
    assert_eq!(corrected.applied, vec![1, 2]);
}
