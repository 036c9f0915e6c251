use medscribe::domain::LexiconSource;

#[test]
fn given_known_source_names_when_parsing_then_recognised() {
    assert_eq!("fda".parse::<LexiconSource>(), Ok(LexiconSource::Fda));
    assert_eq!("rxnorm".parse::<LexiconSource>(), Ok(LexiconSource::RxNorm));
    assert_eq!("who".parse::<LexiconSource>(), Ok(LexiconSource::Who));
    assert_eq!(
        "user_feedback".parse::<LexiconSource>(),
        Ok(LexiconSource::UserFeedback)
    );
}

#[test]
fn given_unknown_source_when_parsing_then_error() {
    assert!("wikipedia".parse::<LexiconSource>().is_err());
}

#[test]
fn given_source_when_displayed_then_matches_stored_value() {
    assert_eq!(LexiconSource::UserFeedback.to_string(), "user_feedback");
    assert_eq!(LexiconSource::RxNorm.as_str(), "rxnorm");
}
