use std::fmt;
use std::str::FromStr;

/// Where a lexicon correction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexiconSource {
    Fda,
    RxNorm,
    Who,
    UserFeedback,
}

impl LexiconSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexiconSource::Fda => "fda",
            LexiconSource::RxNorm => "rxnorm",
            LexiconSource::Who => "who",
            LexiconSource::UserFeedback => "user_feedback",
        }
    }
}

impl FromStr for LexiconSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fda" => Ok(LexiconSource::Fda),
            "rxnorm" => Ok(LexiconSource::RxNorm),
            "who" => Ok(LexiconSource::Who),
            "user_feedback" => Ok(LexiconSource::UserFeedback),
            _ => Err(format!("Invalid lexicon source: {}", s)),
        }
    }
}

impl fmt::Display for LexiconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub id: i64,
    pub term: String,
    pub correction: String,
    pub frequency: i64,
    pub source: LexiconSource,
}
