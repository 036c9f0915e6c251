use regex::{Regex, RegexBuilder};

use crate::domain::LexiconEntry;

const PATTERN_SIZE_LIMIT: usize = 64 * 1024 * 1024;

struct Rule {
    entry_id: i64,
    correction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedText {
    pub text: String,
    /// Ids of lexicon entries that matched the original text.
    pub applied: Vec<i64>,
}

/// Replaces lexicon terms with their corrections.
///
/// Terms match case-insensitively on Unicode word boundaries. All terms are
/// matched in one pass over the original text, so an inserted correction is
/// never corrected again. Where terms overlap the longer one wins.
pub struct LexiconCorrector {
    pattern: Option<Regex>,
    rules: Vec<Rule>,
}

impl LexiconCorrector {
    pub fn new(entries: &[LexiconEntry]) -> Self {
        let mut sorted: Vec<&LexiconEntry> = entries
            .iter()
            .filter(|e| !e.term.trim().is_empty())
            .collect();
        sorted.sort_by_key(|e| std::cmp::Reverse(e.term.trim().chars().count()));

        let mut alternatives = Vec::with_capacity(sorted.len());
        let mut rules = Vec::with_capacity(sorted.len());
        for entry in sorted {
            if let Some(alternative) = term_pattern(entry.term.trim()) {
                alternatives.push(format!("({})", alternative));
                rules.push(Rule {
                    entry_id: entry.id,
                    correction: entry.correction.clone(),
                });
            }
        }

        if rules.is_empty() {
            return Self {
                pattern: None,
                rules,
            };
        }

        match RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(pattern) => Self {
                pattern: Some(pattern),
                rules,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    terms = rules.len(),
                    "Lexicon pattern rejected, corrections disabled"
                );
                Self {
                    pattern: None,
                    rules: Vec::new(),
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> CorrectedText {
        let Some(pattern) = &self.pattern else {
            return CorrectedText {
                text: text.to_string(),
                applied: Vec::new(),
            };
        };

        let mut output = String::with_capacity(text.len());
        let mut matched = vec![false; self.rules.len()];
        let mut last = 0;

        for caps in pattern.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            // Group i + 1 belongs to rule i.
            let Some(index) = (1..caps.len()).find(|&i| caps.get(i).is_some()) else {
                continue;
            };
            output.push_str(&text[last..whole.start()]);
            output.push_str(&self.rules[index - 1].correction);
            matched[index - 1] = true;
            last = whole.end();
        }
        output.push_str(&text[last..]);

        let applied = self
            .rules
            .iter()
            .zip(&matched)
            .filter(|(_, hit)| **hit)
            .map(|(rule, _)| rule.entry_id)
            .collect();

        CorrectedText {
            text: output,
            applied,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn term_pattern(term: &str) -> Option<String> {
    let first = term.chars().next()?;
    let last = term.chars().next_back()?;

    let prefix = if is_word_char(first) { r"\b" } else { "" };
    let suffix = if is_word_char(last) { r"\b" } else { "" };

    Some(format!("{}{}{}", prefix, regex::escape(term), suffix))
}
