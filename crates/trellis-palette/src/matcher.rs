#![forbid(unsafe_code)]

//! Case-insensitive command matching and scoring.
//!
//! A query is compared against a candidate in order of decreasing strength:
//! exact, prefix, word-start (`"gd"` against `"Go Dashboard"`), contiguous
//! substring, and finally fuzzy (query characters appear in order with gaps).
//!
//! # Scoring
//!
//! Each [`MatchKind`] carries prior odds that the candidate is what the user
//! wants. The odds are multiplied by factors for an early first match, hits
//! on word boundaries, gaps between fuzzy hits, and how much of the candidate
//! the query covers. The score is the resulting probability
//! `odds / (1 + odds)`, so it always lies in `(0, 1)`.

use std::ops::Range;

// ---------------------------------------------------------------------------
// Match Kinds
// ---------------------------------------------------------------------------

/// How a query matched a candidate, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    /// Query characters found in order, with gaps.
    Fuzzy,
    /// Query found as a contiguous run.
    Substring,
    /// Query characters each start a word.
    WordStart,
    /// Candidate starts with the query.
    Prefix,
    /// Query equals the candidate.
    Exact,
}

impl MatchKind {
    /// Prior odds that a match of this kind is relevant.
    pub fn prior_odds(self) -> f64 {
        match self {
            Self::Exact => 99.0,
            Self::Prefix => 9.0,
            Self::WordStart => 4.0,
            Self::Substring => 2.0,
            Self::Fuzzy => 1.0 / 3.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// A successful match of a query against one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Relevance in `(0, 1)`; higher is better.
    pub score: f64,
    /// Strongest way the query matched.
    pub kind: MatchKind,
    /// Byte offsets in the candidate of each matched character.
    pub positions: Vec<usize>,
}

impl Match {
    /// Merge matched characters into contiguous byte ranges of `candidate`.
    ///
    /// `candidate` must be the text this match was produced from.
    pub fn highlights(&self, candidate: &str) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for &pos in &self.positions {
            let width = candidate
                .get(pos..)
                .and_then(|rest| rest.chars().next())
                .map_or(1, char::len_utf8);
            match ranges.last_mut() {
                Some(last) if last.end == pos => last.end = pos + width,
                _ => ranges.push(pos..pos + width),
            }
        }
        ranges
    }
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

#[inline]
fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '-' | '_')
}

/// Matches one query against many candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    query: String,
    folded: Vec<char>,
}

impl Matcher {
    /// Create a matcher for `query`. Matching ignores case.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let folded = query.chars().map(fold).collect();
        Self { query, folded }
    }

    /// The query as given.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether `candidate` matches at all.
    pub fn matches(&self, candidate: &str) -> bool {
        self.score(candidate).is_some()
    }

    /// Score `candidate`, or `None` when the query characters do not occur
    /// in order. An empty query matches nothing.
    pub fn score(&self, candidate: &str) -> Option<Match> {
        if self.folded.is_empty() {
            return None;
        }
        let chars: Vec<(usize, char)> = candidate
            .char_indices()
            .map(|(i, c)| (i, fold(c)))
            .collect();
        if self.folded.len() > chars.len() {
            return None;
        }

        let (kind, hits) = self.detect(&chars)?;
        let score = self.compute_score(kind, &hits, &chars);
        Some(Match {
            score,
            kind,
            positions: hits.into_iter().map(|i| chars[i].0).collect(),
        })
    }

    /// Find the strongest match kind and the matched char indices.
    fn detect(&self, chars: &[(usize, char)]) -> Option<(MatchKind, Vec<usize>)> {
        let q = self.folded.as_slice();
        let n = q.len();
        let run_equals = |start: usize| {
            chars[start..start + n]
                .iter()
                .map(|c| c.1)
                .eq(q.iter().copied())
        };

        if chars.len() == n && run_equals(0) {
            return Some((MatchKind::Exact, (0..n).collect()));
        }
        if run_equals(0) {
            return Some((MatchKind::Prefix, (0..n).collect()));
        }
        if let Some(hits) = self.subsequence(chars, |i| is_word_start(chars, i)) {
            return Some((MatchKind::WordStart, hits));
        }
        if let Some(start) = (0..=chars.len() - n).find(|&s| run_equals(s)) {
            return Some((MatchKind::Substring, (start..start + n).collect()));
        }
        self.subsequence(chars, |_| true)
            .map(|hits| (MatchKind::Fuzzy, hits))
    }

    /// Greedy in-order match of the query over the eligible chars.
    fn subsequence(
        &self,
        chars: &[(usize, char)],
        eligible: impl Fn(usize) -> bool,
    ) -> Option<Vec<usize>> {
        let mut hits = Vec::with_capacity(self.folded.len());
        let mut want = self.folded.iter().peekable();
        for (i, &(_, c)) in chars.iter().enumerate() {
            match want.peek() {
                Some(&&qc) if qc == c && eligible(i) => {
                    hits.push(i);
                    want.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        want.peek().is_none().then_some(hits)
    }

    fn compute_score(&self, kind: MatchKind, hits: &[usize], chars: &[(usize, char)]) -> f64 {
        let mut odds = kind.prior_odds();

        if let Some(&first) = hits.first() {
            odds *= 1.0 + (1.0 / (first as f64 + 1.0)) * 0.5;
        }

        let boundaries = hits.iter().filter(|&&i| is_word_start(chars, i)).count();
        if boundaries > 0 {
            odds *= 1.0 + boundaries as f64 * 0.3;
        }

        if kind == MatchKind::Fuzzy && hits.len() > 1 {
            let gap: usize = hits.windows(2).map(|w| w[1] - w[0] - 1).sum();
            odds *= 1.0 / (1.0 + gap as f64 * 0.1);
        }

        odds *= 1.0 + (self.folded.len() as f64 / chars.len() as f64) * 0.2;

        odds / (1.0 + odds)
    }
}

fn is_word_start(chars: &[(usize, char)], i: usize) -> bool {
    i == 0 || chars.get(i - 1).is_some_and(|&(_, prev)| is_separator(prev))
}
