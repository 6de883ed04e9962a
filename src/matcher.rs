//! Fuzzy span matcher: find the window of a text that best matches a
//! gazetteer pattern.
//!
//! # Algorithm
//!
//! ```text
//! text    = "who is coaching munich"   (n = 22)
//! pattern = "munich"                    (m = 6, max_deviation = 3)
//!
//! window lengths w ∈ [max(1, m-3), min(n, m+3)] = [3, 9]
//! for w in 3..=9:
//!     for i in 0..=n-w:
//!         score = ratio(pattern, text[i..i+w])
//!         keep if score > best          (strict: first found wins ties)
//! ```
//!
//! That is O((2·max_deviation + 1) · n) ratio calls, each O(m·w). Fine for
//! club names against single-sentence questions; long documents need an
//! indexed approach behind the same [`SpanMatcher::best_span`] contract.
//!
//! Ties resolve to the shortest window, then the lowest start, because
//! window length is the outer loop.

use gaffer_core::{Error, Result, SpanMatch};

use crate::similarity::ratio;

/// Default minimum similarity (0-100) for a window to count as a match.
pub const DEFAULT_THRESHOLD: u32 = 90;

/// Default bound on how far a window's length may differ from the pattern's.
pub const DEFAULT_MAX_DEVIATION: usize = 3;

/// Lowercase `text` one char at a time, preserving char count.
///
/// Offsets found in the folded text are valid char offsets into the
/// original. Characters whose lowercase form expands to several chars keep
/// only the first one.
#[must_use]
pub fn fold_lowercase(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Result of scanning one pattern against one text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scan {
    pub best: Option<SpanMatch>,
    pub comparisons: usize,
}

/// Bounded-window fuzzy substring matcher.
///
/// Pure and immutable: safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanMatcher {
    threshold: u32,
    max_deviation: usize,
}

impl Default for SpanMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MAX_DEVIATION)
    }
}

impl SpanMatcher {
    /// Create a matcher.
    ///
    /// A `threshold` above 100 is accepted and never matches.
    #[must_use]
    pub const fn new(threshold: u32, max_deviation: usize) -> Self {
        Self {
            threshold,
            max_deviation,
        }
    }

    /// Minimum similarity score for a match.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Maximum window length deviation from the pattern length.
    #[must_use]
    pub const fn max_deviation(&self) -> usize {
        self.max_deviation
    }

    /// Inclusive window length range for a text of `n` chars and a pattern
    /// of `m` chars, or `None` when no window fits.
    #[must_use]
    pub fn window_bounds(&self, n: usize, m: usize) -> Option<(usize, usize)> {
        let lo = m.saturating_sub(self.max_deviation).max(1);
        let hi = n.min(m.saturating_add(self.max_deviation));
        (lo <= hi).then_some((lo, hi))
    }

    /// Best-matching window of `text_lc` for `pattern_lc`.
    ///
    /// Both inputs must already be lowercased (see [`fold_lowercase`]).
    /// Returns `Ok(None)` when no window reaches the threshold.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the pattern is empty.
    pub fn best_span(&self, text_lc: &[char], pattern_lc: &[char]) -> Result<Option<SpanMatch>> {
        self.scan(text_lc, pattern_lc).map(|scan| scan.best)
    }

    /// [`best_span`](Self::best_span) over string slices.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gaffer::SpanMatcher;
    ///
    /// let matcher = SpanMatcher::new(90, 3);
    /// let m = matcher.best_span_str("who is coaching munich", "munich").unwrap().unwrap();
    /// assert_eq!((m.start, m.end), (16, 22));
    /// assert_eq!(m.score, 100.0);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the pattern is empty.
    pub fn best_span_str(&self, text_lc: &str, pattern_lc: &str) -> Result<Option<SpanMatch>> {
        let text: Vec<char> = text_lc.chars().collect();
        let pattern: Vec<char> = pattern_lc.chars().collect();
        self.best_span(&text, &pattern)
    }

    pub(crate) fn scan(&self, text: &[char], pattern: &[char]) -> Result<Scan> {
        if pattern.is_empty() {
            return Err(Error::invalid_input("gazetteer pattern must not be empty"));
        }

        let mut scan = Scan {
            best: None,
            comparisons: 0,
        };
        let Some((lo, hi)) = self.window_bounds(text.len(), pattern.len()) else {
            return Ok(scan);
        };

        for win in lo..=hi {
            for start in 0..=text.len() - win {
                let score = ratio(pattern, &text[start..start + win]);
                scan.comparisons += 1;
                if scan.best.map_or(true, |best| score > best.score) {
                    scan.best = Some(SpanMatch {
                        start,
                        end: start + win,
                        score,
                    });
                }
            }
        }

        scan.best = scan
            .best
            .filter(|best| best.score >= f64::from(self.threshold));
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn exact_substring_scores_hundred() {
        let m = SpanMatcher::default()
            .best_span(&chars("who is coaching munich"), &chars("munich"))
            .unwrap()
            .unwrap();
        assert_eq!((m.start, m.end), (16, 22));
        assert_eq!(m.score, 100.0);
    }

    #[test]
    fn misspelling_within_budget() {
        let m = SpanMatcher::new(90, 1)
            .best_span(&chars("who coaches leverkusn"), &chars("leverkusen"))
            .unwrap()
            .expect("should match");
        assert!(m.score >= 90.0, "score {}", m.score);
        assert_eq!(&"who coaches leverkusn"[m.start..m.end], "leverkusn");
    }

    #[test]
    fn zero_deviation_only_tries_pattern_length() {
        assert_eq!(SpanMatcher::new(91, 0).window_bounds(20, 6), Some((6, 6)));

        // With no slack the 10-char window must swallow the leading space
        // (" leverkusn" scores 90); one char of slack finds "leverkusn" (94.7).
        let text = chars("x leverkusn");
        let pattern = chars("leverkusen");
        assert!(SpanMatcher::new(91, 0).best_span(&text, &pattern).unwrap().is_none());
        let m = SpanMatcher::new(91, 1).best_span(&text, &pattern).unwrap().unwrap();
        assert_eq!((m.start, m.end), (2, 11));
    }

    #[test]
    fn threshold_above_hundred_never_matches() {
        let m = SpanMatcher::new(101, 3)
            .best_span(&chars("munich"), &chars("munich"))
            .unwrap();
        assert!(m.is_none());
    }

    #[test]
    fn empty_pattern_is_invalid() {
        let err = SpanMatcher::default()
            .best_span(&chars("munich"), &[])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn empty_text_has_no_candidates() {
        let matcher = SpanMatcher::default();
        assert_eq!(matcher.window_bounds(0, 6), None);
        assert!(matcher.best_span(&[], &chars("munich")).unwrap().is_none());
    }

    #[test]
    fn pattern_longer_than_text_plus_deviation() {
        let matcher = SpanMatcher::new(0, 2);
        // lo = 10 - 2 = 8 > n = 5
        assert_eq!(matcher.window_bounds(5, 10), None);
        assert!(matcher
            .best_span(&chars("mainz"), &chars("hoffenheim"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn short_pattern_window_floor_is_one() {
        let matcher = SpanMatcher::new(0, 5);
        assert_eq!(matcher.window_bounds(10, 2), Some((1, 7)));
    }

    #[test]
    fn ties_keep_first_found() {
        // "ab" occurs twice; both windows score 100, the earlier one wins
        let m = SpanMatcher::new(90, 0)
            .best_span(&chars("ab ab"), &chars("ab"))
            .unwrap()
            .unwrap();
        assert_eq!((m.start, m.end), (0, 2));
    }

    #[test]
    fn exact_window_beats_neighbours() {
        let matcher = SpanMatcher::new(0, 1);
        // "main" scores 88.9, "mainz " 90.9, "mainz" 100
        let m = matcher.best_span(&chars("mainz 05"), &chars("mainz")).unwrap().unwrap();
        assert_eq!((m.start, m.end), (0, 5));
    }

    #[test]
    fn counts_comparisons() {
        let scan = SpanMatcher::new(90, 1)
            .scan(&chars("abcdef"), &chars("abc"))
            .unwrap();
        // w=2: 5 starts, w=3: 4, w=4: 3
        assert_eq!(scan.comparisons, 12);
    }

    #[test]
    fn fold_lowercase_preserves_length() {
        let text = "Wer trainiert KÖLN?";
        let folded = fold_lowercase(text);
        assert_eq!(folded.len(), text.chars().count());
        assert_eq!(folded.iter().collect::<String>(), "wer trainiert köln?");
    }
}
