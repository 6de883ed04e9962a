//! Text similarity for fuzzy gazetteer matching.
//!
//! The matcher scores candidate windows with the normalized Indel
//! similarity (the classic fuzzy "ratio"):
//!
//! ```text
//! ratio(a, b) = 100 · 2·LCS(a, b) / (|a| + |b|)
//! ```
//!
//! where `LCS` is the longest common subsequence. Only insertions and
//! deletions count, so a substitution costs 2 and "leverkusn" vs
//! "leverkusen" (one deletion) scores 2·9/19 ≈ 94.7.

/// Length of the longest common subsequence of `a` and `b`.
///
/// Two-row dynamic program: O(|a|·|b|) time, O(min(|a|, |b|)) space.
#[must_use]
pub fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for x in long {
        for (j, y) in short.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Normalized Indel similarity on the 0-100 scale.
///
/// Returns 100.0 when both inputs are empty.
///
/// # Examples
///
/// ```
/// use gaffer::similarity::ratio;
///
/// let a: Vec<char> = "leverkusen".chars().collect();
/// let b: Vec<char> = "leverkusn".chars().collect();
/// assert!(ratio(&a, &b) > 94.0);
/// assert_eq!(ratio(&a, &a), 100.0);
/// ```
#[must_use]
pub fn ratio<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * (2 * lcs_len(a, b)) as f64 / total as f64
}

/// [`ratio`] over string slices, compared by `char`.
#[must_use]
pub fn str_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}
