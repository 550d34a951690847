//! Typo-tolerant text scoring.
//!
//! Scores are normalised edit distances: 0.0 is an exact (substring) hit,
//! 1.0 means nothing of the pattern was found. A candidate passes when its
//! best score is at or below the matcher's threshold.

/// Default inclusion threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Approximate substring matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    /// Create a matcher with the given threshold, clamped to 0.0..=1.0.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a pattern against one text.
    pub fn score(&self, pattern: &str, text: &str) -> f64 {
        let pattern: Vec<char> = pattern.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return 0.0;
        }
        let text: Vec<char> = text.to_lowercase().chars().collect();

        substring_distance(&pattern, &text) as f64 / pattern.len() as f64
    }

    /// Best score of a pattern over several texts, if any passes.
    pub fn best_match<'a, I>(&self, pattern: &str, texts: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts
            .into_iter()
            .map(|text| self.score(pattern, text))
            .filter(|score| *score <= self.threshold)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Smallest edit distance between `pattern` and any substring of `text`.
fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if text.is_empty() {
        return m;
    }

    // Column per text position; row 0 is free so a match may start anywhere.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut current = vec![0; m + 1];
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != tc);
            current[i] = (prev[i - 1] + cost)
                .min(prev[i] + 1)
                .min(current[i - 1] + 1);
        }
        best = best.min(current[m]);
        prev = current;
    }

    best
}
