#![forbid(unsafe_code)]

//! Tiered fuzzy matching for library search.
//!
//! Scores are in `[0.0, 1.0]`, case-insensitive throughout. The first tier
//! that applies wins:
//!
//! | Tier          | Condition                         | Score                                   |
//! |---------------|-----------------------------------|-----------------------------------------|
//! | `EmptyQuery`  | query is empty                    | 1.0                                     |
//! | `NoMatch`     | label is empty                    | 0.0                                     |
//! | `Exact`       | equal                             | 1.0                                     |
//! | `Prefix`      | label starts with query           | 0.95                                    |
//! | `Substring`   | label contains query at `p`       | `0.9 - (p / len) * 0.1`, in `(0.8, 0.9]`|
//! | `Subsequence` | query chars appear in order       | `(0.4 + 0.4 * run + 0.2 * cover) * 0.8` |
//! | `NoMatch`     | otherwise                         | 0.0                                     |
//!
//! For subsequences, `run` is the longest run of consecutively matched label
//! characters divided by the query length and `cover` is
//! `min(1, query_len / label_len)`. The `0.8` factor keeps every subsequence
//! match at or below the weakest containment match.
//!
//! Positions and lengths are counted in `char`s of the lowercased label.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Threshold applied by [`search`] and [`FuzzyMatcher::default`].
pub const DEFAULT_MIN_SCORE: f64 = 0.1;

const PREFIX_SCORE: f64 = 0.95;
const SUBSTRING_BASE: f64 = 0.9;
const SUBSTRING_SPREAD: f64 = 0.1;
const SUBSEQUENCE_CAP: f64 = 0.8;

// ---------------------------------------------------------------------------
// Match tiers
// ---------------------------------------------------------------------------

/// Which scoring tier produced a result. Ordered weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchTier {
    /// Query characters do not all appear in order.
    NoMatch,
    /// Query characters appear in order with gaps.
    Subsequence,
    /// Query appears contiguously, not at the start.
    Substring,
    /// Label starts with the query.
    Prefix,
    /// Label equals the query.
    Exact,
    /// Query is empty; everything matches.
    EmptyQuery,
}

impl MatchTier {
    /// Whether this tier counts as a match at all.
    #[must_use]
    pub const fn is_match(self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// A scored match with highlight positions.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch {
    /// Score in `[0.0, 1.0]`.
    pub score: f64,
    /// Tier that produced the score.
    pub tier: MatchTier,
    /// Matched `char` indices into the lowercased label, ascending.
    pub positions: Vec<usize>,
}

impl FuzzyMatch {
    fn no_match() -> Self {
        Self {
            score: 0.0,
            tier: MatchTier::NoMatch,
            positions: Vec::new(),
        }
    }

    fn contiguous(score: f64, tier: MatchTier, start: usize, len: usize) -> Self {
        Self {
            score,
            tier,
            positions: (start..start + len).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score `query` against `label` and report how it matched.
#[must_use]
pub fn score_detailed(query: &str, label: &str) -> FuzzyMatch {
    if query.is_empty() {
        return FuzzyMatch {
            score: 1.0,
            tier: MatchTier::EmptyQuery,
            positions: Vec::new(),
        };
    }
    if label.is_empty() {
        return FuzzyMatch::no_match();
    }

    let query = query.to_lowercase();
    let label = label.to_lowercase();
    let query_len = query.chars().count();
    let label_len = label.chars().count();

    if query == label {
        return FuzzyMatch::contiguous(1.0, MatchTier::Exact, 0, label_len);
    }
    if label.starts_with(&query) {
        return FuzzyMatch::contiguous(PREFIX_SCORE, MatchTier::Prefix, 0, query_len);
    }
    if let Some(byte_pos) = label.find(&query) {
        let pos = label[..byte_pos].chars().count();
        let score = SUBSTRING_BASE - (pos as f64 / label_len as f64) * SUBSTRING_SPREAD;
        return FuzzyMatch::contiguous(score, MatchTier::Substring, pos, query_len);
    }

    subsequence(&query, query_len, &label, label_len)
}

fn subsequence(query: &str, query_len: usize, label: &str, label_len: usize) -> FuzzyMatch {
    let mut wanted = query.chars().peekable();
    let mut positions = Vec::with_capacity(query_len);
    let mut run = 0usize;
    let mut longest_run = 0usize;

    for (pos, c) in label.chars().enumerate() {
        let Some(&next) = wanted.peek() else {
            break;
        };
        if c != next {
            continue;
        }
        wanted.next();
        run = match positions.last() {
            Some(&prev) if prev + 1 == pos => run + 1,
            _ => 1,
        };
        longest_run = longest_run.max(run);
        positions.push(pos);
    }

    if wanted.peek().is_some() {
        return FuzzyMatch::no_match();
    }

    let consecutive_bonus = longest_run as f64 / query_len as f64;
    let length_penalty = (query_len as f64 / label_len as f64).min(1.0);
    let score = (0.4 + 0.4 * consecutive_bonus + 0.2 * length_penalty) * SUBSEQUENCE_CAP;
    FuzzyMatch {
        score,
        tier: MatchTier::Subsequence,
        positions,
    }
}

/// Score `query` against `label` in `[0.0, 1.0]`.
#[must_use]
pub fn score(query: &str, label: &str) -> f64 {
    score_detailed(query, label).score
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// One ranked search result, borrowing the original candidate.
#[derive(Debug, PartialEq)]
pub struct Ranked<'a, T> {
    /// Position of the candidate in the searched slice.
    pub index: usize,
    /// The candidate itself.
    pub item: &'a T,
    /// Its score.
    pub score: f64,
}

impl<T> Clone for Ranked<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ranked<'_, T> {}

/// Scores and ranks candidates against a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    min_score: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl FuzzyMatcher {
    /// Matcher with the default threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher keeping results scoring at least `min_score`.
    ///
    /// The threshold is clamped into `[0.0, 1.0]`; NaN falls back to the
    /// default.
    #[must_use]
    pub fn with_min_score(min_score: f64) -> Self {
        let min_score = if min_score.is_nan() {
            DEFAULT_MIN_SCORE
        } else {
            min_score.clamp(0.0, 1.0)
        };
        Self { min_score }
    }

    /// Current threshold.
    #[must_use]
    pub const fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Score one label.
    #[must_use]
    pub fn score(&self, query: &str, label: &str) -> f64 {
        score(query, label)
    }

    /// Rank `items` by how well `label_of(item)` matches `query`.
    ///
    /// Results below the threshold are dropped and the rest sorted by
    /// descending score; equal scores keep their original order. A query that
    /// is empty after trimming returns every item with score 1.0 in order.
    pub fn search<'a, T, F>(&self, items: &'a [T], query: &str, label_of: F) -> Vec<Ranked<'a, T>>
    where
        F: Fn(&T) -> &str,
    {
        let query = query.trim();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "fuzzy.search",
            query = query,
            candidates = items.len(),
            min_score = self.min_score
        )
        .entered();

        if query.is_empty() {
            return items
                .iter()
                .enumerate()
                .map(|(index, item)| Ranked {
                    index,
                    item,
                    score: 1.0,
                })
                .collect();
        }

        let mut ranked: Vec<Ranked<'a, T>> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let score = score(query, label_of(item));
                (score >= self.min_score).then_some(Ranked { index, item, score })
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        tenfoot_core::trace!(query, results = ranked.len(), "search ranked");
        ranked
    }
}

/// Rank `items` with the default threshold.
pub fn search<'a, T, F>(items: &'a [T], query: &str, label_of: F) -> Vec<Ranked<'a, T>>
where
    F: Fn(&T) -> &str,
{
    FuzzyMatcher::default().search(items, query, label_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMES: [&str; 3] = ["Minecraft", "Terraria", "Counter-Strike 2"];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_inputs() {
        assert_eq!(score("", "anything"), 1.0);
        assert_eq!(score("", ""), 1.0);
        assert_eq!(score("x", ""), 0.0);
        assert_eq!(score_detailed("", "a").tier, MatchTier::EmptyQuery);
    }

    #[test]
    fn exact_ignores_case() {
        assert_eq!(score("Test", "test"), 1.0);
        let detailed = score_detailed("ABC", "abc");
        assert_eq!(detailed.tier, MatchTier::Exact);
        assert_eq!(detailed.positions, vec![0, 1, 2]);
    }

    #[test]
    fn prefix_beats_later_substring() {
        let prefix = score("mine", "Minecraft");
        let substring = score("craft", "Minecraft");
        assert_eq!(prefix, 0.95);
        assert!(prefix > substring, "{prefix} vs {substring}");
        assert!(approx(substring, 0.9 - (4.0 / 9.0) * 0.1), "{substring}");
    }

    #[test]
    fn substring_score_decreases_with_position() {
        let early = score("bc", "abcdef");
        let late = score("ef", "abcdef");
        assert!(early > late);
        assert!(late > 0.8 && early <= 0.9);
        assert_eq!(score_detailed("ef", "abcdef").positions, vec![4, 5]);
    }

    #[test]
    fn subsequence_scores_below_containment() {
        let detailed = score_detailed("cs2", "Counter-Strike 2");
        assert_eq!(detailed.tier, MatchTier::Subsequence);
        assert_eq!(detailed.positions, vec![0, 8, 15]);
        // Longest run 1 of 3, coverage 3/16.
        let expected = (0.4 + 0.4 * (1.0 / 3.0) + 0.2 * (3.0 / 16.0)) * 0.8;
        assert!(approx(detailed.score, expected), "{}", detailed.score);
        assert!(detailed.score < 0.8);
    }

    #[test]
    fn consecutive_runs_raise_subsequence_score() {
        let tight = score("terr", "The Terraria");
        let loose = score("tera", "The Terraria");
        assert_eq!(score_detailed("terr", "The Terraria").tier, MatchTier::Substring);
        assert!(tight > loose);
        assert_eq!(score_detailed("tera", "t e r a").tier, MatchTier::Subsequence);
        assert!(score("ab", "a_b") < score("ab", "ab_"));
    }

    #[test]
    fn unrelated_text_scores_zero() {
        assert_eq!(score("xyz", "abc"), 0.0);
        assert_eq!(score("ba", "ab"), 0.0);
        assert!(!score_detailed("xyz", "abc").tier.is_match());
    }

    #[test]
    fn non_ascii_positions_are_char_indices() {
        let detailed = score_detailed("ké", "Pokémon");
        assert_eq!(detailed.tier, MatchTier::Substring);
        assert_eq!(detailed.positions, vec![2, 3]);
    }

    #[test]
    fn search_ranks_prefix_first() {
        let results = search(&GAMES, "mine", |g| *g);
        assert_eq!(results.len(), 1);
        assert_eq!(*results[0].item, "Minecraft");
        assert_eq!(results[0].index, 0);
    }

    #[test]
    fn search_blank_query_keeps_everything_in_order() {
        for query in ["", "   "] {
            let results = search(&GAMES, query, |g| *g);
            let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
            assert_eq!(indices, vec![0, 1, 2], "query {query:?}");
            assert!(results.iter().all(|r| r.score == 1.0));
        }
    }

    #[test]
    fn search_is_stable_for_ties() {
        let items = ["Alpha Zero", "Beta Zero", "Gamma Zero"];
        let results = search(&items, "zero", |s| *s);
        let indices: Vec<usize> = results.iter().map(|r| r.index).collect();
        // "Beta Zero" matches relatively earlier; the other two tie and keep order.
        assert_eq!(indices, vec![1, 0, 2]);
    }

    #[test]
    fn threshold_filters_weak_matches() {
        let strict = FuzzyMatcher::with_min_score(0.9);
        let results = strict.search(&GAMES, "tr", |g| *g);
        assert!(results.iter().all(|r| r.score >= 0.9), "{results:?}");
        assert!(FuzzyMatcher::with_min_score(f64::NAN).min_score() == DEFAULT_MIN_SCORE);
        assert_eq!(FuzzyMatcher::with_min_score(3.0).min_score(), 1.0);
    }

    #[test]
    fn search_borrows_original_items() {
        struct Game {
            name: String,
        }
        let games = vec![
            Game {
                name: "Portal".into(),
            },
            Game {
                name: "Portal 2".into(),
            },
        ];
        let results = search(&games, "portal", |g| g.name.as_str());
        assert!(std::ptr::eq(results[0].item, &games[0]));
        assert_eq!(results[1].item.name, "Portal 2");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scores_are_bounded(query in ".{0,12}", label in ".{0,24}") {
                let s = score(&query, &label);
                prop_assert!((0.0..=1.0).contains(&s), "score {} for {:?} / {:?}", s, query, label);
            }

            #[test]
            fn search_results_descend(
                labels in prop::collection::vec("[a-z ]{0,12}", 0..20),
                query in "[a-z]{1,4}",
            ) {
                let results = search(&labels, &query, |s| s.as_str());
                for pair in results.windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }

            #[test]
            fn matching_is_case_insensitive(query in "[a-zA-Z]{1,6}", label in "[a-zA-Z]{0,12}") {
                let lower = score(&query.to_lowercase(), &label.to_lowercase());
                prop_assert_eq!(score(&query, &label), lower);
            }
        }
    }
}
