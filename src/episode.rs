//! Episode identifier extraction from file names.
//!
//! Release groups name episode files inconsistently: some carry an explicit
//! `SxxExx` tag, some only a bare zero-padded number, some nothing usable at
//! all. [`extract_episode_id`] applies an ordered strategy list and returns
//! the first match; the strategy that produced a match is available through
//! [`extract_with_strategy`] for reporting.
//!
//! Strategy order, first match wins:
//!
//! 1. [`MatchStrategy::ExplicitTag`] — `S01E08`-style tags are authoritative
//!    whenever present.
//! 2. [`MatchStrategy::LooseHeuristic`] — a 2–3 digit token with optional
//!    `e`/`ep` marker, range suffix, and `v2`-style revision. This is a
//!    best-effort fallback and can misfire on dates or resolution tags; that
//!    is a documented, accepted risk.
//! 3. [`MatchStrategy::Unknown`] — nothing matched. The
//!    [`EpisodeId::Unknown`] sentinel disables processing for the file and
//!    is always reported, never silently dropped.
//!
//! # Example
//!
//! ```
//! use framealign::{extract_episode_id, EpisodeId};
//!
//! assert_eq!(extract_episode_id("Show.S01E08.1080p.mkv"), EpisodeId::Number(8));
//! assert_eq!(extract_episode_id("randomfile.mkv"), EpisodeId::Unknown);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use once_cell::sync::Lazy;
use regex::Regex;

/// `S01E08`-style tag. Anchored so that no path separator follows the match,
/// keeping the tag inside the final path segment.
static EXPLICIT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)S\d{1,3}E(\d{1,3})[^/\\]*$").expect("explicit tag pattern"));

/// Loose 2–3 digit token: optional `e`/`ep` marker, optional `-NN` range,
/// optional `vN` revision, terminated by whitespace, underscore, dot, or
/// hyphen. Known to misfire on dates and resolution tags.
static LOOSE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b|_)(?:ep?[ .]?)?(\d{2,3})(?:-\d{2,3})?(?:[_ ]?v\d+)?[\s_.\-]+")
        .expect("loose token pattern")
});

/// The episode a file represents, or the sentinel when extraction failed.
///
/// `Unknown` is never coerced to a number; callers must treat it as
/// "this file cannot participate in alignment or extraction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EpisodeId {
    /// A positive episode number parsed from the file name.
    Number(u32),
    /// No episode number could be derived.
    Unknown,
}

impl EpisodeId {
    /// The episode number, or `None` for the sentinel.
    pub fn number(self) -> Option<u32> {
        match self {
            EpisodeId::Number(n) => Some(n),
            EpisodeId::Unknown => None,
        }
    }

    /// Returns `true` when no episode number could be derived.
    pub fn is_unknown(self) -> bool {
        matches!(self, EpisodeId::Unknown)
    }
}

impl Display for EpisodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EpisodeId::Number(n) => write!(f, "{n}"),
            EpisodeId::Unknown => write!(f, "unknown"),
        }
    }
}

/// The strategy that produced an episode identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// An explicit `SxxExx` tag matched.
    ExplicitTag,
    /// The loose numeric-token heuristic matched.
    LooseHeuristic,
    /// No strategy matched.
    Unknown,
}

/// Extract an episode identifier from a file name.
///
/// Strategies are tried in priority order; the first match wins. See the
/// module documentation for the strategy list.
pub fn extract_episode_id(filename: &str) -> EpisodeId {
    extract_with_strategy(filename).0
}

/// Extract an episode identifier along with the strategy that matched.
pub fn extract_with_strategy(filename: &str) -> (EpisodeId, MatchStrategy) {
    if let Some(number) = first_capture(&EXPLICIT_TAG, filename) {
        return (EpisodeId::Number(number), MatchStrategy::ExplicitTag);
    }
    if let Some(number) = first_capture(&LOOSE_TOKEN, filename) {
        return (EpisodeId::Number(number), MatchStrategy::LooseHeuristic);
    }
    (EpisodeId::Unknown, MatchStrategy::Unknown)
}

/// Run a pattern and parse its first capture group as an episode number.
fn first_capture(pattern: &Regex, filename: &str) -> Option<u32> {
    pattern
        .captures(filename)
        .and_then(|captures| captures.get(1))
        .and_then(|group| group.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_tag_wins_over_loose_token() {
        // "1080p" and "08" are both plausible loose matches; the tag is
        // authoritative.
        let (id, strategy) = extract_with_strategy("Show.S01E08.1080p.mkv");
        assert_eq!(id, EpisodeId::Number(8));
        assert_eq!(strategy, MatchStrategy::ExplicitTag);
    }

    #[test]
    fn loose_token_matches_bare_numbers() {
        let (id, strategy) = extract_with_strategy("Show_-_08_(BD_1080p)_[C102A58D].mkv");
        assert_eq!(id, EpisodeId::Number(8));
        assert_eq!(strategy, MatchStrategy::LooseHeuristic);
    }

    #[test]
    fn loose_token_accepts_episode_markers() {
        assert_eq!(extract_episode_id("Show ep 12 [720p].mkv"), EpisodeId::Number(12));
        assert_eq!(extract_episode_id("Show_e05_final.mkv"), EpisodeId::Number(5));
    }

    #[test]
    fn loose_token_accepts_range_and_revision() {
        assert_eq!(extract_episode_id("Show_10-11_batch.mkv"), EpisodeId::Number(10));
        assert_eq!(extract_episode_id("Show_08v2.mkv"), EpisodeId::Number(8));
    }

    #[test]
    fn case_insensitive_tag() {
        assert_eq!(extract_episode_id("show.s02e13.web.mkv"), EpisodeId::Number(13));
    }

    #[test]
    fn unmatched_names_are_unknown() {
        let (id, strategy) = extract_with_strategy("randomfile.mkv");
        assert_eq!(id, EpisodeId::Unknown);
        assert_eq!(strategy, MatchStrategy::Unknown);
    }

    #[test]
    fn sentinel_never_yields_a_number() {
        assert_eq!(EpisodeId::Unknown.number(), None);
        assert!(EpisodeId::Unknown.is_unknown());
        assert_eq!(EpisodeId::Number(8).number(), Some(8));
    }
}
