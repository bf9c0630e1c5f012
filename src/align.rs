//! Cross-source alignment.
//!
//! Given one source file set and any number of comparison file sets,
//! [`align`] produces one [`EpisodeGroup`] per episode, each holding exactly
//! one file per source. Validation is strict and fails before any extraction
//! work:
//!
//! - every comparison set must contain the same number of files as the
//!   source ([`FrameAlignError::CardinalityMismatch`], reported with both
//!   counts);
//! - pairing is by parsed episode identifier, never by list position —
//!   positional pairing silently mis-pairs episodes when two sources walk
//!   their trees in different orders, so a duplicate identifier within one
//!   set ([`FrameAlignError::DuplicateEpisodeId`]) and an identifier with no
//!   counterpart in a comparison set ([`FrameAlignError::IncompleteGroup`])
//!   are both fatal;
//! - files with an unknown identifier cannot be aligned at all
//!   ([`FrameAlignError::UnknownEpisodeId`]); selection upstream excludes
//!   them, this is a backstop.

use std::collections::BTreeMap;

use crate::{
    error::FrameAlignError,
    source::MediaFile,
};

/// The same-episode files across all sources, one member per source.
///
/// Groups are produced in ascending episode order regardless of filesystem
/// enumeration order.
#[derive(Debug, Clone)]
pub struct EpisodeGroup {
    /// The shared episode number.
    pub episode: u32,
    /// The file from the primary source.
    pub source: MediaFile,
    /// One file per comparison source, in comparison order.
    pub comparisons: Vec<MediaFile>,
}

impl EpisodeGroup {
    /// All members of the group, the source file first.
    pub fn members(&self) -> impl Iterator<Item = &MediaFile> {
        std::iter::once(&self.source).chain(self.comparisons.iter())
    }

    /// Number of files in the group (source plus comparisons).
    pub fn len(&self) -> usize {
        1 + self.comparisons.len()
    }

    /// Always `false`; a group carries at least its source member.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Match files across sources into per-episode groups.
///
/// # Errors
///
/// Fails with [`FrameAlignError::CardinalityMismatch`] when any comparison
/// set's size differs from the source's, with
/// [`FrameAlignError::DuplicateEpisodeId`] when one set claims an episode
/// twice, with [`FrameAlignError::IncompleteGroup`] when a source episode
/// has no counterpart in a comparison set, and with
/// [`FrameAlignError::UnknownEpisodeId`] when a file without a parsed
/// episode number reaches the aligner. All of these are raised before any
/// group is returned — there is no partial result.
pub fn align(
    source: &[MediaFile],
    comparisons: &[Vec<MediaFile>],
) -> Result<Vec<EpisodeGroup>, FrameAlignError> {
    for (index, set) in comparisons.iter().enumerate() {
        if set.len() != source.len() {
            return Err(FrameAlignError::CardinalityMismatch {
                source_count: source.len(),
                comparison_index: index,
                comparison_count: set.len(),
            });
        }
    }

    let source_by_episode = index_by_episode(source)?;
    let comparisons_by_episode = comparisons
        .iter()
        .map(|set| index_by_episode(set))
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups = Vec::with_capacity(source_by_episode.len());
    for (episode, file) in source_by_episode {
        let mut members = Vec::with_capacity(comparisons_by_episode.len());
        for (index, set) in comparisons_by_episode.iter().enumerate() {
            let member = set.get(&episode).ok_or(FrameAlignError::IncompleteGroup {
                episode,
                comparison_index: index,
            })?;
            members.push((*member).clone());
        }
        groups.push(EpisodeGroup {
            episode,
            source: file.clone(),
            comparisons: members,
        });
    }

    log::debug!(
        "Aligned {} episode group(s) across {} source(s)",
        groups.len(),
        comparisons.len() + 1
    );
    Ok(groups)
}

/// Index a file set by episode number, rejecting duplicates and unknowns.
fn index_by_episode(
    files: &[MediaFile],
) -> Result<BTreeMap<u32, &MediaFile>, FrameAlignError> {
    let mut by_episode = BTreeMap::new();
    for file in files {
        let episode = file
            .episode()
            .number()
            .ok_or_else(|| FrameAlignError::UnknownEpisodeId(file.path().to_path_buf()))?;
        if let Some(existing) = by_episode.insert(episode, file) {
            return Err(FrameAlignError::DuplicateEpisodeId {
                episode,
                first: existing.path().to_path_buf(),
                second: file.path().to_path_buf(),
            });
        }
    }
    Ok(by_episode)
}
