//! File set resolution.
//!
//! A "source" is a directory tree (or a single file) holding one release of
//! a series. [`resolve_files`] enumerates the candidate video files for a
//! source, tagging each with its parsed [`EpisodeId`]; [`select_episodes`]
//! narrows a file set to the requested or auto-detected episodes.
//!
//! Enumeration order follows the filesystem walk and is not guaranteed
//! sorted. Nothing downstream depends on it for correctness — alignment
//! pairs files by episode identifier, not by position.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::episode::{extract_episode_id, EpisodeId};

/// A candidate video file with its parsed episode identifier.
///
/// Immutable once resolved; the identifier is derived from the file name at
/// construction and never re-computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    path: PathBuf,
    episode: EpisodeId,
}

impl MediaFile {
    /// Wrap a path, deriving the episode identifier from its file name.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let episode = path
            .file_name()
            .map(|name| extract_episode_id(&name.to_string_lossy()))
            .unwrap_or(EpisodeId::Unknown);
        Self { path, episode }
    }

    /// The file's path as given at resolution time.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The episode identifier derived from the file name.
    pub fn episode(&self) -> EpisodeId {
        self.episode
    }

    /// The file name without its extension, for output-name composition.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Enumerate the candidate files for one source.
///
/// A directory is walked recursively for files whose extension matches
/// `file_type` (case-insensitive, leading dot ignored); a single matching
/// file yields a singleton; anything else yields an empty set. An empty set
/// is not an error at this layer — callers decide whether it is fatal.
pub fn resolve_files(root: &Path, file_type: &str) -> Vec<MediaFile> {
    let extension = file_type.trim_start_matches('.');

    if root.is_dir() {
        WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| has_extension(entry.path(), extension))
            .map(|entry| MediaFile::new(entry.path()))
            .collect()
    } else if root.is_file() && has_extension(root, extension) {
        vec![MediaFile::new(root)]
    } else {
        Vec::new()
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// The outcome of narrowing a file set to a set of episodes.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Files whose episode identifier survived the filter.
    pub files: Vec<MediaFile>,
    /// Requested episode numbers with no matching file. Empty in
    /// auto-detect mode.
    pub missing: BTreeSet<u32>,
}

/// Narrow a file set to the requested (or auto-detected) episodes.
///
/// With an explicit request, files whose identifier is in the requested set
/// are kept; every requested number absent from the set is reported as a
/// warning and returned in [`Selection::missing`] (non-fatal). Without a
/// request, every file with a known identifier is kept — files with an
/// [`EpisodeId::Unknown`] identifier are always excluded.
pub fn select_episodes(files: Vec<MediaFile>, requested: Option<&BTreeSet<u32>>) -> Selection {
    match requested {
        Some(requested) => {
            let present: BTreeSet<u32> = files
                .iter()
                .filter_map(|file| file.episode().number())
                .collect();
            let missing: BTreeSet<u32> = requested.difference(&present).copied().collect();
            for episode in &missing {
                log::warn!("Episode {episode} not found in the list of files");
            }

            let files = files
                .into_iter()
                .filter(|file| {
                    file.episode()
                        .number()
                        .is_some_and(|number| requested.contains(&number))
                })
                .collect();
            Selection { files, missing }
        }
        None => {
            let files = files
                .into_iter()
                .filter(|file| {
                    if file.episode().is_unknown() {
                        log::debug!(
                            "Skipping {} (no episode number in the file name)",
                            file.path().display()
                        );
                        false
                    } else {
                        true
                    }
                })
                .collect();
            Selection {
                files,
                missing: BTreeSet::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> MediaFile {
        MediaFile::new(format!("/library/{name}"))
    }

    #[test]
    fn media_file_derives_episode_from_name() {
        let media = file("Show.S01E08.1080p.mkv");
        assert_eq!(media.episode(), EpisodeId::Number(8));
        assert_eq!(media.stem(), "Show.S01E08.1080p");
    }

    #[test]
    fn explicit_selection_reports_missing() {
        let files = vec![
            file("Show.S01E01.mkv"),
            file("Show.S01E02.mkv"),
            file("Show.S01E03.mkv"),
        ];
        let requested: BTreeSet<u32> = [2, 3, 4].into();
        let selection = select_episodes(files, Some(&requested));

        let kept: Vec<u32> = selection
            .files
            .iter()
            .filter_map(|f| f.episode().number())
            .collect();
        assert_eq!(kept, vec![2, 3]);
        assert_eq!(selection.missing, BTreeSet::from([4]));
    }

    #[test]
    fn auto_selection_excludes_unknown_ids() {
        let files = vec![file("Show.S01E01.mkv"), file("randomfile.mkv")];
        let selection = select_episodes(files, None);
        assert_eq!(selection.files.len(), 1);
        assert_eq!(selection.files[0].episode(), EpisodeId::Number(1));
        assert!(selection.missing.is_empty());
    }

    #[test]
    fn explicit_selection_excludes_unknown_ids() {
        let files = vec![file("Show.S01E01.mkv"), file("randomfile.mkv")];
        let requested: BTreeSet<u32> = [1].into();
        let selection = select_episodes(files, Some(&requested));
        assert_eq!(selection.files.len(), 1);
    }
}
