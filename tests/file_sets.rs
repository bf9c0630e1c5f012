//! File set resolution integration tests.
//!
//! Builds small directory trees with `tempfile` and checks enumeration and
//! episode selection against them.

use std::{collections::BTreeSet, fs, path::Path};

use framealign::{resolve_files, select_episodes, EpisodeId};

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, b"").expect("Failed to create file");
}

#[test]
fn directory_is_walked_recursively() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    touch(&root.path().join("Show.S01E01.mkv"));
    touch(&root.path().join("Season 1/Show.S01E02.mkv"));
    touch(&root.path().join("Season 1/extras/Show.S01E03.mkv"));
    touch(&root.path().join("notes.txt"));
    touch(&root.path().join("Show.S01E04.mp4"));

    let files = resolve_files(root.path(), "mkv");
    assert_eq!(files.len(), 3, "only .mkv files should be enumerated");

    let episodes: BTreeSet<u32> = files
        .iter()
        .filter_map(|file| file.episode().number())
        .collect();
    assert_eq!(episodes, BTreeSet::from([1, 2, 3]));
}

#[test]
fn single_matching_file_yields_singleton() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let path = root.path().join("Show.S01E08.mkv");
    touch(&path);

    let files = resolve_files(&path, "mkv");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].episode(), EpisodeId::Number(8));
}

#[test]
fn mismatched_extension_yields_empty_set() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    let path = root.path().join("Show.S01E08.mp4");
    touch(&path);

    assert!(resolve_files(&path, "mkv").is_empty());
}

#[test]
fn nonexistent_path_yields_empty_set() {
    // An empty set is not an error at this layer; callers decide.
    assert!(resolve_files(Path::new("/nonexistent/library"), "mkv").is_empty());
}

#[test]
fn extension_matching_ignores_case_and_leading_dot() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    touch(&root.path().join("Show.S01E01.MKV"));

    assert_eq!(resolve_files(root.path(), "mkv").len(), 1);
    assert_eq!(resolve_files(root.path(), ".mkv").len(), 1);
}

#[test]
fn explicit_selection_reports_missing_and_keeps_the_rest() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    touch(&root.path().join("Show.S01E01.mkv"));
    touch(&root.path().join("Show.S01E02.mkv"));
    touch(&root.path().join("Show.S01E03.mkv"));

    let files = resolve_files(root.path(), "mkv");
    let requested: BTreeSet<u32> = [2, 3, 4].into();
    let selection = select_episodes(files, Some(&requested));

    let kept: BTreeSet<u32> = selection
        .files
        .iter()
        .filter_map(|file| file.episode().number())
        .collect();
    assert_eq!(kept, BTreeSet::from([2, 3]));
    assert_eq!(selection.missing, BTreeSet::from([4]));
}

#[test]
fn auto_detection_drops_files_without_an_episode_number() {
    let root = tempfile::tempdir().expect("Failed to create temp dir");
    touch(&root.path().join("Show.S01E01.mkv"));
    touch(&root.path().join("randomfile.mkv"));

    let files = resolve_files(root.path(), "mkv");
    let selection = select_episodes(files, None);

    assert_eq!(selection.files.len(), 1);
    assert_eq!(selection.files[0].episode(), EpisodeId::Number(1));
}
