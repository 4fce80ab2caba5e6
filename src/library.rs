// Music library layout
//
// Tracks are filed as `<root>/<album artist>/<album>/<file name>`.

use crate::track::TrackMetadata;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Stands in for path separators found in tag text
pub const PATH_SEPARATOR_REPLACEMENT: char = '+';

/// Stands in for components that would otherwise be empty, `.` or `..`
pub const EMPTY_COMPONENT_REPLACEMENT: &str = "_";

/// Extension given to every filed track
pub const FLAC_EXTENSION: &str = "flac";

/// Make tag text safe to use as a single path component
///
/// Separators become `+`, control characters are dropped, and a component
/// that would be empty or point at the current/parent directory becomes `_`.
pub fn sanitize(component: &str) -> String {
    let sanitized: String = component
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if c == '/' || c == MAIN_SEPARATOR {
                PATH_SEPARATOR_REPLACEMENT
            } else {
                c
            }
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => EMPTY_COMPONENT_REPLACEMENT.to_string(),
        _ => sanitized,
    }
}

/// File name of a track inside its album directory
///
/// Multi-disc albums prefix the disc number: `103 - Title.flac` is disc 1,
/// track 3.
pub fn track_file_name(metadata: &TrackMetadata) -> String {
    let name = if metadata.disc_total > 1 {
        format!(
            "{}{:02} - {}.{FLAC_EXTENSION}",
            metadata.disc_number, metadata.track_number, metadata.title
        )
    } else {
        format!(
            "{:02} - {}.{FLAC_EXTENSION}",
            metadata.track_number, metadata.title
        )
    };

    sanitize(&name)
}

/// Album directory of a track below the library root
pub fn album_directory(metadata: &TrackMetadata, root: &Path) -> PathBuf {
    root.join(sanitize(&metadata.album_artist))
        .join(sanitize(&metadata.album))
}

/// Full destination of a track below the library root
pub fn destination_path(metadata: &TrackMetadata, root: &Path) -> PathBuf {
    album_directory(metadata, root).join(track_file_name(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_two(disc_total: u32) -> TrackMetadata {
        TrackMetadata {
            title: "Song/Two".to_string(),
            album_artist: "A/B".to_string(),
            album: "X".to_string(),
            track_number: 3,
            disc_number: 1,
            disc_total,
        }
    }

    #[test]
    fn single_disc_path() {
        let path = destination_path(&song_two(1), Path::new("/music"));
        assert_eq!(path, PathBuf::from("/music/A+B/X/03 - Song+Two.flac"));
    }

    #[test]
    fn multi_disc_path() {
        let path = destination_path(&song_two(2), Path::new("/music"));
        assert_eq!(path, PathBuf::from("/music/A+B/X/103 - Song+Two.flac"));
    }

    #[test]
    fn track_numbers_are_padded_to_two_digits() {
        let mut metadata = song_two(0);
        metadata.track_number = 12;
        assert_eq!(track_file_name(&metadata), "12 - Song+Two.flac");

        metadata.track_number = 0;
        assert_eq!(track_file_name(&metadata), "00 - Song+Two.flac");
    }

    #[test]
    fn sanitize_hardening() {
        assert_eq!(sanitize("AC/DC"), "AC+DC");
        assert_eq!(sanitize("a\0b\nc"), "abc");
        assert_eq!(sanitize(""), "_");
        assert_eq!(sanitize(".."), "_");
        assert_eq!(sanitize("..."), "...");
        assert_eq!(sanitize("Mr. Bungle: \"Disco Volante\""), "Mr. Bungle: \"Disco Volante\"");
    }

    #[test]
    fn missing_tags_stay_inside_the_root() {
        let path = destination_path(&TrackMetadata::default(), Path::new("/music"));
        assert_eq!(path, PathBuf::from("/music/_/_/00 - .flac"));
        assert!(path.starts_with("/music"));
    }
}
