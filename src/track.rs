// Track metadata extracted from a Vorbis comment block

use crate::field_mapping::{parse_number_pair, CommentKey};
use serde::Serialize;
use std::fmt;

/// Descriptive tags of a single track
///
/// Text fields are empty and numeric fields are 0 when the tag is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    pub title: String,
    pub album_artist: String,
    pub album: String,
    pub track_number: u32,
    pub disc_number: u32,
    pub disc_total: u32,
}

impl fmt::Display for TrackMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} (track {}, disc {}/{})",
            self.album_artist,
            self.album,
            self.title,
            self.track_number,
            self.disc_number,
            self.disc_total
        )
    }
}

/// Accumulates comment fields into a [`TrackMetadata`]
///
/// Repeated keys overwrite earlier ones. `ARTIST` only stands in for a missing
/// `ALBUMARTIST`, and a `DISCNUMBER` written as `1/2` supplies the disc total
/// unless an explicit total is present.
#[derive(Debug, Default)]
pub(crate) struct TrackMetadataBuilder {
    metadata: TrackMetadata,
    album_artist: Option<String>,
    artist: Option<String>,
    explicit_disc_total: Option<u32>,
    implied_disc_total: Option<u32>,
}

impl TrackMetadataBuilder {
    pub(crate) fn apply(&mut self, key: CommentKey, value: String) {
        match key {
            CommentKey::Title => self.metadata.title = value,
            CommentKey::AlbumArtist => self.album_artist = Some(value),
            CommentKey::Artist => self.artist = Some(value),
            CommentKey::Album => self.metadata.album = value,
            CommentKey::TrackNumber => {
                self.metadata.track_number = parse_number_pair(&value).number;
            }
            CommentKey::DiscNumber => {
                let pair = parse_number_pair(&value);
                self.metadata.disc_number = pair.number;
                self.implied_disc_total = pair.total;
            }
            CommentKey::DiscTotal => {
                self.explicit_disc_total = Some(parse_number_pair(&value).number);
            }
        }
    }

    pub(crate) fn build(self) -> TrackMetadata {
        let TrackMetadataBuilder {
            mut metadata,
            album_artist,
            artist,
            explicit_disc_total,
            implied_disc_total,
        } = self;

        metadata.album_artist = album_artist.or(artist).unwrap_or_default();
        metadata.disc_total = explicit_disc_total.or(implied_disc_total).unwrap_or(0);
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(fields: &[(CommentKey, &str)]) -> TrackMetadata {
        let mut builder = TrackMetadataBuilder::default();
        for (key, value) in fields {
            builder.apply(*key, (*value).to_string());
        }
        builder.build()
    }

    #[test]
    fn empty_builder_gives_defaults() {
        assert_eq!(build(&[]), TrackMetadata::default());
    }

    #[test]
    fn artist_is_a_fallback_only() {
        let fallback = build(&[(CommentKey::Artist, "Solo")]);
        assert_eq!(fallback.album_artist, "Solo");

        let both = build(&[
            (CommentKey::AlbumArtist, "Band"),
            (CommentKey::Artist, "Guest"),
        ]);
        assert_eq!(both.album_artist, "Band");
    }

    #[test]
    fn last_write_wins() {
        let metadata = build(&[
            (CommentKey::Title, "First"),
            (CommentKey::Title, "Second"),
            (CommentKey::TrackNumber, "1"),
            (CommentKey::TrackNumber, "2"),
        ]);
        assert_eq!(metadata.title, "Second");
        assert_eq!(metadata.track_number, 2);
    }

    #[test]
    fn disc_total_from_disc_number() {
        let implied = build(&[(CommentKey::DiscNumber, "1/2")]);
        assert_eq!((implied.disc_number, implied.disc_total), (1, 2));

        let explicit = build(&[
            (CommentKey::DiscTotal, "3"),
            (CommentKey::DiscNumber, "1/2"),
        ]);
        assert_eq!(explicit.disc_total, 3);
    }

    #[test]
    fn garbled_numbers_are_zero() {
        let metadata = build(&[
            (CommentKey::TrackNumber, "abc"),
            (CommentKey::DiscNumber, ""),
            (CommentKey::DiscTotal, "two"),
        ]);
        assert_eq!(metadata.track_number, 0);
        assert_eq!(metadata.disc_number, 0);
        assert_eq!(metadata.disc_total, 0);
    }
}
