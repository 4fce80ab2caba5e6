// Vorbis comment field mapping
//
// Maps the comment keys we care about onto `TrackMetadata` fields. Keys are
// compared after ASCII upper-casing, so `Title=` and `TITLE=` land in the same
// place. Everything else in the comment block is ignored.

/// Comment keys understood by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKey {
    Title,
    AlbumArtist,
    Artist,
    Album,
    TrackNumber,
    DiscNumber,
    DiscTotal,
}

impl CommentKey {
    pub const TITLE: &'static str = "TITLE";
    pub const ALBUMARTIST: &'static str = "ALBUMARTIST";
    pub const ARTIST: &'static str = "ARTIST";
    pub const ALBUM: &'static str = "ALBUM";
    pub const TRACKNUMBER: &'static str = "TRACKNUMBER";
    pub const DISCNUMBER: &'static str = "DISCNUMBER";
    pub const DISCTOTAL: &'static str = "DISCTOTAL";
    pub const TOTALDISCS: &'static str = "TOTALDISCS";

    /// Look up a raw comment key
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_uppercase().as_str() {
            Self::TITLE => Some(CommentKey::Title),
            Self::ALBUMARTIST => Some(CommentKey::AlbumArtist),
            Self::ARTIST => Some(CommentKey::Artist),
            Self::ALBUM => Some(CommentKey::Album),
            Self::TRACKNUMBER => Some(CommentKey::TrackNumber),
            Self::DISCNUMBER => Some(CommentKey::DiscNumber),
            Self::DISCTOTAL | Self::TOTALDISCS => Some(CommentKey::DiscTotal),
            _ => None,
        }
    }
}

/// A numeric tag value, optionally written as `position/total`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberPair {
    pub number: u32,
    pub total: Option<u32>,
}

/// Parse a numeric tag leniently
///
/// `"007"` is 7 and `"3/12"` is 3 of 12. Anything that isn't a base-10 number
/// becomes 0 rather than an error.
pub fn parse_number_pair(value: &str) -> NumberPair {
    let (number, total) = match value.split_once('/') {
        Some((number, total)) => (number, Some(total)),
        None => (value, None),
    };

    NumberPair {
        number: parse_number(number),
        total: total.map(parse_number).filter(|total| *total > 0),
    }
}

/// Parse a single base-10 number, 0 on failure
pub fn parse_number(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}
