#![allow(dead_code)]

use std::path::Path;
use tune_transporter::TrackMetadata;

pub const STREAMINFO: u8 = 0;
pub const PADDING: u8 = 1;
pub const SEEKTABLE: u8 = 3;
pub const VORBIS_COMMENT: u8 = 4;
pub const PICTURE: u8 = 6;

/// Builds FLAC metadata sections byte by byte
pub struct FlacBuilder {
    blocks: Vec<(u8, Vec<u8>)>,
    mark_last: bool,
}

impl FlacBuilder {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            mark_last: true,
        }
    }

    pub fn block(mut self, block_type: u8, payload: Vec<u8>) -> Self {
        self.blocks.push((block_type, payload));
        self
    }

    pub fn streaminfo(self) -> Self {
        self.block(STREAMINFO, vec![0x12; 34])
    }

    pub fn padding(self, len: usize) -> Self {
        self.block(PADDING, vec![0; len])
    }

    pub fn comments(self, fields: &[&str]) -> Self {
        self.block(VORBIS_COMMENT, comment_payload("tune-transporter tests", fields))
    }

    /// Leave the last-block flag off every block, and the stream ends right
    /// after the final block
    pub fn without_last_flag(mut self) -> Self {
        self.mark_last = false;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut data = b"fLaC".to_vec();
        let count = self.blocks.len();

        for (i, (block_type, payload)) in self.blocks.into_iter().enumerate() {
            let last = self.mark_last && i + 1 == count;
            data.push(if last { 0x80 | block_type } else { block_type });
            data.extend_from_slice(&(payload.len() as u32).to_be_bytes()[1..]);
            data.extend_from_slice(&payload);
        }

        // Stand-in for the first audio frame
        if self.mark_last {
            data.extend_from_slice(&[0xFF, 0xF8, 0x69, 0x08]);
        }
        data
    }
}

/// A Vorbis comment payload holding `fields` verbatim
pub fn comment_payload(vendor: &str, fields: &[&str]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    data.extend_from_slice(vendor.as_bytes());
    data.extend_from_slice(&(fields.len() as u32).to_le_bytes());
    for field in fields {
        data.extend_from_slice(&(field.len() as u32).to_le_bytes());
        data.extend_from_slice(field.as_bytes());
    }
    data
}

/// Comment fields for every non-default value of `metadata`
pub fn metadata_fields(metadata: &TrackMetadata) -> Vec<String> {
    let mut fields = Vec::new();
    let text = [
        ("TITLE", &metadata.title),
        ("ALBUMARTIST", &metadata.album_artist),
        ("ALBUM", &metadata.album),
    ];
    for (key, value) in text {
        if !value.is_empty() {
            fields.push(format!("{key}={value}"));
        }
    }

    let numbers = [
        ("TRACKNUMBER", metadata.track_number),
        ("DISCNUMBER", metadata.disc_number),
        ("DISCTOTAL", metadata.disc_total),
    ];
    for (key, value) in numbers {
        if value != 0 {
            fields.push(format!("{key}={value}"));
        }
    }

    fields
}

/// A minimal FLAC file tagged with `metadata`
pub fn tagged_flac(metadata: &TrackMetadata) -> Vec<u8> {
    let fields = metadata_fields(metadata);
    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();

    FlacBuilder::new()
        .streaminfo()
        .comments(&fields)
        .padding(64)
        .build()
}

pub fn track(artist: &str, album: &str, title: &str, number: u32) -> TrackMetadata {
    TrackMetadata {
        title: title.to_string(),
        album_artist: artist.to_string(),
        album: album.to_string(),
        track_number: number,
        disc_number: 1,
        disc_total: 1,
    }
}

pub fn write_flac(path: &Path, metadata: &TrackMetadata) {
    std::fs::write(path, tagged_flac(metadata)).expect("Failed to write FLAC file");
}
