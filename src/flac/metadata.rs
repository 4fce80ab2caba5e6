// FLAC metadata block scanning

use super::vorbis::decode_vorbis_comment;
use crate::error::{FlacError, Result};
use crate::track::TrackMetadata;
use crate::utils::io::{read_be_u32, read_exact_or_eof, skip_bytes};

use std::io::{Read, Seek, SeekFrom};

/// FLAC stream marker, "fLaC" read as a big-endian integer
pub const FLAC_SIGNATURE: u32 = 0x664C_6143;

/// Upper bound on metadata blocks scanned before giving up on a stream
pub const MAX_METADATA_BLOCKS: usize = 1024;

/// FLAC metadata block types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlacMetadataBlockType {
    StreamInfo,
    Padding,
    Application,
    SeekTable,
    VorbisComment,
    CueSheet,
    Picture,
    Reserved(u8),
    Invalid,
}

impl FlacMetadataBlockType {
    pub const VORBIS_COMMENT_ID: u8 = 4;

    pub fn from_byte(byte: u8) -> Self {
        match byte & 0x7F {
            0 => FlacMetadataBlockType::StreamInfo,
            1 => FlacMetadataBlockType::Padding,
            2 => FlacMetadataBlockType::Application,
            3 => FlacMetadataBlockType::SeekTable,
            Self::VORBIS_COMMENT_ID => FlacMetadataBlockType::VorbisComment,
            5 => FlacMetadataBlockType::CueSheet,
            6 => FlacMetadataBlockType::Picture,
            127 => FlacMetadataBlockType::Invalid,
            other => FlacMetadataBlockType::Reserved(other),
        }
    }

    /// The 7-bit type code
    pub fn id(&self) -> u8 {
        match self {
            FlacMetadataBlockType::StreamInfo => 0,
            FlacMetadataBlockType::Padding => 1,
            FlacMetadataBlockType::Application => 2,
            FlacMetadataBlockType::SeekTable => 3,
            FlacMetadataBlockType::VorbisComment => Self::VORBIS_COMMENT_ID,
            FlacMetadataBlockType::CueSheet => 5,
            FlacMetadataBlockType::Picture => 6,
            FlacMetadataBlockType::Reserved(id) => *id,
            FlacMetadataBlockType::Invalid => 127,
        }
    }
}

/// FLAC metadata block header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacMetadataBlockHeader {
    pub is_last: bool,
    pub block_type: FlacMetadataBlockType,
    /// Payload length, not counting the header itself
    pub length: u32,
}

impl FlacMetadataBlockHeader {
    pub const HEADER_SIZE: usize = 4;

    /// Decode the 4 raw header bytes
    pub fn from_bytes(buffer: [u8; Self::HEADER_SIZE]) -> Self {
        let is_last = (buffer[0] >> 7) == 1;
        let block_type = FlacMetadataBlockType::from_byte(buffer[0]);

        // Length is big-endian 24-bit
        let length =
            (u32::from(buffer[1]) << 16) | (u32::from(buffer[2]) << 8) | u32::from(buffer[3]);

        FlacMetadataBlockHeader {
            is_last,
            block_type,
            length,
        }
    }

    /// Read FLAC metadata block header from reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buffer = [0u8; Self::HEADER_SIZE];
        reader.read_exact(&mut buffer)?;
        Ok(Self::from_bytes(buffer))
    }

    /// Like [`read`](Self::read), but `None` if the stream is already exhausted
    fn read_next<R: Read>(reader: &mut R) -> Result<Option<Self>> {
        let mut buffer = [0u8; Self::HEADER_SIZE];
        if !read_exact_or_eof(reader, &mut buffer)? {
            return Ok(None);
        }
        Ok(Some(Self::from_bytes(buffer)))
    }
}

/// Check the "fLaC" stream marker at the current position
pub fn read_signature<R: Read>(reader: &mut R) -> Result<()> {
    let found = read_be_u32(reader)?;
    if found != FLAC_SIGNATURE {
        return Err(FlacError::InvalidSignature { found });
    }
    Ok(())
}

/// Read the track tags of a FLAC stream
///
/// Walks the metadata blocks from the start of the stream, skipping everything
/// but the first VORBIS_COMMENT block. Scanning stops once that block has been
/// decoded, so later blocks are never touched.
pub fn read_track_metadata<R: Read + Seek>(reader: &mut R) -> Result<TrackMetadata> {
    read_signature(reader)?;

    for _ in 0..MAX_METADATA_BLOCKS {
        let Some(header) = FlacMetadataBlockHeader::read_next(reader)? else {
            return Err(FlacError::MissingLastBlock);
        };

        tracing::trace!(
            "Reading FLAC block, type: {}, size: {}, last: {}",
            header.block_type.id(),
            header.length,
            header.is_last
        );

        if header.block_type == FlacMetadataBlockType::VorbisComment {
            tracing::debug!("Encountered a Vorbis Comments block, parsing");
            return read_comment_block(reader, header.length);
        }

        reader
            .seek(SeekFrom::Current(i64::from(header.length)))
            .map_err(|source| FlacError::Seek {
                size: u64::from(header.length),
                source,
            })?;

        if header.is_last {
            return Err(FlacError::NoVorbisComment);
        }
    }

    Err(FlacError::TooManyBlocks {
        limit: MAX_METADATA_BLOCKS,
    })
}

/// Decode a comment block and leave the reader on the block boundary
fn read_comment_block<R: Read>(reader: &mut R, length: u32) -> Result<TrackMetadata> {
    let mut block = reader.take(u64::from(length));
    let metadata = decode_vorbis_comment(&mut block)?;

    let unread = block.limit();
    if unread > 0 {
        tracing::trace!("Skipping {unread} trailing bytes of the comment block");
        skip_bytes(&mut block, unread)?;
    }

    Ok(metadata)
}
