// FLAC metadata handling module

pub mod metadata;
pub mod vorbis;

pub use metadata::{
    read_signature, read_track_metadata, FlacMetadataBlockHeader, FlacMetadataBlockType,
    FLAC_SIGNATURE, MAX_METADATA_BLOCKS,
};
pub use vorbis::decode_vorbis_comment;
