//! tune-transporter files FLAC downloads into a music library.
//!
//! The core reads the metadata blocks of a FLAC stream and decodes its Vorbis
//! comment block into a [`TrackMetadata`]. [`library::destination_path`] turns
//! that into `<root>/<album artist>/<album>/<track> - <title>.flac`, and the
//! [`transfer`] module performs the actual move.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use std::path::Path;
//!
//! let mut reader = BufReader::new(File::open("track.flac")?);
//! let metadata = tune_transporter::read_track_metadata(&mut reader)?;
//! let target = tune_transporter::library::destination_path(&metadata, Path::new("/music"));
//! println!("{}", target.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod field_mapping;
pub mod flac;
pub mod library;
pub mod slskd;
pub mod track;
pub mod transfer;
mod utils;

pub use error::{ErrorKind, FlacError};
pub use flac::{decode_vorbis_comment, read_signature, read_track_metadata};
pub use track::TrackMetadata;
