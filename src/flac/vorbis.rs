// VORBIS_COMMENT decoding for FLAC

use crate::error::{FlacError, Result};
use crate::field_mapping::CommentKey;
use crate::track::{TrackMetadata, TrackMetadataBuilder};
use crate::utils::encoding::decode_utf8_lossy;
use crate::utils::io::{read_bytes, read_le_u32, skip_bytes};

use std::io::Read;

/// Decode a Vorbis comment block payload into [`TrackMetadata`]
///
/// The reader must be positioned at the vendor length. Exactly the declared
/// vendor string and `N` fields are consumed; bytes after the last field are
/// left alone. A field without a `=` aborts the decode, since it means either
/// a corrupt block or a length that no longer lines up with the data.
pub fn decode_vorbis_comment<R: Read>(reader: &mut R) -> Result<TrackMetadata> {
    let vendor_length = read_le_u32(reader)?;
    skip_bytes(reader, u64::from(vendor_length))?;

    let field_count = read_le_u32(reader)?;
    tracing::trace!("Vorbis comment: vendor {vendor_length} bytes, {field_count} fields");

    let mut builder = TrackMetadataBuilder::default();
    for index in 0..field_count {
        let field_length = read_le_u32(reader)?;
        let field = read_bytes(reader, field_length)?;
        let text = decode_utf8_lossy(&field);

        // KEY=VALUE, the value may itself contain '='
        let Some((key, value)) = text.split_once('=') else {
            return Err(FlacError::MalformedField { index });
        };

        if let Some(key) = CommentKey::from_key(key) {
            builder.apply(key, value.to_string());
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Cursor;

    fn payload(vendor: &str, fields: &[&[u8]]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
        data.extend_from_slice(vendor.as_bytes());
        data.extend_from_slice(&(fields.len() as u32).to_le_bytes());
        for field in fields {
            data.extend_from_slice(&(field.len() as u32).to_le_bytes());
            data.extend_from_slice(field);
        }
        data
    }

    #[test]
    fn decodes_known_fields() {
        let data = payload(
            "reference libFLAC 1.4.3 20230623",
            &[
                b"TITLE=Song",
                b"ALBUMARTIST=Band",
                b"ALBUM=Record",
                b"TRACKNUMBER=007",
                b"DISCNUMBER=2",
                b"DISCTOTAL=3",
                b"GENRE=Ambient",
            ],
        );

        let metadata = decode_vorbis_comment(&mut Cursor::new(data)).unwrap();
        assert_eq!(
            metadata,
            TrackMetadata {
                title: "Song".to_string(),
                album_artist: "Band".to_string(),
                album: "Record".to_string(),
                track_number: 7,
                disc_number: 2,
                disc_total: 3,
            }
        );
    }

    #[test]
    fn unparsable_track_number_is_zero() {
        let data = payload("", &[b"TRACKNUMBER=abc", b"TITLE=Still here"]);
        let metadata = decode_vorbis_comment(&mut Cursor::new(data)).unwrap();
        assert_eq!(metadata.track_number, 0);
        assert_eq!(metadata.title, "Still here");
    }

    #[test]
    fn value_keeps_later_separators() {
        let data = payload("", &[b"title=a=b"]);
        let metadata = decode_vorbis_comment(&mut Cursor::new(data)).unwrap();
        assert_eq!(metadata.title, "a=b");
    }

    #[test]
    fn missing_separator_stops_decoding() {
        let data = payload("", &[b"TITLE=ok", b"NOSEPARATOR", b"ALBUM=never read"]);
        let total = data.len() as u64;
        let mut cursor = Cursor::new(data);

        let err = decode_vorbis_comment(&mut cursor).unwrap_err();
        assert!(matches!(err, FlacError::MalformedField { index: 1 }));
        assert_eq!(err.kind(), ErrorKind::Format);

        // The third field is still unread
        let third = 4 + b"ALBUM=never read".len() as u64;
        assert_eq!(cursor.position(), total - third);
    }

    #[test]
    fn truncated_field_is_an_io_error() {
        let mut data = payload("", &[b"TITLE=Song"]);
        data.truncate(data.len() - 2);

        let err = decode_vorbis_comment(&mut Cursor::new(data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn truncated_vendor_is_an_io_error() {
        let mut data = Vec::new();
        data.extend_from_slice(&100u32.to_le_bytes());
        data.extend_from_slice(b"short");

        let err = decode_vorbis_comment(&mut Cursor::new(data)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn stops_after_declared_fields() {
        let mut data = payload("", &[b"TITLE=Song"]);
        let declared = data.len() as u64;
        data.extend_from_slice(b"\x0b\x00\x00\x00ALBUM=Extra");

        let mut cursor = Cursor::new(data);
        let metadata = decode_vorbis_comment(&mut cursor).unwrap();
        assert_eq!(metadata.album, "");
        assert_eq!(cursor.position(), declared);
    }
}
