// Encoding utilities

use encoding_rs::UTF_8;

/// Decode Vorbis comment text
///
/// Comments are UTF-8 by definition, but tagging tools in the wild still emit
/// stray Latin-1 bytes. Those become U+FFFD instead of failing the whole block.
pub fn decode_utf8_lossy(data: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(data);
    if had_errors {
        tracing::debug!("Comment text is not valid UTF-8, replaced invalid sequences");
    }
    text.into_owned()
}
