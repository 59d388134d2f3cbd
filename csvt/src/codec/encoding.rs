//! Input text decoding with charset auto-detection.

use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Detect the charset of raw bytes using chardet, as an encoding label.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, confidence, _) = chardet::detect(bytes);
    let label = chardet::charset2encoding(&charset);
    debug!(charset = %charset, confidence, label, "detected input encoding");
    match label.to_lowercase().as_str() {
        "" | "ascii" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the encoding named by `label`.
///
/// Unknown labels fall back to windows-1252, which maps every byte.
pub fn decode_content(bytes: &[u8], label: &str) -> CodecResult<String> {
    let encoding =
        encoding_rs::Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1252);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(CodecError::Encoding(encoding.name().to_string()));
    }
    Ok(text.into_owned())
}

/// Decode input bytes to text. Valid UTF-8 is taken as-is (minus a BOM);
/// anything else goes through detection, with windows-1252 as the last
/// resort when the detected charset does not fit the bytes.
pub fn decode_text(bytes: &[u8]) -> CodecResult<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string()),
        Err(_) => {
            let mut label = detect_encoding(bytes);
            // Already known not to be UTF-8.
            if label == "utf-8" {
                label = "windows-1252".to_string();
            }
            decode_content(bytes, &label).or_else(|_| decode_content(bytes, "windows-1252"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(decode_text("a,é\n".as_bytes()).unwrap(), "a,é\n");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFa,b").unwrap(), "a,b");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_non_utf8_input_is_decoded() {
        let bytes: &[u8] = &[b'n', b'a', b'm', b'e', b'\n', b'J', b'o', b's', 0xE9];
        let decoded = decode_text(bytes).unwrap();
        assert!(decoded.starts_with("name\nJos"));
    }
}
