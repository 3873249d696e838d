//! Raw PCM byte packing and hashing.
//!
//! The raw stream handed to an external encoder is signed 16-bit
//! little-endian, mono, with no header.

/// Packs samples as little-endian 16-bit bytes.
pub fn to_le_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// BLAKE3 hash (hex) of the little-endian PCM bytes.
pub fn pcm_hash(samples: &[i16]) -> String {
    blake3::hash(&to_le_bytes(samples)).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_layout() {
        let bytes = to_le_bytes(&[1, -1, i16::MIN, 0x1234]);
        assert_eq!(bytes, vec![0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80, 0x34, 0x12]);
    }

    #[test]
    fn test_hash_format() {
        let hash = pcm_hash(&[0, 1, 2, 3]);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, pcm_hash(&[0, 1, 2, 4]));
    }
}
