/// Wire-order conversion for 16-bit PCM samples.
///
/// The container stores samples and length prefixes little-endian regardless
/// of host byte order. These helpers are the single place where the
/// host/wire boundary is crossed, so the format stays portable across big-
/// and little-endian machines.

/// Convert one host-order sample to its two wire bytes.
pub fn to_wire(sample: i16) -> [u8; 2] {
    sample.to_le_bytes()
}

/// Reassemble one host-order sample from its two wire bytes.
pub fn from_wire(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Append a slice of host-order samples to `out` as wire bytes.
pub fn samples_to_wire(samples: &[i16], out: &mut Vec<u8>) {
    out.reserve(samples.len() * 2);
    for &sample in samples {
        out.extend_from_slice(&to_wire(sample));
    }
}

/// Parse wire bytes into host-order samples.
///
/// A trailing odd byte carries no complete sample and is ignored.
pub fn samples_from_wire(bytes: &[u8]) -> Vec<i16> {
    bytes.chunks_exact(2).map(|b| from_wire(b[0], b[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_symmetry_all_values() {
        for x in i16::MIN..=i16::MAX {
            let [low, high] = to_wire(x);
            assert_eq!(from_wire(low, high), x, "sample {} did not survive", x);
        }
    }

    #[test]
    fn test_wire_layout_is_little_endian() {
        assert_eq!(to_wire(0x1234), [0x34, 0x12]);
        assert_eq!(to_wire(-1), [0xFF, 0xFF]);
        assert_eq!(from_wire(0x34, 0x12), 0x1234);
    }

    #[test]
    fn test_bulk_roundtrip() {
        let samples = [0i16, 1, -1, 100, -200, i16::MIN, i16::MAX];
        let mut bytes = Vec::new();
        samples_to_wire(&samples, &mut bytes);
        assert_eq!(bytes.len(), samples.len() * 2);
        assert_eq!(samples_from_wire(&bytes), samples);
    }

    #[test]
    fn test_bulk_ignores_trailing_odd_byte() {
        let bytes = [0x01, 0x02, 0x03];
        assert_eq!(samples_from_wire(&bytes), [0x0201]);
    }
}
