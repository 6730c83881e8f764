//! Bech32 Text Encoding
//!
//! Checksummed base-32 encoding of short binary payloads behind a
//! human-readable prefix (HRP), as used by chain addresses.
//!
//! # Format
//!
//! ```text
//! <hrp> "1" <data chars> <6 checksum chars>
//! ```
//!
//! - Charset: `qpzry9x8gf2tvdw0s3jn54khce6mua7l`
//! - Total length at most 90 characters
//! - Case-insensitive, but never mixed-case
//!
//! The data part is a sequence of 5-bit groups; use [`convert_bits`] to move
//! between bytes and groups.
//!
//! # References
//!
//! - [BIP-173](https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki)

use crate::errors::{SignerError, SignerResult};

/// Data part alphabet, indexed by 5-bit value
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Separator between the HRP and the data part
pub const SEPARATOR: char = '1';

/// Maximum length of an encoded string
pub const MAX_LENGTH: usize = 90;

/// Number of checksum groups appended to the data part
pub const CHECKSUM_LENGTH: usize = 6;

/// BCH generator constants over GF(32)
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Reverse lookup of [`CHARSET`]; upper-case letters map like their lower-case form
const CHARSET_REV: [i8; 128] = {
    let mut table = [-1i8; 128];
    let mut i = 0;
    while i < CHARSET.len() {
        let c = CHARSET[i];
        table[c as usize] = i as i8;
        table[c.to_ascii_uppercase() as usize] = i as i8;
        i += 1;
    }
    table
};

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for &value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

/// High bits of each HRP character, a zero separator, then the low bits
fn expand_hrp(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut expanded = Vec::with_capacity(bytes.len() * 2 + 1);
    expanded.extend(bytes.iter().map(|c| c >> 5));
    expanded.push(0);
    expanded.extend(bytes.iter().map(|c| c & 0x1f));
    expanded
}

fn verify_checksum(hrp: &str, values: &[u8]) -> bool {
    let mut enc = expand_hrp(hrp);
    enc.extend_from_slice(values);
    polymod(&enc) == 1
}

fn create_checksum(hrp: &str, values: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut enc = expand_hrp(hrp);
    enc.extend_from_slice(values);
    enc.extend_from_slice(&[0u8; CHECKSUM_LENGTH]);
    let modulus = polymod(&enc) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LENGTH];
    for (i, group) in checksum.iter_mut().enumerate() {
        *group = ((modulus >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

/// Printable US-ASCII without mixing upper and lower case
fn check_case_and_range(text: &str) -> SignerResult<()> {
    let mut has_lower = false;
    let mut has_upper = false;
    for c in text.bytes() {
        if !(33..=126).contains(&c) {
            return Err(SignerError::InvalidBech32 {
                message: format!("character 0x{c:02x} out of range"),
            });
        }
        has_lower |= c.is_ascii_lowercase();
        has_upper |= c.is_ascii_uppercase();
    }
    if has_lower && has_upper {
        return Err(SignerError::InvalidBech32 {
            message: "mixed case".into(),
        });
    }
    Ok(())
}

/// Encode 5-bit groups under `hrp`
///
/// The HRP is lower-cased. Fails when the HRP is empty, mixed-case or holds
/// non-printable characters, when a value does not fit in 5 bits, or when
/// the result would exceed [`MAX_LENGTH`].
pub fn encode(hrp: &str, values: &[u8]) -> SignerResult<String> {
    if hrp.is_empty() {
        return Err(SignerError::InvalidBech32 {
            message: "empty human-readable part".into(),
        });
    }
    check_case_and_range(hrp)?;

    let total = hrp.len() + 1 + values.len() + CHECKSUM_LENGTH;
    if total > MAX_LENGTH {
        return Err(SignerError::InvalidBech32 {
            message: format!("encoded length {total} exceeds {MAX_LENGTH}"),
        });
    }
    if let Some(v) = values.iter().find(|v| **v > 0x1f) {
        return Err(SignerError::InvalidBech32 {
            message: format!("value {v} is not a 5-bit group"),
        });
    }

    let hrp = hrp.to_ascii_lowercase();
    let checksum = create_checksum(&hrp, values);

    let mut result = String::with_capacity(total);
    result.push_str(&hrp);
    result.push(SEPARATOR);
    for &group in values.iter().chain(checksum.iter()) {
        result.push(CHARSET[group as usize] as char);
    }
    Ok(result)
}

/// Decode a Bech32 string into its lower-cased HRP and 5-bit data groups
///
/// The returned data excludes the checksum groups.
pub fn decode(text: &str) -> SignerResult<(String, Vec<u8>)> {
    check_case_and_range(text)?;
    if text.len() > MAX_LENGTH {
        return Err(SignerError::InvalidBech32 {
            message: format!("length {} exceeds {MAX_LENGTH}", text.len()),
        });
    }

    let pos = match text.rfind(SEPARATOR) {
        Some(pos) if pos >= 1 => pos,
        _ => {
            return Err(SignerError::InvalidBech32 {
                message: "missing separator".into(),
            })
        }
    };
    if pos + 1 + CHECKSUM_LENGTH > text.len() {
        return Err(SignerError::InvalidBech32 {
            message: "checksum too short".into(),
        });
    }

    let mut values = Vec::with_capacity(text.len() - pos - 1);
    for c in text[pos + 1..].bytes() {
        let rev = CHARSET_REV[c as usize];
        if rev < 0 {
            return Err(SignerError::InvalidBech32 {
                message: format!("invalid character '{}'", c as char),
            });
        }
        values.push(rev as u8);
    }

    let hrp = text[..pos].to_ascii_lowercase();
    if !verify_checksum(&hrp, &values) {
        return Err(SignerError::InvalidBech32 {
            message: "checksum mismatch".into(),
        });
    }

    values.truncate(values.len() - CHECKSUM_LENGTH);
    Ok((hrp, values))
}

/// Regroup a sequence of `FROM`-bit values into `TO`-bit values
///
/// With `PAD`, a trailing partial group is left-shifted to fill `TO` bits.
/// Without it, leftover bits must be fewer than `FROM` and all zero, which
/// rejects non-canonical encodings. Returns `None` on failure.
pub fn convert_bits<const FROM: u32, const TO: u32, const PAD: bool>(
    input: &[u8],
) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let maxv: u32 = (1 << TO) - 1;
    let max_acc: u32 = (1 << (FROM + TO - 1)) - 1;
    let mut out = Vec::with_capacity(input.len() * FROM as usize / TO as usize + 1);

    for &value in input {
        let value = u32::from(value);
        if value >> FROM != 0 {
            return None;
        }
        acc = ((acc << FROM) | value) & max_acc;
        bits += FROM;
        while bits >= TO {
            bits -= TO;
            out.push(((acc >> bits) & maxv) as u8);
        }
    }

    if PAD {
        if bits > 0 {
            out.push(((acc << (TO - bits)) & maxv) as u8);
        }
    } else if bits >= FROM || ((acc << (TO - bits)) & maxv) != 0 {
        return None;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ADDRESS: &str = "bnb1hgm0p7khfk85zpz5v0j8wnej3a90w709vhkdfu";

    #[test]
    fn test_decode_bip173_vectors() {
        for valid in [
            "A12UEL5L",
            "a12uel5l",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
            "?1ezyfcl",
        ] {
            assert!(decode(valid).is_ok(), "{valid}");
        }
    }

    #[test]
    fn test_decode_rejects_invalid() {
        for invalid in [
            "\u{20}1nwldj5",
            "\u{7f}1axkwrx",
            "pzry9x0s0muk",
            "1pzry9x0s0muk",
            "x1b4n0q5v",
            "li1dgmt3",
            "A1G7SGD8",
            "10a06t8",
            "1qzzfhee",
        ] {
            assert!(decode(invalid).is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_decode_uppercase() {
        let (hrp, data) = decode(&VALID_ADDRESS.to_uppercase()).unwrap();
        assert_eq!(hrp, "bnb");
        let (_, lower) = decode(VALID_ADDRESS).unwrap();
        assert_eq!(data, lower);
    }

    #[test]
    fn test_decode_rejects_mixed_case() {
        let mixed = VALID_ADDRESS.replacen('h', "H", 1);
        assert!(matches!(
            decode(&mixed),
            Err(SignerError::InvalidBech32 { .. })
        ));
    }

    #[test]
    fn test_single_character_flip_breaks_checksum() {
        let chars: Vec<char> = VALID_ADDRESS.chars().collect();
        let sep = VALID_ADDRESS.rfind('1').unwrap();
        for i in 0..chars.len() {
            if i == sep {
                continue;
            }
            for replacement in CHARSET.iter().map(|b| *b as char) {
                if replacement == chars[i] {
                    continue;
                }
                let mut flipped = chars.clone();
                flipped[i] = replacement;
                let flipped: String = flipped.into_iter().collect();
                assert!(decode(&flipped).is_err(), "{flipped}");
            }
        }
    }

    #[test]
    fn test_length_limit() {
        // 91 characters with a valid structure otherwise
        let data = vec![0u8; MAX_LENGTH - 1 - 1 - CHECKSUM_LENGTH];
        let ok = encode("a", &data).unwrap();
        assert_eq!(ok.len(), MAX_LENGTH);
        assert!(decode(&ok).is_ok());

        let too_long = vec![0u8; data.len() + 1];
        assert!(encode("a", &too_long).is_err());

        let mut padded = ok.clone();
        padded.insert(2, 'q');
        assert_eq!(padded.len(), MAX_LENGTH + 1);
        assert!(decode(&padded).is_err());
    }

    #[test]
    fn test_encode_rejects_bad_hrp() {
        assert!(encode("", &[0, 1, 2]).is_err());
        assert!(encode("Bnb", &[0, 1, 2]).is_err());
        assert!(encode("b n", &[0, 1, 2]).is_err());
    }

    #[test]
    fn test_encode_lowercases_hrp() {
        let upper = encode("BNB", &[1, 2, 3]).unwrap();
        let lower = encode("bnb", &[1, 2, 3]).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_encode_rejects_wide_values() {
        assert!(encode("bnb", &[1, 32]).is_err());
    }

    #[test]
    fn test_encode_decode_matches() {
        let (hrp, data) = decode(VALID_ADDRESS).unwrap();
        assert_eq!(encode(&hrp, &data).unwrap(), VALID_ADDRESS);
    }

    #[test]
    fn test_convert_bits_whole_bytes() {
        let bytes = hex::decode("ba36f0fad74d8f41045463e4774f328f4af779e5").unwrap();
        let groups = convert_bits::<8, 5, true>(&bytes).unwrap();
        assert_eq!(groups.len(), 32);
        assert_eq!(convert_bits::<5, 8, false>(&groups).unwrap(), bytes);

        let odd: Vec<u8> = (0u8..=32).collect();
        let groups = convert_bits::<8, 5, true>(&odd).unwrap();
        assert_eq!(convert_bits::<5, 8, false>(&groups).unwrap(), odd);
    }

    #[test]
    fn test_convert_bits_rejects_nonzero_padding() {
        // 0xff -> 11111 111(00): trailing bits must be zero without padding
        assert!(convert_bits::<5, 8, false>(&[0x1f, 0x1f]).is_none());
        assert_eq!(convert_bits::<5, 8, false>(&[0x1f, 0x1c]), Some(vec![0xff]));
    }

    #[test]
    fn test_convert_bits_rejects_excess_leftover() {
        // three groups = 15 bits: one byte plus 7 leftover bits (>= 5)
        assert!(convert_bits::<5, 8, false>(&[0, 0, 0]).is_none());
    }

    #[test]
    fn test_convert_bits_rejects_wide_input() {
        assert!(convert_bits::<5, 8, false>(&[0x20]).is_none());
    }

    #[test]
    fn test_matches_reference_crate() {
        use ::bech32::{Bech32, Hrp};

        let hash = hex::decode("b6561dcc104130059a7c08f48c64610c1f6f9064").unwrap();
        let groups = convert_bits::<8, 5, true>(&hash).unwrap();
        let ours = encode("tbnb", &groups).unwrap();
        let reference = ::bech32::encode::<Bech32>(Hrp::parse("tbnb").unwrap(), &hash).unwrap();
        assert_eq!(ours, reference);
    }
}
