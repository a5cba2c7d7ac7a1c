//! ASCII base-85 codec as used by the PDF `ASCII85Decode` filter.
//!
//! Every group of four input bytes is written as five characters in the range
//! `!`..=`u`. A group of four zero bytes is abbreviated as `z`. The encoded data
//! is terminated by the end-of-data marker `~>`.

/// Marks the end of the encoded data.
pub const EOD: &[u8] = b"~>";

const OFFSET: u8 = b'!';
const ZERO_GROUP: u8 = b'z';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A character outside of `!`..=`u` that is neither `z` nor whitespace.
    InvalidCharacter { position: usize, character: u8 },
    /// `z` appeared inside a group.
    MisplacedZero { position: usize },
    /// A group decodes to a value that doesn't fit into 32 bits.
    Overflow { position: usize },
    /// The last group consists of a single character.
    TruncatedGroup,
}

/// Maximum number of bytes `encode` produces for `len` input bytes, including
/// the end-of-data marker.
pub fn max_encoded_len(len: usize) -> usize {
    (len / 4) * 5 + if len % 4 == 0 { 0 } else { len % 4 + 1 } + EOD.len()
}

fn encode_group(group: u32, out: &mut [u8; 5]) {
    let mut value = group;
    for slot in out.iter_mut().rev() {
        *slot = (value % 85) as u8 + OFFSET;
        value /= 85;
    }
}

/// Encode `data` and append the end-of-data marker.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(max_encoded_len(data.len()));
    let mut chunks = data.chunks_exact(4);
    let mut buf = [0u8; 5];

    for chunk in &mut chunks {
        let group = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if group == 0 {
            out.push(ZERO_GROUP);
        } else {
            encode_group(group, &mut buf);
            out.extend_from_slice(&buf);
        }
    }

    // A partial group is padded with zeros and only `n + 1` characters are kept.
    let rest = chunks.remainder();
    if !rest.is_empty() {
        let mut padded = [0u8; 4];
        padded[..rest.len()].copy_from_slice(rest);
        encode_group(u32::from_be_bytes(padded), &mut buf);
        out.extend_from_slice(&buf[..rest.len() + 1]);
    }

    out.extend_from_slice(EOD);
    out
}

/// Decode `data`. Decoding stops at the end-of-data marker if present.
pub fn decode(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(data.len() / 5 * 4 + 4);
    let mut group = [0u8; 5];
    let mut filled = 0;

    for (position, &c) in data.iter().enumerate() {
        match c {
            b'~' => break,
            c if c.is_ascii_whitespace() => continue,
            ZERO_GROUP if filled == 0 => out.extend_from_slice(&[0; 4]),
            ZERO_GROUP => return Err(DecodeError::MisplacedZero { position }),
            b'!'..=b'u' => {
                group[filled] = c - OFFSET;
                filled += 1;
                if filled == 5 {
                    out.extend_from_slice(&decode_group(&group, position)?.to_be_bytes());
                    filled = 0;
                }
            }
            character => return Err(DecodeError::InvalidCharacter { position, character }),
        }
    }

    match filled {
        0 => {}
        1 => return Err(DecodeError::TruncatedGroup),
        n => {
            // pad with the highest digit, then drop the bytes that were not encoded
            for slot in group.iter_mut().skip(n) {
                *slot = 84;
            }
            let value = decode_group(&group, data.len())?;
            out.extend_from_slice(&value.to_be_bytes()[..n - 1]);
        }
    }

    Ok(out)
}

fn decode_group(group: &[u8; 5], position: usize) -> Result<u32, DecodeError> {
    let value = group.iter().fold(0u64, |acc, &digit| acc * 85 + u64::from(digit));
    u32::try_from(value).map_err(|_| DecodeError::Overflow { position })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(encode(b""), b"~>".to_vec());
        assert_eq!(decode(b"~>"), Ok(vec![]));
    }

    #[test]
    fn zero_group_is_abbreviated() {
        assert_eq!(encode(&[0, 0, 0, 0, 0, 0, 0, 0]), b"zz~>".to_vec());
        assert_eq!(decode(b"zz~>"), Ok(vec![0; 8]));
    }

    #[test]
    fn partial_zero_group_is_not_abbreviated() {
        assert_eq!(encode(&[0, 0]), b"!!!~>".to_vec());
    }

    #[test]
    fn known_text() {
        // Reference value from the PDF reference, section 7.4.3.
        let encoded = encode(b"Man ");
        assert_eq!(encoded, b"9jqo^~>".to_vec());
        assert_eq!(decode(&encoded), Ok(b"Man ".to_vec()));
    }

    #[test]
    fn full_range_group() {
        let encoded = encode(&[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(encoded, b"s8W-!~>".to_vec());
        assert_eq!(decode(&encoded), Ok(vec![0xff; 4]));
    }

    #[test]
    fn all_lengths_round_trip() {
        let data: Vec<u8> = (0u8..=255).rev().collect();
        for len in 0..data.len() {
            let encoded = encode(&data[..len]);
            assert!(encoded.len() <= max_encoded_len(len));
            assert_eq!(decode(&encoded).as_deref(), Ok(&data[..len]), "length {}", len);
        }
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(decode(b"9j qo\n^~>"), Ok(b"Man ".to_vec()));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(
            decode(b"9jqo{"),
            Err(DecodeError::InvalidCharacter {
                position: 4,
                character: b'{'
            })
        );
        assert_eq!(decode(b"9jz"), Err(DecodeError::MisplacedZero { position: 2 }));
        assert_eq!(decode(b"9jqo^9~>"), Err(DecodeError::TruncatedGroup));
        assert_eq!(decode(b"uuuuu"), Err(DecodeError::Overflow { position: 4 }));
    }
}
