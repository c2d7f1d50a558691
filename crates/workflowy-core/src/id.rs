//! Random identifiers for new items and push-and-poll requests.

use rand::RngCore;
use uuid::Uuid;

/// RFC 4648 base-32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Number of random bytes a poll id is drawn from.
const POLL_ID_SOURCE_BYTES: usize = 64;

/// Length of a poll id.
pub const POLL_ID_LEN: usize = 7;

/// Generates a fresh item id: 32 lowercase hex digits grouped 8-4-4-4-12.
pub fn new_item_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Generates a fresh push-and-poll id.
///
/// This is the first seven characters of the base-32 encoding of 64 random
/// bytes, so only the leading five bytes ever reach the output.
pub fn new_poll_id() -> String {
    let mut bytes = [0u8; POLL_ID_SOURCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let mut encoded = base32_encode(&bytes);
    encoded.truncate(POLL_ID_LEN);
    encoded
}

/// Encodes bytes as padded RFC 4648 base-32.
fn base32_encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(5) * 8);

    for chunk in input.chunks(5) {
        let mut block = [0u8; 5];
        block[..chunk.len()].copy_from_slice(chunk);
        let bits = block
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));

        // 1 byte -> 2 symbols, 2 -> 4, 3 -> 5, 4 -> 7, 5 -> 8
        let symbols = (chunk.len() * 8).div_ceil(5);
        for i in 0..8 {
            if i < symbols {
                let index = ((bits >> (35 - i * 5)) & 0x1f) as usize;
                out.push(BASE32_ALPHABET[index] as char);
            } else {
                out.push('=');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_format() {
        let id = new_item_id();
        let groups: Vec<&str> = id.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(
            id.chars()
                .filter(|c| *c != '-')
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_item_ids_are_unique() {
        assert_ne!(new_item_id(), new_item_id());
    }

    #[test]
    fn test_poll_id_format() {
        let id = new_poll_id();
        assert_eq!(id.len(), POLL_ID_LEN);
        assert!(id.bytes().all(|b| BASE32_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_base32_rfc4648_vectors() {
        assert_eq!(base32_encode(b""), "");
        assert_eq!(base32_encode(b"f"), "MY======");
        assert_eq!(base32_encode(b"fo"), "MZXQ====");
        assert_eq!(base32_encode(b"foo"), "MZXW6===");
        assert_eq!(base32_encode(b"foob"), "MZXW6YQ=");
        assert_eq!(base32_encode(b"fooba"), "MZXW6YTB");
        assert_eq!(base32_encode(b"foobar"), "MZXW6YTBOI======");
    }
}
