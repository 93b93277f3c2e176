//! Row digest computation.
//!
//! A row's digest is the MD5 of its cells joined by the run's delimiter,
//! rendered as lowercase hex. The delimiter is part of the hashed bytes, so
//! the same cells hash differently under `,` and `\t`.

use md5::{Digest as _, Md5};

/// Length of a rendered digest in hex characters.
pub const DIGEST_LEN: usize = 32;

/// Compute the hex MD5 digest of `values` joined by `delimiter`.
///
/// Cells and separators are fed to the hasher one at a time, which hashes
/// the same bytes as the joined UTF-8 string without building it. An empty
/// sequence hashes the empty string.
pub fn hash_row<I, S>(values: I, delimiter: char) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = [0u8; 4];
    let separator = delimiter.encode_utf8(&mut buf).as_bytes();

    let mut hasher = Md5::new();
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            hasher.update(separator);
        }
        hasher.update(value.as_ref().as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use md5::Digest as _;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            hash_row(["alice", "30"], ','),
            "1674d082249fd065f89e0426e5155da8"
        );
        assert_eq!(
            hash_row(["bob", "25"], ','),
            "ddafa0225c13a689b343d5ce07f1e927"
        );
        assert_eq!(
            hash_row(["alice", "30"], '\t'),
            "30da620eb110906dcbdaeda5bea129e9"
        );
    }

    #[test]
    fn test_empty_row_hashes_empty_string() {
        let empty: [&str; 0] = [];
        assert_eq!(hash_row(empty, ','), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_single_empty_cell() {
        // One empty cell joins to "" as well
        assert_eq!(hash_row([""], ','), hash_row(Vec::<String>::new(), ','));
    }

    #[test]
    fn test_matches_joined_string() {
        let cells = ["x", "", "héllo", "a\"b", "line\nbreak"];
        let joined = cells.join(",");
        let expected = hex::encode(Md5::digest(joined.as_bytes()));
        assert_eq!(hash_row(cells, ','), expected);
    }

    #[test]
    fn test_deterministic() {
        let cells = vec!["id".to_string(), "value".to_string()];
        assert_eq!(hash_row(&cells, ','), hash_row(&cells, ','));
    }

    #[test]
    fn test_delimiter_sensitive() {
        let comma = hash_row(["a", "b"], ',');
        let tab = hash_row(["a", "b"], '\t');
        assert_eq!(comma, "b345e1dc09f20fdefdea469f09167892");
        assert_eq!(tab, "6f7f0b434651658d5d07ec3764180020");
        assert_ne!(comma, tab);
    }

    #[test]
    fn test_single_cell_ignores_delimiter() {
        // Nothing to join, so the delimiter never reaches the hasher
        assert_eq!(hash_row(["solo"], ','), hash_row(["solo"], '\t'));
    }

    #[test]
    fn test_lowercase_hex_of_fixed_length() {
        let digest = hash_row(["Some", "MIXED", "Case"], ',');
        assert_eq!(digest.len(), DIGEST_LEN);
        assert!(
            digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
