use sha2::{Digest, Sha512};

/// SHA-512 digest of `data` rendered as 128 lowercase hex characters
pub fn sha512_hex(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let hash = hasher.finalize();

    format!("{hash:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_matches_known_digest() {
        assert_eq!(
            sha512_hex(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha512_hex(b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_output_is_lowercase_hex() {
        let digest = sha512_hex(&[0xff; 1024]);
        assert_eq!(digest.len(), 128);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let data = b"\x89PNG\r\n\x1a\n fake image";
        assert_eq!(sha512_hex(data), sha512_hex(data));
        assert_ne!(sha512_hex(data), sha512_hex(b"\x89PNG\r\n\x1a\n fake imagf"));
    }
}
