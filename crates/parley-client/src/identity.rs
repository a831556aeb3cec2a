//! Client-generated display identity.

use std::fmt;

use crate::Environment;

/// Number of characters in a generated identity.
pub const IDENTITY_LEN: usize = 5;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Short alphanumeric token naming the user for one connection.
///
/// Uniqueness is advisory only: the server never verifies it and collisions
/// are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Generate a fresh identity from the environment's RNG.
    pub fn generate<E: Environment>(env: &E) -> Self {
        let mut bytes = [0u8; IDENTITY_LEN];
        env.random_bytes(&mut bytes);

        let token =
            bytes.iter().map(|b| char::from(ALPHABET[usize::from(*b) % ALPHABET.len()])).collect();
        Self(token)
    }

    /// Identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    /// Environment that returns a fixed byte pattern.
    #[derive(Clone)]
    struct FixedBytes(Vec<u8>);

    impl Environment for FixedBytes {
        fn local_time(&self) -> NaiveDateTime {
            NaiveDateTime::default()
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            for (dst, src) in buffer.iter_mut().zip(self.0.iter().cycle()) {
                *dst = *src;
            }
        }
    }

    #[test]
    fn generated_identity_is_short_alphanumeric() {
        let identity = Identity::generate(&crate::SystemEnv::new());

        assert_eq!(identity.as_str().len(), IDENTITY_LEN);
        assert!(identity.as_str().chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn bytes_map_onto_base36() {
        // 33 -> 'x', 7 -> '7', 26 -> 'q', 36 wraps to '0', 71 wraps to 'z'
        let identity = Identity::generate(&FixedBytes(vec![33, 7, 26, 36, 71]));
        assert_eq!(identity.as_str(), "x7q0z");
    }
}
