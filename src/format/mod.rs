//! Wire formats for stored hashes and ciphertext envelopes.
//!
//! Both are two hex fields joined by a separator:
//! ```text
//! STORED HASH:  SALT_HEX (16) ':' DERIVED_KEY_HEX (128)
//! ENVELOPE:     IV_HEX (32) ':' CIPHERTEXT_HEX (multiple of 32)
//! ```
//! Parsing always splits on the first separator. Everything after it belongs
//! to the second field.

pub mod envelope;
pub mod stored_hash;

pub use envelope::Envelope;
pub use stored_hash::StoredHash;

use crate::error::{CredError, Result};

/// Separator between the two fields of a wire value.
pub const SEPARATOR: char = ':';

/// Splits a wire value on its first separator.
///
/// # Errors
///
/// Returns `MalformedInput` if the separator is missing.
pub fn split_pair<'a>(value: &'a str, what: &str) -> Result<(&'a str, &'a str)> {
    value
        .split_once(SEPARATOR)
        .ok_or_else(|| CredError::MalformedInput(format!("{what} is missing '{SEPARATOR}'")))
}

/// Decodes a hex field, accepting either case.
pub(crate) fn decode_hex(field: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(field).map_err(|e| CredError::MalformedInput(format!("{what}: {e}")))
}

/// Implements serde support through the wire string form.
macro_rules! serde_via_str {
    ($ty:ty, $expecting:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                struct Visitor;

                impl serde::de::Visitor<'_> for Visitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_str<E: serde::de::Error>(
                        self,
                        v: &str,
                    ) -> std::result::Result<$ty, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(Visitor)
            }
        }
    };
}

pub(crate) use serde_via_str;
