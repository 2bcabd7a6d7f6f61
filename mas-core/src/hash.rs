//! Canonical input hashing.
//!
//! `input_md5` is computed over a canonical JSON projection of `arguments`
//! restricted to scalar/sequence/mapping types, so that two calls with
//! identical serialised inputs hash identically regardless of map key
//! insertion order. The field keeps the `input_md5` name for historical
//! reasons; the implementation uses SHA-256 truncated to a hex string, since
//! nothing depends on MD5's specific bit pattern, only on determinism.

use sha2::{Digest, Sha256};

use crate::value::{ArgValue, Arguments};

/// Canonicalizes an `ArgValue` into a stable string form: object keys sorted
/// (guaranteed by `BTreeMap`'s iteration order), numbers/strings/bools/null
/// rendered literally.
fn canonicalize(value: &ArgValue, out: &mut String) {
    match value {
        ArgValue::Null => out.push_str("null"),
        ArgValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        ArgValue::Number(n) => out.push_str(&format!("{n}")),
        ArgValue::String(s) => {
            out.push('"');
            out.push_str(&s.replace('\\', "\\\\").replace('"', "\\\""));
            out.push('"');
        }
        ArgValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                canonicalize(item, out);
            }
            out.push(']');
        }
        ArgValue::Map(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(k);
                out.push_str("\":");
                canonicalize(v, out);
            }
            out.push('}');
        }
        // Attachment refs are excluded from the hash projection; render as null so
        // attachment-only differences don't silently alias.
        ArgValue::AttachmentRef { .. } => out.push_str("null"),
    }
}

/// Computes `input_md5` over `arguments`.
pub fn input_md5(arguments: &Arguments) -> String {
    let wrapped = ArgValue::Map(arguments.clone());
    let mut canonical = String::new();
    canonicalize(&wrapped, &mut canonical);
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::query_arguments;

    /// Identical canonical projections yield identical hashes.
    #[test]
    fn identical_projections_yield_identical_hashes() {
        let a = query_arguments("hello");
        let b = query_arguments("hello");
        assert_eq!(input_md5(&a), input_md5(&b));
    }

    /// Map key insertion order does not affect the hash (BTreeMap sorts keys).
    #[test]
    fn key_order_does_not_affect_hash() {
        let mut a = Arguments::new();
        a.insert("z".to_string(), ArgValue::Number(1.0));
        a.insert("a".to_string(), ArgValue::Number(2.0));

        let mut b = Arguments::new();
        b.insert("a".to_string(), ArgValue::Number(2.0));
        b.insert("z".to_string(), ArgValue::Number(1.0));

        assert_eq!(input_md5(&a), input_md5(&b));
    }

    #[test]
    fn different_values_yield_different_hashes() {
        let a = query_arguments("hello");
        let b = query_arguments("world");
        assert_ne!(input_md5(&a), input_md5(&b));
    }
}
