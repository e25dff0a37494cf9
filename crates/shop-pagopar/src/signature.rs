//! # Request Signatures
//!
//! Every request carries `firma`: the hex SHA-256 digest of the private key
//! followed by the serialized payload. Only the digest leaves the process.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Name of the signature field in request bodies
pub const SIGNATURE_FIELD: &str = "firma";

/// Sign a raw payload string
pub fn sign(private_key: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(private_key.as_bytes());
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}

/// Sign a JSON object in its canonical form
pub fn sign_payload(private_key: &str, payload: &Map<String, Value>) -> String {
    sign(private_key, &canonical_json(payload))
}

/// Compact JSON with object keys sorted at every level, so the output is
/// stable for a given set of fields regardless of insertion order.
pub fn canonical_json(payload: &Map<String, Value>) -> String {
    serde_json::to_string(&CanonicalObject(payload)).unwrap_or_default()
}

struct CanonicalObject<'a>(&'a Map<String, Value>);

struct CanonicalValue<'a>(&'a Value);

impl Serialize for CanonicalObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &CanonicalValue(value))?;
        }
        map.end()
    }
}

impl Serialize for CanonicalValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => CanonicalObject(map).serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&CanonicalValue(item))?;
                }
                seq.end()
            }
            other => other.serialize(serializer),
        }
    }
}
