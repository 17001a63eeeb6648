/// Document identifiers
///
/// Every stored document is keyed by a MongoDB ObjectId. On the wire the id
/// is a 24 character hex string, so `DocumentId` serializes as a plain
/// string instead of the extended-JSON `{"$oid": ...}` form.
///
/// # Example
///
/// ```
/// use taskminder_shared::models::id::DocumentId;
///
/// let id = DocumentId::new();
/// let parsed: DocumentId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(ObjectId);

/// Error returned when a string is not a valid document id
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid document id: {0}")]
pub struct InvalidDocumentId(pub String);

impl DocumentId {
    /// Generates a fresh identifier
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Returns the underlying ObjectId for storage filters
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
