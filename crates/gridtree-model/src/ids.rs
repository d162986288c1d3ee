#![deny(unsafe_code)]

use std::fmt;

use sha2::Digest;

/// Identifier namespace for the three node kinds.
///
/// Each namespace hashes to a distinct tag, so a group, an attribute, and a
/// domain sharing the same name still receive three different identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdNamespace {
    Group,
    Attribute,
    Domain,
}

impl IdNamespace {
    fn tag(self) -> &'static [u8] {
        match self {
            IdNamespace::Group => b"group",
            IdNamespace::Attribute => b"attribute",
            IdNamespace::Domain => b"domain",
        }
    }
}

/// A deterministic node identifier.
///
/// Short, fixed-size binary id rendered as lowercase hex. Derived purely
/// from the namespace and the node name, so the same declaration always
/// yields the same id across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId([u8; 16]);

impl NodeId {
    /// Derive an id from a namespace and a name.
    ///
    /// sha256("<tag>\0<name>"), truncated to the first 16 bytes.
    pub fn derive(namespace: IdNamespace, name: &str) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(namespace.tag());
        hasher.update([0u8]);
        hasher.update(name.as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        if bytes.len() != 16 {
            return Err(serde::de::Error::custom("NodeId must be 16 bytes"));
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
