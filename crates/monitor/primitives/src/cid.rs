//! Opaque block content identifiers.

use core::{fmt, str::FromStr};

use bytes::Bytes;

/// Error returned when a hex-encoded [`Cid`] cannot be decoded.
#[derive(Debug, thiserror::Error)]
#[error("invalid cid encoding: {0}")]
pub struct CidParseError(#[from] hex::FromHexError);

/// Raw bytes of a block content identifier.
///
/// The bytes are never parsed or validated. Equality, ordering and hashing are
/// bytewise, which is all the monitor needs to compare blocks across events.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cid(Bytes);

impl Cid {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Bytes> for Cid {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for Cid {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Cid {
    fn from(bytes: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(bytes))
    }
}

impl AsRef<[u8]> for Cid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cid").field(&format_args!("{self}")).finish()
    }
}

impl FromStr for Cid {
    type Err = CidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(hex::decode(s)?.into()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Cid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Cid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cid_display_is_hex() {
        let cid = Cid::from(vec![0x01, 0x55, 0x12, 0xab]);
        assert_eq!(cid.to_string(), "015512ab");
        assert_eq!(format!("{cid:?}"), "Cid(015512ab)");
    }

    #[test]
    fn test_cid_parse() {
        let cid: Cid = "015512ab".parse().unwrap();
        assert_eq!(cid.as_bytes(), &[0x01, 0x55, 0x12, 0xab]);
        assert_eq!(cid.len(), 4);

        assert!("not-hex".parse::<Cid>().is_err());
        assert!("abc".parse::<Cid>().is_err());
    }

    #[test]
    fn test_cid_ordering_is_bytewise() {
        let a = Cid::from(&[0x01, 0x02][..]);
        let b = Cid::from(&[0x01, 0x03][..]);
        assert!(a < b);
        assert_eq!(a, Cid::new(Bytes::from_static(&[0x01, 0x02])));
    }

    #[test]
    fn test_empty_cid() {
        let cid = Cid::default();
        assert!(cid.is_empty());
        assert_eq!(cid.to_string(), "");
    }
}
