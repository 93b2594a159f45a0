//! Resource Kinds
//!
//! The closed set of tradeable goods and the serialized form of an inventory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tradeable good. The declaration order is the stable display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Dew,
    Bast,
    Sap,
}

impl ResourceKind {
    /// Number of kinds in the schema.
    pub const COUNT: usize = 3;

    /// All kinds, in stable order.
    pub const ALL: [ResourceKind; Self::COUNT] =
        [ResourceKind::Dew, ResourceKind::Bast, ResourceKind::Sap];

    /// Position of this kind in [`ResourceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ResourceKind::Dew => 0,
            ResourceKind::Bast => 1,
            ResourceKind::Sap => 2,
        }
    }

    /// Lowercase name used in logs and files.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Dew => "dew",
            ResourceKind::Bast => "bast",
            ResourceKind::Sap => "sap",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResourceKindError(pub String);

impl fmt::Display for ParseResourceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource kind: {}", self.0)
    }
}

impl std::error::Error for ParseResourceKindError {}

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dew" => Ok(ResourceKind::Dew),
            "bast" => Ok(ResourceKind::Bast),
            "sap" => Ok(ResourceKind::Sap),
            other => Err(ParseResourceKindError(other.to_string())),
        }
    }
}

/// Serialized inventory counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub dew: u32,
    pub bast: u32,
    pub sap: u32,
}

impl LedgerSnapshot {
    pub fn new(dew: u32, bast: u32, sap: u32) -> Self {
        Self { dew, bast, sap }
    }

    /// Count held of one kind.
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Dew => self.dew,
            ResourceKind::Bast => self.bast,
            ResourceKind::Sap => self.sap,
        }
    }

    /// Counts in stable kind order.
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.dew, self.bast, self.sap)
    }

    pub fn total(&self) -> u32 {
        self.dew + self.bast + self.sap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_is_stable() {
        let indices: Vec<usize> = ResourceKind::ALL.iter().map(|k| k.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(ResourceKind::ALL[0], ResourceKind::Dew);
        assert_eq!(ResourceKind::ALL[2], ResourceKind::Sap);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("dew".parse::<ResourceKind>(), Ok(ResourceKind::Dew));
        assert_eq!(" Bast ".parse::<ResourceKind>(), Ok(ResourceKind::Bast));
        assert!("honey".parse::<ResourceKind>().is_err());

        for kind in ResourceKind::ALL {
            assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResourceKind::Sap).unwrap();
        assert_eq!(json, "\"sap\"");
    }

    #[test]
    fn test_ledger_snapshot_access() {
        let snap = LedgerSnapshot::new(3, 0, 7);
        assert_eq!(snap.get(ResourceKind::Dew), 3);
        assert_eq!(snap.get(ResourceKind::Sap), 7);
        assert_eq!(snap.as_tuple(), (3, 0, 7));
        assert_eq!(snap.total(), 10);
    }
}
