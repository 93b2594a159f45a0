//! Resource Ledger
//!
//! Fixed-schema inventory of integer counts, one per [`ResourceKind`].

use bevy_ecs::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

pub use syzm_events::{LedgerSnapshot, ResourceKind};

/// Component: an agent's inventory
///
/// The schema is the closed `ResourceKind` enum, so two ledgers always share it
/// and kind-by-kind arithmetic needs no runtime schema check. Counts are
/// unsigned; the trade protocol only moves units that exist.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ledger {
    counts: [u32; ResourceKind::COUNT],
}

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from counts in stable kind order.
    pub fn from_counts(dew: u32, bast: u32, sap: u32) -> Self {
        Self {
            counts: [dew, bast, sap],
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        &mut self.counts[kind.index()]
    }

    /// Kind-by-kind sum, saturating at `u32::MAX`.
    pub fn add(self, other: &Ledger) -> Ledger {
        let mut result = self;
        for (count, extra) in result.counts.iter_mut().zip(other.counts) {
            *count = count.saturating_add(extra);
        }
        result
    }

    /// Kind-by-kind difference, saturating at zero.
    ///
    /// Callers subtract only units known to be present; use
    /// [`Ledger::checked_sub`] when that is not already established.
    pub fn subtract(&self, other: &Ledger) -> Ledger {
        let mut result = *self;
        for (count, less) in result.counts.iter_mut().zip(other.counts) {
            *count = count.saturating_sub(less);
        }
        result
    }

    /// Kind-by-kind difference, or `None` if any kind would go below zero.
    pub fn checked_sub(&self, other: &Ledger) -> Option<Ledger> {
        let mut result = *self;
        for (count, less) in result.counts.iter_mut().zip(other.counts) {
            *count = count.checked_sub(less)?;
        }
        Some(result)
    }

    /// Assign every kind an independent uniform count in `[low, high)`.
    ///
    /// Draws happen in stable kind order so the RNG sequence is reproducible.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, low: u32, high: u32) {
        for count in self.counts.iter_mut() {
            *count = rng.gen_range(low..high);
        }
    }

    /// Counts as `(dew, bast, sap)`.
    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.counts[0], self.counts[1], self.counts[2])
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// The largest single holding, earliest kind first on ties.
    pub fn max_holding(&self) -> (ResourceKind, u32) {
        let mut best = (ResourceKind::ALL[0], self.counts[0]);
        for kind in ResourceKind::ALL.into_iter().skip(1) {
            if self.get(kind) > best.1 {
                best = (kind, self.get(kind));
            }
        }
        best
    }

    /// Move one unit of `kind` from `self` into `recipient`.
    ///
    /// Returns `false` and changes nothing when `self` holds none or the
    /// recipient's count is already at `u32::MAX`.
    pub fn give_one(&mut self, kind: ResourceKind, recipient: &mut Ledger) -> bool {
        if recipient.get(kind) == u32::MAX {
            return false;
        }
        let held = self.get_mut(kind);
        if *held == 0 {
            return false;
        }
        *held -= 1;
        *recipient.get_mut(kind) += 1;
        true
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let (dew, bast, sap) = self.as_tuple();
        LedgerSnapshot::new(dew, bast, sap)
    }
}

impl From<LedgerSnapshot> for Ledger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Ledger::from_counts(snapshot.dew, snapshot.bast, snapshot.sap)
    }
}

impl Add for Ledger {
    type Output = Ledger;

    fn add(self, other: Ledger) -> Ledger {
        Ledger::add(self, &other)
    }
}

impl AddAssign for Ledger {
    fn add_assign(&mut self, other: Ledger) {
        *self = Ledger::add(*self, &other);
    }
}

impl Sub for Ledger {
    type Output = Ledger;

    fn sub(self, other: Ledger) -> Ledger {
        self.subtract(&other)
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in ResourceKind::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", self.get(*kind), kind)?;
        }
        Ok(())
    }
}
