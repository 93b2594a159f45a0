//! Snapshot Generation
//!
//! Periodic JSON captures of the whole population.

use std::fs;
use std::path::Path;

use syzm_events::{generate_snapshot_id, PopulationSnapshot};

use crate::simulation::Simulation;

/// File name of the rolling latest-state snapshot
pub const CURRENT_STATE_FILE: &str = "current_state.json";

/// Tracks snapshot numbering and cadence
#[derive(Debug, Clone)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
    last_snapshot_tick: Option<u64>,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
            last_snapshot_tick: None,
        }
    }

    /// Tick 0 always snapshots; an interval of 0 disables periodic snapshots.
    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        current_tick == 0
            || (self.snapshot_interval > 0 && current_tick % self.snapshot_interval == 0)
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn mark_snapshot(&mut self, tick: u64) {
        self.last_snapshot_tick = Some(tick);
    }

    pub fn last_snapshot_tick(&self) -> Option<u64> {
        self.last_snapshot_tick
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// Capture the simulation under the next snapshot id
pub fn generate_snapshot(
    sim: &Simulation,
    generator: &mut SnapshotGenerator,
    triggered_by: &str,
) -> PopulationSnapshot {
    let snapshot_id = generator.next_id();
    generator.mark_snapshot(sim.current_tick());
    sim.snapshot(&snapshot_id, triggered_by)
}

/// Write a snapshot to an explicit path
pub fn write_snapshot(snapshot: &PopulationSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = snapshot
        .to_json_pretty()
        .map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Write a snapshot as `<dir>/<snapshot_id>.json`
pub fn write_snapshot_to_dir(snapshot: &PopulationSnapshot, dir: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_snapshot(snapshot, dir.join(format!("{}.json", snapshot.snapshot_id)))
}

/// Write current state (overwrites each time)
pub fn write_current_state(snapshot: &PopulationSnapshot, dir: impl AsRef<Path>) -> std::io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_snapshot(snapshot, dir.join(CURRENT_STATE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_cadence() {
        let generator = SnapshotGenerator::new(100);
        assert!(generator.should_snapshot(0));
        assert!(!generator.should_snapshot(99));
        assert!(generator.should_snapshot(100));
        assert!(generator.should_snapshot(300));

        let disabled = SnapshotGenerator::new(0);
        assert!(disabled.should_snapshot(0));
        assert!(!disabled.should_snapshot(100));
    }

    #[test]
    fn test_snapshot_ids_are_sequential() {
        let mut generator = SnapshotGenerator::new(10);
        assert_eq!(generator.next_id(), "snap_000001");
        assert_eq!(generator.next_id(), "snap_000002");
        assert_eq!(generator.snapshot_count(), 2);
    }

    #[test]
    fn test_write_snapshot_files() {
        let dir = tempdir().unwrap();
        let mut sim = Simulation::new(Config::default()).unwrap();
        sim.populate(4);
        sim.tick();

        let mut generator = SnapshotGenerator::new(1);
        let snapshot = generate_snapshot(&sim, &mut generator, "test");
        assert_eq!(generator.last_snapshot_tick(), Some(1));

        let out = dir.path().join("snapshots");
        write_snapshot_to_dir(&snapshot, &out).unwrap();
        write_current_state(&snapshot, &out).unwrap();

        let written = fs::read_to_string(out.join("snap_000001.json")).unwrap();
        let parsed = PopulationSnapshot::from_json(&written).unwrap();
        assert_eq!(parsed, snapshot);
        assert!(out.join(CURRENT_STATE_FILE).exists());
    }
}
