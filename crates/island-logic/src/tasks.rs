//! Per-region objectives and the escape condition.
//!
//! A forward gate only opens once every task of the current region is done.

use serde::{Deserialize, Serialize};

use crate::constants::objectives::{CLUES_REQUIRED, SURVIVORS_REQUIRED};
use crate::zones::{KeyKind, Zone};

/// Snapshot of everything the objectives look at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Zones whose clue has been picked up.
    pub clues_found: Vec<Zone>,
    pub keys: Vec<KeyKind>,
    pub has_gun: bool,
    /// Zones holding a survivor that is following the player or already rescued.
    pub survivors_helped: Vec<Zone>,
    pub clues: u32,
    pub rescued: u32,
}

impl Progress {
    pub fn has_key(&self, key: KeyKind) -> bool {
        self.keys.contains(&key)
    }

    pub fn has_all_keys(&self) -> bool {
        KeyKind::all().iter().all(|k| self.has_key(*k))
    }

    fn clue_found(&self, zone: Zone) -> bool {
        self.clues_found.contains(&zone)
    }

    fn helped(&self, zone: Zone) -> bool {
        self.survivors_helped.contains(&zone)
    }
}

/// One line of the HUD task list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub label: &'static str,
    pub done: bool,
}

impl Task {
    fn new(label: &'static str, done: bool) -> Self {
        Self { label, done }
    }
}

pub fn region_tasks(zone: Zone, progress: &Progress) -> Vec<Task> {
    match zone {
        Zone::Ground => vec![
            Task::new("Find Ground clue", progress.clue_found(Zone::Ground)),
            Task::new("Collect Jail key", progress.has_key(KeyKind::Jail)),
            Task::new("Get a weapon", progress.has_gun),
        ],
        Zone::Estate => vec![
            Task::new("Find Estate clue", progress.clue_found(Zone::Estate)),
            Task::new("Collect Cave key", progress.has_key(KeyKind::Cave)),
            Task::new("Help trapped worker", progress.helped(Zone::Estate)),
        ],
        Zone::Tunnels => vec![
            Task::new("Find Tunnel clue", progress.clue_found(Zone::Tunnels)),
            Task::new("Collect Boat key", progress.has_key(KeyKind::Boat)),
            Task::new("Guide tunnel survivor", progress.helped(Zone::Tunnels)),
        ],
        Zone::Harbor => vec![
            Task::new("Bring all clues", progress.clues >= CLUES_REQUIRED),
            Task::new("Bring all keys", progress.has_all_keys()),
            Task::new("Rescue both survivors", progress.rescued >= SURVIVORS_REQUIRED),
        ],
    }
}

pub fn region_complete(zone: Zone, progress: &Progress) -> bool {
    region_tasks(zone, progress).iter().all(|t| t.done)
}

/// Whether boarding the boat ends the game in victory.
pub fn ready_to_escape(progress: &Progress) -> bool {
    progress.clues >= CLUES_REQUIRED
        && progress.has_all_keys()
        && progress.rescued >= SURVIVORS_REQUIRED
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished() -> Progress {
        Progress {
            clues_found: vec![Zone::Ground, Zone::Estate, Zone::Tunnels],
            keys: KeyKind::all().to_vec(),
            has_gun: true,
            survivors_helped: vec![Zone::Estate, Zone::Tunnels],
            clues: 3,
            rescued: 2,
        }
    }

    #[test]
    fn test_fresh_round_has_nothing_done() {
        let p = Progress::default();
        for zone in Zone::all() {
            let tasks = region_tasks(*zone, &p);
            assert_eq!(tasks.len(), 3);
            assert!(tasks.iter().all(|t| !t.done));
            assert!(!region_complete(*zone, &p));
        }
        assert!(!ready_to_escape(&p));
    }

    #[test]
    fn test_ground_needs_weapon() {
        let mut p = Progress {
            clues_found: vec![Zone::Ground],
            keys: vec![KeyKind::Jail],
            clues: 1,
            ..Default::default()
        };
        assert!(!region_complete(Zone::Ground, &p));
        p.has_gun = true;
        assert!(region_complete(Zone::Ground, &p));
    }

    #[test]
    fn test_everything_done() {
        let p = finished();
        for zone in Zone::all() {
            assert!(region_complete(*zone, &p), "{}", zone);
        }
        assert!(ready_to_escape(&p));
    }

    #[test]
    fn test_escape_needs_both_rescues() {
        let mut p = finished();
        p.rescued = 1;
        assert!(!ready_to_escape(&p));
        assert!(!region_complete(Zone::Harbor, &p));
        // Following still counts for the Estate task
        assert!(region_complete(Zone::Estate, &p));
    }
}
