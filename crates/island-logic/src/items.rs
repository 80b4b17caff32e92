//! Pickups and how they are identified.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Vec2};
use crate::zones::{KeyKind, Zone};

/// Kind of pickup. Ammo boxes are numbered within their zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Gun,
    Ammo(u8),
    Clue,
    Key(KeyKind),
}

impl ItemKind {
    /// Pickup footprint (width, height).
    pub fn size(&self) -> (f32, f32) {
        match self {
            ItemKind::Gun => (24.0, 12.0),
            ItemKind::Ammo(_) => (16.0, 10.0),
            ItemKind::Clue => (20.0, 14.0),
            ItemKind::Key(_) => (18.0, 12.0),
        }
    }

    /// Short glyph drawn above the pickup.
    pub fn marker(&self) -> &'static str {
        match self {
            ItemKind::Gun => "G",
            ItemKind::Ammo(_) => "A",
            ItemKind::Clue => "C",
            ItemKind::Key(KeyKind::Jail) => "K1",
            ItemKind::Key(KeyKind::Cave) => "K2",
            ItemKind::Key(KeyKind::Boat) => "K3",
        }
    }
}

/// Unique identity of a pickup across the island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId {
    pub zone: Zone,
    pub kind: ItemKind,
}

/// A pickup lying somewhere on the island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub id: ItemId,
    pub rect: Rect,
}

impl ItemSpawn {
    /// Place a pickup with its top-left corner at `corner`.
    pub fn at(zone: Zone, kind: ItemKind, corner: Vec2) -> Self {
        let (w, h) = kind.size();
        Self {
            id: ItemId { zone, kind },
            rect: Rect::new(corner.x, corner.y, w, h),
        }
    }
}

/// Every pickup placed for a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTable {
    pub items: Vec<ItemSpawn>,
}

impl ItemTable {
    pub fn new(items: Vec<ItemSpawn>) -> Self {
        Self { items }
    }

    pub fn in_zone(&self, zone: Zone) -> impl Iterator<Item = &ItemSpawn> {
        self.items.iter().filter(move |i| i.id.zone == zone)
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemSpawn> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The fixed layout used before spawns are randomized.
    pub fn default_layout() -> Self {
        use ItemKind::*;
        let spots: [(Zone, ItemKind, f32, f32); 12] = [
            (Zone::Ground, Gun, 200.0, 550.0),
            (Zone::Ground, Ammo(0), 300.0, 200.0),
            (Zone::Ground, Ammo(1), 800.0, 500.0),
            (Zone::Ground, Clue, 400.0, 300.0),
            (Zone::Ground, Key(KeyKind::Jail), 500.0, 400.0),
            (Zone::Estate, Clue, 250.0, 250.0),
            (Zone::Estate, Key(KeyKind::Cave), 700.0, 400.0),
            (Zone::Estate, Ammo(0), 300.0, 350.0),
            (Zone::Tunnels, Clue, 500.0, 200.0),
            (Zone::Tunnels, Ammo(0), 600.0, 350.0),
            (Zone::Tunnels, Ammo(1), 300.0, 500.0),
            (Zone::Tunnels, Key(KeyKind::Boat), 800.0, 200.0),
        ];
        Self::new(
            spots
                .iter()
                .map(|&(zone, kind, x, y)| ItemSpawn::at(zone, kind, Vec2::new(x, y)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_has_every_key_and_clue() {
        let table = ItemTable::default_layout();
        for key in KeyKind::all() {
            let id = ItemId {
                zone: key.found_in(),
                kind: ItemKind::Key(*key),
            };
            assert!(table.get(id).is_some(), "{:?}", key);
        }
        let clues = table
            .items
            .iter()
            .filter(|i| i.id.kind == ItemKind::Clue)
            .count();
        assert_eq!(clues, 3);
        assert_eq!(table.in_zone(Zone::Harbor).count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let table = ItemTable::default_layout();
        let ids: std::collections::HashSet<_> = table.items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), table.len());
    }

    #[test]
    fn test_spawn_uses_kind_size() {
        let s = ItemSpawn::at(Zone::Ground, ItemKind::Gun, Vec2::new(10.0, 20.0));
        assert_eq!(s.rect, Rect::new(10.0, 20.0, 24.0, 12.0));
    }
}
