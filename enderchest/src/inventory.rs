//! Extracting a player's ender chest from their record.

use std::fmt;

use bedrocknbt::Value;

use crate::db::SaveDb;
use crate::error::Result;

/// Path from the root of a player record to the ender chest's list of slots.
pub const ENDER_CHEST_PATH: &[&str] = &["EnderChestInventory"];

/// Namespace of vanilla items, left out when printing.
pub const VANILLA_NAMESPACE: &str = "minecraft:";

pub const HEADER: &str = "Items in the ender chest:";
pub const EMPTY: &str = "The ender chest is empty.";

/// One occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Namespaced identifier, eg. `minecraft:diamond`.
    pub name: String,
    pub count: i64,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .name
            .strip_prefix(VANILLA_NAMESPACE)
            .unwrap_or(&self.name);
        write!(f, "{} ({})", name, self.count)
    }
}

/// The occupied slots of the ender chest in a player record.
///
/// An empty record, or one without an ender chest, has no items. Slots missing
/// their name or count, and slots with a count of zero, are skipped.
pub fn ender_chest(record: &[u8]) -> Result<Vec<Item>> {
    let root = bedrocknbt::from_bytes(record)?;

    let slots = root
        .as_ref()
        .and_then(|root| root.pointer(ENDER_CHEST_PATH))
        .and_then(Value::as_list)
        .unwrap_or_default();

    Ok(slots.iter().filter_map(item).collect())
}

fn item(slot: &Value) -> Option<Item> {
    let count = slot.get("Count").and_then(Value::as_i64)?;
    if count == 0 {
        return None;
    }
    let name = slot.get("Name").and_then(Value::as_str)?;

    Some(Item {
        name: name.to_owned(),
        count,
    })
}

/// Read and decode the ender chest of `player`. A player without a record has
/// an empty ender chest.
pub fn player_ender_chest(db: &mut SaveDb, player: &str) -> Result<Vec<Item>> {
    let record = db.get(player.as_bytes())?.unwrap_or_default();
    ender_chest(&record)
}

/// The lines printed for an ender chest.
pub fn render(items: &[Item]) -> Vec<String> {
    if items.is_empty() {
        return vec![EMPTY.to_owned()];
    }

    std::iter::once(HEADER.to_owned())
        .chain(items.iter().map(Item::to_string))
        .collect()
}
