//! Plate resolver.
//!
//! Greedy, heaviest plate first, without backtracking. Standard gym plate sets
//! are canonical coin systems, so greedy is optimal for them. Unusual
//! inventories can leave a remainder that a different combination would have
//! avoided.

use crate::plates::types::{PlateInventory, PlateLoad, PlateResult};

/// Work out the plates to load on each side of the bar to reach `target_weight`.
///
/// Inventory counts cover both sides, so only full pairs are usable. A target
/// at or below the bar weight needs no plates.
pub fn calculate_plates(
    target_weight: f64,
    bar_weight: f64,
    inventory: &PlateInventory,
) -> PlateResult {
    let weight_per_side = (target_weight - bar_weight) / 2.0;
    if weight_per_side <= 0.0 {
        return PlateResult::default();
    }

    let mut per_side = Vec::new();
    let mut remaining = weight_per_side;

    for (size, total) in inventory.available_descending() {
        if remaining <= 0.0 {
            break;
        }

        let plate = size.weight();
        let available_per_side = total / 2;
        let needed = (remaining / plate).floor() as u32;
        let used = needed.min(available_per_side);

        if used > 0 {
            per_side.push(PlateLoad {
                weight: plate,
                count: used,
            });
            remaining -= used as f64 * plate;
        }
    }

    let remainder = (remaining * 100.0).round() / 100.0;
    if remainder > 0.0 {
        tracing::debug!(target_weight, bar_weight, remainder, "Target not exactly achievable");
    }

    PlateResult {
        per_side,
        remainder,
    }
}
