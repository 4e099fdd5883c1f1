//! Plate denominations, inventories and loading results.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::config::WeightUnit;

/// Standard pound plates.
pub const STANDARD_PLATES_LB: [f64; 6] = [45.0, 35.0, 25.0, 10.0, 5.0, 2.5];

/// Standard kilogram plates.
pub const STANDARD_PLATES_KG: [f64; 6] = [20.0, 15.0, 10.0, 5.0, 2.5, 1.25];

/// Plates of each size assumed when the user has not entered an inventory.
pub const DEFAULT_PLATE_COUNT: u32 = 8;

/// Standard bar weight for a unit: 45 lb or 20 kg.
pub fn default_bar_weight(unit: WeightUnit) -> f64 {
    unit.default_bar_weight()
}

/// A plate denomination, stored in hundredths so sizes such as 1.25 compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlateSize(u32);

impl PlateSize {
    /// Create a plate size from its weight. Returns `None` for non-positive or non-finite values.
    pub fn from_weight(weight: f64) -> Option<Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return None;
        }
        let hundredths = (weight * 100.0).round();
        if hundredths < 1.0 || hundredths > u32::MAX as f64 {
            return None;
        }
        Some(Self(hundredths as u32))
    }

    /// Weight of one plate.
    pub fn weight(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for PlateSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.weight())
    }
}

impl FromStr for PlateSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weight: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid plate size: {}", s))?;
        Self::from_weight(weight).ok_or_else(|| format!("Plate size must be positive: {}", s))
    }
}

impl TryFrom<String> for PlateSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlateSize> for String {
    fn from(size: PlateSize) -> Self {
        size.to_string()
    }
}

/// Plates owned: denomination -> total count across both sides of the bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateInventory(BTreeMap<PlateSize, u32>);

impl PlateInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from (weight, total count) pairs. Invalid sizes are skipped.
    pub fn from_pairs(pairs: &[(f64, u32)]) -> Self {
        let mut inventory = Self::new();
        for &(weight, count) in pairs {
            inventory.set(weight, count);
        }
        inventory
    }

    /// Standard denominations for a unit, [`DEFAULT_PLATE_COUNT`] of each.
    pub fn standard(unit: WeightUnit) -> Self {
        let sizes = match unit {
            WeightUnit::Lb => STANDARD_PLATES_LB,
            WeightUnit::Kg => STANDARD_PLATES_KG,
        };
        let pairs: Vec<(f64, u32)> = sizes.iter().map(|&w| (w, DEFAULT_PLATE_COUNT)).collect();
        Self::from_pairs(&pairs)
    }

    /// Set the total count for a plate size. Returns false if the size is invalid.
    pub fn set(&mut self, weight: f64, count: u32) -> bool {
        match PlateSize::from_weight(weight) {
            Some(size) => {
                self.0.insert(size, count);
                true
            }
            None => false,
        }
    }

    /// Total count owned for a plate size.
    pub fn count(&self, weight: f64) -> u32 {
        PlateSize::from_weight(weight)
            .and_then(|size| self.0.get(&size).copied())
            .unwrap_or(0)
    }

    /// Plate sizes with a positive count, heaviest first, with their total counts.
    pub fn available_descending(&self) -> impl Iterator<Item = (PlateSize, u32)> + '_ {
        self.0
            .iter()
            .rev()
            .filter(|(_, &count)| count > 0)
            .map(|(&size, &count)| (size, count))
    }
}

/// Plates of one size loaded on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlateLoad {
    pub weight: f64,
    pub count: u32,
}

/// Plates to load per side and any weight that could not be built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlateResult {
    pub per_side: Vec<PlateLoad>,
    /// Per-side weight left over, rounded to two decimals
    pub remainder: f64,
}

impl PlateResult {
    /// Whether the target was built exactly.
    pub fn is_exact(&self) -> bool {
        self.remainder <= 0.0
    }

    /// Weight loaded on one side.
    pub fn weight_per_side(&self) -> f64 {
        self.per_side
            .iter()
            .map(|p| p.weight * p.count as f64)
            .sum()
    }

    /// Total weight on the bar, including the bar itself.
    pub fn loaded_weight(&self, bar_weight: f64) -> f64 {
        bar_weight + 2.0 * self.weight_per_side()
    }

    /// Human-readable loading, e.g. `2×45lb + 1×10lb per side`.
    pub fn describe(&self, unit: WeightUnit) -> String {
        let plates = if self.per_side.is_empty() {
            "No plates".to_string()
        } else {
            self.per_side
                .iter()
                .map(|p| format!("{}×{}{}", p.count, p.weight, unit))
                .collect::<Vec<_>>()
                .join(" + ")
        };

        if self.is_exact() {
            format!("{} per side", plates)
        } else {
            format!(
                "{} per side ({}{} unachievable with available plates)",
                plates, self.remainder, unit
            )
        }
    }
}
