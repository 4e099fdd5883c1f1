//! Barbell plate math.

pub mod calculator;
pub mod types;

pub use calculator::calculate_plates;
pub use types::{
    default_bar_weight, PlateInventory, PlateLoad, PlateResult, PlateSize, DEFAULT_PLATE_COUNT,
    STANDARD_PLATES_KG, STANDARD_PLATES_LB,
};
