//! Restaurant financial assumptions, validation and CSV loading

mod inputs;
mod validate;
pub mod loader;

pub use inputs::ValuationInput;
pub use validate::MAX_PROJECTION_YEARS;
pub use loader::{load_restaurants, load_restaurants_from_reader, RestaurantRow};
