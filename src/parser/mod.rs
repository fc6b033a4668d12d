pub mod header;
pub mod table;

pub use table::extract_food_item;
