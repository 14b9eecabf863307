pub mod text;

pub use text::{handle_food_query, help, is_food_query};
