pub mod types;

pub use types::{Listing, PropertyType};
