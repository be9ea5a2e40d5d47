pub mod categorize;
pub mod models;
pub mod overpass;
pub mod reader;

pub use categorize::*;
pub use models::*;
pub use overpass::*;
pub use reader::*;
