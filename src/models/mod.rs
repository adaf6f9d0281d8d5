pub mod price;
pub mod scan;

pub use price::*;
pub use scan::*;
