pub mod coin;
pub mod price;

pub use coin::*;
pub use price::*;
