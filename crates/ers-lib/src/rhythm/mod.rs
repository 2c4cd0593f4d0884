pub mod intervals;
pub mod segments;
pub mod summary;

pub use intervals::*;
pub use segments::*;
pub use summary::*;
