pub mod beats;
pub mod error;
pub mod io;
pub mod record;
pub mod rhythm;

pub use error::*;
pub use record::*;
pub use rhythm::*;
