pub mod classification;
pub mod query;
pub mod search;

pub use classification::*;
pub use query::*;
pub use search::*;
