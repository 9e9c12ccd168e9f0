//! Loading and validation for battle configuration.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
