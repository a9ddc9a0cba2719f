pub mod cast;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod metadata;

pub use cast::*;
pub use error::*;
pub use geometry::*;
pub use matrix::*;
pub use metadata::*;
