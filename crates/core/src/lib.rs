pub mod dataset;
pub mod error;
pub mod human;
pub mod model;
pub mod naming;
pub mod scanner;
pub mod treemap;

pub use error::*;
pub use model::*;
pub use treemap::*;
