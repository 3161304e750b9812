// Core domain layer
pub mod composer;
pub mod mode;
pub mod models;
pub mod validation;

pub use composer::*;
pub use mode::*;
pub use models::*;
pub use validation::*;
