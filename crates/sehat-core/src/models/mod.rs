pub mod assessment;
pub mod image;
pub mod screening;
pub mod trend;
