pub mod detection;
pub mod errors;
pub mod model;
pub mod report;
pub mod rows;
pub mod screen;
pub mod statistics;
