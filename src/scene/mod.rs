pub mod amplitude;
pub mod color;
pub mod model;
