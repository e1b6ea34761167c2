pub mod raw;
pub mod rays;
