pub mod core;
pub mod handouts;
