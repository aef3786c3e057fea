pub mod geocode;

pub use geocode::*;
