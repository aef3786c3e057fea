pub mod follow;

pub use follow::*;
