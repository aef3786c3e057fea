pub mod request_context;
pub mod session;

pub use request_context::*;
pub use session::*;
