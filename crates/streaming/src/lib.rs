pub mod fetch;
pub mod load_state;
pub mod request;
pub mod tracker;

pub use fetch::*;
pub use load_state::*;
pub use request::*;
pub use tracker::*;
