pub mod admin;
pub mod arena;
pub mod bounds;
pub mod geometry;
pub mod names;

// Foundation crate: small, well-tested primitives only.
pub use admin::*;
pub use arena::*;
pub use bounds::*;
pub use geometry::*;
pub use names::*;
