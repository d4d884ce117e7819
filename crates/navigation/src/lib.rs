pub mod explorer;
pub mod machine;
pub mod selection;
pub mod view_sync;

pub use explorer::*;
pub use machine::*;
pub use selection::*;
pub use view_sync::*;
