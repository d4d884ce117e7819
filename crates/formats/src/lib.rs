pub mod boundary;
pub mod dissolve;
pub mod feature;

pub use boundary::*;
pub use dissolve::*;
pub use feature::*;
