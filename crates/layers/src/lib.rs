pub mod labels;
pub mod layer;
pub mod mesh;
pub mod region;
pub mod symbology;

pub use labels::*;
pub use layer::*;
pub use region::*;
pub use symbology::*;
