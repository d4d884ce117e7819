pub mod rng;
pub mod sampler;
pub mod score;

pub use rng::*;
pub use sampler::*;
pub use score::*;
