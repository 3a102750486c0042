pub mod normalizer;
pub mod pipeline;
pub mod smoother;
pub mod synchronizer;
pub mod trilaterator;

pub use normalizer::RingNormalizer;
pub use pipeline::Pipeline;
pub use smoother::DistanceSmoother;
pub use synchronizer::FrameSynchronizer;
pub use trilaterator::Trilaterator;
