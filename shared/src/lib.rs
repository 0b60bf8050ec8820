pub mod genes;
pub mod snapshot;

pub use genes::*;
pub use snapshot::*;
