pub mod dataset;
pub mod parallel;
pub mod shard;
pub mod validate;
