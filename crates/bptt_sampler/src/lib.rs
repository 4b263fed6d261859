pub mod config;
pub mod dataset;
pub mod error;
pub mod partition;
pub mod sampler;
pub mod window;

pub use config::{BpttConfig, BpttConfigBuilder};
pub use dataset::SequenceLength;
pub use error::{Result, SamplerError};
pub use partition::{partition, Partition};
pub use sampler::{BpttBatchIter, BpttBatchSampler, BpttIter, BpttSampler, Sampler};
pub use window::{Batch, Window};
