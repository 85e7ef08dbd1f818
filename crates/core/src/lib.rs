#![forbid(unsafe_code)]

pub mod model;
pub mod pagination;
pub mod quiz;
pub mod random;

pub use random::Sampler;
