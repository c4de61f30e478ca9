#![doc = include_str!("../README.md")]

mod error;
mod pipeline;
mod runtime;
mod sequence;

pub use crate::error::*;
pub use crate::pipeline::*;
#[cfg(feature = "async-tokio")]
pub use crate::runtime::*;
pub use crate::sequence::*;
