//! Token-stream transforms.
//!
//! Each stage is an iterator adaptor from token stream to token stream with
//! at most one token of private state. The stages compose in a fixed order
//! (see [`crate::lex`]); composition is pure, so a fresh pipeline over the
//! same source reproduces the same stream.

mod dots;
mod fuse;
mod invoke;
mod keywords;
mod noexpl;
mod operators;

pub use dots::DotSplit;
pub use fuse::Fuse;
pub use invoke::Invoke;
pub use keywords::Keywords;
pub use noexpl::Noexpl;
pub use operators::OperatorKeywords;
