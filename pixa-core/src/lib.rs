//! Core primitives shared by the pixa decoder crates.
//!
//! This crate carries nothing image-format specific, only the
//! plumbing every decoder needs:
//!
//! - [`bytestream`](crate::bytestream): a positioned big-endian reader
//!   over an in-memory byte buffer
//! - [`bit_depth`](crate::bit_depth): sample precision of decoded images
//! - [`colorspace`](crate::colorspace): color interpretations of decoded
//!   samples
//! - [`options`](crate::options): shared decoder configuration

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
