//! Fastthumb Core - JPEG thumbnailing and geometric transforms
//!
//! This crate provides the core JPEG operations for Fastthumb:
//! - Scaled thumbnail generation from an in-memory JPEG buffer, preserving
//!   aspect ratio within a bounding box and honoring a quality setting
//! - Geometric transforms (flip, transpose, rotation) applied to a JPEG
//!   file on disk, producing a new JPEG file
//!
//! Both operations drive a codec engine through a single
//! open -> configure -> execute -> close session; see the [`codec`] module.
//! Operations are synchronous and self-contained: independent callers may
//! run them concurrently, each invocation owning its own handle and output.

pub mod codec;
pub mod error;
pub mod scale;
pub mod transform;

pub use codec::{thumbnail, transform_file};
pub use error::Error;
pub use scale::{compute_fit, ScaleType};
pub use transform::TransformType;
