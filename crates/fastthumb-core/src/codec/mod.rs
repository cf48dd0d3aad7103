//! Codec sessions for JPEG operations.
//!
//! This module provides the two public operations of the crate:
//! - [`thumbnail`]: scaled thumbnail generation from an in-memory JPEG buffer
//! - [`transform_file`]: geometric transform of a JPEG file into a new file
//!
//! # Architecture
//!
//! Both operations share one pattern, the codec session: open a decode
//! handle, configure it, run exactly one terminal action, and close the
//! handle on every exit path. The codec itself sits behind the narrow
//! contract in `native`, implemented in production by the software engine
//! in `engine`.

mod engine;
mod native;
mod session;

pub(crate) use native::NativeTransform;
pub use session::{thumbnail, transform_file};
