//! Contract for the JPEG codec driven by sessions.
//!
//! The codec exposes a narrow handle lifecycle: open, configure, run exactly
//! one terminal action (encode or transform), close. Sessions own that
//! lifecycle; engines only supply the operations below.

use std::path::Path;

/// Transform codes understood by the codec engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NativeTransform {
    None = 0,
    FlipH = 1,
    FlipV = 2,
    Transpose = 3,
    Transverse = 4,
    Rot90 = 5,
    Rot180 = 6,
    Rot270 = 7,
}

/// Operations a codec engine exposes on a decode handle.
///
/// The production engine lives in the sibling `engine` module; tests
/// substitute counting doubles to observe handle lifecycles.
///
/// A handle is created by one of the open calls and destroyed by
/// [`Codec::close`], exactly once, with no use after close. Both obligations
/// are discharged by the session layer, not by engines.
pub(crate) trait Codec {
    type Handle;

    /// Open a decode handle from an in-memory JPEG buffer.
    ///
    /// Returns `None` when the buffer is not a decodable JPEG.
    fn open_memory(&self, bytes: &[u8]) -> Option<Self::Handle>;

    /// Open a decode handle from a JPEG file on disk.
    ///
    /// Returns `None` when the file is missing, unreadable, or not a JPEG.
    fn open_file(&self, path: &Path) -> Option<Self::Handle>;

    /// Source dimensions recorded on the handle at open time.
    fn size_get(&self, handle: &Self::Handle) -> (u32, u32);

    /// Set the output dimensions the decode step targets.
    fn decode_size_set(&self, handle: &mut Self::Handle, width: u32, height: u32);

    /// Set the encode quality percentage.
    ///
    /// The value is passed through as given; range handling is the engine's
    /// concern.
    fn quality_set(&self, handle: &mut Self::Handle, quality: u8);

    /// Select the geometric operation applied by [`Codec::transform`].
    fn transform_set(&self, handle: &mut Self::Handle, transform: NativeTransform);

    /// Set the output file written by [`Codec::transform`].
    fn file_output_set(&self, handle: &mut Self::Handle, path: &Path);

    /// Run the decode-scale-encode step.
    ///
    /// Returns 0 on success, populating the handle's output buffer. Any other
    /// value signals failure with no retrievable diagnostic.
    fn encode(&self, handle: &mut Self::Handle) -> i32;

    /// Run the geometric transform against the configured output file.
    ///
    /// Returns 0 on success. On failure the status code is nonzero and a
    /// diagnostic is retrievable through [`Codec::error_get`].
    fn transform(&self, handle: &mut Self::Handle) -> i32;

    /// Take the encoded output buffer.
    ///
    /// `None` when no encode has succeeded on this handle. Taking transfers
    /// ownership to the caller; the slot is left empty.
    fn output_take(&self, handle: &mut Self::Handle) -> Option<Vec<u8>>;

    /// Diagnostic text for the most recent failure on the handle.
    fn error_get(&self, handle: &Self::Handle) -> String;

    /// Close the handle, ending its lifecycle.
    fn close(&self, handle: &mut Self::Handle);
}
