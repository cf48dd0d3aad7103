//! Codec sessions for the public thumbnail and transform operations.
//!
//! Each operation opens exactly one codec handle, configures it, runs exactly
//! one terminal action, and closes the handle before returning. The close is
//! carried by a scope guard so that every exit path, including early error
//! returns, releases the handle exactly once.

use std::path::Path;

use log::debug;

use super::engine::SoftwareCodec;
use super::native::Codec;
use crate::error::Error;
use crate::scale::compute_fit;
use crate::transform::TransformType;

/// Scope guard owning one open codec handle.
///
/// Dropping the guard closes the handle, on every exit path.
struct Session<'a, C: Codec> {
    codec: &'a C,
    handle: C::Handle,
}

impl<'a, C: Codec> Session<'a, C> {
    /// Open a session from an in-memory JPEG buffer.
    fn open_memory(codec: &'a C, bytes: &[u8]) -> Result<Self, Error> {
        let handle = codec.open_memory(bytes).ok_or(Error::DecodeOpen)?;
        Ok(Self { codec, handle })
    }

    /// Open a session from a JPEG file on disk.
    fn open_file(codec: &'a C, path: &Path) -> Result<Self, Error> {
        let handle = codec.open_file(path).ok_or_else(|| Error::FileOpen {
            path: path.to_path_buf(),
        })?;
        Ok(Self { codec, handle })
    }
}

impl<C: Codec> Drop for Session<'_, C> {
    fn drop(&mut self) {
        self.codec.close(&mut self.handle);
    }
}

/// Thumbnail operation against an explicit codec engine.
pub(crate) fn thumbnail_with<C: Codec>(
    codec: &C,
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<Vec<u8>, Error> {
    let mut session = Session::open_memory(codec, bytes)?;

    let (src_width, src_height) = codec.size_get(&session.handle);
    let (width, height) = compute_fit(src_width, src_height, max_width, max_height);
    debug!("thumbnail {src_width}x{src_height} -> {width}x{height} at quality {quality}");

    codec.decode_size_set(&mut session.handle, width, height);
    // Quality is the codec's contract; it is passed through as given.
    codec.quality_set(&mut session.handle, quality);

    if codec.encode(&mut session.handle) != 0 {
        // The codec exposes no diagnostic for a failed encode.
        return Err(Error::Encode);
    }
    codec.output_take(&mut session.handle).ok_or(Error::Encode)
}

/// Transform operation against an explicit codec engine.
pub(crate) fn transform_file_with<C: Codec>(
    codec: &C,
    input: &Path,
    output: &Path,
    transform: TransformType,
) -> Result<(), Error> {
    // Resolve the transform code before touching any file or handle.
    let code = transform.native_code();

    let mut session = Session::open_file(codec, input)?;
    debug!(
        "transform {transform:?} {} -> {}",
        input.display(),
        output.display()
    );

    codec.transform_set(&mut session.handle, code);
    codec.file_output_set(&mut session.handle, output);

    let status = codec.transform(&mut session.handle);
    if status != 0 {
        let message = codec.error_get(&session.handle);
        return Err(Error::Transform {
            code: status,
            message,
        });
    }
    Ok(())
}

/// Generate a scaled JPEG thumbnail from in-memory JPEG bytes.
///
/// The output fits the `(max_width, max_height)` bounding box per
/// [`compute_fit`], preserving the source aspect ratio for square boxes.
///
/// # Arguments
///
/// * `bytes` - Raw JPEG bytes to thumbnail
/// * `max_width` - Bounding box width in pixels
/// * `max_height` - Bounding box height in pixels
/// * `quality` - JPEG quality percentage, passed through to the codec
///
/// # Returns
///
/// A freshly encoded JPEG byte sequence at the computed dimensions.
///
/// # Errors
///
/// Returns [`Error::DecodeOpen`] if `bytes` is not a decodable JPEG, and
/// [`Error::Encode`] if the codec's encode step fails.
pub fn thumbnail(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<Vec<u8>, Error> {
    thumbnail_with(&SoftwareCodec::new(), bytes, max_width, max_height, quality)
}

/// Apply a geometric transform to a JPEG file, writing a new JPEG file.
///
/// The input file is never modified. On success `output` contains the
/// transformed image.
///
/// # Arguments
///
/// * `input` - Path of the source JPEG file
/// * `output` - Path the transformed JPEG is written to
/// * `transform` - The geometric operation to apply
///
/// # Errors
///
/// Returns [`Error::FileOpen`] if `input` cannot be opened as a JPEG, and
/// [`Error::Transform`] with the codec's status code and diagnostic text if
/// the transform step fails.
pub fn transform_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    transform: TransformType,
) -> Result<(), Error> {
    transform_file_with(
        &SoftwareCodec::new(),
        input.as_ref(),
        output.as_ref(),
        transform,
    )
}
