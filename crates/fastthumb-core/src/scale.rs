//! Output dimension calculation for thumbnail generation.
//!
//! The calculator is a pure function over dimension pairs: it never touches
//! the codec and has no side effects. Sessions feed it the source dimensions
//! reported by an open handle together with the caller's bounding box.

use serde::{Deserialize, Serialize};

/// How a bounding box constrains the scaled output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleType {
    /// The box bounds the larger source dimension (contain within box).
    #[default]
    FitMax,
    /// The box bounds the smaller source dimension (cover the box).
    FitMin,
}

/// Compute output dimensions for scaling a source image into a bounding box.
///
/// The source is classified as landscape-or-square (`src_width >= src_height`)
/// or portrait. The long edge is pinned to the box edge on its own axis and
/// the short edge is derived from the *other* box edge, scaled by the source
/// aspect ratio:
///
/// - landscape/square: `(max_width, max_height * src_height / src_width)`
/// - portrait: `(max_width * src_width / src_height, max_height)`
///
/// Division is floating-point and results are truncated to integers.
///
/// For a square box this preserves the source aspect ratio. For a non-square
/// box the derived edge follows the box shape rather than strict min-ratio
/// containment; callers that need an undistorted fit should pass a square box.
///
/// # Arguments
///
/// * `src_width` - Source width in pixels (positive)
/// * `src_height` - Source height in pixels (positive)
/// * `max_width` - Bounding box width in pixels (positive)
/// * `max_height` - Bounding box height in pixels (positive)
///
/// # Returns
///
/// Tuple of (out_width, out_height). No minimum output size is enforced: an
/// extreme aspect ratio combined with a small box can legally compute 0 for
/// the derived dimension.
pub fn compute_fit(
    src_width: u32,
    src_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if src_width >= src_height {
        let height = f64::from(max_height) * f64::from(src_height) / f64::from(src_width);
        (max_width, height as u32)
    } else {
        let width = f64::from(max_width) * f64::from(src_width) / f64::from(src_height);
        (width as u32, max_height)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
