//! Geometric transform selection and codec code mapping.

use serde::{Deserialize, Serialize};

use crate::codec::NativeTransform;
use crate::error::Error;

/// Geometric transforms applicable to a JPEG file.
///
/// The enumeration is closed: every variant maps one-to-one onto a codec
/// transform code, and raw selectors from outside the crate are validated
/// through [`TransformType::from_raw`] before a session will accept them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransformType {
    /// No geometric change.
    #[default]
    None,
    /// Mirror across the vertical axis.
    FlipHorizontal,
    /// Mirror across the horizontal axis.
    FlipVertical,
    /// Mirror across the top-left to bottom-right diagonal.
    Transpose,
    /// Mirror across the top-right to bottom-left diagonal.
    Transverse,
    /// Rotate 90 degrees clockwise.
    Rotate90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise.
    Rotate270,
}

impl TransformType {
    /// Validate a raw transform selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransform`] for any value outside the
    /// enumeration. No codec call is made for a rejected value.
    pub fn from_raw(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(TransformType::None),
            1 => Ok(TransformType::FlipHorizontal),
            2 => Ok(TransformType::FlipVertical),
            3 => Ok(TransformType::Transpose),
            4 => Ok(TransformType::Transverse),
            5 => Ok(TransformType::Rotate90),
            6 => Ok(TransformType::Rotate180),
            7 => Ok(TransformType::Rotate270),
            _ => Err(Error::InvalidTransform(value)),
        }
    }

    /// Map to the codec's native transform code.
    ///
    /// The mapping is total and injective over the enumeration; there is no
    /// fallback code.
    pub(crate) fn native_code(self) -> NativeTransform {
        match self {
            TransformType::None => NativeTransform::None,
            TransformType::FlipHorizontal => NativeTransform::FlipH,
            TransformType::FlipVertical => NativeTransform::FlipV,
            TransformType::Transpose => NativeTransform::Transpose,
            TransformType::Transverse => NativeTransform::Transverse,
            TransformType::Rotate90 => NativeTransform::Rot90,
            TransformType::Rotate180 => NativeTransform::Rot180,
            TransformType::Rotate270 => NativeTransform::Rot270,
        }
    }
}
