//! Software codec engine built on the `image` crate.
//!
//! The engine implements the codec contract in pure Rust: decoding happens at
//! open time, scaling and encoding at the terminal step. Geometric transforms
//! re-encode the image rather than rewriting compressed data in place, so
//! output bytes are not identical to what an in-place rewriter would produce;
//! dimensions and orientation are.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use super::native::{Codec, NativeTransform};

/// Encode quality used when a session sets none.
const DEFAULT_QUALITY: u8 = 75;

/// Transforms re-encode the image; keep quality high to limit
/// generational loss.
const TRANSFORM_QUALITY: u8 = 95;

/// Decode state for one open handle.
pub(crate) struct EngineHandle {
    image: DynamicImage,
    width: u32,
    height: u32,
    decode_size: Option<(u32, u32)>,
    quality: u8,
    transform: NativeTransform,
    output_path: Option<PathBuf>,
    output: Option<Vec<u8>>,
    error: String,
}

impl EngineHandle {
    fn new(image: DynamicImage) -> Self {
        let width = image.width();
        let height = image.height();
        Self {
            image,
            width,
            height,
            decode_size: None,
            quality: DEFAULT_QUALITY,
            transform: NativeTransform::None,
            output_path: None,
            output: None,
            error: String::new(),
        }
    }
}

/// JPEG codec engine implemented over the `image` crate.
#[derive(Debug, Default)]
pub(crate) struct SoftwareCodec;

impl SoftwareCodec {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Codec for SoftwareCodec {
    type Handle = EngineHandle;

    fn open_memory(&self, bytes: &[u8]) -> Option<EngineHandle> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?;
        // JPEG only: any other recognized or unrecognized format refuses
        // to open.
        if reader.format() != Some(ImageFormat::Jpeg) {
            return None;
        }
        let image = reader.decode().ok()?;
        Some(EngineHandle::new(image))
    }

    fn open_file(&self, path: &Path) -> Option<EngineHandle> {
        let bytes = std::fs::read(path).ok()?;
        self.open_memory(&bytes)
    }

    fn size_get(&self, handle: &EngineHandle) -> (u32, u32) {
        (handle.width, handle.height)
    }

    fn decode_size_set(&self, handle: &mut EngineHandle, width: u32, height: u32) {
        handle.decode_size = Some((width, height));
    }

    fn quality_set(&self, handle: &mut EngineHandle, quality: u8) {
        handle.quality = quality;
    }

    fn transform_set(&self, handle: &mut EngineHandle, transform: NativeTransform) {
        handle.transform = transform;
    }

    fn file_output_set(&self, handle: &mut EngineHandle, path: &Path) {
        handle.output_path = Some(path.to_path_buf());
    }

    fn encode(&self, handle: &mut EngineHandle) -> i32 {
        let (width, height) = handle.decode_size.unwrap_or((handle.width, handle.height));
        if width == 0 || height == 0 {
            handle.error = format!("cannot encode {width}x{height} output");
            return 1;
        }

        let scaled = if (width, height) == (handle.width, handle.height) {
            handle.image.clone()
        } else {
            handle.image.resize_exact(width, height, FilterType::Triangle)
        };

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, handle.quality.clamp(1, 100));
        match scaled.write_with_encoder(encoder) {
            Ok(()) => {
                handle.output = Some(buffer.into_inner());
                0
            }
            Err(err) => {
                handle.error = err.to_string();
                2
            }
        }
    }

    fn transform(&self, handle: &mut EngineHandle) -> i32 {
        let Some(path) = handle.output_path.clone() else {
            handle.error = "no output file configured".to_string();
            return 1;
        };

        let transformed = apply_transform(&handle.image, handle.transform);

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, TRANSFORM_QUALITY);
        if let Err(err) = transformed.write_with_encoder(encoder) {
            handle.error = err.to_string();
            return 2;
        }

        if let Err(err) = std::fs::write(&path, buffer.into_inner()) {
            handle.error = format!("cannot write {}: {err}", path.display());
            return 3;
        }
        0
    }

    fn output_take(&self, handle: &mut EngineHandle) -> Option<Vec<u8>> {
        handle.output.take()
    }

    fn error_get(&self, handle: &EngineHandle) -> String {
        handle.error.clone()
    }

    fn close(&self, _handle: &mut EngineHandle) {
        // Decode state is released when the handle drops.
    }
}

/// Apply a geometric operation to a decoded image.
fn apply_transform(image: &DynamicImage, transform: NativeTransform) -> DynamicImage {
    match transform {
        NativeTransform::None => image.clone(),
        NativeTransform::FlipH => image.fliph(),
        NativeTransform::FlipV => image.flipv(),
        NativeTransform::Transpose => image.rotate90().fliph(),
        NativeTransform::Transverse => image.rotate270().fliph(),
        NativeTransform::Rot90 => image.rotate90(),
        NativeTransform::Rot180 => image.rotate180(),
        NativeTransform::Rot270 => image.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a gradient RGB image as JPEG bytes for fixtures.
    fn test_jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        let rgb = image::RgbImage::from_raw(width, height, pixels).unwrap();

        let mut buffer = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buffer, 90);
        DynamicImage::ImageRgb8(rgb)
            .write_with_encoder(encoder)
            .unwrap();
        buffer.into_inner()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fastthumb-engine-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_open_memory_valid_jpeg() {
        let codec = SoftwareCodec::new();
        let handle = codec.open_memory(&test_jpeg(64, 32)).unwrap();
        assert_eq!(codec.size_get(&handle), (64, 32));
    }

    #[test]
    fn test_open_memory_rejects_garbage() {
        let codec = SoftwareCodec::new();
        assert!(codec.open_memory(&[0x00, 0x01, 0x02, 0x03]).is_none());
        assert!(codec.open_memory(&[]).is_none());
    }

    #[test]
    fn test_open_memory_rejects_non_jpeg_format() {
        // A PNG signature is a recognized format, but not ours.
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let codec = SoftwareCodec::new();
        assert!(codec.open_memory(&png_magic).is_none());
    }

    #[test]
    fn test_open_file_missing_path() {
        let codec = SoftwareCodec::new();
        assert!(codec.open_file(Path::new("/nonexistent/input.jpg")).is_none());
    }

    #[test]
    fn test_encode_scales_to_decode_size() {
        let codec = SoftwareCodec::new();
        let mut handle = codec.open_memory(&test_jpeg(64, 32)).unwrap();

        codec.decode_size_set(&mut handle, 16, 8);
        codec.quality_set(&mut handle, 85);
        assert_eq!(codec.encode(&mut handle), 0);

        let output = codec.output_take(&mut handle).unwrap();
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));

        // The buffer transfers once; the slot is now empty.
        assert!(codec.output_take(&mut handle).is_none());
    }

    #[test]
    fn test_encode_refuses_zero_dimension() {
        let codec = SoftwareCodec::new();
        let mut handle = codec.open_memory(&test_jpeg(64, 32)).unwrap();

        codec.decode_size_set(&mut handle, 16, 0);
        assert_ne!(codec.encode(&mut handle), 0);
        assert!(codec.output_take(&mut handle).is_none());
    }

    #[test]
    fn test_transform_writes_output_file() {
        let codec = SoftwareCodec::new();
        let mut handle = codec.open_memory(&test_jpeg(64, 32)).unwrap();
        let output = temp_path("rot90.jpg");

        codec.transform_set(&mut handle, NativeTransform::Rot90);
        codec.file_output_set(&mut handle, &output);
        assert_eq!(codec.transform(&mut handle), 0);

        let written = image::load_from_memory(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!((written.width(), written.height()), (32, 64));
        let _ = std::fs::remove_file(&output);
    }

    #[test]
    fn test_transform_without_output_fails_with_diagnostic() {
        let codec = SoftwareCodec::new();
        let mut handle = codec.open_memory(&test_jpeg(8, 8)).unwrap();

        let code = codec.transform(&mut handle);
        assert_ne!(code, 0);
        assert!(!codec.error_get(&handle).is_empty());
    }

    #[test]
    fn test_transform_unwritable_path_fails_with_diagnostic() {
        let codec = SoftwareCodec::new();
        let mut handle = codec.open_memory(&test_jpeg(8, 8)).unwrap();
        let output = temp_path("missing-dir").join("out.jpg");

        codec.transform_set(&mut handle, NativeTransform::FlipH);
        codec.file_output_set(&mut handle, &output);

        let code = codec.transform(&mut handle);
        assert_ne!(code, 0);
        assert!(codec.error_get(&handle).contains("cannot write"));
    }

    #[test]
    fn test_apply_transform_dimensions() {
        let image = DynamicImage::ImageRgb8(image::RgbImage::new(4, 2));

        for (transform, expected) in [
            (NativeTransform::None, (4, 2)),
            (NativeTransform::FlipH, (4, 2)),
            (NativeTransform::FlipV, (4, 2)),
            (NativeTransform::Transpose, (2, 4)),
            (NativeTransform::Transverse, (2, 4)),
            (NativeTransform::Rot90, (2, 4)),
            (NativeTransform::Rot180, (4, 2)),
            (NativeTransform::Rot270, (2, 4)),
        ] {
            let out = apply_transform(&image, transform);
            assert_eq!((out.width(), out.height()), expected, "{transform:?}");
        }
    }

    #[test]
    fn test_apply_transform_pixel_mapping() {
        // 2x1 image: red on the left, green on the right.
        let rgb = image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let image = DynamicImage::ImageRgb8(rgb);

        let flipped = apply_transform(&image, NativeTransform::FlipH).into_rgb8();
        assert_eq!(flipped.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(flipped.get_pixel(1, 0).0, [255, 0, 0]);

        // Transpose maps (x, y) to (y, x): red stays at the origin.
        let transposed = apply_transform(&image, NativeTransform::Transpose).into_rgb8();
        assert_eq!(transposed.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(transposed.get_pixel(0, 1).0, [0, 255, 0]);

        // Transverse maps (x, y) to (h-1-y, w-1-x): red ends up at the far
        // corner.
        let transversed = apply_transform(&image, NativeTransform::Transverse).into_rgb8();
        assert_eq!(transversed.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(transversed.get_pixel(0, 1).0, [255, 0, 0]);
    }
}
