#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding/decoding failures,
/// and unsupported source formats.
pub mod error;

/// High-level grid reading and writing functions.
///
/// Any format supported by the `image` crate is reduced to 8-bit luminance on
/// the way in. See [`functional::read_image_gray`].
pub mod functional;

/// GIF framing for display surfaces.
///
/// Encodes a grid as a base64 GIF payload, see [`gif::gif_base64`].
pub mod gif;

pub use crate::error::IoError;
