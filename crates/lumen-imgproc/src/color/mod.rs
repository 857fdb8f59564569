mod gray;

pub use gray::{gray_from_luma_alpha, gray_from_rgb, gray_from_rgba};
