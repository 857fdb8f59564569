use std::collections::HashMap;

use lumen_image::GridSize;

use crate::error::VizError;

/// Identifier of a window opened through a [`crate::DisplayContext`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub(crate) u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single presented frame: a grid encoded as a base64 GIF payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// The window the frame belongs to.
    pub window: WindowId,
    /// The size of the encoded image.
    pub size: GridSize,
    /// The image as a base64 encoded GIF.
    pub gif_base64: String,
}

/// A surface able to show frames.
///
/// Implementations wrap a windowing system. The [`crate::DisplayContext`]
/// owns the backend and is the only caller of these methods.
pub trait DisplayBackend {
    /// Creates a native window with the given initial size.
    fn create_window(&mut self, window: WindowId, size: GridSize) -> Result<(), VizError>;

    /// Replaces the content of a window.
    fn present(&mut self, frame: &Frame) -> Result<(), VizError>;

    /// Tears down a window.
    fn destroy_window(&mut self, window: WindowId) -> Result<(), VizError>;
}

/// A backend without a screen that keeps every presented frame in memory.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    windows: HashMap<WindowId, GridSize>,
    frames: Vec<Frame>,
}

impl HeadlessBackend {
    /// Creates an empty headless backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames presented so far, in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent frame presented to `window`, if any.
    pub fn last_frame(&self, window: WindowId) -> Option<&Frame> {
        self.frames.iter().rev().find(|f| f.window == window)
    }

    /// The current size of a live window.
    pub fn window_size(&self, window: WindowId) -> Option<GridSize> {
        self.windows.get(&window).copied()
    }

    /// Number of live windows.
    pub fn num_windows(&self) -> usize {
        self.windows.len()
    }
}

impl DisplayBackend for HeadlessBackend {
    fn create_window(&mut self, window: WindowId, size: GridSize) -> Result<(), VizError> {
        if self.windows.insert(window, size).is_some() {
            return Err(VizError::Backend(format!("window {window} already exists")));
        }
        Ok(())
    }

    fn present(&mut self, frame: &Frame) -> Result<(), VizError> {
        let size = self
            .windows
            .get_mut(&frame.window)
            .ok_or(VizError::WindowNotFound(frame.window))?;
        *size = frame.size;
        self.frames.push(frame.clone());
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<(), VizError> {
        self.windows
            .remove(&window)
            .map(|_| ())
            .ok_or(VizError::WindowNotFound(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_lifecycle() -> Result<(), VizError> {
        let mut backend = HeadlessBackend::new();
        let window = WindowId(0);

        backend.create_window(window, [2, 2].into())?;
        assert_eq!(backend.num_windows(), 1);

        let frame = Frame {
            window,
            size: [4, 4].into(),
            gif_base64: "R0lGODlh".to_string(),
        };
        backend.present(&frame)?;
        assert_eq!(backend.window_size(window), Some([4, 4].into()));
        assert_eq!(backend.last_frame(window), Some(&frame));

        backend.destroy_window(window)?;
        assert_eq!(backend.num_windows(), 0);
        assert!(matches!(
            backend.destroy_window(window),
            Err(VizError::WindowNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn present_to_unknown_window() {
        let mut backend = HeadlessBackend::new();
        let frame = Frame {
            window: WindowId(7),
            size: [1, 1].into(),
            gif_base64: String::new(),
        };
        assert!(matches!(
            backend.present(&frame),
            Err(VizError::WindowNotFound(WindowId(7)))
        ));
        assert!(backend.frames().is_empty());
    }

    #[test]
    fn duplicate_window_rejected() -> Result<(), VizError> {
        let mut backend = HeadlessBackend::new();
        backend.create_window(WindowId(1), [1, 1].into())?;
        assert!(matches!(
            backend.create_window(WindowId(1), [1, 1].into()),
            Err(VizError::Backend(_))
        ));
        Ok(())
    }
}
