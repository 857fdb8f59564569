use std::collections::BTreeMap;

use lumen_image::{Grid, GridSize};
use lumen_imgproc::resize::resize_nearest;
use lumen_io::gif::gif_base64;

use crate::{
    backend::{DisplayBackend, Frame, WindowId},
    error::VizError,
};

/// Notification sent to resize subscribers after a window was redrawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// The resized window.
    pub window: WindowId,
    /// The new size of the window content.
    pub size: GridSize,
}

/// Handle returned by [`DisplayContext::subscribe_resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ResizeListener = Box<dyn FnMut(&ResizeEvent)>;

struct Window {
    source: Grid<u8>,
    size: GridSize,
}

/// Owns the open windows and the backend that shows them.
///
/// A window keeps the grid it was opened with. Every redraw, including the
/// ones triggered by [`DisplayContext::handle_resize`], resamples that
/// original grid, so repeated resizes never accumulate sampling error.
///
/// # Example
///
/// ```
/// use lumen_image::Grid;
/// use lumen_viz::{DisplayContext, HeadlessBackend};
///
/// let mut ctx = DisplayContext::new(HeadlessBackend::new());
/// let grid = Grid::from_size_val([4, 3].into(), 90u8).unwrap();
///
/// let window = ctx.open(&grid).unwrap();
/// assert!(ctx.has_opened_windows());
///
/// ctx.handle_resize(window, [8, 6].into()).unwrap();
/// ctx.close(window).unwrap();
/// assert!(!ctx.is_active());
/// ```
pub struct DisplayContext<B: DisplayBackend> {
    backend: B,
    windows: BTreeMap<WindowId, Window>,
    listeners: Vec<(SubscriptionId, ResizeListener)>,
    next_window: u64,
    next_subscription: u64,
    opened_any: bool,
}

impl<B: DisplayBackend> DisplayContext<B> {
    /// Creates a context with no windows on top of `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            windows: BTreeMap::new(),
            listeners: Vec::new(),
            next_window: 0,
            next_subscription: 0,
            opened_any: false,
        }
    }

    /// Opens a window showing `grid` at its native size.
    ///
    /// The grid is copied into the context; later changes to the caller's
    /// grid are not reflected. On error no window is left behind.
    pub fn open(&mut self, grid: &Grid<u8>) -> Result<WindowId, VizError> {
        let window = WindowId(self.next_window);
        let size = grid.size();

        let frame = encode_frame(window, grid, size)?;

        self.backend.create_window(window, size)?;
        if let Err(err) = self.backend.present(&frame) {
            if let Err(destroy_err) = self.backend.destroy_window(window) {
                log::warn!("failed to tear down window {window}: {destroy_err}");
            }
            return Err(err);
        }

        self.next_window += 1;
        self.opened_any = true;
        self.windows.insert(
            window,
            Window {
                source: grid.clone(),
                size,
            },
        );

        log::debug!("opened window {window} ({size})");

        Ok(window)
    }

    /// Encodes the window content at its current size and presents it.
    pub fn render(&mut self, window: WindowId) -> Result<(), VizError> {
        let state = self
            .windows
            .get(&window)
            .ok_or(VizError::WindowNotFound(window))?;

        let frame = encode_frame(window, &state.source, state.size)?;
        self.backend.present(&frame)
    }

    /// Entry point for the windowing system when a window changes size.
    ///
    /// Resamples the original grid to `size` with nearest neighbor, presents
    /// the new frame and then notifies every resize subscriber. The window
    /// keeps its previous size when any step fails.
    ///
    /// # Errors
    ///
    /// Fails with [`VizError::WindowNotFound`] for a closed window, with
    /// [`VizError::Image`] for a zero sized target and with [`VizError::Io`]
    /// when the frame cannot be encoded.
    pub fn handle_resize(&mut self, window: WindowId, size: GridSize) -> Result<(), VizError> {
        let state = self
            .windows
            .get_mut(&window)
            .ok_or(VizError::WindowNotFound(window))?;

        let frame = encode_frame(window, &state.source, size)?;
        self.backend.present(&frame)?;
        state.size = size;

        log::debug!("resized window {window} to {size}");

        let event = ResizeEvent { window, size };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }

        Ok(())
    }

    /// Registers a callback invoked after every handled resize.
    pub fn subscribe_resize<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ResizeEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a resize callback. Returns whether it was registered.
    pub fn unsubscribe_resize(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Closes a single window.
    pub fn close(&mut self, window: WindowId) -> Result<(), VizError> {
        if self.windows.remove(&window).is_none() {
            return Err(VizError::WindowNotFound(window));
        }
        self.backend.destroy_window(window)?;

        log::debug!("closed window {window}");

        Ok(())
    }

    /// Closes every open window, as when the user dismisses the application.
    pub fn close_all(&mut self) -> Result<(), VizError> {
        let windows: Vec<WindowId> = self.windows.keys().copied().collect();
        for window in windows {
            self.close(window)?;
        }
        Ok(())
    }

    /// Whether any window was ever opened through this context.
    ///
    /// Callers use this to decide if an event loop needs to run at all.
    pub fn has_opened_windows(&self) -> bool {
        self.opened_any
    }

    /// Whether at least one window is currently open.
    pub fn is_active(&self) -> bool {
        !self.windows.is_empty()
    }

    /// The ids of the currently open windows, in opening order.
    pub fn windows(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    /// The current content size of an open window.
    pub fn window_size(&self, window: WindowId) -> Option<GridSize> {
        self.windows.get(&window).map(|w| w.size)
    }

    /// Shared access to the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Exclusive access to the backend, for event loops that drive it.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the context and returns its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Resamples `source` to `size` and encodes it as a frame for `window`.
fn encode_frame(window: WindowId, source: &Grid<u8>, size: GridSize) -> Result<Frame, VizError> {
    let gif_base64 = if size == source.size() {
        gif_base64(source)?
    } else {
        gif_base64(&resize_nearest(source, size)?)?
    };

    Ok(Frame {
        window,
        size,
        gif_base64,
    })
}
