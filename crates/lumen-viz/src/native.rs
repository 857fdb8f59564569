use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use eframe::egui;
use lumen_image::GridSize;
use lumen_io::functional::decode_image_gray;

use crate::{
    backend::{DisplayBackend, Frame, WindowId},
    context::DisplayContext,
    error::VizError,
};

struct NativeWindow {
    initial_size: GridSize,
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

/// A backend showing every window as a native window through `eframe`.
///
/// Frames are decoded as soon as they are presented and uploaded as textures
/// on the next repaint. Drive it with [`run_native`].
#[derive(Default)]
pub struct NativeBackend {
    windows: BTreeMap<WindowId, NativeWindow>,
}

impl NativeBackend {
    /// Creates a backend with no windows.
    pub fn new() -> Self {
        Self::default()
    }

    fn initial_size(&self, window: WindowId) -> Option<GridSize> {
        self.windows.get(&window).map(|w| w.initial_size)
    }

    /// Returns the texture of `window`, uploading a pending frame first.
    fn texture(&mut self, ctx: &egui::Context, window: WindowId) -> Option<&egui::TextureHandle> {
        let state = self.windows.get_mut(&window)?;
        if let Some(image) = state.pending.take() {
            state.texture = Some(ctx.load_texture(
                format!("lumen-{window}"),
                image,
                egui::TextureOptions::NEAREST,
            ));
        }
        state.texture.as_ref()
    }
}

impl DisplayBackend for NativeBackend {
    fn create_window(&mut self, window: WindowId, size: GridSize) -> Result<(), VizError> {
        if self.windows.contains_key(&window) {
            return Err(VizError::Backend(format!("window {window} already exists")));
        }
        self.windows.insert(
            window,
            NativeWindow {
                initial_size: size,
                pending: None,
                texture: None,
            },
        );
        Ok(())
    }

    fn present(&mut self, frame: &Frame) -> Result<(), VizError> {
        let state = self
            .windows
            .get_mut(&frame.window)
            .ok_or(VizError::WindowNotFound(frame.window))?;

        let bytes = STANDARD
            .decode(&frame.gif_base64)
            .map_err(|e| VizError::Backend(format!("invalid frame payload: {e}")))?;
        let grid = decode_image_gray(&bytes)?;

        state.pending = Some(egui::ColorImage::from_gray(
            [grid.width(), grid.height()],
            grid.as_slice(),
        ));
        Ok(())
    }

    fn destroy_window(&mut self, window: WindowId) -> Result<(), VizError> {
        self.windows
            .remove(&window)
            .map(|_| ())
            .ok_or(VizError::WindowNotFound(window))
    }
}

struct ViewerApp {
    title: String,
    ctx: DisplayContext<NativeBackend>,
}

enum WindowEvent {
    Resized(WindowId, GridSize),
    Closed,
}

impl ViewerApp {
    fn show_window(
        &mut self,
        egui_ctx: &egui::Context,
        window: WindowId,
        events: &mut Vec<WindowEvent>,
    ) {
        let current = self.ctx.window_size(window);
        let texture = self.ctx.backend_mut().texture(egui_ctx, window).cloned();

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(egui_ctx, |ui| {
                let available = ui.available_size();
                let size = GridSize {
                    width: available.x.round().max(0.0) as usize,
                    height: available.y.round().max(0.0) as usize,
                };

                if size.num_samples() > 0 && Some(size) != current {
                    events.push(WindowEvent::Resized(window, size));
                }

                if let Some(texture) = texture.as_ref() {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(available));
                }
            });

        if egui_ctx.input(|i| i.viewport().close_requested()) {
            events.push(WindowEvent::Closed);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let windows = self.ctx.windows();
        let Some((&root, children)) = windows.split_first() else {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        };

        let mut events = Vec::new();

        // the first window lives in the root viewport, the rest get their own
        self.show_window(ctx, root, &mut events);

        for &window in children {
            let Some(size) = self.ctx.backend().initial_size(window) else {
                continue;
            };
            let builder = egui::ViewportBuilder::default()
                .with_title(format!("{} {window}", self.title))
                .with_inner_size([size.width as f32, size.height as f32]);

            ctx.show_viewport_immediate(
                egui::ViewportId::from_hash_of(window),
                builder,
                |child_ctx, _class| self.show_window(child_ctx, window, &mut events),
            );
        }

        for event in events {
            let res = match event {
                WindowEvent::Resized(window, size) => self.ctx.handle_resize(window, size),
                // closing any window ends the whole session
                WindowEvent::Closed => self.ctx.close_all(),
            };
            if let Err(err) = res {
                log::error!("display error: {err}");
            }
        }
    }
}

/// Runs the event loop until every window of `ctx` is closed.
///
/// Returns immediately when no window was ever opened, so callers can always
/// invoke it at the end of a program.
///
/// # Arguments
///
/// * `title` - The title of the application windows.
/// * `ctx` - A display context whose windows are already opened.
pub fn run_native(title: &str, ctx: DisplayContext<NativeBackend>) -> Result<(), VizError> {
    if !ctx.has_opened_windows() {
        return Ok(());
    }

    let size = ctx
        .windows()
        .first()
        .and_then(|&window| ctx.window_size(window))
        .unwrap_or(GridSize {
            width: 320,
            height: 240,
        });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size.width as f32, size.height as f32]),
        ..Default::default()
    };

    let app = ViewerApp {
        title: title.to_string(),
        ctx,
    };

    eframe::run_native(title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| VizError::Backend(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_image::Grid;

    #[test]
    fn present_decodes_frames() -> Result<(), VizError> {
        let mut ctx = DisplayContext::new(NativeBackend::new());
        let grid = Grid::new([2, 1].into(), vec![0u8, 255])?;

        let window = ctx.open(&grid)?;
        ctx.handle_resize(window, [4, 2].into())?;

        let state = ctx
            .backend()
            .windows
            .get(&window)
            .ok_or(VizError::WindowNotFound(window))?;
        assert_eq!(state.initial_size, grid.size());

        let pending = state
            .pending
            .as_ref()
            .ok_or(VizError::Backend("no pending frame".to_string()))?;
        assert_eq!(pending.size, [4, 2]);
        assert_eq!(pending.pixels[0], egui::Color32::from_gray(0));
        assert_eq!(pending.pixels[2], egui::Color32::from_gray(255));
        Ok(())
    }

    #[test]
    fn present_rejects_bad_payload() -> Result<(), VizError> {
        let mut backend = NativeBackend::new();
        let window = WindowId(0);
        backend.create_window(window, [1, 1].into())?;

        let frame = Frame {
            window,
            size: [1, 1].into(),
            gif_base64: "not base64!".to_string(),
        };
        assert!(matches!(backend.present(&frame), Err(VizError::Backend(_))));

        backend.destroy_window(window)?;
        assert!(matches!(
            backend.destroy_window(window),
            Err(VizError::WindowNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn run_without_windows_returns() -> Result<(), VizError> {
        run_native("lumen", DisplayContext::new(NativeBackend::new()))
    }
}
