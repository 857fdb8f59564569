#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Display backends and the frames they present.
pub mod backend;

/// The caller-owned display context.
pub mod context;

/// Error types for the display module.
pub mod error;

/// Native windows through `eframe`.
#[cfg(feature = "gui")]
pub mod native;

pub use crate::backend::{DisplayBackend, Frame, HeadlessBackend, WindowId};
pub use crate::context::{DisplayContext, ResizeEvent, SubscriptionId};
pub use crate::error::VizError;

#[cfg(feature = "gui")]
pub use crate::native::{run_native, NativeBackend};
