use argh::FromArgs;
use std::path::PathBuf;

use lumen::{
    image::Grid,
    imgproc::{filter, parallel::ExecutionStrategy},
    io::functional as F,
    viz::DisplayContext,
};

#[cfg(feature = "gui")]
use lumen::viz::{run_native, NativeBackend};

#[cfg(not(feature = "gui"))]
use lumen::viz::HeadlessBackend;

#[derive(Debug, Clone, Copy)]
enum FilterKind {
    Invert,
    Blur,
    Sharpen,
    Edges,
}

fn to_filter_kind(value: &str) -> Result<FilterKind, String> {
    match value.to_lowercase().as_str() {
        "invert" => Ok(FilterKind::Invert),
        "blur" => Ok(FilterKind::Blur),
        "sharpen" => Ok(FilterKind::Sharpen),
        "edges" => Ok(FilterKind::Edges),
        _ => Err(format!("Invalid filter: {value}")),
    }
}

#[derive(FromArgs)]
/// Apply a grayscale filter to an image
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, the format follows the extension
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// the filter to apply: invert, blur, sharpen or edges
    #[argh(option, short = 'f', from_str_fn(to_filter_kind))]
    filter: FilterKind,

    /// the kernel size for blur and sharpen
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,

    /// compute rows on the calling thread only
    #[argh(switch)]
    serial: bool,

    /// show the input and the result in resizable windows
    #[argh(switch)]
    preview: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let strategy = if args.serial {
        ExecutionStrategy::Serial
    } else {
        ExecutionStrategy::ParallelRows
    };

    // read the image as luminance
    let grid = F::read_image_gray(&args.input)?;

    log::info!(
        "applying {:?} to {} ({})",
        args.filter,
        args.input.display(),
        grid.size()
    );

    let filtered = match args.filter {
        FilterKind::Invert => filter::invert(&grid),
        FilterKind::Blur => filter::box_blur_with_strategy(&grid, args.kernel_size, strategy)?,
        FilterKind::Sharpen => filter::sharpen_with_strategy(&grid, args.kernel_size, strategy)?,
        FilterKind::Edges => filter::edges_with_strategy(&grid, strategy)?,
    };

    F::write_image_gray(&args.output, &filtered)?;

    log::info!("wrote {}", args.output.display());

    if args.preview {
        preview(&grid, &filtered)?;
    }

    Ok(())
}

/// Opens the input and the result in native windows until they are closed.
#[cfg(feature = "gui")]
fn preview(original: &Grid<u8>, filtered: &Grid<u8>) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = DisplayContext::new(NativeBackend::new());

    ctx.subscribe_resize(|e| log::info!("window {} resized to {}", e.window, e.size));

    ctx.open(original)?;
    ctx.open(filtered)?;

    run_native("lumen filters", ctx)?;

    Ok(())
}

/// Presents the input and the result on a headless display and logs the frames.
#[cfg(not(feature = "gui"))]
fn preview(original: &Grid<u8>, filtered: &Grid<u8>) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = DisplayContext::new(HeadlessBackend::new());

    ctx.subscribe_resize(|e| log::info!("window {} resized to {}", e.window, e.size));

    let source = ctx.open(original)?;
    let result = ctx.open(filtered)?;

    // show the result at twice its size, like a user enlarging the window
    let size = filtered.size();
    ctx.handle_resize(result, [size.width * 2, size.height * 2].into())?;

    for window in [source, result] {
        if let Some(frame) = ctx.backend().last_frame(window) {
            log::info!(
                "window {} shows a {} frame ({} base64 bytes)",
                window,
                frame.size,
                frame.gif_base64.len()
            );
        }
    }

    ctx.close_all()?;

    Ok(())
}
