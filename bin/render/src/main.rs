//! Render frames of the color wheel animation to PNG files.
//!
//! ```text
//! chromawheel-render [--width N] [--chroma C] [--seconds S] [--frames N]
//!                    [--fps F] [--output PREFIX] [--font FILE] [--bt709]
//! ```

use std::path::{Path, PathBuf};

use chromawheel::{
    geometry::PLACEMENTS, Canvas, ColorWheel, Component, LumaWeights, Scene, Surface,
    SurfaceConfig, SurfaceError, ASPECT,
};
use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale};
use thiserror::Error;

#[derive(Debug, Error)]
enum RenderError {
    #[error("{0}")]
    Args(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("could not write {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("could not read font {path}: {source}")]
    FontIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0} is not a usable font")]
    Font(PathBuf),

    #[error("{len} bytes do not make a {width}x{height} RGBA image")]
    Pixels { width: u32, height: u32, len: usize },
}

/// Parsed command-line arguments.
#[derive(Debug)]
struct Args {
    width: u32,
    chroma: Component,
    seconds: Component,
    frames: u32,
    fps: Component,
    output: String,
    font: Option<PathBuf>,
    weights: LumaWeights,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            width: 800,
            chroma: 1.0,
            seconds: 0.0,
            frames: 1,
            fps: 30.0,
            output: "wheel".to_string(),
            font: None,
            weights: LumaWeights::SHIPPED,
        }
    }
}

/// Parse command-line arguments.
///
/// Supported flags:
///   --width N        Width of the image in pixels (height is half of it)
///   --chroma C       Chroma of the wheel, nominally 0 to 1
///   --seconds S      Time of the first frame
///   --frames N       Number of frames to render
///   --fps F          Frames per second of the animation
///   --output PREFIX  Frames are written to PREFIX-NNNN.png
///   --font FILE      TrueType font used to caption the disks
///   --bt709          Measure luma with the BT.709 weights
fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, RenderError> {
    fn value<T: std::str::FromStr>(
        flag: &str,
        iter: &mut impl Iterator<Item = String>,
    ) -> Result<T, RenderError> {
        let raw = iter
            .next()
            .ok_or_else(|| RenderError::Args(format!("{flag} requires a value")))?;
        raw.parse()
            .map_err(|_| RenderError::Args(format!("invalid value for {flag}: {raw}")))
    }

    let mut args = Args::default();
    let mut iter = raw.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" | "-w" => args.width = value(&arg, &mut iter)?,
            "--chroma" | "-c" => args.chroma = value(&arg, &mut iter)?,
            "--seconds" | "-s" => args.seconds = value(&arg, &mut iter)?,
            "--frames" | "-n" => args.frames = value(&arg, &mut iter)?,
            "--fps" => args.fps = value(&arg, &mut iter)?,
            "--output" | "-o" => args.output = value(&arg, &mut iter)?,
            "--font" => args.font = Some(value(&arg, &mut iter)?),
            "--bt709" => args.weights = LumaWeights::BT709,
            _ => return Err(RenderError::Args(format!("unknown option: {arg}"))),
        }
    }

    if args.fps.is_nan() || args.fps <= 0.0 {
        return Err(RenderError::Args(format!(
            "--fps must be positive, got {}",
            args.fps
        )));
    }

    Ok(args)
}

/// Pixel rectangle `(x, y, width, height)` of each disk, in upload order.
fn disk_rects(width: u32, height: u32) -> Vec<(i32, i32, f32, f32)> {
    let (w, h) = (width as f32, height as f32);
    PLACEMENTS
        .iter()
        .map(|placement| {
            let rect = placement.rect;
            let left = (rect.origin.x + 1.0) / 2.0 * w;
            let top = (1.0 - (rect.origin.y + rect.size.height)) / 2.0 * h;
            (
                left.round() as i32,
                top.round() as i32,
                rect.size.width / 2.0 * w,
                rect.size.height / 2.0 * h,
            )
        })
        .collect()
}

fn caption(img: &mut RgbaImage, font: &Font<'_>) {
    let rects = disk_rects(img.width(), img.height());
    let scale = Scale::uniform((img.height() as f32 / 20.0).max(8.0));

    for (placement, (x, y, _, disk_height)) in PLACEMENTS.iter().zip(rects) {
        let name = placement.space.name();
        let lines = if placement.luma_overlay {
            vec![name, "luma error"]
        } else {
            vec![name]
        };

        let step = line_height(font, scale);
        let top = if placement.luma_overlay {
            // Overlay disks are captioned below the disk.
            y + disk_height as i32 - (step * lines.len() as f32).round() as i32
        } else {
            y
        };

        for (i, line) in lines.iter().enumerate() {
            imageproc::drawing::draw_text_mut(
                img,
                Rgba([127, 127, 127, 255]),
                x + 2,
                top + (step * i as f32).round() as i32,
                scale,
                font,
                line,
            );
        }
    }
}

/// Distance between the baselines of two caption lines.
fn line_height(font: &Font, scale: Scale) -> f32 {
    let metrics = font.v_metrics(scale);
    metrics.ascent - metrics.descent + metrics.line_gap
}

fn load_font(path: &Path) -> Result<Font<'static>, RenderError> {
    let bytes = std::fs::read(path).map_err(|source| RenderError::FontIo {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| RenderError::Font(path.to_path_buf()))
}

fn to_image(canvas: &Canvas) -> Result<RgbaImage, RenderError> {
    rgba_image(canvas.width(), canvas.height(), canvas.as_raw().to_vec())
}

fn rgba_image(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, RenderError> {
    let len = pixels.len();
    RgbaImage::from_raw(width, height, pixels).ok_or(RenderError::Pixels { width, height, len })
}

fn frame_path(output: &str, frame: u32) -> PathBuf {
    PathBuf::from(format!("{output}-{frame:04}.png"))
}

/// Paint `args.frames` frames of `surface` and write each one to disk.
fn render<S: Scene>(
    surface: &mut Surface<S>,
    args: &Args,
    font: Option<&Font<'_>>,
) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = vec![];

    for frame in 0..args.frames {
        let elapsed = args.seconds + frame as Component / args.fps;
        let mut img = to_image(surface.frame(elapsed)?)?;

        if let Some(font) = font {
            caption(&mut img, font);
        }

        let path = frame_path(&args.output, frame);
        img.save(&path).map_err(|source| RenderError::Image {
            path: path.clone(),
            source,
        })?;
        tracing::info!(frame, elapsed, path = %path.display(), "wrote frame");
        written.push(path);
    }

    Ok(written)
}

fn run() -> Result<(), RenderError> {
    let args = parse_args(std::env::args().skip(1))?;
    tracing::debug!(?args, "parsed arguments");

    let font = args.font.as_deref().map(load_font).transpose()?;

    let chroma = args.chroma;
    let wheel = ColorWheel::new(move || chroma).with_weights(args.weights);
    let mut surface = Surface::initialize(SurfaceConfig::new(args.width, ASPECT), wheel)?;

    let written = render(&mut surface, &args, font.as_ref())?;
    tracing::info!(frames = written.len(), "done");
    Ok(())
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            std::process::ExitCode::FAILURE
        }
    }
}
