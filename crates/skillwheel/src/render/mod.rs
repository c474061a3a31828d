use crate::config::OutputFormat;
use crate::theme::Theme;
use arcplot::Geometry;
use cairo::{Context, Format, ImageSurface, SvgSurface};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub mod view;

pub use view::draw;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Failed to write image: {0}")]
    Write(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Size of the drawing surface, in drawing units (pixels for PNG, points for SVG).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn draw_centered(
        &self,
        cr: &Context,
        geometry: &Geometry<'_>,
        theme: &Theme,
    ) -> Result<(), cairo::Error> {
        cr.translate(self.width / 2.0, self.height / 2.0);
        view::draw(cr, geometry, theme)
    }
}

pub fn render_png<W: Write>(
    geometry: &Geometry<'_>,
    theme: &Theme,
    canvas: Canvas,
    out: &mut W,
) -> Result<(), RenderError> {
    let surface = ImageSurface::create(
        Format::ARgb32,
        canvas.width.ceil() as i32,
        canvas.height.ceil() as i32,
    )?;
    {
        let cr = Context::new(&surface)?;
        canvas.draw_centered(&cr, geometry, theme)?;
    }
    surface.write_to_png(out)?;
    Ok(())
}

pub fn render_svg(
    geometry: &Geometry<'_>,
    theme: &Theme,
    canvas: Canvas,
    path: &Path,
) -> Result<(), RenderError> {
    let surface = SvgSurface::new(canvas.width, canvas.height, Some(path))?;
    {
        let cr = Context::new(&surface)?;
        canvas.draw_centered(&cr, geometry, theme)?;
    }
    surface.finish();
    surface.status()?;
    Ok(())
}

pub fn render_to_file(
    geometry: &Geometry<'_>,
    theme: &Theme,
    canvas: Canvas,
    path: &Path,
    format: OutputFormat,
) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Png => {
            let mut file = fs_err::File::create(path)?;
            render_png(geometry, theme, canvas, &mut file)?;
        }
        OutputFormat::Svg => render_svg(geometry, theme, canvas, path)?,
    }
    log::info!("Wrote {} chart to {}", format, path.display());
    Ok(())
}
