use crate::theme::Theme;
use arcplot::{AnnotationAnchor, AnnularSector, CategoryId, Geometry, Point};
use cairo::Context;
use palette::Srgba;

/// Gap between the underline of a label and the label text.
const LABEL_TEXT_INSET: f64 = 10.0;
const LEVEL_LABEL_SIZE: f64 = 10.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Adds an annular sector to the current path. Cairo measures angles from 3 o'clock.
fn sector_path(cr: &Context, sector: &AnnularSector) {
    let (start, end) = sector.screen_angles();
    cr.new_sub_path();
    cr.arc(0.0, 0.0, sector.outer_radius.max(0.0), start, end);
    cr.arc_negative(0.0, 0.0, sector.inner_radius.max(0.0), end, start);
    cr.close_path();
}

fn fill_sector(
    cr: &Context,
    sector: &AnnularSector,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_source(cr, color);
    sector_path(cr, sector);
    cr.fill()
}

struct CategoryRenderer<'a> {
    geometry: &'a Geometry<'a>,
    theme: &'a Theme,
    category: &'a CategoryId,
    color: Srgba<f64>,
}

impl<'a> CategoryRenderer<'a> {
    fn new(geometry: &'a Geometry<'a>, theme: &'a Theme, category: &'a CategoryId) -> Self {
        let color = theme
            .palette
            .color_for(geometry.sorted_categories(), category);
        Self {
            geometry,
            theme,
            category,
            color,
        }
    }

    /// Each bar is drawn as a stack of one segment per level.
    fn draw_bars(&self, cr: &Context) -> Result<(), cairo::Error> {
        for record in self.geometry.skills(self.category) {
            for segment in self.geometry.segments(record) {
                fill_sector(cr, &segment, self.color)?;
            }
        }
        Ok(())
    }

    fn draw_annotation(&self, cr: &Context) -> Result<(), cairo::Error> {
        let (Some(base), Some(anchor)) = (
            self.geometry.category_base_arc(self.category),
            self.geometry.annotation_anchor(self.category),
        ) else {
            return Ok(());
        };

        fill_sector(cr, &base, self.color)?;

        let label_radius = self.geometry.outer_radius() + self.theme.annotation_padding;
        let from = anchor.inner.scale(self.geometry.inner_radius());
        let to = anchor.outer.scale(label_radius);
        let underline = self.theme.category_label_width + 2.0 * LABEL_TEXT_INSET;
        let direction = if anchor.faces_right() { 1.0 } else { -1.0 };

        set_source(cr, self.color);
        cr.set_line_width(self.theme.line_thickness);

        // leader line, then the line under the label
        cr.move_to(from.x, from.y);
        cr.line_to(to.x, to.y);
        cr.line_to(to.x + direction * underline, to.y);
        cr.stroke()?;

        self.draw_label_box(cr, &anchor, to, underline)?;
        self.draw_label_text(cr, &anchor, to)
    }

    fn draw_label_box(
        &self,
        cr: &Context,
        anchor: &AnnotationAnchor,
        at: Point,
        width: f64,
    ) -> Result<(), cairo::Error> {
        let height = self.theme.label_height;
        let x = if anchor.faces_right() { at.x } else { at.x - width };
        let y = if anchor.faces_down() { at.y } else { at.y - height };

        set_source(cr, self.color);
        cr.rectangle(x, y, width, height);
        cr.fill()
    }

    fn draw_label_text(
        &self,
        cr: &Context,
        anchor: &AnnotationAnchor,
        at: Point,
    ) -> Result<(), cairo::Error> {
        let text = self.category.as_str();
        cr.select_font_face(
            &self.theme.font_family,
            cairo::FontSlant::Normal,
            cairo::FontWeight::Bold,
        );
        cr.set_font_size(self.theme.font_size);
        let ext = cr.text_extents(text)?;

        let inset = self.theme.category_label_width + LABEL_TEXT_INSET;
        // text is right aligned on the right half of the chart, left aligned on the left
        let x = if anchor.faces_right() {
            at.x + inset - ext.width() - ext.x_bearing()
        } else {
            at.x - inset - ext.x_bearing()
        };
        let baseline = self.theme.label_height - LABEL_TEXT_INSET;
        let y = if anchor.faces_down() {
            at.y + baseline
        } else {
            at.y - LABEL_TEXT_INSET
        };

        set_source(cr, self.theme.colors.label_text);
        cr.move_to(x, y);
        cr.show_text(text)
    }
}

fn draw_level_rings(
    cr: &Context,
    geometry: &Geometry<'_>,
    theme: &Theme,
) -> Result<(), cairo::Error> {
    for ring in geometry.level_rings() {
        fill_sector(cr, &ring, theme.colors.level_ring)?;
    }
    Ok(())
}

fn draw_level_labels(
    cr: &Context,
    geometry: &Geometry<'_>,
    theme: &Theme,
) -> Result<(), cairo::Error> {
    cr.select_font_face(
        &theme.font_family,
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    cr.set_font_size(LEVEL_LABEL_SIZE);
    set_source(cr, theme.colors.level_label);

    for level in geometry.scale().levels() {
        let text = level.to_string();
        let ext = cr.text_extents(&text)?;
        let y = -geometry.level_to_radius(level as f64 - 0.1);
        cr.move_to(-ext.width() / 2.0 - ext.x_bearing(), y);
        cr.show_text(&text)?;
    }
    Ok(())
}

/// Draws the whole chart. The context's origin must be at the chart center.
pub fn draw(cr: &Context, geometry: &Geometry<'_>, theme: &Theme) -> Result<(), cairo::Error> {
    if let Some(background) = theme.colors.background {
        cr.save()?;
        set_source(cr, background);
        cr.paint()?;
        cr.restore()?;
    }

    draw_level_rings(cr, geometry, theme)?;

    for category in geometry.filtered_categories() {
        CategoryRenderer::new(geometry, theme, category).draw_bars(cr)?;
    }
    for category in geometry.filtered_categories() {
        CategoryRenderer::new(geometry, theme, category).draw_annotation(cr)?;
    }

    if !geometry.filtered_categories().is_empty() {
        draw_level_labels(cr, geometry, theme)?;
    }
    Ok(())
}
