//! Drawing session: the state of one visit to the selection step.
//!
//! Owns the overlay raster, the committed strokes and regions, the undo
//! history and the view. Every operation is a guard-checked no-op when its
//! preconditions do not hold; mutators return `true` when they changed
//! something the host should repaint.

use crate::history::History;
use rf_core::{
    CanvasGeometry, Category, FillTarget, LINE_WIDTH_MAX, LINE_WIDTH_MIN, PenColor, Point,
    SelectionHandoff, SelectionRegion, SessionConfig, Size, Stroke, Tool, Vec2, ViewTransform,
    effective_line_width,
};
use rf_render::{Layers, Raster, hit, render};

/// The photo the user uploaded in the previous step.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub url: String,
    pub size: Size,
}

pub struct DrawingSession {
    config: SessionConfig,
    image: Option<SourceImage>,
    surface: Option<Raster>,
    geometry: CanvasGeometry,
    view: ViewTransform,
    history: History,
    committed: Vec<Stroke>,
    regions: Vec<SelectionRegion>,
    active: Option<Stroke>,
    tool: Tool,
    pen: PenColor,
    line_width: u8,
    category: Category,
    has_drawn: bool,
    has_filled: bool,
}

impl Default for DrawingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl DrawingSession {
    /// Start a session. A config that fails validation is replaced by the
    /// defaults.
    pub fn new(config: SessionConfig) -> Self {
        let config = config.validated();
        let line_width = config
            .default_line_width
            .clamp(LINE_WIDTH_MIN, LINE_WIDTH_MAX);
        Self {
            view: ViewTransform::new(config.zoom),
            history: History::new(config.history_depth),
            pen: config.default_pen,
            line_width,
            config,
            image: None,
            surface: None,
            geometry: CanvasGeometry::default(),
            committed: Vec::new(),
            regions: Vec::new(),
            active: None,
            tool: Tool::Draw,
            category: Category::default(),
            has_drawn: false,
            has_filled: false,
        }
    }

    // ─── Setup ───────────────────────────────────────────────────────────

    /// Size the overlay to the loaded source image. Mounting again (a new
    /// photo) discards every stroke, region and snapshot of the old one.
    pub fn mount(&mut self, image_url: &str, width: u32, height: u32) -> Result<(), String> {
        let raster = Raster::new(width, height)?;
        let size = raster.size();
        self.image = Some(SourceImage {
            url: image_url.to_string(),
            size,
        });
        self.surface = Some(raster);
        self.geometry = CanvasGeometry::unscaled(size);
        self.view = ViewTransform::new(self.config.zoom);
        self.history.clear();
        self.committed.clear();
        self.regions.clear();
        self.active = None;
        self.has_drawn = false;
        self.has_filled = false;
        log::debug!("mounted {width}x{height} surface for {image_url}");
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Update where the canvas sits on screen (layout, resize, DPR change).
    pub fn set_geometry(&mut self, geometry: CanvasGeometry) {
        self.geometry = geometry;
    }

    /// Map a screen position to logical canvas space.
    pub fn to_logical(&self, screen: Point) -> Point {
        self.view.to_logical(screen, &self.geometry)
    }

    // ─── Path recorder ───────────────────────────────────────────────────

    /// Start a stroke at `point` (logical coordinates). A stroke still
    /// active from a lost pointer-up is committed first.
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        if self.tool != Tool::Draw {
            return false;
        }
        if self.active.is_some() {
            self.commit_stroke();
        }
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        self.history.checkpoint(surface);
        let width = self.effective_line_width();
        self.active = Some(Stroke::new(point, width, self.pen.stroke()));
        log::debug!("stroke started at ({:.1}, {:.1}), width {width}", point.x, point.y);
        true
    }

    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if self.tool != Tool::Draw {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        active.push(point);
        log::trace!("extend ({:.1}, {:.1})", point.x, point.y);
        self.has_drawn = true;
        self.redraw();
        true
    }

    pub fn commit_stroke(&mut self) -> bool {
        if self.tool != Tool::Draw {
            return false;
        }
        let Some(stroke) = self.active.take() else {
            return false;
        };
        log::debug!("stroke committed with {} points", stroke.len());
        self.committed.push(stroke);
        self.redraw();
        true
    }

    // ─── Fill engine ─────────────────────────────────────────────────────

    /// Retire the most recently committed stroke into a filled region.
    pub fn fill(&mut self) -> bool {
        let index = self.committed.len().checked_sub(1);
        self.fill_index(index)
    }

    /// Fill in response to a click at `point` (logical coordinates),
    /// honouring the configured [`FillTarget`].
    pub fn fill_at(&mut self, point: Point) -> bool {
        let index = match self.config.fill_target {
            FillTarget::MostRecent => self.committed.len().checked_sub(1),
            FillTarget::UnderPointer => hit::stroke_at(&self.committed, point),
        };
        self.fill_index(index)
    }

    fn fill_index(&mut self, index: Option<usize>) -> bool {
        if self.tool != Tool::Fill {
            return false;
        }
        let (Some(index), Some(surface)) = (index, self.surface.as_ref()) else {
            return false;
        };
        if index >= self.committed.len() {
            return false;
        }
        self.history.checkpoint(surface);
        let stroke = self.committed.remove(index);
        self.regions
            .push(SelectionRegion::from_stroke(stroke, self.pen.fill()));
        self.has_drawn = true;
        self.has_filled = true;
        log::debug!(
            "filled stroke {index}; {} regions, {} strokes pending",
            self.regions.len(),
            self.committed.len()
        );
        self.redraw();
        true
    }

    // ─── Tool & pen ──────────────────────────────────────────────────────

    /// Switch tools. Fill is refused while there is nothing to fill.
    pub fn switch_tool(&mut self, tool: Tool) -> bool {
        match (self.tool, tool) {
            (Tool::Draw, Tool::Draw) | (Tool::Fill, Tool::Fill) => false,
            (Tool::Draw, Tool::Fill) => {
                if self.active.is_some() {
                    self.commit_stroke();
                }
                if self.committed.is_empty() {
                    log::debug!("fill tool rejected: no committed strokes");
                    return false;
                }
                self.tool = Tool::Fill;
                self.has_filled = false;
                log::debug!("tool: fill");
                true
            }
            (Tool::Fill, Tool::Draw) => {
                self.tool = Tool::Draw;
                log::debug!("tool: draw");
                true
            }
        }
    }

    pub fn set_pen(&mut self, pen: PenColor) -> bool {
        let changed = self.pen != pen;
        self.pen = pen;
        changed
    }

    /// Set the slider value, clamped into the supported range. Applies to
    /// strokes started afterwards.
    pub fn set_line_width(&mut self, width: u8) -> bool {
        let width = width.clamp(LINE_WIDTH_MIN, LINE_WIDTH_MAX);
        let changed = self.line_width != width;
        self.line_width = width;
        changed
    }

    pub fn set_category(&mut self, category: Category) -> bool {
        let changed = self.category != category;
        self.category = category;
        changed
    }

    /// Stroke width in backing pixels for the current slider value.
    pub fn effective_line_width(&self) -> f64 {
        effective_line_width(self.line_width, &self.geometry)
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Restore the pixels from before the last mutation and drop the entity
    /// it created: the newest region, or failing that the newest stroke.
    /// Ignored while a stroke is being drawn.
    pub fn undo(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !self.history.undo(surface) {
            return false;
        }
        if self.regions.pop().is_none() {
            self.committed.pop();
        }
        // Snapshots may have been trimmed, so judge by what is left on canvas
        if self.regions.is_empty() && self.committed.is_empty() {
            self.has_drawn = false;
            self.has_filled = false;
        }
        log::debug!(
            "undo: {} regions, {} strokes, depth {}",
            self.regions.len(),
            self.committed.len(),
            self.history.undo_len()
        );
        true
    }

    /// Re-apply undone pixels. Only the raster is restored; the region or
    /// stroke removed by the undo is not brought back, so the next full
    /// redraw (any stroke or fill) paints over it.
    pub fn redo(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !self.history.redo(surface) {
            return false;
        }
        self.has_drawn = true;
        log::debug!("redo: depth {}", self.history.undo_len());
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> bool {
        self.view.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.view.zoom_out()
    }

    /// Pan by a delta in backing pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.view.pan_by(delta);
        true
    }

    /// Return to the home view, fitting the image into `viewport` when one
    /// is given.
    pub fn reset_view(&mut self, viewport: Option<Size>) {
        let image = self.image.as_ref().map_or(self.geometry.backing, |i| i.size);
        self.view.reset(image, viewport);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.surface.as_ref()
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn pen(&self) -> PenColor {
        self.pen
    }

    pub fn line_width(&self) -> u8 {
        self.line_width
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn committed_strokes(&self) -> &[Stroke] {
        &self.committed
    }

    pub fn regions(&self) -> &[SelectionRegion] {
        &self.regions
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    pub fn has_filled(&self) -> bool {
        self.has_filled
    }

    /// The selection as passed on to the material step.
    pub fn handoff(&self) -> SelectionHandoff {
        let url = self.image.as_ref().map_or("", |i| i.url.as_str());
        SelectionHandoff::from_regions(self.category, url, &self.regions)
    }

    fn redraw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        render(
            surface,
            &Layers {
                regions: &self.regions,
                strokes: &self.committed,
                active: self.active.as_ref(),
            },
        );
    }
}
