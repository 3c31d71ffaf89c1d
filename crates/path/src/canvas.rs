//! The primitive store and its drawing commands.

use crate::allocator::{Allocator, SystemAllocator};
use crate::color::Color;
use crate::error::{CanvasError, CanvasResult};
use crate::list::RawList;
use crate::math::{point, size, vector, Point};
use crate::path::{Edge, EdgeKind, Path};
use crate::shapes::{Ellipse, Rect, RoundedRect};
use crate::style::{self, Style};

/// Collects paths and closed shapes until they are tessellated.
///
/// Each primitive captures the style in effect when its command was issued. The canvas is
/// meant to be filled, tessellated and cleared once per frame.
///
/// All storage comes from the allocator `A`. When it runs out of memory the failing command
/// returns [`CanvasError::OutOfMemory`] and the canvas is left as it was before the command.
///
/// # Example
///
/// ```
/// use quill_path::{Canvas, Color};
///
/// let mut canvas = Canvas::new();
/// canvas.set_stroke_width(2.0).unwrap();
/// canvas.move_to(0.0, 0.0).unwrap();
/// canvas.line_to(10.0, 0.0).unwrap();
/// canvas.quadratic_curve_to(15.0, 5.0, 10.0, 10.0).unwrap();
///
/// canvas.set_fill_color(Color::new(1.0, 0.0, 0.0, 1.0));
/// canvas.begin_fill();
/// canvas.circle(50.0, 50.0, 20.0).unwrap();
/// canvas.end_fill();
///
/// assert_eq!(canvas.paths().len(), 1);
/// assert_eq!(canvas.ellipses().len(), 1);
/// ```
pub struct Canvas<A: Allocator = SystemAllocator> {
    style: Style,
    initial_style: Style,
    paths: RawList<Path>,
    rects: RawList<Rect>,
    rounded_rects: RawList<RoundedRect>,
    ellipses: RawList<Ellipse>,
    alloc: A,
}

impl Canvas<SystemAllocator> {
    pub fn new() -> Self {
        Canvas::new_unchecked(SystemAllocator, Style::DEFAULT)
    }

    /// A canvas that starts, and is reset by `clear`, with the provided style.
    pub fn with_style(style: Style) -> CanvasResult<Self> {
        Canvas::with_allocator(SystemAllocator, style)
    }
}

impl Default for Canvas<SystemAllocator> {
    fn default() -> Self {
        Canvas::new()
    }
}

impl<A: Allocator> Canvas<A> {
    pub fn with_allocator(alloc: A, style: Style) -> CanvasResult<Self> {
        style.validate()?;

        Ok(Canvas::new_unchecked(alloc, style))
    }

    fn new_unchecked(alloc: A, style: Style) -> Self {
        Canvas {
            style,
            initial_style: style,
            paths: RawList::new(),
            rects: RawList::new(),
            rounded_rects: RawList::new(),
            ellipses: RawList::new(),
            alloc,
        }
    }

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub fn paths(&self) -> &[Path] {
        self.paths.as_slice()
    }

    #[inline]
    pub fn rects(&self) -> &[Rect] {
        self.rects.as_slice()
    }

    #[inline]
    pub fn rounded_rects(&self) -> &[RoundedRect] {
        self.rounded_rects.as_slice()
    }

    #[inline]
    pub fn ellipses(&self) -> &[Ellipse] {
        self.ellipses.as_slice()
    }

    /// True if nothing would be tessellated.
    pub fn is_empty(&self) -> bool {
        self.paths().iter().all(Path::is_empty)
            && self.rects.is_empty()
            && self.rounded_rects.is_empty()
            && self.ellipses.is_empty()
    }

    pub fn set_style(&mut self, style: Style) -> CanvasResult<()> {
        style
            .validate()
            .map_err(|err| rejected("set_style", err))?;
        self.style = style;

        Ok(())
    }

    pub fn set_stroke_width(&mut self, width: f32) -> CanvasResult<()> {
        style::check_stroke_width(width).map_err(|err| rejected("set_stroke_width", err))?;
        self.style.stroke_width = width;

        Ok(())
    }

    pub fn set_penumbra(&mut self, penumbra: f32) -> CanvasResult<()> {
        style::check_penumbra(penumbra).map_err(|err| rejected("set_penumbra", err))?;
        self.style.penumbra = penumbra;

        Ok(())
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.style.stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.style.fill_color = color;
    }

    pub fn set_curve_quality(&mut self, quality: u32) -> CanvasResult<()> {
        style::check_curve_quality(quality).map_err(|err| rejected("set_curve_quality", err))?;
        self.style.curve_quality = quality;

        Ok(())
    }

    pub fn set_ellipse_quality(&mut self, quality: u32) -> CanvasResult<()> {
        style::check_ellipse_quality(quality)
            .map_err(|err| rejected("set_ellipse_quality", err))?;
        self.style.ellipse_quality = quality;

        Ok(())
    }

    /// Closed shapes added from now on get an interior.
    pub fn begin_fill(&mut self) {
        self.style.fill = true;
    }

    pub fn end_fill(&mut self) {
        self.style.fill = false;
    }

    /// Starts a new path, which becomes the target of the edge commands.
    pub fn move_to(&mut self, x: f32, y: f32) -> CanvasResult<()> {
        self.paths
            .reserve(&mut self.alloc, 1)
            .map_err(|err| rejected("move_to", err.into()))?;
        let path = Path::begin(&mut self.alloc, point(x, y), self.style.penumbra)
            .map_err(|err| rejected("move_to", err.into()))?;
        self.paths
            .push(&mut self.alloc, path)
            .map_err(|err| rejected("move_to", err.into()))
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> CanvasResult<()> {
        self.push_edge("line_to", EdgeKind::Line, point(x, y))
    }

    pub fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) -> CanvasResult<()> {
        let kind = EdgeKind::Quadratic {
            ctrl: point(cpx, cpy),
        };
        self.push_edge("quadratic_curve_to", kind, point(x, y))
    }

    pub fn bezier_curve_to(
        &mut self,
        cp1x: f32,
        cp1y: f32,
        cp2x: f32,
        cp2y: f32,
        x: f32,
        y: f32,
    ) -> CanvasResult<()> {
        let kind = EdgeKind::Cubic {
            ctrl1: point(cp1x, cp1y),
            ctrl2: point(cp2x, cp2y),
        };
        self.push_edge("bezier_curve_to", kind, point(x, y))
    }

    /// Adds a line back to the first point of the active path.
    ///
    /// Does nothing if the path is empty or already ends where it started.
    pub fn close_path(&mut self) -> CanvasResult<()> {
        let (first, last, empty) = match self.paths.last() {
            Some(path) => (path.first(), path.last(), path.is_empty()),
            None => return Err(rejected("close_path", CanvasError::NoActivePath)),
        };

        if empty || first == last {
            return Ok(());
        }

        self.push_edge("close_path", EdgeKind::Line, first)
    }

    fn push_edge(&mut self, command: &str, kind: EdgeKind, to: Point) -> CanvasResult<()> {
        let edge = Edge {
            kind,
            style: self.style.edge_style(),
        };

        let path = match self.paths.last_mut() {
            Some(path) => path,
            None => return Err(rejected(command, CanvasError::NoActivePath)),
        };

        path.push_edge(&mut self.alloc, edge, to)
            .map_err(|err| rejected(command, err.into()))
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) -> CanvasResult<()> {
        let rect = Rect {
            origin: point(x, y),
            size: size(w, h),
            style: self.style.shape_style(),
        };

        self.rects
            .push(&mut self.alloc, rect)
            .map_err(|err| rejected("rect", err.into()))
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) -> CanvasResult<()> {
        let rounded_rect = RoundedRect {
            origin: point(x, y),
            size: size(w, h),
            radius,
            arc_quality: self.style.arc_quality(),
            style: self.style.shape_style(),
        };

        self.rounded_rects
            .push(&mut self.alloc, rounded_rect)
            .map_err(|err| rejected("rounded_rect", err.into()))
    }

    pub fn circle(&mut self, x: f32, y: f32, radius: f32) -> CanvasResult<()> {
        self.ellipse(x, y, radius, radius)
    }

    pub fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32) -> CanvasResult<()> {
        let ellipse = Ellipse {
            center: point(x, y),
            radii: vector(rx, ry),
            quality: self.style.ellipse_quality,
            style: self.style.shape_style(),
        };

        self.ellipses
            .push(&mut self.alloc, ellipse)
            .map_err(|err| rejected("ellipse", err.into()))
    }

    /// Removes every primitive and restores the initial style.
    ///
    /// The memory of the primitive lists is kept for the next frame, the memory of the
    /// individual paths is given back to the allocator.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing canvas: {} paths, {} rects, {} rounded rects, {} ellipses",
            self.paths.len(),
            self.rects.len(),
            self.rounded_rects.len(),
            self.ellipses.len(),
        );

        self.release_paths();
        self.paths.clear();
        self.rects.clear();
        self.rounded_rects.clear();
        self.ellipses.clear();
        self.style = self.initial_style;
    }

    fn release_paths(&mut self) {
        for path in self.paths.as_mut_slice() {
            path.release(&mut self.alloc);
        }
    }
}

impl<A: Allocator> Drop for Canvas<A> {
    fn drop(&mut self) {
        self.release_paths();
        self.paths.release(&mut self.alloc);
        self.rects.release(&mut self.alloc);
        self.rounded_rects.release(&mut self.alloc);
        self.ellipses.release(&mut self.alloc);
    }
}

impl<A: Allocator> core::fmt::Debug for Canvas<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Canvas")
            .field("style", &self.style)
            .field("paths", &self.paths)
            .field("rects", &self.rects)
            .field("rounded_rects", &self.rounded_rects)
            .field("ellipses", &self.ellipses)
            .finish()
    }
}

fn rejected(command: &str, err: CanvasError) -> CanvasError {
    log::warn!("{} rejected: {}", command, err);
    err
}
