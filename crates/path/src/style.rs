use crate::color::Color;
use crate::error::{CanvasError, CanvasResult};

/// The "pen" state of a canvas.
///
/// Every primitive captures a copy of the relevant fields when it is created, so changing
/// the style afterwards never affects geometry that was already submitted.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Style {
    /// Full width of strokes.
    ///
    /// Default value: `Style::DEFAULT_STROKE_WIDTH`.
    pub stroke_width: f32,

    /// Width of the antialiasing fringe. Zero produces hard edges.
    ///
    /// Default value: `Style::DEFAULT_PENUMBRA`.
    pub penumbra: f32,

    /// Default value: `Style::DEFAULT_STROKE_COLOR`.
    pub stroke_color: Color,

    /// Default value: `Style::DEFAULT_FILL_COLOR`.
    pub fill_color: Color,

    /// Number of samples taken along each curve edge, both endpoints included.
    ///
    /// Must be between `Style::MINIMUM_CURVE_QUALITY` and `Style::MAXIMUM_CURVE_QUALITY`.
    /// Default value: `Style::DEFAULT_CURVE_QUALITY`.
    pub curve_quality: u32,

    /// Number of boundary samples of ellipses. Rounded rectangles use a quarter of it
    /// (rounded up) per corner.
    ///
    /// Must be between `Style::MINIMUM_ELLIPSE_QUALITY` and `Style::MAXIMUM_ELLIPSE_QUALITY`.
    /// Default value: `Style::DEFAULT_ELLIPSE_QUALITY`.
    pub ellipse_quality: u32,

    /// Whether closed shapes get an interior.
    ///
    /// Default value: `false`.
    pub fill: bool,
}

impl Style {
    pub const MINIMUM_CURVE_QUALITY: u32 = 2;
    pub const MINIMUM_ELLIPSE_QUALITY: u32 = 1;
    pub const MAXIMUM_CURVE_QUALITY: u32 = 1 << 16;
    pub const MAXIMUM_ELLIPSE_QUALITY: u32 = 1 << 16;
    pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;
    pub const DEFAULT_PENUMBRA: f32 = 0.0;
    pub const DEFAULT_STROKE_COLOR: Color = Color::BLACK;
    pub const DEFAULT_FILL_COLOR: Color = Color::WHITE;
    pub const DEFAULT_CURVE_QUALITY: u32 = 16;
    pub const DEFAULT_ELLIPSE_QUALITY: u32 = 32;

    pub const DEFAULT: Self = Style {
        stroke_width: Self::DEFAULT_STROKE_WIDTH,
        penumbra: Self::DEFAULT_PENUMBRA,
        stroke_color: Self::DEFAULT_STROKE_COLOR,
        fill_color: Self::DEFAULT_FILL_COLOR,
        curve_quality: Self::DEFAULT_CURVE_QUALITY,
        ellipse_quality: Self::DEFAULT_ELLIPSE_QUALITY,
        fill: false,
    };

    #[inline]
    pub const fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    #[inline]
    pub const fn with_penumbra(mut self, penumbra: f32) -> Self {
        self.penumbra = penumbra;
        self
    }

    #[inline]
    pub const fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[inline]
    pub const fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[inline]
    pub const fn with_curve_quality(mut self, quality: u32) -> Self {
        self.curve_quality = quality;
        self
    }

    #[inline]
    pub const fn with_ellipse_quality(mut self, quality: u32) -> Self {
        self.ellipse_quality = quality;
        self
    }

    #[inline]
    pub const fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Parameter step between two curve samples.
    #[inline]
    pub fn curve_dt(&self) -> f32 {
        1.0 / (self.curve_quality - 1) as f32
    }

    /// Number of arc steps per rounded-rectangle corner.
    #[inline]
    pub fn arc_quality(&self) -> u32 {
        self.ellipse_quality.saturating_sub(1) / 4 + 1
    }

    /// Checks every field against its documented range.
    pub fn validate(&self) -> CanvasResult<()> {
        check_stroke_width(self.stroke_width)?;
        check_penumbra(self.penumbra)?;
        check_curve_quality(self.curve_quality)?;
        check_ellipse_quality(self.ellipse_quality)
    }

    pub(crate) fn edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color,
            quality: self.curve_quality,
            dt: self.curve_dt(),
        }
    }

    pub(crate) fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_width: self.stroke_width,
            penumbra: self.penumbra,
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            fill: self.fill,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub(crate) fn check_stroke_width(width: f32) -> CanvasResult<()> {
    if width.is_finite() && width >= 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidStrokeWidth(width))
    }
}

pub(crate) fn check_penumbra(penumbra: f32) -> CanvasResult<()> {
    if penumbra.is_finite() && penumbra >= 0.0 {
        Ok(())
    } else {
        Err(CanvasError::InvalidPenumbra(penumbra))
    }
}

pub(crate) fn check_curve_quality(quality: u32) -> CanvasResult<()> {
    if (Style::MINIMUM_CURVE_QUALITY..=Style::MAXIMUM_CURVE_QUALITY).contains(&quality) {
        Ok(())
    } else {
        Err(CanvasError::InvalidCurveQuality(quality))
    }
}

pub(crate) fn check_ellipse_quality(quality: u32) -> CanvasResult<()> {
    if (Style::MINIMUM_ELLIPSE_QUALITY..=Style::MAXIMUM_ELLIPSE_QUALITY).contains(&quality) {
        Ok(())
    } else {
        Err(CanvasError::InvalidEllipseQuality(quality))
    }
}

/// Style captured by each path edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeStyle {
    pub stroke_width: f32,
    pub stroke_color: Color,
    /// Curve quality at the time the edge was added.
    pub quality: u32,
    /// `1 / (quality - 1)`.
    pub dt: f32,
}

impl EdgeStyle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.stroke_width * 0.5
    }
}

/// Style captured by closed shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    pub stroke_width: f32,
    pub penumbra: f32,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub fill: bool,
}

impl ShapeStyle {
    #[inline]
    pub fn mode(&self) -> ShapeMode {
        ShapeMode {
            stroke: self.stroke_width > 0.0 || !self.fill,
            fill: self.fill,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.stroke_width * 0.5
    }

    #[inline]
    pub fn is_soft(&self) -> bool {
        self.penumbra > 0.0
    }
}

/// Which parts of a closed shape are generated.
///
/// A shape is stroked unless it is filled with a zero stroke width.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeMode {
    pub stroke: bool,
    pub fill: bool,
}

#[test]
fn defaults() {
    let style = Style::default();
    assert_eq!(style.stroke_width, 1.0);
    assert_eq!(style.penumbra, 0.0);
    assert_eq!(style.stroke_color, Color::BLACK);
    assert_eq!(style.fill_color, Color::WHITE);
    assert_eq!(style.curve_quality, 16);
    assert_eq!(style.ellipse_quality, 32);
    assert!(!style.fill);
    assert!(style.validate().is_ok());
}

#[test]
fn arc_quality_rounds_up() {
    assert_eq!(Style::DEFAULT.with_ellipse_quality(1).arc_quality(), 1);
    assert_eq!(Style::DEFAULT.with_ellipse_quality(4).arc_quality(), 1);
    assert_eq!(Style::DEFAULT.with_ellipse_quality(5).arc_quality(), 2);
    assert_eq!(Style::DEFAULT.with_ellipse_quality(32).arc_quality(), 8);
    assert_eq!(Style::DEFAULT.with_ellipse_quality(33).arc_quality(), 9);
    assert_eq!(Style::DEFAULT.with_ellipse_quality(u32::MAX).arc_quality(), 1 << 30);
    let max = Style::DEFAULT.with_ellipse_quality(Style::MAXIMUM_ELLIPSE_QUALITY);
    assert_eq!(max.arc_quality(), 1 << 14);
}

#[test]
fn validation() {
    assert_eq!(
        Style::DEFAULT.with_curve_quality(1).validate(),
        Err(CanvasError::InvalidCurveQuality(1))
    );
    assert_eq!(
        Style::DEFAULT.with_ellipse_quality(0).validate(),
        Err(CanvasError::InvalidEllipseQuality(0))
    );
    assert_eq!(
        Style::DEFAULT.with_stroke_width(-1.0).validate(),
        Err(CanvasError::InvalidStrokeWidth(-1.0))
    );
    assert!(Style::DEFAULT.with_penumbra(f32::NAN).validate().is_err());
    assert!(Style::DEFAULT.with_curve_quality(2).validate().is_ok());

    let max = Style::DEFAULT
        .with_curve_quality(Style::MAXIMUM_CURVE_QUALITY)
        .with_ellipse_quality(Style::MAXIMUM_ELLIPSE_QUALITY);
    assert!(max.validate().is_ok());
    assert_eq!(
        Style::DEFAULT.with_curve_quality(u32::MAX).validate(),
        Err(CanvasError::InvalidCurveQuality(u32::MAX))
    );
    assert_eq!(
        Style::DEFAULT
            .with_ellipse_quality(Style::MAXIMUM_ELLIPSE_QUALITY + 1)
            .validate(),
        Err(CanvasError::InvalidEllipseQuality(Style::MAXIMUM_ELLIPSE_QUALITY + 1))
    );
}

#[test]
fn shape_modes() {
    let stroked = Style::DEFAULT.shape_style().mode();
    assert_eq!(stroked, ShapeMode { stroke: true, fill: false });

    let both = Style::DEFAULT.with_fill(true).shape_style().mode();
    assert_eq!(both, ShapeMode { stroke: true, fill: true });

    let fill_only = Style::DEFAULT
        .with_fill(true)
        .with_stroke_width(0.0)
        .shape_style()
        .mode();
    assert_eq!(fill_only, ShapeMode { stroke: false, fill: true });

    let hairline = Style::DEFAULT.with_stroke_width(0.0).shape_style().mode();
    assert_eq!(hairline, ShapeMode { stroke: true, fill: false });
}
