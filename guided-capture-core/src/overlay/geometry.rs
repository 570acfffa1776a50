use super::layout::OverlayLayout;

/// Instruction copy drawn at the top of the viewfinder.
pub const GUIDE_INSTRUCTIONS: [&str; 3] = [
    "Stand ~2.0 m from the pig",
    "Hold phone at ~0.75 m height",
    "Capture pig side view only",
];

/// Size of the area the camera preview is drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// A straight guide stroke, centred on the segment `start`–`end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub thickness: f32,
}

impl GuideLine {
    pub fn length(&self) -> f32 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    /// Area covered by the stroke.
    pub fn bounds(&self) -> Rect {
        let half = self.thickness / 2.0;
        let (x0, x1) = (self.start.x.min(self.end.x), self.start.x.max(self.end.x));
        let (y0, y1) = (self.start.y.min(self.end.y), self.start.y.max(self.end.y));
        Rect {
            x: x0 - half,
            y: y0 - half,
            width: (x1 - x0) + self.thickness,
            height: (y1 - y0) + self.thickness,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructionBlock {
    pub bounds: Rect,
    pub lines: &'static [&'static str],
}

/// Guide primitives for one frame of the viewfinder.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideOverlay {
    pub horizontal: GuideLine,
    pub left: GuideLine,
    pub right: GuideLine,
    pub instructions: InstructionBlock,
}

impl GuideOverlay {
    /// The overlay is advisory only; touches always pass through to the controls beneath.
    pub fn intercepts_input(&self) -> bool {
        false
    }

    /// Rendered width of the horizontal guide as a fraction of `viewport` width.
    pub fn horizontal_span_fraction(&self, viewport: Viewport) -> f32 {
        if viewport.width <= 0.0 {
            return 0.0;
        }
        self.horizontal.length() / viewport.width
    }

    pub fn lines(&self) -> [&GuideLine; 3] {
        [&self.horizontal, &self.left, &self.right]
    }
}

/// Compute the guide for `viewport`. Pure; call it on every render.
pub fn render_overlay(viewport: Viewport, layout: &OverlayLayout) -> GuideOverlay {
    let Viewport { width, height } = viewport;

    let center_y = height * 0.5;
    let span_start = width * (1.0 - layout.horizontal_span) / 2.0;
    let horizontal = GuideLine {
        start: Point { x: span_start, y: center_y },
        end: Point {
            x: span_start + width * layout.horizontal_span,
            y: center_y,
        },
        thickness: layout.stroke_width,
    };

    let guide_top = height * layout.vertical_top;
    let guide_bottom = height * (1.0 - layout.vertical_bottom);
    let vertical = |x: f32| GuideLine {
        start: Point { x, y: guide_top },
        end: Point { x, y: guide_bottom },
        thickness: layout.stroke_width,
    };
    let left = vertical(width * layout.vertical_inset);
    let right = vertical(width * (1.0 - layout.vertical_inset));

    GuideOverlay {
        horizontal,
        left,
        right,
        instructions: instruction_block(viewport, layout, guide_top, center_y),
    }
}

/// Top-anchored, horizontally centred; pulled up if it would reach the vertical
/// guides. On viewports too short to fit every line above the horizontal guide,
/// trailing lines are dropped.
fn instruction_block(viewport: Viewport, layout: &OverlayLayout, guide_top: f32, center_y: f32) -> InstructionBlock {
    let half_stroke = layout.stroke_width / 2.0;
    let block_height = |count: usize| count as f32 * layout.instruction_line_height + 2.0 * layout.instruction_padding;

    let clearance = guide_top - half_stroke - block_height(GUIDE_INSTRUCTIONS.len());
    let mut top = layout.instructions_top.min(clearance).max(0.0);

    let limit = (center_y - half_stroke).max(0.0);
    let mut count = GUIDE_INSTRUCTIONS.len();
    if top + block_height(count) > limit {
        top = 0.0;
        while count > 0 && block_height(count) > limit {
            count -= 1;
        }
    }
    let lines = &GUIDE_INSTRUCTIONS[..count];
    let height = block_height(count).min(limit);
    let width = viewport.width * layout.instructions_width;

    InstructionBlock {
        bounds: Rect {
            x: (viewport.width - width) / 2.0,
            y: top,
            width,
            height,
        },
        lines,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const EPS: f32 = 1e-3;

    fn render(width: f32, height: f32) -> GuideOverlay {
        render_overlay(Viewport::new(width, height), &OverlayLayout::default())
    }

    #[test]
    fn horizontal_guide_is_centered_at_mid_height() {
        let overlay = render(800.0, 600.0);
        assert_relative_eq!(overlay.horizontal.start.y, 300.0, epsilon = EPS);
        assert_relative_eq!(overlay.horizontal.end.y, 300.0, epsilon = EPS);
        assert_relative_eq!(overlay.horizontal.start.x, 80.0, epsilon = EPS);
        assert_relative_eq!(overlay.horizontal.end.x, 720.0, epsilon = EPS);
    }

    #[test]
    fn span_fraction_is_independent_of_viewport_size() {
        let small = Viewport::new(800.0, 600.0);
        let large = Viewport::new(1600.0, 1200.0);

        let small_fraction = render(small.width, small.height).horizontal_span_fraction(small);
        let large_fraction = render(large.width, large.height).horizontal_span_fraction(large);

        assert_relative_eq!(small_fraction, 0.8, epsilon = 1e-6);
        assert_relative_eq!(small_fraction, large_fraction, epsilon = 1e-6);
    }

    #[test]
    fn vertical_guides_are_inset_and_bounded() {
        let overlay = render(1000.0, 400.0);

        assert_relative_eq!(overlay.left.start.x, 300.0, epsilon = EPS);
        assert_relative_eq!(overlay.left.end.x, 300.0, epsilon = EPS);
        assert_relative_eq!(overlay.right.start.x, 700.0, epsilon = EPS);
        for line in [&overlay.left, &overlay.right] {
            assert_relative_eq!(line.start.y, 60.0, epsilon = EPS);
            assert_relative_eq!(line.end.y, 340.0, epsilon = EPS);
            assert_relative_eq!(line.thickness, 2.0, epsilon = EPS);
        }
    }

    #[test]
    fn guides_scale_with_orientation() {
        let landscape = render(1600.0, 900.0);
        let portrait = render(900.0, 1600.0);

        assert_relative_eq!(landscape.left.start.x / 1600.0, portrait.left.start.x / 900.0, epsilon = EPS);
        assert_relative_eq!(landscape.left.start.y / 900.0, portrait.left.start.y / 1600.0, epsilon = EPS);
    }

    #[test]
    fn instructions_sit_at_top_without_touching_guides() {
        for (width, height) in [(800.0, 600.0), (1600.0, 1200.0), (480.0, 320.0)] {
            let overlay = render(width, height);
            let block = &overlay.instructions.bounds;

            assert_eq!(overlay.instructions.lines.len(), 3);
            assert!(block.y <= 20.0);
            assert_relative_eq!(block.x + block.width / 2.0, width / 2.0, epsilon = EPS);
            for line in overlay.lines() {
                assert!(!block.intersects(&line.bounds()), "overlap at {}x{}", width, height);
            }
        }
    }

    #[test]
    fn short_viewport_drops_lines_instead_of_crossing_center_guide() {
        let overlay = render(480.0, 100.0);
        let block = &overlay.instructions.bounds;

        assert_eq!(overlay.instructions.lines, &GUIDE_INSTRUCTIONS[..1]);
        assert_relative_eq!(block.y, 0.0, epsilon = EPS);
        assert!(block.bottom() <= overlay.horizontal.bounds().y);
        for line in overlay.lines() {
            assert!(!block.intersects(&line.bounds()));
        }

        let tiny = render(480.0, 20.0);
        assert!(tiny.instructions.lines.is_empty());
        assert!(!tiny.instructions.bounds.intersects(&tiny.horizontal.bounds()));
    }

    #[test]
    fn instructions_use_preferred_offset_when_there_is_room() {
        let overlay = render(1600.0, 1200.0);
        assert_relative_eq!(overlay.instructions.bounds.y, 20.0, epsilon = EPS);
    }

    #[test]
    fn never_intercepts_input() {
        assert!(!render(800.0, 600.0).intercepts_input());
    }

    #[test]
    fn zero_width_viewport_has_zero_span() {
        let viewport = Viewport::new(0.0, 600.0);
        let overlay = render_overlay(viewport, &OverlayLayout::default());
        assert_eq!(overlay.horizontal_span_fraction(viewport), 0.0);
    }
}
