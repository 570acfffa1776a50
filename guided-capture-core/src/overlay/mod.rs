//! Alignment guide drawn over the live viewfinder.
//!
//! Stateless: every primitive is derived from the viewport size and an
//! [`OverlayLayout`] of fractions.

pub mod geometry;
pub mod layout;

pub use geometry::{render_overlay, GuideLine, GuideOverlay, InstructionBlock, Point, Rect, Viewport, GUIDE_INSTRUCTIONS};
pub use layout::OverlayLayout;
