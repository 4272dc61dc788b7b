//! Radial Layout Engine
//!
//! Turns a focused subtree into positioned [`RenderNode`](crate::model::RenderNode)s for a sunburst
//! chart: the focused node sits in the centre hub and each deeper level
//! occupies one ring. Angular space is split among siblings by importance.

pub mod config;
pub mod radial;
pub mod sliver;

pub use config::{LayoutConfig, PALETTE};
pub use radial::{layout, RadialLayout, RingGeometry};
