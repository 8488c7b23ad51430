//! Yomi Layout: anchored popup placement.
//!
//! Positions a primary panel next to an anchor rectangle and a secondary
//! panel next to the primary, inside a viewport that can scroll, resize, or
//! shrink under an on-screen keyboard.
//!
//! # Architecture
//!
//! The solvers (`place_primary`, `place_secondary`, `can_place`) are pure
//! functions over rectangles and a `Viewport` snapshot. `LayoutSession` is the
//! only stateful piece: it turns discrete UI events into solver calls,
//! re-measuring through a host-supplied `Surface` every time.
//!
//! ```ignore
//! let mut session = LayoutSession::new(LayoutConfig::default());
//! session.apply(&mut surface, LayoutAction::AnchorChanged(vec![box_id]));
//! session.apply(&mut surface, LayoutAction::ViewportChanged);
//! ```

// Geometry
pub mod primitives;
pub mod viewport;

// Solvers
pub mod placement;
pub mod secondary;
pub mod snap;

// Orchestration
pub mod drag;
pub mod session;

pub mod config;
pub mod sizing;

pub use config::{
    AnchorStrategy, ConfigError, LayoutConfig, SecondaryAnchor, SecondaryAttach, Spacing,
};
pub use drag::PanelDrag;
pub use placement::{Direction, Placement, place_primary};
pub use primitives::{Point, Rect, Size};
pub use secondary::place_secondary;
pub use session::{LayoutAction, LayoutSession, PanelKind, Relayout, Surface};
pub use sizing::PanelSizing;
pub use snap::{SnapAvailability, can_place};
pub use viewport::{Viewport, VisualViewport, WindowMetrics};
