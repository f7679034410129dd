//! UI Components
//!
//! The generic item renderer and the two widgets built on it.

mod header;
mod render_item;
mod sidenav;

pub use header::{Header, HeaderEffect, HeaderRoutes, HeaderState};
pub use render_item::{class_string, style_string, RenderItems};
pub use sidenav::{Sidenav, SidenavEffect, SidenavState, Tooltip, TOGGLE_DELAY_MS, TOOLTIP_HIDE_DELAY_MS};
