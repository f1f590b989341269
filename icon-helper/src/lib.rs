//! Environment icon generator.
//!
//! Turns the cyan `dev` icon set into per-environment variants: the cyan
//! background is recolored to a target color and an optional upper-case badge
//! is stamped in the bottom-right corner.

pub mod batch;
pub mod cli;
pub mod color;
pub mod logger;

pub use batch::{BatchSummary, discover_icons, process_icon, run_batch};
pub use cli::{Cli, Plan};
pub use color::{HexColor, is_valid_hex_color};
