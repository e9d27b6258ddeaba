//! Countdown Module
//!
//! Request normalization, image rendering and embed markup for countdowns.

pub mod embed;
pub mod normalizer;
pub mod render;
mod style;
mod target;

pub use embed::{data_uri, render_embed_snippet};
pub use normalizer::{NormalizedRequest, Normalizer};
pub use render::render_countdown;
pub use style::{AssetFormat, Style};
pub use target::TargetDateTime;
