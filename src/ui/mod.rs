/// Figure display module
///
/// This module handles presenting a rendered figure on screen:
/// - The colorbar legend widget (colorbar.rs)
/// - The single-figure window, the blocking `show` call (window.rs)

pub mod colorbar;
pub mod window;

pub use colorbar::Colorbar;
pub use window::{figure_content, show};
