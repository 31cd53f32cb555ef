//! Services driving a grabber run
//!
//! - [`grabber`]: fetch once, list channels, write listings
//! - [`configure`]: interactive channel selection

pub mod configure;
pub mod grabber;

pub use configure::{SelectionAnswer, prompt_channel_selection};
pub use grabber::{Grabber, GrabberOptions};
