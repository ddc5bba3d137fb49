//! Interactive option collection using cliclack (Charm-style inline prompts)
//!
//! Optional, only compiled with the `tui` feature. Collects and validates the
//! options, refuses occupied destinations, then drives generation.

mod prompts;

pub use prompts::{run, CreateArgs};
