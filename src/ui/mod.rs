//! UI helpers for the CLI
//!
//! Status lines go to stderr so that stdout stays clean for artifact
//! listings (`--format json` output can be piped). Interactive terminals
//! get an indicatif spinner; CI and pipes get plain `[OK]`-style lines.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
