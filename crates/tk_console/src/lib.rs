#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod eta;
mod progress_bar;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use eta::{DEFAULT_ETA_STEPS, EtaWindow, format_eta};
pub use progress_bar::ProgressBar;
