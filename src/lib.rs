#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use tk_track as track;
pub use tk_utils as utils;

#[cfg(feature = "std")]
pub use tk_console as console;
