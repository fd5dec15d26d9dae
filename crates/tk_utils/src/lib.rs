#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;

mod typeid_map;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use typeid_map::TypeIdMap;
