#![doc = include_str!("doc.md")]

pub mod algorithm;
pub mod model;
pub mod util;
