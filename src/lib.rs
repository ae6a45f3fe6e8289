#![doc = include_str!("../README.md")]
#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]
#![deny(unsafe_code)]

pub use crate::error::{Error, ErrorKind};
pub use crate::fixture::{FIXTURE, FIXTURE_COMPACT};
pub use crate::navigate::{navigate, try_navigate, Hop, Shape};
pub use crate::strategy::{check_agreement, Strategy, PATH};

mod error;
mod fixture;
/// A repeat-and-measure driver that times extractions and counts their
/// allocations.
pub mod harness;
/// Schema-less navigation over an untyped `serde_json` map.
pub mod navigate;
/// Plain-text rendering of [`harness::Statistics`].
pub mod report;
/// The three ways of reaching the target value.
pub mod strategy;
