// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math compares against exact constants all the time
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

//! GPU-accelerated interactive 3D DNA double-helix visualization.
//!
//! Helixlab renders a rotating double helix whose sequence length, twist
//! angle, and spin are adjustable at runtime, with a "mutate" action that
//! randomizes a fraction of base pairs and flashes them briefly.
//!
//! # Key entry points
//!
//! - [`engine::HelixEngine`] - the rendering engine and application root
//! - [`model::Sequence`] - the base-pair sequence and its transformations
//! - [`layout`] - the pure helix layout function producing instance buffers
//! - [`options::Options`] - runtime configuration (camera, lighting, colors,
//!   keybindings, initial view state)
//!
//! # Architecture
//!
//! State transitions are an explicit pipeline: an input event produces a new
//! immutable [`model::Sequence`] or updates the [`model::ViewState`]; the
//! engine's dirty check notices and re-invokes [`layout::compute`]; the
//! resulting instance buffers are uploaded whole and drawn in a single pass
//! (grid, backbone, bases, bonds). The continuous spin is a view-layer
//! transform and never touches model state.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod model;
pub mod options;
pub mod renderer;
pub mod util;
