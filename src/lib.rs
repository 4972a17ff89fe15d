// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
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
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests may unwrap and panic freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

//! Scene, orbit camera, frustum culling and post-process core of an
//! interactive shading gallery.
//!
//! The gallery cycles through a fixed catalogue of scenes, each showing a
//! shading technique (Lambert, Blinn-Phong, Cook-Torrance, spotlight,
//! multi-light, projective texturing), a scan-line terrain, a row of models
//! that breathes in and out of the view frustum, or a full-screen filter
//! (monochrome, separable Gaussian blur).
//!
//! # Key entry points
//!
//! - [`engine::GalleryEngine`] - command-driven facade over everything below
//! - [`scene::SceneRegistry`] - scene list, navigation and per-frame draw
//! - [`camera::OrbitCamera`] - eye/target camera with yaw/pitch/distance orbit
//! - [`postprocess::GaussianKernel`] - blur weights and tap offsets
//! - [`options::Options`] - construction-time configuration
//!
//! # Architecture
//!
//! Rendering goes through the [`gpu::GraphicsBackend`] trait and shaders
//! are opaque [`gpu::Effect`] parameter bags, so the crate carries no GPU
//! API of its own. [`gpu::HeadlessBackend`] records draw calls for tests and
//! the demo binary. Each frame the registry refreshes the camera frustum,
//! tests every model of the active scene against its cached world-space
//! bounding box, draws the survivors (into a capture target when the scene
//! has a post-process) and resets the graphics state.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod postprocess;
pub mod scene;
pub mod util;
