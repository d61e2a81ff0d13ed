//! Discovery, matching and orientation aware application of display modes.
//!
//! ```no_run
//! use dispmode::{catalog::ModeCatalog, display, selector::highest_mode};
//!
//! let system = display::system();
//! let catalog = ModeCatalog::build(system.as_ref()).unwrap();
//! for (index, mode) in highest_mode(&catalog) {
//!     println!("display {index}: {mode}");
//! }
//! ```

pub mod apply;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod duplication;
pub mod error;
pub mod mode;
pub mod orientation;
pub mod report;
pub mod selector;
pub mod target;
