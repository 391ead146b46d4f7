//! Host wiring for the `alphascroll` crate.
//!
//! The `alphascroll` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides small, framework-neutral pieces commonly needed to mount an index bar:
//!
//! - `ScrollHost` / `SectionMeasurer`: the seams to the document and the layout engine
//! - `IndexBar`: refuses to attach until sections are laid out, then forwards events and
//!   applies the resulting scroll commands to the host
//! - `SimulatedDocument`: an in-memory host for tests and demos
//!
//! This crate is intentionally framework-agnostic (no DOM/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod host;
mod index_bar;
mod sim;


pub use host::{ScrollHost, SectionMeasurer};
pub use index_bar::{AttachOutcome, DeferReason, IndexBar};
pub use sim::SimulatedDocument;
