//! A headless engine that keeps a sectioned document and its index bar in sync.
//!
//! For host wiring (mount gate, scroll host, a simulated document), see the
//! `alphascroll-adapter` crate.
//!
//! A document is split into labeled sections (e.g. one per letter in a contact list) and an index
//! control lists those labels so the user can jump by touching, hovering or dragging. This crate
//! reconciles the two views of "where the user is":
//! - the continuous document scroll offset
//! - the discrete active section plus a position inside it
//!
//! without letting the scroll caused by a jump be mistaken for the user scrolling.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - section start offsets (and the end of the list)
//! - the control's position and length
//! - scroll offsets and pointer positions as events arrive
//!
//! and to apply the returned [`ScrollCommand`]s to the real document.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod bounds;
mod controller;
pub mod geometry;
mod key;
pub mod locator;
mod options;
mod state;
mod throttle;
mod types;

#[cfg(test)]
mod tests;

pub use bounds::{BoundsError, SectionBounds};
pub use controller::SyncController;
pub use key::SectionKey;
pub use locator::{locate, locate_in_control};
pub use options::{OnChangeCallback, SyncOptions};
pub use state::{ActiveSection, Phase, ScrollState, Source, SyncSnapshot};
pub use throttle::Throttle;
pub use types::{ControlHit, ControlRect, IndicatorStyle, PointerKind, ScrollCommand};
