//! Activity state resolution.
//!
//! Two sources describe a print: the snapshot the host pushes with each
//! activity update, and the fallback store the companion app keeps current
//! out of band. Neither is complete on its own.
//!
//! ```text
//! ContentSnapshot ─┐
//!                  ├─→ StateResolver ─→ ResolvedViewModel ─→ surfaces
//! KeyedStore ──────┘        ↑
//!                      LabelResolver
//! ```
//!
//! # Module Structure
//!
//! - [`resolver`]: per-field precedence and the [`StateResolver`] entry point
//! - [`types`]: [`PrintState`] and [`ResolvedViewModel`]

pub mod resolver;
pub mod types;

pub use resolver::{StateResolver, FALLBACK_PRIMARY_COLOR};
pub use types::{PrintState, ResolvedViewModel, PLACEHOLDER};
