//! One immutable state value per widget.
//!
//! Widgets never mutate in place: each exposes a `reduce` that consumes the
//! current state and an action and returns the next state, so a front end
//! only has to keep the latest value around.

pub mod anchor;
pub mod bitgrid;
pub mod bytes;
pub mod converter;
pub mod shifter;
pub mod slot;

pub type Result<T> = std::result::Result<T, crate::error::WidgetError>;
