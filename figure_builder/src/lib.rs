//! Chart builders: pure functions from shaped series to a serializable
//! figure specification.
//!
//! The [`figure::Figure`] model is what the external rendering surface
//! consumes; builders never perform I/O, never mutate their input, and
//! always return a valid figure — zero-row input produces an empty figure
//! with a placeholder annotation rather than an error.

pub mod builders;
pub mod figure;
pub mod palette;

pub use builders::candlestick::candlestick;
pub use builders::detailed::detailed;
pub use builders::line::price_line;
pub use builders::volume::volume;
