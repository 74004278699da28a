//! Pure data-shaping functions over fetched series: period windows, spike
//! rejection, indicator derivation, summary statistics, display resampling,
//! and the slider range mapper.
//!
//! Nothing here performs I/O or mutates its input; every function takes a
//! `&Series` and returns fresh values, so callers can shape the same cached
//! series for any number of views.

pub mod filter;
pub mod indicators;
pub mod range;
pub mod resample;
pub mod spikes;
pub mod stats;
