//! Pure relay math for CommRelay.
//!
//! This crate contains the signal-strength and bookkeeping logic that is
//! independent of any comm-network provider, engine, or runtime. Functions
//! take plain data and return results, making them unit-testable and
//! portable to any host that supplies the geometry and curve evaluation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`boost`] | Transmission-boost ceiling math (saturation + penalty) |
//! | [`geometry`] | 3D position vectors and distance math |
//! | [`policy`] | Session settings: boost, penalties, lab requirements |
//! | [`reachability`] | Monotonic corridor-strength records per node |

pub mod boost;
pub mod geometry;
pub mod policy;
pub mod reachability;
