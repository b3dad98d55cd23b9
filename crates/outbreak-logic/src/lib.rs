//! Pure game rules for Outbreak.
//!
//! This crate contains the infection-progression rules that are independent
//! of any queue, engine, or device runtime. Functions take plain data and
//! return results, making them unit-testable and portable across the badge
//! firmware loop, native harness tools, and any future runtime.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bands`] | Health band classification (Immune through Zombie) |
//! | [`progression`] | Exposure and treatment state transitions |

pub mod bands;
pub mod progression;
