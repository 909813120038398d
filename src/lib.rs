//! Trellis: a career development toolkit
//!
//! A local-first CLI for design career growth: competency worksheets
//! with grade-level expectations, weekly and quarterly check-ins, and a
//! canned-response career coach. Everything persists as plain JSON
//! files under `.trellis/`.

pub mod catalog;
pub mod checkin;
pub mod cli;
pub mod coach;
pub mod core;
pub mod entities;
pub mod synth;
pub mod worksheet;
