//! Peripheral drivers that run on their own threads.

pub mod button;
