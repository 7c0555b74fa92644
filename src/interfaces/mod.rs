//! Host-facing edges of the binary: CSV operation input, result output, seed data.

pub mod csv;
pub mod runner;
pub mod seed;
