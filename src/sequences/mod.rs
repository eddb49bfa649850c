//! Functionality for working with residue sequences.
//!
//! Currently this is nucleotide composition (see [`nucleotide::gc_content`]),
//! which every per-record statistic in this crate is built on.

pub mod nucleotide;
