//! Types and methods for working with nucleotide sequence composition.
//!
//! GC content can be measured against two different denominators, see
//! [`GcMode`]. Both come out of a single classification pass over the
//! sequence, [`base_composition`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::SeqStatsError;
use crate::stats::round2;

/// The denominator convention for GC content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GcMode {
    /// Divide by the full sequence length, including ambiguous bases like `N`.
    #[default]
    Raw,
    /// Divide by the number of unambiguous `A`/`T`/`G`/`C` bases only.
    Canonical,
}

impl FromStr for GcMode {
    type Err = SeqStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(GcMode::Raw),
            "canonical" => Ok(GcMode::Canonical),
            other => Err(SeqStatsError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for GcMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GcMode::Raw => write!(f, "raw"),
            GcMode::Canonical => write!(f, "canonical"),
        }
    }
}

/// Counts of each residue class in a sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseComposition {
    /// `G` and `C` residues.
    pub gc: usize,
    /// `A` and `T` residues.
    pub at: usize,
    /// Everything else (ambiguity codes, gaps, ...).
    pub other: usize,
}

impl BaseComposition {
    /// The number of unambiguous `A`/`T`/`G`/`C` bases.
    pub fn canonical(&self) -> usize {
        self.gc + self.at
    }

    /// The total number of residues classified.
    pub fn total(&self) -> usize {
        self.gc + self.at + self.other
    }

    /// GC content as a percentage rounded to two decimals, using the
    /// denominator chosen by `mode`. Returns `0.0` if that denominator is zero.
    pub fn gc_percent(&self, mode: GcMode) -> f64 {
        let denominator = match mode {
            GcMode::Raw => self.total(),
            GcMode::Canonical => self.canonical(),
        };
        if denominator == 0 {
            return 0.0;
        }
        round2(self.gc as f64 / denominator as f64 * 100.0)
    }
}

/// Classify each residue of a byte slice (case-insensitive) as G/C, A/T, or other.
pub fn base_composition(seq: &[u8]) -> BaseComposition {
    seq.iter()
        .fold(BaseComposition::default(), |mut composition, base| {
            match base.to_ascii_uppercase() {
                b'G' | b'C' => composition.gc += 1,
                b'A' | b'T' => composition.at += 1,
                _ => composition.other += 1,
            }
            composition
        })
}

/// Calculate the GC content percentage of a byte slice.
///
/// # Arguments
/// * `seq` - a byte slice.
/// * `mode` - whether ambiguous residues count towards the denominator.
pub fn gc_content(seq: &[u8], mode: GcMode) -> f64 {
    base_composition(seq).gc_percent(mode)
}

/// The first residue of a sequence, or `""` if it is empty.
pub fn first_base(seq: &str) -> String {
    seq.chars().next().map(String::from).unwrap_or_default()
}

/// The last residue of a sequence, or `""` if it is empty.
pub fn last_base(seq: &str) -> String {
    seq.chars().last().map(String::from).unwrap_or_default()
}
