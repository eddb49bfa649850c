//! # seqstats: statistics for biological sequence files
//!
//! Reads FASTA, FASTQ, GenBank, and EMBL uploads (optionally gzip or bzip2
//! compressed) and computes per-record and summary statistics: lengths,
//! GC content, terminal bases, and average Phred quality for FASTQ reads.
//!
//! The operations in [`commands`] are the entry points; each takes an
//! [`Upload`](io::Upload) (a filename and its raw bytes) and returns a
//! serializable response along with a [`Report`](reporting::Report) of
//! things worth telling the user.

pub mod commands;
pub mod error;
pub mod io;
pub mod reporting;
pub mod sequences;
pub mod stats;
pub mod test_utilities;
pub mod traits;

pub mod prelude {
    pub use crate::commands::{
        filter_fastq, process_sequences, sequence_stats, service_info, FastqRecordStats,
        RecordStats, SequenceStats,
    };
    pub use crate::error::SeqStatsError;
    pub use crate::io::{Compression, SequenceFormat, Upload};
    pub use crate::sequences::nucleotide::GcMode;
    pub use crate::stats::StatsSummary;
    pub use crate::traits::{FastqRecordIterator, RecordSource};
}
