//! Parsing iterators for sequence formats.
//!
//! To compute statistics, an upload first needs to be decoded (see
//! [`TextStream`]) and parsed into records. There are two paths:
//!
//!  1. FASTA, GenBank, and EMBL go through a [`RecordSource`], a lazy iterator
//!     of [`SequenceRecord`]s backed by a record-parsing library. Which source
//!     is used is decided at runtime from the detected [`SequenceFormat`], so
//!     they are wrapped in the [`RecordSourceParser`] enum.
//!
//!  2. FASTQ goes through the dedicated [`FastqRecords`] lexer, since its quality
//!     line is not something a [`SequenceRecord`] carries. Filtering by record
//!     identifier is done with [`FastqRecordIterator::retain_ids`].
//!
//! [`TextStream`]: crate::io::TextStream
//! [`FastqRecordIterator::retain_ids`]: crate::traits::FastqRecordIterator::retain_ids

pub mod detect;
pub mod embl;
pub mod fasta;
pub mod fastq;
pub mod filters;
pub mod genbank;
pub mod utils;

pub use detect::{detect, Compression, SequenceFormat};
pub use embl::EmblReader;
pub use fasta::FastaReader;
pub use fastq::{FastqRecord, FastqRecords};
pub use filters::{parse_filter_ids, FilteredFastqRecords};
pub use genbank::GenBankReader;

use std::io;

use crate::error::SeqStatsError;
use crate::io::file::TextStream;
use crate::traits::RecordSource;

/// A sequence record produced by a [`RecordSource`].
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
    pub length: usize,
}

impl SequenceRecord {
    pub fn new(id: String, description: String, sequence: String) -> Self {
        let length = sequence.len();
        Self {
            id,
            description,
            sequence,
            length,
        }
    }
}

/// Convert an I/O error raised inside a record-parsing library. Errors that
/// originate in the [`TextStream`] keep their variant; anything else the
/// library reports is a [`SeqStatsError::ProcessingFailure`].
pub(crate) fn collaborator_failure(err: io::Error) -> SeqStatsError {
    match SeqStatsError::from(err) {
        SeqStatsError::IOError(err) => SeqStatsError::ProcessingFailure(err.to_string()),
        tagged => tagged,
    }
}

/// Remove a single trailing period from a free-text field, as used by
/// GenBank `DEFINITION` and EMBL `DE` lines.
pub(crate) fn trim_final_period(text: &str) -> String {
    let text = text.trim();
    text.strip_suffix('.').unwrap_or(text).to_string()
}

/// Enum that connects a sequence format to its [`RecordSource`].
pub enum RecordSourceParser {
    Fasta(FastaReader<TextStream>),
    GenBank(GenBankReader<TextStream>),
    Embl(EmblReader<TextStream>),
}

impl RecordSourceParser {
    /// Build the [`RecordSource`] for `format` over a decoded stream.
    ///
    /// FASTQ has no record source; use [`FastqRecords`] instead.
    pub fn open(format: SequenceFormat, stream: TextStream) -> Result<Self, SeqStatsError> {
        match format {
            SequenceFormat::Fasta => Ok(RecordSourceParser::Fasta(FastaReader::new(stream))),
            SequenceFormat::GenBank => Ok(RecordSourceParser::GenBank(GenBankReader::new(stream))),
            SequenceFormat::Embl => Ok(RecordSourceParser::Embl(EmblReader::new(stream))),
            SequenceFormat::Fastq => Err(SeqStatsError::ProcessingFailure(
                "FASTQ input is read by the FASTQ parser, not a record source".to_string(),
            )),
        }
    }
}

impl Iterator for RecordSourceParser {
    type Item = Result<SequenceRecord, SeqStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RecordSourceParser::Fasta(reader) => reader.next(),
            RecordSourceParser::GenBank(reader) => reader.next(),
            RecordSourceParser::Embl(reader) => reader.next(),
        }
    }
}

impl RecordSource for RecordSourceParser {
    fn format(&self) -> SequenceFormat {
        match self {
            RecordSourceParser::Fasta(reader) => reader.format(),
            RecordSourceParser::GenBank(reader) => reader.format(),
            RecordSourceParser::Embl(reader) => reader.format(),
        }
    }
}
