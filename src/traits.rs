//! Traits used by the seqstats library.
//!

use std::collections::HashSet;

use crate::{
    error::SeqStatsError,
    io::parsers::{
        detect::SequenceFormat, fastq::FastqRecord, filters::FilteredFastqRecords,
        SequenceRecord,
    },
};

/// The [`RecordSource`] trait is the boundary to the record-parsing
/// libraries used for FASTA, GenBank, and EMBL files.
///
/// A record source is a lazy, finite, single-pass iterator of
/// [`SequenceRecord`]s. It must yield records with empty sequences rather
/// than fail on them, and whitespace-only lines between records are not
/// errors. Syntax errors in the input surface as
/// [`SeqStatsError::MalformedRecord`]; decoding and decompression failures of
/// the input stream keep their own variants; any other failure of the
/// underlying parser is a [`SeqStatsError::ProcessingFailure`].
pub trait RecordSource: Iterator<Item = Result<SequenceRecord, SeqStatsError>> {
    /// The format this source parses.
    fn format(&self) -> SequenceFormat;
}

/// The [`FastqRecordIterator`] trait extends iterators of [`FastqRecord`]s
/// with identifier-based filtering.
pub trait FastqRecordIterator:
    Iterator<Item = Result<FastqRecord, SeqStatsError>> + Sized
{
    /// Retain only the records whose identifier is in `wanted`. `None`, or an
    /// empty set, retains everything.
    fn retain_ids(self, wanted: Option<&HashSet<String>>) -> FilteredFastqRecords<'_, Self>;
}

impl<I> FastqRecordIterator for I
where
    I: Iterator<Item = Result<FastqRecord, SeqStatsError>>,
{
    fn retain_ids(self, wanted: Option<&HashSet<String>>) -> FilteredFastqRecords<'_, Self> {
        FilteredFastqRecords::new(self, wanted)
    }
}
