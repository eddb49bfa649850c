//! Types and methods for decoding uploads and parsing them into records.

pub mod file;
pub mod parsers;

pub use file::{TextStream, Upload};
pub use parsers::{
    detect, Compression, EmblReader, FastaReader, FastqRecord, FastqRecords, GenBankReader,
    RecordSourceParser, SequenceFormat, SequenceRecord,
};
