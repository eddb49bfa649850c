//! FASTA records, parsed by [`noodles::fasta`].

use noodles::fasta;
use std::io::BufRead;

use super::{collaborator_failure, detect::SequenceFormat, SequenceRecord};
use crate::{error::SeqStatsError, traits::RecordSource};

/// A [`RecordSource`] over FASTA text.
///
/// The record `id` is the sequence name (the first token of the definition
/// line) and the `description` is the full definition line after `>`.
pub struct FastaReader<R: BufRead> {
    reader: fasta::Reader<R>,
    definition: String,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: fasta::Reader::new(inner),
            definition: String::new(),
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<SequenceRecord>, SeqStatsError> {
        // blank lines before a definition are skipped
        loop {
            self.definition.clear();
            if self.reader.read_definition(&mut self.definition).map_err(collaborator_failure)? == 0 {
                return Ok(None);
            }
            if !self.definition.trim().is_empty() {
                break;
            }
        }
        let line = self.definition.trim_end();
        let Some(description) = line.strip_prefix('>') else {
            return Err(SeqStatsError::MalformedRecord(format!(
                "invalid FASTA definition '{}': expected a '>' prefix",
                line
            )));
        };
        let description = description.trim().to_string();
        let id = description
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();

        let mut sequence = Vec::new();
        self.reader
            .read_sequence(&mut sequence)
            .map_err(collaborator_failure)?;
        let sequence = String::from_utf8(sequence)
            .map_err(|err| SeqStatsError::DecodeError(err.to_string()))?;

        Ok(Some(SequenceRecord::new(id, description, sequence)))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SequenceRecord, SeqStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> RecordSource for FastaReader<R> {
    fn format(&self) -> SequenceFormat {
        SequenceFormat::Fasta
    }
}

#[cfg(test)]
mod tests {
    use super::FastaReader;
    use crate::error::SeqStatsError;
    use crate::io::parsers::SequenceRecord;

    fn parse(content: &'static str) -> Result<Vec<SequenceRecord>, SeqStatsError> {
        FastaReader::new(content.as_bytes()).collect()
    }

    #[test]
    fn test_fasta_records() {
        let records = parse(">seq1 first sequence\nACGT\nacgt\n>seq2\nNNNN\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].description, "seq1 first sequence");
        assert_eq!(records[0].sequence, "ACGTacgt");
        assert_eq!(records[0].length, 8);
        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].description, "seq2");
    }

    #[test]
    fn test_fasta_empty_sequence() {
        let records = parse(">empty\n>full\nAC\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].length, 0);
        assert_eq!(records[0].sequence, "");
        assert_eq!(records[1].length, 2);
    }

    #[test]
    fn test_fasta_empty_input() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_fasta_missing_definition() {
        let result = parse("ACGT\n");
        assert!(matches!(result, Err(SeqStatsError::MalformedRecord(_))));
    }

    #[test]
    fn test_fasta_blank_lines() {
        assert!(parse("\n").unwrap().is_empty());
        assert!(parse("\n  \n\n").unwrap().is_empty());

        let records = parse("\n>s1\nACGT\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "s1");
        assert_eq!(records[0].sequence, "ACGT");
    }
}
