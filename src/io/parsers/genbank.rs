//! GenBank records, parsed by [`gb_io`].

use gb_io::reader::{GbParserError, SeqReader};
use gb_io::seq::Seq;
use std::io::{self, BufRead, Read};

use super::{collaborator_failure, detect::SequenceFormat, trim_final_period, SequenceRecord};
use crate::{error::SeqStatsError, traits::RecordSource};

/// A [`RecordSource`] over GenBank text.
///
/// The record `id` is the `VERSION` (`ACCESSION.N`), falling back to the
/// first `ACCESSION` and then the `LOCUS` name. The `description` is the
/// `DEFINITION` without its final period. Sequences are uppercased.
/// Whitespace-only lines are dropped before parsing, so blank lines around
/// records (or a file of nothing but blank lines) are not errors.
pub struct GenBankReader<R: BufRead> {
    reader: SeqReader<SkipBlankLines<R>>,
    done: bool,
}

impl<R: BufRead> GenBankReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: SeqReader::new(SkipBlankLines::new(inner)),
            done: false,
        }
    }
}

/// A reader that passes through every line of `inner` except those that
/// are whitespace only.
struct SkipBlankLines<R> {
    inner: R,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> SkipBlankLines<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
            pos: 0,
        }
    }
}

impl<R: BufRead> Read for SkipBlankLines<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            if self.inner.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(0);
            }
            if self.line.iter().all(u8::is_ascii_whitespace) {
                self.line.clear();
            }
        }
        let n = (self.line.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.line[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn parser_failure(err: GbParserError) -> SeqStatsError {
    match err {
        GbParserError::Io(err) => collaborator_failure(err),
        other => SeqStatsError::MalformedRecord(format!("invalid GenBank record: {}", other)),
    }
}

fn first_token(field: Option<&String>) -> Option<String> {
    field
        .and_then(|value| value.split_whitespace().next())
        .map(String::from)
}

impl TryFrom<Seq> for SequenceRecord {
    type Error = SeqStatsError;

    fn try_from(seq: Seq) -> Result<Self, Self::Error> {
        let id = first_token(seq.version.as_ref())
            .or_else(|| first_token(seq.accession.as_ref()))
            .or_else(|| first_token(seq.name.as_ref()))
            .unwrap_or_default();
        let description = seq
            .definition
            .as_deref()
            .map(trim_final_period)
            .unwrap_or_default();
        let sequence = String::from_utf8(seq.seq)
            .map_err(|err| SeqStatsError::DecodeError(err.to_string()))?
            .to_ascii_uppercase();
        Ok(SequenceRecord::new(id, description, sequence))
    }
}

impl<R: BufRead> Iterator for GenBankReader<R> {
    type Item = Result<SequenceRecord, SeqStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.reader.next()? {
            Ok(seq) => SequenceRecord::try_from(seq),
            Err(err) => Err(parser_failure(err)),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl<R: BufRead> RecordSource for GenBankReader<R> {
    fn format(&self) -> SequenceFormat {
        SequenceFormat::GenBank
    }
}
