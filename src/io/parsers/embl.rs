//! EMBL flat file records.
//!
//! An EMBL entry is a series of lines starting with a two-letter code,
//! terminated by `//`:
//!
//! ```text
//! ID   X56734; SV 1; linear; mRNA; STD; PLN; 1859 BP.
//! AC   X56734; S46826;
//! DE   Trifolium repens mRNA for non-cyanogenic beta-glucosidase
//! SQ   Sequence 1859 BP; 609 A; 314 C; 355 G; 581 T; 0 other;
//!      aaacaaacca aatatggatt ttattgtagc catatttgct ctgtttgttg ttagctcatt        60
//! //
//! ```
//!
//! Only the lines a [`SequenceRecord`] needs are interpreted (`ID`, `AC`,
//! `DE`, and the sequence data after `SQ`); everything else is skipped.

use std::io::BufRead;

use super::{detect::SequenceFormat, trim_final_period, SequenceRecord};
use crate::{error::SeqStatsError, traits::RecordSource};

/// The fields of an entry collected so far.
#[derive(Debug, Default)]
struct EmblEntry {
    name: String,
    version: Option<String>,
    accession: Option<String>,
    description: Vec<String>,
    sequence: String,
    in_sequence: bool,
}

impl EmblEntry {
    /// Parse the `ID` line. The new style is
    /// `ID   <accession>; SV <version>; <topology>; ...`, the old style
    /// `ID   <entry name> <data class>; ...`.
    fn from_id_line(value: &str) -> Result<Self, SeqStatsError> {
        let mut fields = value.split(';').map(str::trim);
        let name = fields
            .next()
            .and_then(|first| first.split_whitespace().next())
            .ok_or_else(|| {
                SeqStatsError::MalformedRecord("EMBL ID line has no entry name".to_string())
            })?
            .to_string();
        let version = fields
            .next()
            .and_then(|second| second.strip_prefix("SV"))
            .map(|sv| sv.trim().to_string())
            .filter(|sv| !sv.is_empty());
        Ok(Self {
            name,
            version,
            ..Default::default()
        })
    }

    fn push_line(&mut self, code: &str, value: &str) {
        match code {
            "AC" if self.accession.is_none() => {
                self.accession = value
                    .split(';')
                    .map(str::trim)
                    .find(|acc| !acc.is_empty())
                    .map(String::from);
            }
            "DE" => self.description.push(value.to_string()),
            "SQ" => self.in_sequence = true,
            _ => {}
        }
    }

    /// Sequence data lines are groups of residues followed by a position count.
    fn push_sequence_line(&mut self, line: &str) {
        line.split_whitespace()
            .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
            .for_each(|word| self.sequence.push_str(&word.to_ascii_uppercase()));
    }

    fn into_record(self) -> SequenceRecord {
        let accession = self.accession.unwrap_or(self.name);
        let id = match self.version {
            Some(version) => format!("{}.{}", accession, version),
            None => accession,
        };
        let description = trim_final_period(&self.description.join(" "));
        SequenceRecord::new(id, description, self.sequence)
    }
}

/// A [`RecordSource`] over EMBL text.
///
/// The record `id` is the primary accession, with `.<version>` appended when
/// the `ID` line carries a sequence version (`SV`). The `description` is the
/// `DE` lines joined with spaces, without the final period. Sequences are
/// uppercased.
pub struct EmblReader<R: BufRead> {
    reader: R,
    line: String,
    done: bool,
}

impl<R: BufRead> EmblReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<SequenceRecord>, SeqStatsError> {
        let mut entry: Option<EmblEntry> = None;
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return match entry {
                    None => Ok(None),
                    Some(entry) => Err(SeqStatsError::MalformedRecord(format!(
                        "EMBL entry '{}' is missing its '//' terminator",
                        entry.name
                    ))),
                };
            }
            let line = self.line.trim_end();
            if line.trim().is_empty() {
                continue;
            }

            let Some(current) = entry.as_mut() else {
                let (code, value) = split_line_code(line);
                if code != "ID" {
                    return Err(SeqStatsError::MalformedRecord(format!(
                        "expected an EMBL ID line, found '{}'",
                        line
                    )));
                }
                entry = Some(EmblEntry::from_id_line(value)?);
                continue;
            };

            if line.starts_with("//") {
                return Ok(entry.take().map(EmblEntry::into_record));
            }
            if current.in_sequence {
                current.push_sequence_line(line);
            } else {
                let (code, value) = split_line_code(line);
                current.push_line(code, value);
            }
        }
    }
}

/// Split a line into its two-letter line code and the value after it.
fn split_line_code(line: &str) -> (&str, &str) {
    match (line.get(..2), line.get(2..)) {
        (Some(code), Some(value)) => (code, value.trim()),
        _ => (line, ""),
    }
}

impl<R: BufRead> Iterator for EmblReader<R> {
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

impl<R: BufRead> RecordSource for EmblReader<R> {
    fn format(&self) -> SequenceFormat {
        SequenceFormat::Embl
    }
}
