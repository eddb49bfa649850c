//! A dedicated FASTQ lexer.
//!
//! FASTQ is not read through the generic [`RecordSource`] boundary: its
//! quality line needs a grammar of its own. [`FastqRecords`] works over the
//! full decoded text of one file and yields [`FastqRecord`]s from strict
//! four-line groups:
//!
//! ```text
//! @<title>
//! <sequence>
//! +[<title>]
//! <quality>
//! ```
//!
//! [`RecordSource`]: crate::traits::RecordSource

use std::str::Lines;

use crate::error::SeqStatsError;

/// The Phred+33 quality encoding offset.
pub const PHRED_OFFSET: u8 = 33;

/// One FASTQ record.
#[derive(Clone, Debug, PartialEq)]
pub struct FastqRecord {
    /// The first whitespace-delimited token of the title.
    pub id: String,
    /// The full header line, without the leading `@`.
    pub title: String,
    pub sequence: String,
    pub quality: String,
    /// The mean Phred+33 quality, `0.0` for an empty quality string.
    pub average_quality: f64,
}

impl FastqRecord {
    pub fn new(title: &str, sequence: &str, quality: &str) -> Self {
        let id = title.split_whitespace().next().unwrap_or("").to_string();
        Self {
            id,
            title: title.to_string(),
            sequence: sequence.to_string(),
            quality: quality.to_string(),
            average_quality: average_quality(quality.as_bytes()),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// The mean Phred+33 quality of a quality string.
pub fn average_quality(quality: &[u8]) -> f64 {
    if quality.is_empty() {
        return 0.0;
    }
    let total: i64 = quality
        .iter()
        .map(|&q| i64::from(q) - i64::from(PHRED_OFFSET))
        .sum();
    total as f64 / quality.len() as f64
}

/// An iterator over the [`FastqRecord`]s in a FASTQ text.
///
/// Iteration stops at the first malformed record, after yielding its error.
#[derive(Clone, Debug)]
pub struct FastqRecords<'a> {
    lines: Lines<'a>,
    line_number: usize,
    finished: bool,
}

impl<'a> FastqRecords<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_number: 0,
            finished: false,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line.trim_end())
    }

    fn malformed(&mut self, message: String) -> Option<Result<FastqRecord, SeqStatsError>> {
        self.finished = true;
        Some(Err(SeqStatsError::MalformedFastqRecord(format!(
            "{} (line {})",
            message, self.line_number
        ))))
    }

    fn parse_record(&mut self) -> Option<Result<FastqRecord, SeqStatsError>> {
        let header = self.next_line()?;

        if header.is_empty() {
            // blank lines are only allowed after the final record
            if self.lines.clone().all(|rest| rest.trim().is_empty()) {
                self.finished = true;
                return None;
            }
            return self.malformed("blank line between records".to_string());
        }
        let Some(title) = header.strip_prefix('@') else {
            return self.malformed(format!(
                "header line should start with '@', found '{}'",
                header
            ));
        };

        let Some(sequence) = self.next_line() else {
            return self.malformed(format!("record '{}' ends before its sequence line", title));
        };
        if sequence.contains(char::is_whitespace) {
            return self.malformed(format!(
                "sequence of record '{}' contains whitespace",
                title
            ));
        }

        let Some(separator) = self.next_line() else {
            return self.malformed(format!("record '{}' ends before its '+' line", title));
        };
        let Some(repeated_title) = separator.strip_prefix('+') else {
            return self.malformed(format!(
                "separator line of record '{}' should start with '+', found '{}'",
                title, separator
            ));
        };
        if !repeated_title.is_empty() && repeated_title != title {
            return self.malformed(format!(
                "sequence and quality captions differ: '{}' and '{}'",
                title, repeated_title
            ));
        }

        let Some(quality) = self.next_line() else {
            return self.malformed(format!("record '{}' ends before its quality line", title));
        };
        if quality.len() != sequence.len() {
            return self.malformed(format!(
                "lengths of sequence and quality differ for '{}' ({} and {})",
                title,
                sequence.len(),
                quality.len()
            ));
        }

        Some(Ok(FastqRecord::new(title, sequence, quality)))
    }
}

impl<'a> Iterator for FastqRecords<'a> {
    type Item = Result<FastqRecord, SeqStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.parse_record()
    }
}
