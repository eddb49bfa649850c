//! Filetype detection functionality.
//!
//! Detection is purely filename-based: there is no content sniffing, so a file
//! with an unrecognized extension is always an error.

use serde::Serialize;
use std::fmt;

use super::utils::{has_extension, strip_compression_extension, BZIP2_EXTENSIONS, GZIP_EXTENSIONS};
use crate::error::SeqStatsError;

/// Enum that indicates the compression of an uploaded sequence file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

/// Enum that indicates the biological format of a sequence file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceFormat {
    Fasta,
    Fastq,
    GenBank,
    Embl,
}

impl Compression {
    /// Detect the compression from the filename's last extension
    /// (case-insensitive). Anything that is not gzip or bzip2 is [`Compression::None`].
    pub fn detect(filename: &str) -> Self {
        let name = filename.to_lowercase();
        if has_extension(&name, &GZIP_EXTENSIONS) {
            Compression::Gzip
        } else if has_extension(&name, &BZIP2_EXTENSIONS) {
            Compression::Bzip2
        } else {
            Compression::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
            Compression::Bzip2 => "bzip2",
        }
    }
}

impl SequenceFormat {
    /// Detect the sequence format from the filename, after removing any
    /// compression extension.
    ///
    /// Currently this supports:
    ///  1. FASTA: `.fa`, `.fasta`, `.fna`.
    ///  2. FASTQ: `.fq`, `.fastq`.
    ///  3. GenBank: `.gb`, `.gbk`, `.genbank`.
    ///  4. EMBL: `.embl`.
    ///
    /// Anything else is a [`SeqStatsError::UnsupportedFormat`].
    pub fn detect(filename: &str) -> Result<Self, SeqStatsError> {
        let name = strip_compression_extension(filename);
        if has_extension(&name, &[".fa", ".fasta", ".fna"]) {
            Ok(SequenceFormat::Fasta)
        } else if has_extension(&name, &[".fq", ".fastq"]) {
            Ok(SequenceFormat::Fastq)
        } else if has_extension(&name, &[".gb", ".gbk", ".genbank"]) {
            Ok(SequenceFormat::GenBank)
        } else if has_extension(&name, &[".embl"]) {
            Ok(SequenceFormat::Embl)
        } else {
            Err(SeqStatsError::UnsupportedFormat(filename.to_string()))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceFormat::Fasta => "fasta",
            SequenceFormat::Fastq => "fastq",
            SequenceFormat::GenBank => "genbank",
            SequenceFormat::Embl => "embl",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for SequenceFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect both the sequence format and compression of an uploaded file
/// from its filename.
pub fn detect(filename: &str) -> Result<(SequenceFormat, Compression), SeqStatsError> {
    let compression = Compression::detect(filename);
    let format = SequenceFormat::detect(filename)?;
    Ok((format, compression))
}

#[cfg(test)]
mod tests {
    use super::{detect, Compression, SequenceFormat};
    use crate::error::SeqStatsError;

    #[test]
    fn test_detect_compression() {
        assert_eq!(Compression::detect("reads.fq.gz"), Compression::Gzip);
        assert_eq!(Compression::detect("reads.fq.GZIP"), Compression::Gzip);
        assert_eq!(Compression::detect("genome.fa.bz2"), Compression::Bzip2);
        assert_eq!(Compression::detect("genome.fa.Bzip2"), Compression::Bzip2);
        assert_eq!(Compression::detect("genome.fa"), Compression::None);
        assert_eq!(Compression::detect("genome.gz.fa"), Compression::None);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(SequenceFormat::detect("a.fa").unwrap(), SequenceFormat::Fasta);
        assert_eq!(SequenceFormat::detect("a.fasta").unwrap(), SequenceFormat::Fasta);
        assert_eq!(SequenceFormat::detect("a.fna.gz").unwrap(), SequenceFormat::Fasta);
        assert_eq!(SequenceFormat::detect("a.FQ").unwrap(), SequenceFormat::Fastq);
        assert_eq!(SequenceFormat::detect("a.fastq.bz2").unwrap(), SequenceFormat::Fastq);
        assert_eq!(SequenceFormat::detect("a.gb").unwrap(), SequenceFormat::GenBank);
        assert_eq!(SequenceFormat::detect("a.gbk").unwrap(), SequenceFormat::GenBank);
        assert_eq!(SequenceFormat::detect("a.genbank.gzip").unwrap(), SequenceFormat::GenBank);
        assert_eq!(SequenceFormat::detect("a.embl").unwrap(), SequenceFormat::Embl);
    }

    #[test]
    fn test_detect_case_insensitive() {
        let detected = detect("Sample.FASTA.GZ").unwrap();
        assert_eq!(detected, (SequenceFormat::Fasta, Compression::Gzip));
        // idempotent
        assert_eq!(detect("Sample.FASTA.GZ").unwrap(), detected);
    }

    #[test]
    fn test_detect_unsupported() {
        let result = detect("notes.txt");
        assert!(matches!(result, Err(SeqStatsError::UnsupportedFormat(name)) if name == "notes.txt"));
        // a compression extension alone is not a format
        assert!(detect("archive.gz").is_err());
        // no extension at all
        assert!(detect("fasta").is_err());
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(SequenceFormat::GenBank.to_string(), "genbank");
        assert_eq!(Compression::None.to_string(), "none");
        assert_eq!(
            serde_json::to_string(&SequenceFormat::GenBank).unwrap(),
            "\"genbank\""
        );
        assert_eq!(serde_json::to_string(&Compression::Bzip2).unwrap(), "\"bzip2\"");
    }
}
