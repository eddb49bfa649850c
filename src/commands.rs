//! The operations behind the `seqstats` subcommands.
//!
//! Each operation takes an [`Upload`] and runs the whole pipeline for it:
//! detect the format and compression from the filename, decode the bytes,
//! parse records, compute statistics, and build a serializable response.
//! Operations are stateless and independent of each other.

use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::{
    io::{
        detect,
        parsers::{parse_filter_ids, RecordSourceParser},
        Compression, FastqRecord, FastqRecords, SequenceFormat, SequenceRecord, Upload,
    },
    prelude::*,
    reporting::{CommandOutput, Report},
    sequences::nucleotide::{first_base, gc_content, last_base},
    stats::{StatsAccumulator, StatsSummary},
    traits::FastqRecordIterator,
};

/// Per-record statistics for a FASTA, GenBank, or EMBL record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordStats {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Sequence")]
    pub sequence: String,
    #[serde(rename = "Length")]
    pub length: usize,
    #[serde(rename = "GC_content")]
    pub gc_content: f64,
    #[serde(rename = "Last_base")]
    pub last_base: String,
    #[serde(rename = "First_base")]
    pub first_base: String,
}

impl RecordStats {
    pub fn new(record: SequenceRecord, gc_mode: GcMode) -> Self {
        Self {
            gc_content: gc_content(record.sequence.as_bytes(), gc_mode),
            first_base: first_base(&record.sequence),
            last_base: last_base(&record.sequence),
            length: record.length,
            id: record.id,
            description: record.description,
            sequence: record.sequence,
        }
    }
}

/// Per-record statistics for a FASTQ record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FastqRecordStats {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Sequence")]
    pub sequence: String,
    #[serde(rename = "Quality")]
    pub quality: String,
    #[serde(rename = "Length")]
    pub length: usize,
    #[serde(rename = "GC_content")]
    pub gc_content: f64,
    #[serde(rename = "Avg_quality")]
    pub average_quality: f64,
}

impl FastqRecordStats {
    pub fn new(record: FastqRecord, gc_mode: GcMode) -> Self {
        Self {
            length: record.len(),
            gc_content: gc_content(record.sequence.as_bytes(), gc_mode),
            average_quality: record.average_quality,
            id: record.id,
            title: record.title,
            sequence: record.sequence,
            quality: record.quality,
        }
    }
}

/// Per-record statistics of either kind, serialized without a tag.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SequenceStats {
    Record(RecordStats),
    Fastq(FastqRecordStats),
}

impl SequenceStats {
    pub fn length(&self) -> usize {
        match self {
            SequenceStats::Record(stats) => stats.length,
            SequenceStats::Fastq(stats) => stats.length,
        }
    }

    pub fn gc_content(&self) -> f64 {
        match self {
            SequenceStats::Record(stats) => stats.gc_content,
            SequenceStats::Fastq(stats) => stats.gc_content,
        }
    }
}

/// The response of [`process_sequences`].
#[derive(Clone, Debug, Serialize)]
pub struct ProcessResponse {
    pub filename: String,
    pub format: SequenceFormat,
    pub compression: Compression,
    pub total_sequences: usize,
    pub total_bases: usize,
    pub sequences: Vec<SequenceStats>,
}

/// The response of [`sequence_stats`].
#[derive(Clone, Debug, Serialize)]
pub struct StatsResponse {
    pub filename: String,
    pub format: SequenceFormat,
    pub compression: Compression,
    #[serde(flatten)]
    pub summary: StatsSummary,
}

/// The response of [`filter_fastq`].
#[derive(Clone, Debug, Serialize)]
pub struct FilterResponse {
    pub filename: String,
    pub compression: Compression,
    pub total_sequences: usize,
    pub filtered: bool,
    pub filter_count: usize,
    pub sequences: Vec<FastqRecordStats>,
}

/// The response of [`service_info`].
#[derive(Clone, Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub supported_formats: Vec<&'static str>,
    pub supported_compression: Vec<&'static str>,
    pub operations: BTreeMap<&'static str, &'static str>,
}

fn report_empty_sequences(report: &mut Report, n_empty: usize) {
    if n_empty > 0 {
        report.add_issue(format!(
            "{} record(s) had empty sequences; their GC content is reported as 0",
            n_empty
        ));
    }
}

/// Process every record of an upload into per-record statistics.
///
/// FASTQ uploads are read with the FASTQ parser (and yield
/// [`FastqRecordStats`]); all other formats go through their record source
/// (and yield [`RecordStats`]).
pub fn process_sequences(
    upload: &Upload,
    gc_mode: GcMode,
) -> Result<CommandOutput<ProcessResponse>, SeqStatsError> {
    let (format, compression) = detect(&upload.filename)?;
    info!(
        "processing '{}' as {} ({} compression, {} GC)",
        upload.filename, format, compression, gc_mode
    );
    let stream = upload.text_stream(compression);

    let sequences: Vec<SequenceStats> = match format {
        SequenceFormat::Fastq => {
            let content = stream.read_to_string()?;
            FastqRecords::new(&content)
                .map(|result| {
                    result.map(|record| SequenceStats::Fastq(FastqRecordStats::new(record, gc_mode)))
                })
                .collect::<Result<_, _>>()?
        }
        _ => RecordSourceParser::open(format, stream)?
            .map(|result| {
                result.map(|record| SequenceStats::Record(RecordStats::new(record, gc_mode)))
            })
            .collect::<Result<_, _>>()?,
    };

    let total_bases = sequences.iter().map(SequenceStats::length).sum();
    info!("'{}': {} records, {} bases", upload.filename, sequences.len(), total_bases);

    let mut report = Report::new();
    report_empty_sequences(
        &mut report,
        sequences.iter().filter(|stats| stats.length() == 0).count(),
    );

    let response = ProcessResponse {
        filename: upload.filename.clone(),
        format,
        compression,
        total_sequences: sequences.len(),
        total_bases,
        sequences,
    };
    Ok(CommandOutput::new(response, report))
}

/// Compute only the summary statistics of an upload.
///
/// Records are folded into a [`StatsAccumulator`] one at a time as they are
/// parsed, so no per-record statistics are kept.
pub fn sequence_stats(
    upload: &Upload,
    gc_mode: GcMode,
) -> Result<CommandOutput<StatsResponse>, SeqStatsError> {
    let (format, compression) = detect(&upload.filename)?;
    info!(
        "summarizing '{}' as {} ({} compression, {} GC)",
        upload.filename, format, compression, gc_mode
    );
    let stream = upload.text_stream(compression);

    let mut acc = StatsAccumulator::new();
    let mut n_empty = 0;
    let mut observe = |length: usize, sequence: &[u8]| {
        if length == 0 {
            n_empty += 1;
        }
        acc.push(length, gc_content(sequence, gc_mode));
    };

    match format {
        SequenceFormat::Fastq => {
            let content = stream.read_to_string()?;
            for result in FastqRecords::new(&content) {
                let record = result?;
                observe(record.len(), record.sequence.as_bytes());
            }
        }
        _ => {
            for result in RecordSourceParser::open(format, stream)? {
                let record = result?;
                observe(record.length, record.sequence.as_bytes());
            }
        }
    }

    let summary = acc.summary();
    debug!("'{}': {:?}", upload.filename, summary);

    let mut report = Report::new();
    report_empty_sequences(&mut report, n_empty);

    let response = StatsResponse {
        filename: upload.filename.clone(),
        format,
        compression,
        summary,
    };
    Ok(CommandOutput::new(response, report))
}

/// Process a FASTQ upload, optionally keeping only records whose identifier
/// is in the comma-separated `filter_ids`.
///
/// Tokens of `filter_ids` are trimmed; an absent or empty string means no
/// filter. Non-FASTQ uploads are rejected with [`SeqStatsError::FastqRequired`].
pub fn filter_fastq(
    upload: &Upload,
    filter_ids: Option<&str>,
) -> Result<CommandOutput<FilterResponse>, SeqStatsError> {
    let (format, compression) = detect(&upload.filename)?;
    if format != SequenceFormat::Fastq {
        return Err(SeqStatsError::FastqRequired(upload.filename.clone()));
    }
    let wanted = filter_ids.and_then(parse_filter_ids);
    info!(
        "filtering '{}' ({} compression) on {} identifier(s)",
        upload.filename,
        compression,
        wanted.as_ref().map_or(0, HashSet::len)
    );

    let content = upload.text_stream(compression).read_to_string()?;
    let sequences: Vec<FastqRecordStats> = FastqRecords::new(&content)
        .retain_ids(wanted.as_ref())
        .map(|result| result.map(|record| FastqRecordStats::new(record, GcMode::Raw)))
        .collect::<Result<_, _>>()?;
    info!("'{}': {} records retained", upload.filename, sequences.len());

    let mut report = Report::new();
    if let Some(wanted) = &wanted {
        let found: HashSet<&str> = sequences.iter().map(|stats| stats.id.as_str()).collect();
        let mut missing: Vec<&str> = wanted
            .iter()
            .map(String::as_str)
            .filter(|id| !found.contains(id))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            report.add_issue(format!(
                "{} wanted identifier(s) not found: {}",
                missing.len(),
                missing.join(", ")
            ));
        }
    }

    let response = FilterResponse {
        filename: upload.filename.clone(),
        compression,
        total_sequences: sequences.len(),
        filtered: wanted.is_some(),
        filter_count: wanted.as_ref().map_or(0, HashSet::len),
        sequences,
    };
    Ok(CommandOutput::new(response, report))
}

/// The supported formats, compressions, and operations.
pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: "Sequence statistics for FASTA, FASTQ, GenBank, and EMBL files",
        supported_formats: vec![
            "FASTA (.fa, .fasta, .fna)",
            "FASTQ (.fq, .fastq)",
            "GenBank (.gb, .gbk, .genbank)",
            "EMBL (.embl)",
        ],
        supported_compression: vec!["gzip (.gz, .gzip)", "bzip2 (.bz2, .bzip2)", "uncompressed"],
        operations: BTreeMap::from([
            ("process", "Per-record statistics for any supported sequence file"),
            ("stats", "Summary statistics only (memory efficient)"),
            ("filter", "Filter FASTQ records by identifier"),
        ]),
    }
}
