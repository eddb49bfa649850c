//! Library-level tests of the operations on compressed and uncompressed uploads.

use seqstats::{
    assert_float_eq,
    prelude::*,
    test_utilities::{bzip2_bytes, gzip_bytes, random_fasta, random_fastq, temp_sequence_file},
};

fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(format!("tests_data/{}", name)).expect("missing fixture")
}

#[test]
fn test_compression_does_not_change_results() {
    for name in ["example.fa", "example.fq", "example.gb", "example.embl"] {
        let plain = Upload::new(name, fixture(name));
        let gzipped = Upload::new(format!("{}.gz", name), gzip_bytes(&fixture(name)));
        let bzipped = Upload::new(format!("{}.bz2", name), bzip2_bytes(&fixture(name)));

        let expected = sequence_stats(&plain, GcMode::Raw).unwrap().into_parts().0;
        for upload in [gzipped, bzipped] {
            let stats = sequence_stats(&upload, GcMode::Raw).unwrap().into_parts().0;
            assert_eq!(stats.format, expected.format, "{}", upload.filename);
            assert_eq!(stats.summary, expected.summary, "{}", upload.filename);
        }
    }
}

#[test]
fn test_stats_match_process() {
    for name in ["example.fa", "example.fq", "example.gb", "example.embl"] {
        let upload = Upload::new(name, fixture(name));
        let processed = process_sequences(&upload, GcMode::Raw)
            .unwrap()
            .into_parts()
            .0;
        let stats = sequence_stats(&upload, GcMode::Raw).unwrap().into_parts().0;
        assert_eq!(stats.summary.total_sequences, processed.total_sequences);
        assert_eq!(stats.summary.total_bases, processed.total_bases);
    }
}

#[test]
fn test_fasta_summary() {
    let upload = Upload::from_path("tests_data/example.fa").unwrap();
    assert_eq!(upload.filename, "example.fa");
    let output = sequence_stats(&upload, GcMode::Raw).unwrap();
    let summary = &output.value().summary;
    assert_eq!(summary.total_sequences, 3);
    assert_eq!(summary.total_bases, 22);
    assert_float_eq!(summary.average_length, 7.33);
    assert_float_eq!(summary.average_gc_content, 40.97);
    // seq3 is empty
    assert_eq!(output.report().issues().count(), 1);
}

#[test]
fn test_random_fastq_totals() {
    let text = random_fastq(500);
    let file = temp_sequence_file(".fq.gz", &gzip_bytes(text.as_bytes()));
    let upload = Upload::from_path(file.path()).unwrap();
    assert_eq!(Compression::detect(&upload.filename), Compression::Gzip);

    let response = process_sequences(&upload, GcMode::Raw)
        .unwrap()
        .into_parts()
        .0;
    assert_eq!(response.total_sequences, 500);
    let expected_bases: usize = text.lines().skip(1).step_by(4).map(str::len).sum();
    assert_eq!(response.total_bases, expected_bases);
    for stats in &response.sequences {
        let gc = stats.gc_content();
        assert!((0.0..=100.0).contains(&gc));
    }
}

#[test]
fn test_random_fasta_canonical_equals_raw() {
    // only A/C/G/T, so both denominators agree
    let upload = Upload::new("random.fasta.bzip2", bzip2_bytes(random_fasta(20, 150).as_bytes()));
    let raw = sequence_stats(&upload, GcMode::Raw).unwrap().into_parts().0;
    let canonical = sequence_stats(&upload, GcMode::Canonical)
        .unwrap()
        .into_parts()
        .0;
    assert_eq!(raw.summary.total_bases, 3000);
    assert_eq!(raw.summary.average_length, 150.0);
    assert_eq!(raw.summary, canonical.summary);
}

#[test]
fn test_filter_gzip() {
    let upload = Upload::new("reads.FQ.GZ", gzip_bytes(&fixture("example.fq")));
    let output = filter_fastq(&upload, Some("read2")).unwrap();
    let response = output.value();
    assert_eq!(response.compression, Compression::Gzip);
    assert_eq!(response.total_sequences, 1);
    assert_eq!(response.sequences[0].title, "read2 sample=A");
    assert!(output.report().is_empty());
}

#[test]
fn test_invalid_utf8_is_decode_error() {
    let upload = Upload::new("bad.fa", b">seq1\nAC\xffGT\n".to_vec());
    let err = process_sequences(&upload, GcMode::Raw).unwrap_err();
    assert!(matches!(err, SeqStatsError::DecodeError(_)), "{:?}", err);
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_corrupt_bzip2_is_decompression_error() {
    let upload = Upload::new("reads.fq.bz2", b"definitely not bzip2".to_vec());
    let err = sequence_stats(&upload, GcMode::Raw).unwrap_err();
    assert!(matches!(err, SeqStatsError::DecompressionError(_)), "{:?}", err);
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_blank_lines_read_as_no_records() {
    for name in ["blank.fa", "blank.gb", "blank.embl", "blank.fq"] {
        let upload = Upload::new(name, "\n");
        let response = process_sequences(&upload, GcMode::Raw)
            .unwrap()
            .into_parts()
            .0;
        assert_eq!(response.total_sequences, 0, "{}", name);
        let stats = sequence_stats(&upload, GcMode::Raw).unwrap().into_parts().0;
        assert_eq!(stats.summary.total_sequences, 0, "{}", name);
    }
}

#[test]
fn test_leading_blank_lines() {
    let upload = Upload::new("leading.fa", "\n>s1\nACGT\n");
    let response = process_sequences(&upload, GcMode::Raw)
        .unwrap()
        .into_parts()
        .0;
    assert_eq!(response.total_sequences, 1);
    assert_eq!(response.total_bases, 4);

    let mut genbank = b"\n\n".to_vec();
    genbank.extend(fixture("example.gb"));
    let upload = Upload::new("leading.gb", genbank);
    let stats = sequence_stats(&upload, GcMode::Raw).unwrap().into_parts().0;
    assert_eq!(stats.summary.total_sequences, 2);
}

#[test]
fn test_malformed_records_are_client_errors() {
    for (name, content) in [
        ("bad.fa", "ACGT\n"),
        ("bad.gb", "this is not GenBank\n"),
        ("bad.embl", "ID   A1; SV 1; linear; DNA; STD; SYN; 2 BP.\nSQ   Sequence 2 BP;\n"),
    ] {
        let upload = Upload::new(name, content);
        let err = process_sequences(&upload, GcMode::Raw).unwrap_err();
        assert!(matches!(err, SeqStatsError::MalformedRecord(_)), "{}: {:?}", name, err);
        assert_eq!(err.status_code(), 400, "{}", name);
    }
}
