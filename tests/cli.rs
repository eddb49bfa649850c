//! End-to-end tests of the `seqstats` binary on the files in `tests_data/`.

use seqstats::test_utilities::{gzip_bytes, seqstats_binary_path, temp_sequence_file};
use serde_json::Value;
use std::process::{Command, Output};

fn run_seqstats(args: &[&str]) -> Output {
    Command::new(seqstats_binary_path())
        .args(args)
        .output()
        .expect("seqstats failed to run")
}

fn stdout_json(output: &Output) -> Value {
    assert!(output.status.success(), "{:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout was not JSON")
}

#[test]
fn test_process_fasta() {
    let json = stdout_json(&run_seqstats(&["process", "tests_data/example.fa"]));
    assert_eq!(json["filename"], "example.fa");
    assert_eq!(json["format"], "fasta");
    assert_eq!(json["compression"], "none");
    assert_eq!(json["total_sequences"], 3);
    assert_eq!(json["total_bases"], 22);

    let first = &json["sequences"][0];
    assert_eq!(first["ID"], "seq1");
    assert_eq!(first["Description"], "seq1 first test sequence");
    assert_eq!(first["Sequence"], "ACGTACGTACGGCCNN");
    assert_eq!(first["Length"], 16);
    assert_eq!(first["GC_content"], 56.25);
    assert_eq!(first["First_base"], "A");
    assert_eq!(first["Last_base"], "N");

    let empty = &json["sequences"][2];
    assert_eq!(empty["Length"], 0);
    assert_eq!(empty["GC_content"], 0.0);
    assert_eq!(empty["First_base"], "");
}

#[test]
fn test_process_fasta_canonical() {
    let json = stdout_json(&run_seqstats(&[
        "process",
        "--gc-mode",
        "canonical",
        "tests_data/example.fa",
    ]));
    assert_eq!(json["sequences"][0]["GC_content"], 64.29);
}

#[test]
fn test_process_fastq() {
    let json = stdout_json(&run_seqstats(&["process", "tests_data/example.fq"]));
    assert_eq!(json["format"], "fastq");
    assert_eq!(json["total_sequences"], 3);
    let second = &json["sequences"][1];
    assert_eq!(second["ID"], "read2");
    assert_eq!(second["Title"], "read2 sample=A");
    assert_eq!(second["Quality"], "!!!!!!!!!!");
    assert_eq!(second["GC_content"], 80.0);
    assert_eq!(second["Avg_quality"], 0.0);
}

#[test]
fn test_process_genbank() {
    let json = stdout_json(&run_seqstats(&["process", "tests_data/example.gb"]));
    assert_eq!(json["format"], "genbank");
    assert_eq!(json["total_sequences"], 2);
    assert_eq!(json["total_bases"], 28);
    assert_eq!(json["sequences"][0]["ID"], "SYN0001.2");
    assert_eq!(json["sequences"][0]["Description"], "Synthetic construct one");
    assert_eq!(json["sequences"][1]["GC_content"], 25.0);
}

#[test]
fn test_process_embl() {
    let json = stdout_json(&run_seqstats(&["process", "tests_data/example.embl"]));
    assert_eq!(json["format"], "embl");
    assert_eq!(json["sequences"][0]["ID"], "X56734.1");
    assert_eq!(json["sequences"][0]["Length"], 20);
    assert_eq!(json["sequences"][0]["GC_content"], 50.0);
}

#[test]
fn test_stats_gzip() {
    let content = std::fs::read("tests_data/example.fq").unwrap();
    let file = temp_sequence_file(".fastq.gz", &gzip_bytes(&content));
    let path = file.path().to_str().unwrap();

    let json = stdout_json(&run_seqstats(&["stats", path]));
    assert_eq!(json["format"], "fastq");
    assert_eq!(json["compression"], "gzip");
    assert_eq!(json["total_sequences"], 3);
    assert_eq!(json["total_bases"], 22);
    assert_eq!(json["average_length"], 7.33);
    assert_eq!(json["average_gc_content"], 43.33);
}

#[test]
fn test_stats_empty() {
    let json = stdout_json(&run_seqstats(&["stats", "tests_data/empty.fa"]));
    assert_eq!(json["total_sequences"], 0);
    assert_eq!(json["average_length"], 0.0);
    assert_eq!(json["average_gc_content"], 0.0);
}

#[test]
fn test_filter() {
    let json = stdout_json(&run_seqstats(&[
        "filter",
        "--ids",
        "read1, read3,missing",
        "tests_data/example.fq",
    ]));
    assert_eq!(json["filtered"], true);
    assert_eq!(json["filter_count"], 3);
    assert_eq!(json["total_sequences"], 2);
    assert_eq!(json["sequences"][0]["ID"], "read1");
    assert_eq!(json["sequences"][1]["ID"], "read3");
    assert_eq!(json["sequences"][1]["Avg_quality"], 20.0);
}

#[test]
fn test_filter_without_ids() {
    let json = stdout_json(&run_seqstats(&["filter", "tests_data/example.fq"]));
    assert_eq!(json["filtered"], false);
    assert_eq!(json["filter_count"], 0);
    assert_eq!(json["total_sequences"], 3);
}

#[test]
fn test_info() {
    let json = stdout_json(&run_seqstats(&["info"]));
    assert_eq!(json["supported_formats"].as_array().unwrap().len(), 4);
    assert!(json["operations"]["stats"].is_string());
}

#[test]
fn test_client_errors() {
    let cases: [&[&str]; 4] = [
        &["process", "tests_data/notes.txt"],
        &["process", "--gc-mode", "strict", "tests_data/example.fa"],
        &["filter", "tests_data/example.fa"],
        &["process", "tests_data/malformed_short_quality.fq"],
    ];
    for args in cases {
        let output = run_seqstats(args);
        assert_eq!(output.status.code(), Some(2), "{:?}: {:?}", args, output);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("Error: "), "{}", stderr);
    }
}

#[test]
fn test_corrupt_gzip_is_server_error() {
    let file = temp_sequence_file(".fa.gz", b"this is not gzip data");
    let output = run_seqstats(&["stats", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1), "{:?}", output);
}

#[test]
fn test_no_subcommand() {
    let output = run_seqstats(&[]);
    assert_eq!(output.status.code(), Some(1));
}
