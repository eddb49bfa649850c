//! Test cases and test utility functions.
//!

use std::{io::Write, path::PathBuf};

use bzip2::{write::BzEncoder, Compression as BzCompression};
use flate2::{write::GzEncoder, Compression as GzCompression};
use rand::{seq::SliceRandom, thread_rng, Rng};
use tempfile::{Builder, NamedTempFile};

// Stochastic test read defaults
pub const MIN_READ_LEN: usize = 1;
pub const MAX_READ_LEN: usize = 300;

/// The nucleotide alphabet used for random reads.
pub const NUCLEOTIDES: &[u8] = b"ACGT";

/// Get the path to the `seqstats` binary built alongside the tests.
pub fn seqstats_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().expect("could not get current test binary path");
    path.pop(); // remove the test binary name
    path.pop(); // remove `deps`
    path.push("seqstats");
    path
}

/// Build a random sequence of `len` symbols drawn from `alphabet`.
pub fn random_sequence(len: usize, alphabet: &[u8]) -> String {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| *alphabet.choose(&mut rng).expect("empty alphabet") as char)
        .collect()
}

/// Build random Phred+33 quality characters.
pub fn random_quality(len: usize) -> String {
    let mut rng = thread_rng();
    (0..len).map(|_| rng.gen_range(b'!'..=b'J') as char).collect()
}

/// Build the text of a random FASTQ file of `n` reads named `read0`,
/// `read1`, ...
pub fn random_fastq(n: usize) -> String {
    let mut rng = thread_rng();
    let mut text = String::new();
    for i in 0..n {
        let len = rng.gen_range(MIN_READ_LEN..=MAX_READ_LEN);
        text.push_str(&format!(
            "@read{} random\n{}\n+\n{}\n",
            i,
            random_sequence(len, NUCLEOTIDES),
            random_quality(len)
        ));
    }
    text
}

/// Build the text of a random FASTA file of `n` sequences of length `len`,
/// wrapped at 60 columns.
pub fn random_fasta(n: usize, len: usize) -> String {
    let mut text = String::new();
    for i in 0..n {
        text.push_str(&format!(">seq{}\n", i));
        let sequence = random_sequence(len, NUCLEOTIDES);
        for line in sequence.as_bytes().chunks(60) {
            text.push_str(std::str::from_utf8(line).expect("ASCII sequence"));
            text.push('\n');
        }
    }
    text
}

/// Gzip-compress `data`.
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), GzCompression::default());
    encoder.write_all(data).expect("gzip write failed");
    encoder.finish().expect("gzip finish failed")
}

/// Bzip2-compress `data`.
pub fn bzip2_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), BzCompression::default());
    encoder.write_all(data).expect("bzip2 write failed");
    encoder.finish().expect("bzip2 finish failed")
}

/// Write `content` to a temporary file whose name ends in `suffix`
/// (e.g. `.fq.gz`), so format detection sees the right extension.
pub fn temp_sequence_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("seqstats_test_")
        .suffix(suffix)
        .tempfile()
        .expect("could not create temporary file");
    file.write_all(content)
        .expect("could not write temporary file");
    file.flush().expect("could not flush temporary file");
    file
}

/// Assert two floats are equal within `1e-9`.
#[macro_export]
macro_rules! assert_float_eq {
    ($left:expr, $right:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() < 1e-9,
            "assertion failed: {} != {}",
            left,
            right
        );
    }};
}
