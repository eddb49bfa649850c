/// Compression-related filename suffixes, with the leading dot.
pub const GZIP_EXTENSIONS: [&str; 2] = [".gz", ".gzip"];
pub const BZIP2_EXTENSIONS: [&str; 2] = [".bz2", ".bzip2"];

/// Get the *base* filename to help infer the sequence format, which ignores a
/// trailing compression-related extension (`.gz`, `.gzip`, `.bz2`, `.bzip2`).
///
/// The returned name is lowercased, e.g. `reads.FQ.GZ` returns `reads.fq`.
/// Each suffix is checked once, in the order gzip then bzip2.
pub fn strip_compression_extension(filename: &str) -> String {
    GZIP_EXTENSIONS
        .iter()
        .chain(BZIP2_EXTENSIONS.iter())
        .fold(filename.to_lowercase(), |mut name, ext| {
            if name.ends_with(ext) {
                name.truncate(name.len() - ext.len());
            }
            name
        })
}

/// Whether `name` ends with any of `extensions`.
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext))
}
