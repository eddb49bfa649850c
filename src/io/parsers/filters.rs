//! Filters for parsing iterators.

use std::collections::HashSet;

use super::fastq::FastqRecord;
use crate::error::SeqStatsError;

/// Build the set of wanted record identifiers from a comma-separated string.
///
/// Each token is trimmed of surrounding whitespace and empty tokens are
/// dropped. Returns `None` when no identifiers remain, which means "keep all".
/// A string of separators only, such as `" , "`, is therefore no filter at
/// all, not a filter that matches nothing.
pub fn parse_filter_ids(filter_ids: &str) -> Option<HashSet<String>> {
    let wanted: HashSet<String> = filter_ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();
    if wanted.is_empty() {
        None
    } else {
        Some(wanted)
    }
}

/// An iterator over [`FastqRecord`]s that only retains records whose
/// identifier is in a wanted set.
///
/// An absent or empty wanted set retains every record. Errors are always
/// passed through, so a malformed record is never silently skipped.
#[derive(Debug)]
pub struct FilteredFastqRecords<'w, I>
where
    I: Iterator<Item = Result<FastqRecord, SeqStatsError>>,
{
    inner: I,
    wanted: Option<&'w HashSet<String>>,
}

impl<'w, I> FilteredFastqRecords<'w, I>
where
    I: Iterator<Item = Result<FastqRecord, SeqStatsError>>,
{
    pub fn new(inner: I, wanted: Option<&'w HashSet<String>>) -> Self {
        let wanted = wanted.filter(|ids| !ids.is_empty());
        Self { inner, wanted }
    }
}

impl<'w, I> Iterator for FilteredFastqRecords<'w, I>
where
    I: Iterator<Item = Result<FastqRecord, SeqStatsError>>,
{
    type Item = Result<FastqRecord, SeqStatsError>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match &item {
                Ok(record) => {
                    if self
                        .wanted
                        .map_or(true, |wanted| wanted.contains(&record.id))
                    {
                        return Some(item);
                    }
                }
                Err(_) => return Some(item),
            }
        }
        None
    }
}
