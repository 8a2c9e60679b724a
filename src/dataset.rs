//! CSV form of the mined datasets.

use crate::error::Result;
use crate::model::{AttributionRecord, FileTouches, SourceFileSet};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Serialize)]
struct TouchRow<'a> {
    #[serde(rename = "Filename")]
    filename: &'a str,
    #[serde(rename = "Touches")]
    touches: u64,
}

#[derive(Debug, Serialize)]
struct AuthorRow<'a> {
    #[serde(rename = "Filename")]
    filename: &'a str,
    #[serde(rename = "Author")]
    author: &'a str,
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Debug, Deserialize)]
struct FilenameRow {
    #[serde(rename = "Filename")]
    filename: String,
}

pub fn write_frequency<W: Write>(out: W, entries: &[FileTouches]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if entries.is_empty() {
        writer.write_record(["Filename", "Touches"])?;
    }
    for e in entries {
        writer.serialize(TouchRow {
            filename: &e.path,
            touches: e.touches,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_attribution<W: Write>(out: W, records: &[AttributionRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if records.is_empty() {
        writer.write_record(["Filename", "Author", "Date"])?;
    }
    for r in records {
        writer.serialize(AuthorRow {
            filename: &r.path,
            author: &r.author_name,
            date: r.author_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Read the `Filename` column of a frequency dataset.
pub fn read_source_files<R: Read>(input: R) -> Result<SourceFileSet> {
    let mut reader = csv::Reader::from_reader(input);
    let mut files = SourceFileSet::new();
    for row in reader.deserialize::<FilenameRow>() {
        files.insert(row?.filename);
    }
    Ok(files)
}

/// Write every frequency dataset, or none of them.
///
/// Each dataset goes to a temporary file next to its target; targets are only
/// replaced once all of them were written.
pub fn write_frequency_files(targets: &[(&Path, &[FileTouches])]) -> Result<()> {
    let mut staged = Vec::with_capacity(targets.len());
    for &(path, entries) in targets {
        let mut tmp = stage(path)?;
        write_frequency(tmp.as_file_mut(), entries)?;
        staged.push((tmp, path));
    }
    for (tmp, path) in staged {
        tmp.persist(path).map_err(|e| e.error)?;
    }
    Ok(())
}

pub fn write_attribution_file(path: &Path, records: &[AttributionRecord]) -> Result<()> {
    let mut tmp = stage(path)?;
    write_attribution(tmp.as_file_mut(), records)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn stage(target: &Path) -> Result<NamedTempFile> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Ok(NamedTempFile::new_in(dir)?)
}

pub fn read_source_files_file(path: &Path) -> Result<SourceFileSet> {
    read_source_files(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn touches(path: &str, touches: u64) -> FileTouches {
        FileTouches {
            path: path.to_string(),
            touches,
        }
    }

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn frequency_csv_has_header_and_rows_in_order() {
        let out = to_string(|b| write_frequency(b, &[touches("b.c", 2), touches("a, b.c", 1)]));
        assert_eq!(out, "Filename,Touches\nb.c,2\n\"a, b.c\",1\n");
    }

    #[test]
    fn empty_dataset_still_has_header() {
        assert_eq!(to_string(|b| write_frequency(b, &[])), "Filename,Touches\n");
        assert_eq!(to_string(|b| write_attribution(b, &[])), "Filename,Author,Date\n");
    }

    #[test]
    fn attribution_csv_uses_utc_seconds() {
        let record = AttributionRecord {
            path: "app/A.java".to_string(),
            author_name: "Scott Alexander-Bown".to_string(),
            author_date: Utc.with_ymd_and_hms(2015, 3, 1, 12, 0, 0).unwrap(),
        };
        let out = to_string(|b| write_attribution(b, &[record]));
        assert_eq!(
            out,
            "Filename,Author,Date\napp/A.java,Scott Alexander-Bown,2015-03-01T12:00:00Z\n"
        );
    }

    #[test]
    fn source_set_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src.csv");
        let rows = [touches("x/a.java", 4), touches("x/b.kt", 1)];
        write_frequency_files(&[(path.as_path(), &rows[..])]).unwrap();

        let set = read_source_files_file(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("x/a.java"));
        assert!(set.contains("x/b.kt"));
    }

    #[test]
    fn failed_dataset_leaves_no_partner_behind() {
        let dir = tempfile::tempdir().unwrap();
        let all = dir.path().join("file_r.csv");
        let src = dir.path().join("missing").join("file_r_src.csv");
        let rows = [touches("app/A.java", 1)];

        let result = write_frequency_files(&[(all.as_path(), &rows[..]), (src.as_path(), &rows[..])]);

        assert!(matches!(result, Err(crate::error::MineError::Io(_))));
        assert!(!all.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn staged_write_replaces_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_r_authors.csv");
        std::fs::write(&path, "stale").unwrap();

        write_attribution_file(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Filename,Author,Date\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_source_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source_files_file(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, crate::error::MineError::Io(_)));
    }
}
