//! Track dataset loading.
//!
//! The dataset is a CSV file whose header row is normalized to lowercase at
//! load time, so `Playlist_Genre` and `playlist_genre` name the same column.
//! It is read once at startup and never mutated afterwards; every request
//! borrows it immutably.

use crate::error::DatasetError;
use csv::StringRecord;
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Column every dataset must carry.
pub const GENRE_COLUMN: &str = "playlist_genre";

/// In-memory, read-only table of tracks.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    headers: Vec<String>,
    genre_idx: usize,
    records: Vec<StringRecord>,
}

impl Dataset {
    /// Load a dataset from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::NotFound`] if `path` does not exist
    /// - [`DatasetError::Csv`] if the file cannot be parsed
    /// - [`DatasetError::MissingColumn`] if there is no genre column
    ///
    /// # Design Notes
    ///
    /// The reader is `flexible`: rows shorter or longer than the header are
    /// kept, and missing trailing cells read as absent. A header-only file
    /// loads as an empty dataset.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| DatasetError::Csv {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        let dataset = Self::from_reader(file, path)?;

        info!(
            "Loaded {} tracks ({} columns) from {}",
            dataset.len(),
            dataset.headers.len(),
            path.display()
        );
        if dataset.is_empty() {
            warn!("{} has a header but no tracks; every mood will come back empty", path.display());
        }
        Ok(dataset)
    }

    /// Parse CSV from any reader. `source` is only used in messages.
    pub fn from_reader<R: Read>(reader: R, source: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let source = source.into();
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::from_csv_reader(reader, &source)
    }

    /// Build a dataset from already split rows.
    pub fn from_rows<H, R>(headers: H, rows: R) -> Result<Self, DatasetError>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: AsRef<str>,
    {
        let headers = normalize_headers(headers);
        let records: Vec<StringRecord> = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<StringRecord>())
            .collect();
        Self::assemble(PathBuf::from("<memory>"), headers, records)
    }

    fn from_csv_reader<R: Read>(
        mut reader: csv::Reader<R>,
        source: &Path,
    ) -> Result<Self, DatasetError> {
        let csv_err = |source_err| DatasetError::Csv {
            path: source.to_path_buf(),
            source: source_err,
        };

        let headers = normalize_headers(reader.headers().map_err(csv_err)?.iter());
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        Self::assemble(source.to_path_buf(), headers, records)
    }

    fn assemble(
        source: PathBuf,
        headers: Vec<String>,
        records: Vec<StringRecord>,
    ) -> Result<Self, DatasetError> {
        let genre_idx = headers
            .iter()
            .position(|h| h == GENRE_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: GENRE_COLUMN.to_string(),
                path: source.clone(),
            })?;

        debug!("Dataset headers: {headers:?}");
        Ok(Self {
            source,
            headers,
            genre_idx,
            records,
        })
    }

    /// Where the data came from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Lowercased column names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of a (lowercase) column name.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw cell value. Short rows yield `None` for trailing columns.
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.records.get(row).and_then(|r| r.get(column))
    }

    /// Genre cell of `row`, empty if the row is short.
    #[must_use]
    pub fn genre(&self, row: usize) -> &str {
        self.value(row, self.genre_idx).unwrap_or_default()
    }
}

fn normalize_headers<I>(headers: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    headers
        .into_iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Track_Name,Track_Artist,Playlist_Genre,YouTube_Link
Levitating,Dua Lipa,pop,https://youtu.be/a
Enter Sandman,Metallica,rock,https://youtu.be/b
";

    #[test]
    fn test_headers_are_lowercased() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes(), "sample.csv").unwrap();
        assert_eq!(
            ds.headers(),
            &["track_name", "track_artist", "playlist_genre", "youtube_link"]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.genre(1), "rock");
        assert_eq!(ds.value(0, 1), Some("Dua Lipa"));
    }

    #[test]
    fn test_missing_genre_column() {
        let csv = "track_name,genre\nSong,pop\n";
        let err = Dataset::from_reader(csv.as_bytes(), "bad.csv").unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => assert_eq!(column, GENRE_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/tracks.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.source(), file.path());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"track_name,playlist_genre\n").unwrap();

        let ds = Dataset::load(file.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "track_name,playlist_genre,youtube_link\nOnly Title\nFull,pop,link\n";
        let ds = Dataset::from_reader(csv.as_bytes(), "short.csv").unwrap();
        assert_eq!(ds.genre(0), "");
        assert_eq!(ds.value(0, 2), None);
        assert_eq!(ds.genre(1), "pop");
    }

    #[test]
    fn test_from_rows() {
        let ds = Dataset::from_rows(
            ["Playlist_Genre"],
            vec![vec!["pop"], vec!["classical"]],
        )
        .unwrap();
        assert_eq!(ds.column_index("playlist_genre"), Some(0));
        assert_eq!(ds.genre(1), "classical");
    }
}
