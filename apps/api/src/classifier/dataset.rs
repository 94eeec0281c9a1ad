//! Labelled resume dataset loading.
//!
//! Reads a `Category,Resume_str` style CSV (the public Kaggle resume dataset layout).
//! When no explicit path is given the well-known locations in [`DEFAULT_SEARCH_PATHS`]
//! are tried in order, and the built-in sample corpus is used if none of them exists.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::classifier::sample::SAMPLE_RESUMES;

pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "data/Resume.csv",
    "../data/Resume.csv",
    "./Resume.csv",
    "dataset/Resume/Resume.csv",
    "../dataset/Resume/Resume.csv",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no category/resume columns in header: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("dataset contains no usable rows")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelledResume {
    /// Uppercased, trimmed category label.
    pub domain: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum DatasetSource {
    File(PathBuf),
    Sample,
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Sample => f.write_str("built-in sample"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<LabelledResume>,
    pub source: DatasetSource,
}

impl Dataset {
    pub fn sample() -> Self {
        let records = SAMPLE_RESUMES
            .iter()
            .flat_map(|(domain, texts)| {
                texts.iter().map(move |text| LabelledResume {
                    domain: domain.to_string(),
                    text: text.to_string(),
                })
            })
            .collect();
        Self {
            records,
            source: DatasetSource::Sample,
        }
    }

    pub fn domain_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.domain.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Loads the labelled dataset.
///
/// An explicit path must exist (a bare file name is also tried under `data/`). Without
/// one, the default locations are searched; unreadable candidates are skipped with a
/// warning and the sample corpus is the final fallback.
pub fn load_dataset(explicit: Option<&Path>) -> Result<Dataset, DatasetError> {
    if let Some(path) = explicit {
        let candidates = [path.to_path_buf(), Path::new("data").join(path)];
        let found = candidates
            .iter()
            .find(|p| p.is_file())
            .ok_or_else(|| DatasetError::NotFound(path.to_path_buf()))?;
        return load_csv(found);
    }

    for candidate in DEFAULT_SEARCH_PATHS.iter().map(Path::new) {
        if !candidate.is_file() {
            continue;
        }
        match load_csv(candidate) {
            Ok(dataset) => return Ok(dataset),
            Err(e) => warn!(path = %candidate.display(), error = %e, "Skipping unreadable dataset"),
        }
    }

    let dataset = Dataset::sample();
    info!(
        resumes = dataset.records.len(),
        domains = dataset.domain_count(),
        "No dataset file found, using built-in sample corpus"
    );
    Ok(dataset)
}

pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_csv(&bytes)?;
    let dataset = Dataset {
        records,
        source: DatasetSource::File(path.to_path_buf()),
    };
    info!(
        path = %path.display(),
        resumes = dataset.records.len(),
        domains = dataset.domain_count(),
        "Loaded resume dataset"
    );
    Ok(dataset)
}

/// Parses CSV bytes into cleaned, de-duplicated records.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<LabelledResume>, DatasetError> {
    let text = decode(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let (label_col, text_col) = detect_columns(&headers)
        .ok_or_else(|| DatasetError::MissingColumns(headers.iter().map(String::from).collect()))?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                skipped += 1;
                warn!(error = %e, "Skipping malformed dataset row");
                continue;
            }
        };
        let (Some(label), Some(body)) = (row.get(label_col), row.get(text_col)) else {
            skipped += 1;
            continue;
        };

        let domain = label.trim().to_uppercase();
        let text = body.trim();
        if domain.is_empty() || text.is_empty() {
            skipped += 1;
            continue;
        }
        if !seen.insert((domain.clone(), text.to_string())) {
            continue;
        }
        records.push(LabelledResume {
            domain,
            text: text.to_string(),
        });
    }

    if skipped > 0 {
        info!(skipped, "Dropped incomplete dataset rows");
    }
    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

/// UTF-8 when valid, otherwise each byte is read as a Latin-1 code point.
fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn detect_columns(headers: &StringRecord) -> Option<(usize, usize)> {
    let exact = |name: &str| headers.iter().position(|h| h.trim() == name);
    let containing = |needle: &str| {
        headers
            .iter()
            .position(|h| h.to_lowercase().contains(needle))
    };

    let label = exact("Category").or_else(|| containing("category"))?;
    let text = exact("Resume_str")
        .or_else(|| exact("Resume"))
        .or_else(|| containing("resume"))?;
    Some((label, text))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parses_kaggle_layout() {
        let csv = "ID,Resume_str,Resume_html,Category\n\
                   1,\"Python developer, django\",<p/>,Information-Technology\n\
                   2,Nurse with ICU experience,<p/>, healthcare \n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "INFORMATION-TECHNOLOGY");
        assert_eq!(records[0].text, "Python developer, django");
        assert_eq!(records[1].domain, "HEALTHCARE");
    }

    #[test]
    fn test_prefers_resume_str_over_resume_html() {
        let csv = "Resume_html,Category,Resume_str\n<b>x</b>,HR,plain text resume\n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].text, "plain text resume");
    }

    #[test]
    fn test_fuzzy_column_names() {
        let csv = "job_category,resume_text\nChef,Pastry chef with baking experience\n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].domain, "CHEF");
    }

    #[test]
    fn test_drops_empty_and_duplicate_rows() {
        let csv = "Category,Resume\nHR,recruiter\nHR,recruiter\nhr ,recruiter\n,orphan\nSALES,\n";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_columns() {
        let err = parse_csv(b"a,b\n1,2\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumns(_)));
        assert!(matches!(
            parse_csv(b"Category,Resume\n").unwrap_err(),
            DatasetError::Empty
        ));
    }

    #[test]
    fn test_latin1_fallback() {
        let mut bytes = b"Category,Resume\nARTS,caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" owner\n");
        let records = parse_csv(&bytes).unwrap();
        assert_eq!(records[0].text, "caf\u{e9} owner");
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Category,Resume_str").unwrap();
        writeln!(file, "BANKING,loan officer with credit analysis").unwrap();

        let dataset = load_dataset(Some(file.path())).unwrap();
        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.source, DatasetSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_dataset(Some(Path::new("/nonexistent/Resume.csv"))).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
    }

    #[test]
    fn test_sample_corpus() {
        let dataset = Dataset::sample();
        assert_eq!(dataset.source, DatasetSource::Sample);
        assert_eq!(dataset.domain_count(), 8);
        assert_eq!(dataset.records.len(), 26);
        assert!(dataset.records.iter().all(|r| r.domain == r.domain.to_uppercase()));
    }
}
