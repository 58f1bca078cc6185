//! CSV ingest of vote records.
//!
//! Expected shape: a header row, then one vote per row. Only two columns are
//! read (group identifier and vote value); their names are configurable and
//! any other columns are ignored.
//!
//! Design goals:
//! - **Strict schema**: a missing column is a fatal error (exit code 2)
//! - **No silent skipping**: a malformed row aborts the run with its line number
//! - **Lenient decoding**: bytes that are not valid UTF-8 (Latin-1 or
//!   spreadsheet exports) are dropped from the field instead of failing the run
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::ByteRecord;
use log::{info, warn};

use crate::domain::VoteRecord;
use crate::error::{AnalysisError, AppError};

/// Default group column name.
pub const DEFAULT_GROUP_COLUMN: &str = "Group ID";
/// Default vote column name.
pub const DEFAULT_VOTE_COLUMN: &str = "Vote";

/// Where to read votes from and which columns hold them.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub path: PathBuf,
    pub group_column: String,
    pub vote_column: String,
}

impl IngestOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            group_column: DEFAULT_GROUP_COLUMN.to_string(),
            vote_column: DEFAULT_VOTE_COLUMN.to_string(),
        }
    }
}

/// Ingest output: raw records in file order.
#[derive(Debug, Clone)]
pub struct IngestedVotes {
    pub records: Vec<VoteRecord>,
    pub rows_read: usize,
}

/// Load vote records from a CSV file.
pub fn load_vote_records(options: &IngestOptions) -> Result<IngestedVotes, AppError> {
    let file = File::open(&options.path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", options.path.display()),
        )
    })?;
    let votes = read_vote_records(file, &options.group_column, &options.vote_column)?;
    info!(
        "Read {} vote rows from '{}'",
        votes.rows_read,
        options.path.display()
    );
    Ok(votes)
}

/// Parse vote records from any CSV reader.
pub fn read_vote_records<R: Read>(
    reader: R,
    group_column: &str,
    vote_column: &str,
) -> Result<IngestedVotes, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .byte_headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let group_idx = column_index(&header_map, group_column)?;
    let vote_idx = column_index(&header_map, vote_column)?;

    let mut records = Vec::new();
    for (idx, result) in reader.byte_records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| {
            warn!("CSV parse error on line {line}: {e}");
            AppError::new(2, format!("CSV parse error on line {line}: {e}"))
        })?;

        let group = field(&record, group_idx);
        let vote = field(&record, vote_idx);
        if group.is_empty() || vote.is_empty() {
            let missing = if group.is_empty() { group_column } else { vote_column };
            warn!("Line {line} has no value for `{missing}`");
            return Err(AnalysisError::MissingField {
                line,
                field: missing.to_string(),
            }
            .into());
        }
        records.push(VoteRecord::new(line, group, vote));
    }

    if records.is_empty() {
        return Err(AnalysisError::EmptyInput.into());
    }

    let rows_read = records.len();
    Ok(IngestedVotes { records, rows_read })
}

/// Write vote records in the ingest format (used by `simulate`).
pub fn write_vote_records(
    path: &Path,
    records: &[VoteRecord],
    group_column: &str,
    vote_column: &str,
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    writer
        .write_record([group_column, vote_column])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for r in records {
        writer
            .write_record([r.group.as_str(), r.vote.as_str()])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(())
}

fn build_header_map(headers: &ByteRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(&decode_lossy(name)), idx))
        .collect()
}

/// Decode a field as UTF-8, dropping any invalid byte sequences.
fn decode_lossy(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn column_index(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| {
            AnalysisError::MissingField {
                line: 1,
                field: name.to_string(),
            }
            .into()
        })
}

fn field(record: &ByteRecord, idx: usize) -> String {
    record
        .get(idx)
        .map(|bytes| decode_lossy(bytes).trim().to_string())
        .unwrap_or_default()
}
