//! Spreadsheet import with cross-period deduplication.
//!
//! This module turns raw delimited text into [`LogisticsEntry`] values.
//! Rows are deduplicated against the existing collection and against every
//! row already accepted in the same batch, and invalid national IDs are
//! reported as warnings without blocking the row.

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EntryKey, LogisticsEntry, Period};
use crate::validators::{is_valid_cpf, normalize, normalize_count};

/// Rows with fewer columns than this are discarded.
pub const MIN_COLUMNS: usize = 7;

/// Name used when the name column is empty.
pub const UNKNOWN_NAME: &str = "Desconhecido";

/// Branch used when the branch column is empty.
pub const DEFAULT_BRANCH: &str = "Matriz";

/// Company used when the company column is empty.
pub const DEFAULT_COMPANY: &str = "Empresa";

/// Column positions of the import layout
/// `NOME;ADIANTAMENTO;DIARIAS;FILIAL;EMPRESA;CPF;DIAS;HE50;HE100;ADICIONAL;FALTAS`.
mod column {
    pub const NAME: usize = 0;
    pub const ADVANCE: usize = 1;
    pub const PER_DIEM: usize = 2;
    pub const BRANCH: usize = 3;
    pub const COMPANY: usize = 4;
    pub const NATIONAL_ID: usize = 5;
    pub const DAYS_WORKED: usize = 6;
    pub const OVERTIME_50: usize = 7;
    pub const OVERTIME_100: usize = 8;
    pub const NIGHT_PREMIUM: usize = 9;
    pub const ABSENCES: usize = 10;
}

/// One file of an import batch, already read from its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// File name, used in log lines and error messages.
    pub name: String,
    /// Raw file contents.
    pub contents: Vec<u8>,
}

impl ImportFile {
    /// Creates an import file.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// How an import batch ended, for caller feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// No row was accepted and none was a duplicate.
    NoValidData,
    /// No row was accepted because every row already existed.
    AllDuplicates,
    /// At least one new row was accepted.
    Imported,
}

/// The result of ingesting a batch of files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestBatch {
    /// Newly accepted entries, in file and row order.
    pub entries: Vec<LogisticsEntry>,
    /// Non-blocking validation messages.
    pub warnings: Vec<String>,
    /// Number of accepted rows.
    pub new_records: usize,
    /// Number of rows discarded as duplicates.
    pub duplicates: usize,
}

impl IngestBatch {
    /// Classifies the batch result.
    pub fn outcome(&self) -> ImportOutcome {
        match (self.new_records, self.duplicates) {
            (0, 0) => ImportOutcome::NoValidData,
            (0, _) => ImportOutcome::AllDuplicates,
            _ => ImportOutcome::Imported,
        }
    }
}

/// Ingests every file of a batch for one reference period.
///
/// Files are processed in order into one accumulator, so a row repeated in
/// a later file of the same batch is a duplicate too. A file that cannot
/// be decoded aborts the batch; the caller must then commit nothing.
///
/// # Example
///
/// ```
/// use fleet_payroll::ingestion::{ImportFile, ImportOutcome, ingest_batch};
/// use fleet_payroll::models::Period;
///
/// let csv = "NOME;ADIANTAMENTO;DIARIAS;FILIAL;EMPRESA;CPF;DIAS;HE50;HE100;ADICIONAL;FALTAS\n\
///            Ana Souza;R$ 500,00;4;EMBU;Alfa;529.982.247-25;22;10,5;2;3;0\n";
/// let period = Period::parse("2024-03").unwrap();
///
/// let batch = ingest_batch(&[ImportFile::new("embu.csv", csv)], &period, &[]).unwrap();
/// assert_eq!(batch.outcome(), ImportOutcome::Imported);
/// assert_eq!(batch.entries[0].branch, "EMBU");
/// assert!(batch.warnings.is_empty());
/// ```
pub fn ingest_batch(
    files: &[ImportFile],
    period: &Period,
    existing: &[LogisticsEntry],
) -> EngineResult<IngestBatch> {
    let mut seen: HashSet<EntryKey> = existing.iter().map(LogisticsEntry::key).collect();
    let mut batch = IngestBatch {
        entries: Vec::new(),
        warnings: Vec::new(),
        new_records: 0,
        duplicates: 0,
    };

    for file in files {
        ingest_file(file, period, &mut seen, &mut batch)?;
    }

    info!(
        period = %period,
        files = files.len(),
        new_records = batch.new_records,
        duplicates = batch.duplicates,
        warnings = batch.warnings.len(),
        "Batch ingested"
    );

    Ok(batch)
}

fn ingest_file(
    file: &ImportFile,
    period: &Period,
    seen: &mut HashSet<EntryKey>,
    batch: &mut IngestBatch,
) -> EngineResult<()> {
    let delimiter = detect_delimiter(&file.contents);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(file.contents.as_slice());

    let (before_new, before_duplicates) = (batch.new_records, batch.duplicates);

    for record in reader.records() {
        let record = record.map_err(|e| EngineError::BatchParse {
            file: file.name.clone(),
            line: e.position().map_or(0, |p| p.line()),
            message: e.to_string(),
        })?;

        let Some(entry) = parse_row(&record, period) else {
            debug!(
                file = %file.name,
                line = record.position().map_or(0, |p| p.line()),
                columns = record.len(),
                "Skipping short row"
            );
            continue;
        };

        if !seen.insert(entry.key()) {
            batch.duplicates += 1;
            continue;
        }

        if !is_valid_cpf(&entry.national_id) {
            warn!(file = %file.name, driver = %entry.name, "Invalid CPF");
            batch.warnings.push(format!("CPF inválido para {}", entry.name));
        }

        batch.entries.push(entry);
        batch.new_records += 1;
    }

    info!(
        file = %file.name,
        delimiter = %(delimiter as char),
        new_records = batch.new_records - before_new,
        duplicates = batch.duplicates - before_duplicates,
        "File ingested"
    );

    Ok(())
}

/// Uses `;` when the header line contains one, `,` otherwise.
fn detect_delimiter(contents: &[u8]) -> u8 {
    let header = contents.split(|&b| b == b'\n').next().unwrap_or_default();
    if header.contains(&b';') { b';' } else { b',' }
}

/// Builds an entry from a data row, or `None` for a short row.
fn parse_row(record: &StringRecord, period: &Period) -> Option<LogisticsEntry> {
    let fields: Vec<String> = record
        .iter()
        .map(|field| field.replace('"', "").trim().to_string())
        .collect();

    if fields.len() < MIN_COLUMNS {
        return None;
    }

    let field = |index: usize| fields.get(index).map_or("", String::as_str);
    let text_or = |index: usize, default: &str| match field(index) {
        "" => default.to_string(),
        value => value.to_string(),
    };

    Some(LogisticsEntry {
        id: Uuid::new_v4().to_string(),
        name: text_or(column::NAME, UNKNOWN_NAME),
        national_id: field(column::NATIONAL_ID).to_string(),
        company: text_or(column::COMPANY, DEFAULT_COMPANY),
        branch: text_or(column::BRANCH, DEFAULT_BRANCH),
        period: period.clone(),
        days_worked: normalize_count(field(column::DAYS_WORKED)),
        overtime_50: normalize(field(column::OVERTIME_50)),
        overtime_100: normalize(field(column::OVERTIME_100)),
        night_premium: normalize(field(column::NIGHT_PREMIUM)),
        absences: normalize_count(field(column::ABSENCES)),
        advance: normalize(field(column::ADVANCE)),
        per_diem: normalize(field(column::PER_DIEM)),
    })
}
