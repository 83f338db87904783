//! Semicolon-delimited export of entries.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{EngineError, EngineResult};
use crate::models::LogisticsEntry;

/// Header row of the export file.
pub const EXPORT_HEADER: [&str; 11] = [
    "Nome",
    "Empresa",
    "Filial",
    "CPF",
    "Dias",
    "Adiantamento",
    "Diarias",
    "HE50",
    "HE100",
    "Adic.Noturno",
    "Faltas",
];

/// Serializes entries as `;`-delimited, unquoted text with a header row.
///
/// Decimals are written without trailing zeros (`15.00` becomes `15`).
pub fn export_csv(entries: &[LogisticsEntry]) -> EngineResult<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER).map_err(export_error)?;

    for entry in entries {
        writer
            .write_record([
                entry.name.clone(),
                entry.company.clone(),
                entry.branch.clone(),
                entry.national_id.clone(),
                entry.days_worked.to_string(),
                entry.advance.normalize().to_string(),
                entry.per_diem.normalize().to_string(),
                entry.overtime_50.normalize().to_string(),
                entry.overtime_100.normalize().to_string(),
                entry.night_premium.normalize().to_string(),
                entry.absences.to_string(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::Export {
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| EngineError::Export {
        message: e.to_string(),
    })
}

fn export_error(error: csv::Error) -> EngineError {
    EngineError::Export {
        message: error.to_string(),
    }
}
