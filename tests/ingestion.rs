//! Ledger-level import properties over the file store.

use rust_decimal::Decimal;
use std::str::FromStr;
use tempfile::TempDir;

use fleet_payroll::config::ConfigLoader;
use fleet_payroll::error::EngineError;
use fleet_payroll::ingestion::{ImportFile, ImportOutcome};
use fleet_payroll::ledger::Ledger;
use fleet_payroll::models::{EntryFilter, Period};
use fleet_payroll::storage::{ENTRIES_FILE, JsonFileStore};

const HEADER: &str = "NOME;ADIANTAMENTO;DIARIAS;FILIAL;EMPRESA;CPF;DIAS;HE50;HE100;ADICIONAL;FALTAS";

fn create_ledger(dir: &TempDir) -> Ledger {
    Ledger::new(JsonFileStore::new(dir.path()), ConfigLoader::default())
}

fn period(value: &str) -> Period {
    Period::parse(value).unwrap()
}

fn sheet(name: &str, rows: &[&str]) -> ImportFile {
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    ImportFile::new(name, contents)
}

fn march_sheet() -> ImportFile {
    sheet(
        "marco.csv",
        &[
            "Ana Souza;500;4;EMBU;Alfa;529.982.247-25;22;10,5;2;0;0",
            "Bruno Lima;300;2;VIANA;Beta;111.444.777-35;20;5;0;1;1",
        ],
    )
}

#[test]
fn test_reimport_leaves_collection_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);

    ledger.import(&[march_sheet()], &period("2024-03")).unwrap();
    let before = ledger.entries(&EntryFilter::default());

    let report = ledger.import(&[march_sheet()], &period("2024-03")).unwrap();

    assert_eq!(report.outcome, ImportOutcome::AllDuplicates);
    assert_eq!(report.new_records, 0);
    assert_eq!(ledger.entries(&EntryFilter::default()), before);
}

#[test]
fn test_name_case_does_not_defeat_deduplication() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);

    ledger.import(&[march_sheet()], &period("2024-03")).unwrap();
    let shouting = sheet(
        "marco_v2.csv",
        &["ANA SOUZA;500;4;EMBU;Alfa;529.982.247-25;22;10,5;2;0;0"],
    );
    let report = ledger.import(&[shouting], &period("2024-03")).unwrap();

    assert_eq!(report.outcome, ImportOutcome::AllDuplicates);
}

#[test]
fn test_periods_are_independent() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);

    ledger.import(&[march_sheet()], &period("2024-03")).unwrap();
    let report = ledger.import(&[march_sheet()], &period("2024-04")).unwrap();

    assert_eq!(report.outcome, ImportOutcome::Imported);
    assert_eq!(report.new_records, 2);
    assert_eq!(report.total_entries, 4);

    let april = EntryFilter {
        period: Some(period("2024-04")),
        ..Default::default()
    };
    assert_eq!(ledger.entries(&april).len(), 2);
}

#[test]
fn test_duplicate_rows_within_one_batch_count_once() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);

    let first = sheet("a.csv", &["Ana;500;4;EMBU;Alfa;52998224725;22;10;2;0;0"]);
    let second = sheet("b.csv", &["Ana;500;4;EMBU;Alfa;52998224725;22;10;2;0;0"]);
    let report = ledger.import(&[first, second], &period("2024-03")).unwrap();

    assert_eq!(report.new_records, 1);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.total_entries, 1);
}

#[test]
fn test_undecodable_second_file_commits_nothing() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);

    let mut broken = format!("{HEADER}\nCarla;100;1;EMBU;Alfa;52998224725;22;1;0;0;0\n").into_bytes();
    broken.extend_from_slice(&[b'D', b'a', 0xff, 0xfe, b';', b'1', b'\n']);
    let files = [march_sheet(), ImportFile::new("quebrado.csv", broken)];

    match ledger.import(&files, &period("2024-03")) {
        Err(EngineError::BatchParse { file, .. }) => assert_eq!(file, "quebrado.csv"),
        other => panic!("Expected BatchParse error, got {:?}", other),
    }

    assert!(ledger.entries(&EntryFilter::default()).is_empty());
    assert!(!dir.path().join(ENTRIES_FILE).exists());
}

#[test]
fn test_entries_survive_a_new_ledger() {
    let dir = TempDir::new().unwrap();
    {
        let mut ledger = create_ledger(&dir);
        ledger.import(&[march_sheet()], &period("2024-03")).unwrap();
    }

    let ledger = create_ledger(&dir);
    let entries = ledger.entries(&EntryFilter::default());

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].overtime_50, Decimal::from_str("10.5").unwrap());
    assert_eq!(entries[0].national_id, "529.982.247-25");
    assert_eq!(ledger.periods(), vec![period("2024-03")]);
}

#[test]
fn test_corrupt_data_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(ENTRIES_FILE), "[{ broken").unwrap();

    let mut ledger = create_ledger(&dir);
    assert!(ledger.entries(&EntryFilter::default()).is_empty());

    let report = ledger.import(&[march_sheet()], &period("2024-03")).unwrap();
    assert_eq!(report.total_entries, 2);
}

#[test]
fn test_oversized_cells_do_not_break_reports() {
    let dir = TempDir::new().unwrap();
    let mut ledger = create_ledger(&dir);
    let huge = sheet(
        "enorme.csv",
        &[
            "Ana Souza;0;4;EMBU;Alfa;529.982.247-25;22;9999999999999999999999999999;0;0;4294967295",
            "Bruno Lima;0;2;EMBU;Alfa;111.444.777-35;20;9999999999999999999999999999;0;0;9",
        ],
    );
    ledger.import(&[huge], &period("2024-03")).unwrap();

    let all = EntryFilter::default();
    let report = ledger.financial_report(&all);
    assert_eq!(report.total_cost, Decimal::MAX);

    let dashboard = ledger.dashboard(&all);
    assert_eq!(dashboard.kpis.absences, u32::MAX);

    let summary = ledger.summary(&all);
    assert_eq!(summary.totals.absences, u32::MAX);
    assert_eq!(summary.totals.headcount, 2);

    assert_eq!(ledger.ranking(&all).len(), 2);
    assert_eq!(ledger.compliance(&all).excessive_overtime.len(), 2);
}
