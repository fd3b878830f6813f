use std::fs;
use std::path::PathBuf;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use recon_ingest::{IngestError, load_dataset, reference_records, target_records};
use recon_model::DatasetRole;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_target_csv_into_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "xponent.csv",
        "Medication Adherence %,Drug Name,HCP ID,GPO Affiliation\n\
         80%,DrugA,12-345,\n\
         high,Drugb,54321,GroupY\n",
    );
    let df = load_dataset(&path).expect("load csv");
    assert_eq!(df.height(), 2);

    let records = target_records(&df).expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].adherence, "80%");
    assert_eq!(records[0].hcp_id, "12-345");
    assert_eq!(records[0].gpo_affiliation, None);
    assert_eq!(records[1].drug_name, "Drugb");
    assert_eq!(records[1].gpo_affiliation.as_deref(), Some("GroupY"));
}

#[test]
fn keeps_cell_padding_for_resolvers() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "xponent.csv",
        " Medication Adherence % ,Drug Name,HCP ID,GPO Affiliation\n\
         High,DrugA ,\" 12345\",\" GroupY \"\n",
    );
    let df = load_dataset(&path).expect("load csv");
    let records = target_records(&df).expect("records");
    assert_eq!(records[0].drug_name, "DrugA ");
    assert_eq!(records[0].hcp_id, " 12345");
    assert_eq!(records[0].gpo_affiliation.as_deref(), Some(" GroupY "));
}

#[test]
fn skips_blank_lines_and_pads_short_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "veeva.csv",
        "\n HCP ID ,Product Name,Customer Group\n,,\n12345,DrugA\n",
    );
    let df = load_dataset(&path).expect("load csv");
    let records = reference_records(&df).expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hcp_id, "12345");
    assert_eq!(records[0].customer_group, "");
}

#[test]
fn missing_column_is_reported_with_dataset() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "veeva.csv", "HCP ID,Product Name\n12345,DrugA\n");
    let df = load_dataset(&path).expect("load csv");
    let err = reference_records(&df).expect_err("missing column");
    match err {
        IngestError::MissingColumn { dataset, column } => {
            assert_eq!(dataset, DatasetRole::Reference);
            assert_eq!(column, "Customer Group");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn rejects_unknown_extensions_and_missing_files() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "notes.txt", "HCP ID\n1\n");
    assert!(matches!(
        load_dataset(&path),
        Err(IngestError::UnsupportedFormat { .. })
    ));
    assert!(matches!(
        load_dataset(&dir.path().join("absent.csv")),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn empty_csv_has_no_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "empty.csv", "\n\n");
    assert!(matches!(
        load_dataset(&path),
        Err(IngestError::EmptyInput { .. })
    ));
}

#[test]
fn reads_first_worksheet_of_xlsx() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("veeva.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "HCP ID").expect("write");
    sheet.write_string(0, 1, "Product Name").expect("write");
    sheet.write_string(0, 2, "Customer Group").expect("write");
    sheet.write_number(1, 0, 12345.0).expect("write");
    sheet.write_string(1, 1, "DrugA").expect("write");
    sheet.write_string(1, 2, "GroupX").expect("write");
    workbook.save(&path).expect("save xlsx");

    let df = load_dataset(&path).expect("load xlsx");
    let records = reference_records(&df).expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hcp_id, "12345");
    assert_eq!(records[0].product_name, "DrugA");
    assert_eq!(records[0].customer_group, "GroupX");
}
