//! Workbook-backed store tests
//!
//! Each test writes the exact spreadsheet it needs into a temp directory,
//! then reads it back through `TestDataStore::open`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook as XlsxWriter;
use tempfile::TempDir;

use hrsuite_testdata::{DataError, GroupedIndex, TestDataStore};

const LOGIN_HEADER: &[&str] = &["Test Case", "Username", "Password"];
const SEARCH_HEADER: &[&str] = &[
    "Test Case",
    "Employee Name",
    "Employee Id",
    "Employment Status",
    "Supervisor Name",
    "Sub Unit",
    "Job Title",
];

/// Write a workbook with the given sheets. Empty strings are left as blank cells.
fn write_workbook(dir: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) -> PathBuf {
    let path = dir.join("TestData.xlsx");
    let mut workbook = XlsxWriter::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }

    workbook.save(&path).unwrap();
    path
}

fn with_header<'a>(header: &[&'a str], rows: Vec<Vec<&'a str>>) -> Vec<Vec<&'a str>> {
    let mut all = vec![header.to_vec()];
    all.extend(rows);
    all
}

fn suite_workbook(dir: &TempDir) -> PathBuf {
    write_workbook(
        dir.path(),
        &[
            (
                "Login",
                with_header(
                    LOGIN_HEADER,
                    vec![
                        vec!["TC_Login_01", "Admin", "admin123"],
                        vec!["TC_Login_01", "bad", "bad"],
                        vec!["TC_Login_02", "Admin1", "admin123"],
                        vec![],
                        vec!["TC_Login_05", "", "admin123"],
                        vec!["TC_Login_03", "Admin"],
                    ],
                ),
            ),
            (
                "Search",
                with_header(
                    SEARCH_HEADER,
                    vec![
                        vec![
                            "TC_Search_01",
                            "Peter Mac Anderson",
                            "",
                            "",
                            "",
                            "",
                            "Chief Financial Officer",
                        ],
                        vec!["TC_Search_02", "Pete", "", "", ""],
                        vec!["TC_Search_09", "", "", "Full-Time Permanent", "", "", "x"],
                        vec!["TC_Search_01", "Linda Anderson", "", "", "", "", "y"],
                    ],
                ),
            ),
            ("Notes", vec![vec!["free text"]]),
        ],
    )
}

#[test]
fn login_round_trip_keeps_rows_and_order() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    let records = store.login_records_by_test_case("TC_Login_01").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].username.as_str(), records[0].row_index), ("Admin", 2));
    assert_eq!((records[1].username.as_str(), records[1].row_index), ("bad", 3));
}

#[test]
fn header_row_is_never_returned() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    let all = store.all_records().unwrap();
    assert!(all.login.iter().all(|r| r.row_index >= 2 && r.test_case != "Test Case"));
    assert!(all.search.iter().all(|r| r.row_index >= 2 && r.test_case != "Test Case"));
}

#[test]
fn header_below_first_row_is_still_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        dir.path(),
        &[(
            "Login",
            vec![
                vec![],
                LOGIN_HEADER.to_vec(),
                vec!["TC_Login_01", "Admin", "admin123"],
            ],
        )],
    );
    let store = TestDataStore::open(path).unwrap();

    let records = store.login_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].test_case, "TC_Login_01");
    assert_eq!(records[0].row_index, 3);
}

#[test]
fn short_rows_are_skipped_and_positions_kept() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    let login: Vec<_> = store
        .login_records()
        .unwrap()
        .into_iter()
        .map(|r| (r.test_case, r.row_index))
        .collect();
    assert_eq!(
        login,
        vec![
            ("TC_Login_01".to_string(), 2),
            ("TC_Login_01".to_string(), 3),
            ("TC_Login_02".to_string(), 4),
            ("TC_Login_05".to_string(), 6),
        ]
    );

    let blank_user = store.first_login_record_by_test_case("TC_Login_05").unwrap().unwrap();
    assert_eq!(blank_user.username, "");
    assert_eq!(blank_user.password, "admin123");
}

#[test]
fn search_row_with_five_fields_is_excluded() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    assert!(store.search_records_by_test_case("TC_Search_02").unwrap().is_empty());
    assert_eq!(store.search_records().unwrap().len(), 3);
}

#[test]
fn unknown_search_case_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    assert!(store.search_records_by_test_case("TC_Search_99").unwrap().is_empty());
    assert!(store.first_search_record_by_test_case("TC_Search_99").unwrap().is_none());
}

#[test]
fn missing_search_sheet_fails_search_reads_only() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        dir.path(),
        &[("Login", with_header(LOGIN_HEADER, vec![vec!["TC_Login_01", "Admin", "admin123"]]))],
    );
    let store = TestDataStore::open(path).unwrap();

    assert_eq!(store.login_records().unwrap().len(), 1);
    let err = store.search_records().unwrap_err();
    assert!(matches!(err, DataError::SheetNotFound { ref sheet } if sheet == "Search"));
    assert!(err.to_string().contains("Search"));
}

#[test]
fn sheet_names_are_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(
        dir.path(),
        &[("login", with_header(LOGIN_HEADER, vec![vec!["TC_Login_01", "Admin", "admin123"]]))],
    );
    let store = TestDataStore::open(path).unwrap();

    assert_eq!(store.sheet_names(), vec!["login"]);
    assert!(matches!(store.login_records(), Err(DataError::SheetNotFound { .. })));
}

#[test]
fn grouping_is_a_lossless_partition() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    let login = store.login_records().unwrap();
    let cases: BTreeSet<_> = login.iter().map(|r| r.test_case.clone()).collect();

    let mut rebuilt = Vec::new();
    for tc in &cases {
        rebuilt.extend(store.login_records_by_test_case(tc).unwrap());
    }
    rebuilt.sort_by_key(|r| r.row_index);
    assert_eq!(rebuilt, login);

    let index: GroupedIndex = store.grouped_index().unwrap();
    assert_eq!(index.login_count(), login.len());
    assert_eq!(index.search_count(), store.search_records().unwrap().len());

    let tc1 = index.get("TC_Search_01").unwrap();
    assert_eq!(tc1.search.iter().map(|r| r.row_index).collect::<Vec<_>>(), vec![2, 5]);
    assert!(tc1.login.is_empty());
}

#[test]
fn reads_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    assert_eq!(store.login_records().unwrap(), store.login_records().unwrap());
    assert_eq!(store.grouped_index().unwrap(), store.grouped_index().unwrap());
}

#[test]
fn numeric_cells_read_as_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("TestData.xlsx");

    let mut workbook = XlsxWriter::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Search").unwrap();
    for (c, value) in SEARCH_HEADER.iter().enumerate() {
        worksheet.write_string(0, c as u16, *value).unwrap();
    }
    worksheet.write_string(1, 0, "TC_Search_08").unwrap();
    worksheet.write_number(1, 2, 42.0).unwrap();
    worksheet.write_string(1, 6, "-").unwrap();
    workbook.save(&path).unwrap();

    let store = TestDataStore::open(&path).unwrap();
    let record = store.first_search_record_by_test_case("TC_Search_08").unwrap().unwrap();
    assert_eq!(record.employee_id, "42");
    assert_eq!(record.employee_name, "");
}

#[test]
fn missing_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let err = TestDataStore::open(dir.path().join("absent.xlsx")).unwrap_err();
    assert!(matches!(err, DataError::SourceUnreadable { .. }));
    assert!(err.to_string().contains("absent.xlsx"));
}

#[test]
fn corrupt_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("TestData.xlsx");
    std::fs::write(&path, b"this is not a workbook").unwrap();

    assert!(matches!(
        TestDataStore::open(&path),
        Err(DataError::SourceUnreadable { .. })
    ));
}

#[test]
fn store_is_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let store = TestDataStore::open(suite_workbook(&dir)).unwrap();

    let counts: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = ["TC_Login_01", "TC_Login_02", "TC_Login_05", "TC_Login_99"]
            .into_iter()
            .map(|tc| {
                let store = &store;
                s.spawn(move || store.login_records_by_test_case(tc).unwrap().len())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![2, 1, 1, 0]);
}
