//! Test data store - typed, per-test-case access to the workbook

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::DataConfig;
use crate::error::{DataError, DataResult};
use crate::index::GroupedIndex;
use crate::record::{
    Credentials, LoginRecord, Record, SearchCriteria, SearchRecord, SheetKind, SheetRecord,
};
use crate::workbook::{Sheet, Workbook};

/// Default name of the login data sheet
pub const LOGIN_SHEET: &str = SheetKind::Login.default_sheet();

/// Default name of the search data sheet
pub const SEARCH_SHEET: &str = SheetKind::Search.default_sheet();

/// Both record sequences, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllRecords {
    pub login: Vec<LoginRecord>,
    pub search: Vec<SearchRecord>,
}

/// Read-only view over a loaded workbook.
///
/// The workbook is read once at construction; every query afterwards is an
/// in-memory lookup that returns owned copies, so a store can be shared
/// across threads without locking.
#[derive(Debug, Clone)]
pub struct TestDataStore {
    workbook: Workbook,

    /// Sheet read by the default login accessors
    login_sheet: String,

    /// Sheet read by the default search accessors
    search_sheet: String,
}

impl TestDataStore {
    /// Open a workbook from disk. Fails without a partial store if the file
    /// cannot be read.
    pub fn open(path: impl AsRef<Path>) -> DataResult<Self> {
        Workbook::open(path).map(Self::from_workbook)
    }

    /// Open the configured workbook and use its configured sheet names
    pub fn open_with(config: &DataConfig) -> DataResult<Self> {
        Ok(Self::open(&config.workbook)?
            .with_sheet_names(&config.login_sheet, &config.search_sheet))
    }

    pub fn from_workbook(workbook: Workbook) -> Self {
        Self {
            workbook,
            login_sheet: LOGIN_SHEET.to_string(),
            search_sheet: SEARCH_SHEET.to_string(),
        }
    }

    /// Point the default accessors at other sheets
    pub fn with_sheet_names(mut self, login: &str, search: &str) -> Self {
        self.login_sheet = login.to_string();
        self.search_sheet = search.to_string();
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.workbook.path()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Parse the login sheet with the given name
    pub fn read_login_records(&self, sheet_name: &str) -> DataResult<Vec<LoginRecord>> {
        self.read_records(sheet_name)
    }

    /// Parse the search sheet with the given name
    pub fn read_search_records(&self, sheet_name: &str) -> DataResult<Vec<SearchRecord>> {
        self.read_records(sheet_name)
    }

    /// Records of the login sheet ("Login" unless configured otherwise)
    pub fn login_records(&self) -> DataResult<Vec<LoginRecord>> {
        self.read_login_records(&self.login_sheet)
    }

    /// Records of the search sheet ("Search" unless configured otherwise)
    pub fn search_records(&self) -> DataResult<Vec<SearchRecord>> {
        self.read_search_records(&self.search_sheet)
    }

    fn read_records<R: SheetRecord>(&self, sheet_name: &str) -> DataResult<Vec<R>> {
        let sheet = self
            .workbook
            .sheet(sheet_name)
            .ok_or_else(|| DataError::SheetNotFound {
                sheet: sheet_name.to_string(),
            })?;

        let records = parse_sheet::<R>(sheet);
        debug!(
            "Parsed {} {} record(s) from sheet '{}' (header on row {})",
            records.len(),
            R::KIND,
            sheet_name,
            sheet.header_row()
        );
        Ok(records)
    }

    /// Group both default sheets by test case
    pub fn grouped_index(&self) -> DataResult<GroupedIndex> {
        let login = self.login_records()?;
        let search = self.search_records()?;
        Ok(GroupedIndex::build(login, search))
    }

    /// Login rows whose test case matches exactly; empty when none do
    pub fn login_records_by_test_case(&self, test_case: &str) -> DataResult<Vec<LoginRecord>> {
        Ok(filter_by_test_case(self.login_records()?, test_case))
    }

    /// Search rows whose test case matches exactly; empty when none do
    pub fn search_records_by_test_case(&self, test_case: &str) -> DataResult<Vec<SearchRecord>> {
        Ok(filter_by_test_case(self.search_records()?, test_case))
    }

    pub fn first_login_record_by_test_case(
        &self,
        test_case: &str,
    ) -> DataResult<Option<LoginRecord>> {
        Ok(self.login_records_by_test_case(test_case)?.into_iter().next())
    }

    pub fn first_search_record_by_test_case(
        &self,
        test_case: &str,
    ) -> DataResult<Option<SearchRecord>> {
        Ok(self.search_records_by_test_case(test_case)?.into_iter().next())
    }

    /// First login row for the test case, else its first search row
    pub fn first_record_by_test_case(&self, test_case: &str) -> DataResult<Option<Record>> {
        if let Some(record) = self.first_login_record_by_test_case(test_case)? {
            return Ok(Some(record.into()));
        }
        Ok(self
            .first_search_record_by_test_case(test_case)?
            .map(Record::from))
    }

    pub fn all_records(&self) -> DataResult<AllRecords> {
        Ok(AllRecords {
            login: self.login_records()?,
            search: self.search_records()?,
        })
    }

    /// Credentials of every login row, in source order
    pub fn credentials(&self) -> DataResult<Vec<Credentials>> {
        Ok(self.login_records()?.iter().map(LoginRecord::credentials).collect())
    }

    /// Search criteria of every search row, in source order
    pub fn search_criteria(&self) -> DataResult<Vec<SearchCriteria>> {
        Ok(self.search_records()?.iter().map(SearchRecord::criteria).collect())
    }

    /// Log every record's row, test case and primary field
    pub fn log_records(&self) -> DataResult<AllRecords> {
        let all = self.all_records()?;
        log_sheet("Login", &all.login);
        log_sheet("Search", &all.search);
        Ok(all)
    }
}

fn log_sheet<R: SheetRecord>(title: &str, records: &[R]) {
    info!("=== {} Test Data ===", title);
    for record in records {
        info!(
            "Row {}: {} - {}",
            record.row_index(),
            record.test_case(),
            record.primary_field()
        );
    }
}

/// Parse data rows below the header. Short rows and rows without a test
/// case are skipped.
fn parse_sheet<R: SheetRecord>(sheet: &Sheet) -> Vec<R> {
    let min_fields = R::KIND.min_fields();

    sheet
        .data_rows()
        .filter_map(|(row_index, fields)| {
            if fields.len() < min_fields || fields[0].is_empty() {
                trace!(
                    "Skipping row {} of sheet '{}' ({} of {} fields)",
                    row_index,
                    sheet.name,
                    fields.len(),
                    min_fields
                );
                return None;
            }
            Some(R::from_fields(fields, row_index))
        })
        .collect()
}

fn filter_by_test_case<R: SheetRecord>(records: Vec<R>, test_case: &str) -> Vec<R> {
    records
        .into_iter()
        .filter(|r| r.test_case() == test_case)
        .collect()
}
