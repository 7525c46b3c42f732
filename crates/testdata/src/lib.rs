//! HRSuite test data layer
//!
//! This crate turns the suite's spreadsheet of test data into typed records
//! that test declarations can iterate over:
//! - Reads the workbook once and keeps every sheet in memory
//! - Parses the "Login" and "Search" sheets into typed records
//! - Groups records by test case identifier
//! - Expands declared test cases into one parameterized run per data row
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   TestDataStore (Rust)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Workbook::open(path) -> [Sheet]          (calamine)        │
//! │  TestDataStore                                              │
//! │    ├── read_login_records(sheet)  -> [LoginRecord]          │
//! │    ├── read_search_records(sheet) -> [SearchRecord]         │
//! │    ├── grouped_index()            -> GroupedIndex           │
//! │    └── *_by_test_case(tc)         -> [Record] / Option      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Catalog (YAML)                                             │
//! │    └── cases: [{ id, sheet, title, tags }]                  │
//! │  Plan::build(catalog, store, config) -> [PlannedRun]        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod plan;
pub mod record;
pub mod store;
pub mod workbook;

pub use catalog::{CaseDeclaration, Catalog};
pub use config::SuiteConfig;
pub use error::{DataError, DataResult};
pub use index::{GroupedIndex, TestCaseData};
pub use plan::{Plan, PlannedRun, RunInputs};
pub use record::{Credentials, LoginRecord, Record, SearchCriteria, SearchRecord, SheetKind};
pub use store::{AllRecords, TestDataStore, LOGIN_SHEET, SEARCH_SHEET};
pub use workbook::{Sheet, Workbook};
