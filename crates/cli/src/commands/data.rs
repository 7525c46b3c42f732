//! Test data inspection commands

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hrsuite_testdata::{Record, SuiteConfig, TestDataStore};

use crate::output::{
    print_item, print_list, print_success, print_warning, OutputFormat, TableDisplay,
};

#[derive(Args)]
pub struct ShowArgs {
    /// Test case identifier, e.g. TC_Login_01
    pub test_case: String,

    /// Only the first matching row (login sheet first, then search)
    #[arg(long)]
    pub first: bool,
}

#[derive(Serialize)]
pub struct SheetDisplay {
    pub position: usize,
    pub name: String,
}

impl TableDisplay for SheetDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Sheet"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.position.to_string(), self.name.clone()]
    }
}

#[derive(Serialize)]
pub struct CaseDisplay {
    pub test_case: String,
    pub login_rows: usize,
    pub search_rows: usize,
}

impl TableDisplay for CaseDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Test Case", "Login Rows", "Search Rows"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.test_case.clone(),
            self.login_rows.to_string(),
            self.search_rows.to_string(),
        ]
    }
}

impl TableDisplay for Record {
    fn headers() -> Vec<&'static str> {
        vec!["Sheet", "Row", "Test Case", "Inputs"]
    }

    fn row(&self) -> Vec<String> {
        let inputs = match self {
            Record::Login(r) => format!("username={:?} password={:?}", r.username, r.password),
            Record::Search(r) => [
                ("name", &r.employee_name),
                ("id", &r.employee_id),
                ("status", &r.employment_status),
                ("supervisor", &r.supervisor_name),
                ("sub_unit", &r.sub_unit),
                ("job", &r.job_title),
            ]
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| format!("{}={:?}", k, v))
            .collect::<Vec<_>>()
            .join(" "),
        };

        vec![
            self.kind().to_string(),
            self.row_index().to_string(),
            self.test_case().to_string(),
            inputs,
        ]
    }
}

fn open_store(config: &SuiteConfig) -> Result<TestDataStore> {
    TestDataStore::open_with(&config.data)
        .with_context(|| format!("loading test data from {}", config.data.workbook.display()))
}

pub fn sheets(config: &SuiteConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let displays: Vec<SheetDisplay> = store
        .sheet_names()
        .into_iter()
        .enumerate()
        .map(|(i, name)| SheetDisplay {
            position: i + 1,
            name,
        })
        .collect();
    print_list(&displays, format);
    Ok(())
}

pub fn dump(config: &SuiteConfig) -> Result<()> {
    let store = open_store(config)?;
    let all = store.log_records()?;
    print_success(&format!(
        "{} login and {} search record(s)",
        all.login.len(),
        all.search.len()
    ));
    Ok(())
}

pub fn cases(config: &SuiteConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let index = store.grouped_index()?;

    let displays: Vec<CaseDisplay> = index
        .iter()
        .map(|(tc, data)| CaseDisplay {
            test_case: tc.to_string(),
            login_rows: data.login.len(),
            search_rows: data.search.len(),
        })
        .collect();
    print_list(&displays, format);
    Ok(())
}

pub fn show(args: ShowArgs, config: &SuiteConfig, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;

    if args.first {
        match store.first_record_by_test_case(&args.test_case)? {
            Some(record) => print_item(&record, format),
            None => print_warning(&format!("No rows for test case '{}'", args.test_case)),
        }
        return Ok(());
    }

    let records: Vec<Record> = store
        .login_records_by_test_case(&args.test_case)?
        .into_iter()
        .map(Record::from)
        .chain(
            store
                .search_records_by_test_case(&args.test_case)?
                .into_iter()
                .map(Record::from),
        )
        .collect();

    if records.is_empty() {
        print_warning(&format!("No rows for test case '{}'", args.test_case));
        return Ok(());
    }

    print_list(&records, format);
    Ok(())
}
