//! Expansion of declared test cases into parameterized runs
//!
//! Each declared case becomes one run per data row, in source order. A case
//! without rows produces no runs; it is reported, not treated as a failure.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::{Browser, SuiteConfig};
use crate::error::DataResult;
use crate::record::{Credentials, LoginRecord, SearchCriteria, SearchRecord, SheetKind};
use crate::store::TestDataStore;

/// Literal inputs for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum RunInputs {
    /// Credentials typed into the login form, exactly as the row holds them
    Login { credentials: Credentials },

    /// Log in with the configured account, then search with the row criteria
    Search {
        credentials: Credentials,
        criteria: SearchCriteria,
    },
}

/// One parameterized execution of a declared test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRun {
    pub test_case: String,

    /// `"{id} - {title} (Row {ordinal})"`
    pub title: String,

    /// 1-based position among this case's rows
    pub ordinal: usize,

    /// Sheet row the inputs came from
    pub row_index: usize,

    pub inputs: RunInputs,
}

/// Every run of a suite, plus the runner settings they execute under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub base_url: String,
    pub browsers: Vec<Browser>,
    pub headless: bool,
    pub retries: u32,
    pub timeout_ms: u64,
    pub runs: Vec<PlannedRun>,

    /// Declared cases with no data rows
    pub empty_cases: Vec<String>,
}

impl Plan {
    /// Expand every declaration against the store
    pub fn build(
        catalog: &Catalog,
        store: &TestDataStore,
        config: &SuiteConfig,
    ) -> DataResult<Self> {
        let needs = |kind: SheetKind| catalog.cases.iter().any(|c| c.sheet == kind);

        // Only read the sheets the catalog refers to; a missing one is fatal
        let login = if needs(SheetKind::Login) {
            store.login_records()?
        } else {
            Vec::new()
        };
        let search = if needs(SheetKind::Search) {
            store.search_records()?
        } else {
            Vec::new()
        };

        let mut runs = Vec::new();
        let mut empty_cases = Vec::new();

        for case in &catalog.cases {
            let inputs: Vec<(usize, RunInputs)> = match case.sheet {
                SheetKind::Login => login
                    .iter()
                    .filter(|r| r.test_case == case.id)
                    .map(|r| (r.row_index, login_inputs(r)))
                    .collect(),
                SheetKind::Search => search
                    .iter()
                    .filter(|r| r.test_case == case.id)
                    .map(|r| (r.row_index, search_inputs(r, config)))
                    .collect(),
            };

            if inputs.is_empty() {
                debug!("No data rows for {}", case.id);
                empty_cases.push(case.id.clone());
                continue;
            }

            for (i, (row_index, inputs)) in inputs.into_iter().enumerate() {
                let ordinal = i + 1;
                runs.push(PlannedRun {
                    test_case: case.id.clone(),
                    title: format!("{} - {} (Row {})", case.id, case.title, ordinal),
                    ordinal,
                    row_index,
                    inputs,
                });
            }
        }

        info!(
            "Planned {} run(s) for {} case(s), {} without data",
            runs.len(),
            catalog.len(),
            empty_cases.len()
        );

        Ok(Self {
            base_url: config.target.base_url.clone(),
            browsers: config.target.browsers.clone(),
            headless: config.target.headless,
            retries: config.target.retries,
            timeout_ms: config.target.timeout_ms,
            runs,
            empty_cases,
        })
    }

    pub fn runs_for<'a>(&'a self, test_case: &'a str) -> impl Iterator<Item = &'a PlannedRun> {
        self.runs.iter().filter(move |r| r.test_case == test_case)
    }

    /// Runs multiplied by browser projects
    pub fn executions(&self) -> usize {
        self.runs.len() * self.browsers.len()
    }

    /// Write the plan to `plan.json` under `dir`
    pub fn write_json(&self, dir: &Path) -> DataResult<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join("plan.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;

        info!("Plan written to: {}", path.display());
        Ok(path)
    }
}

fn login_inputs(record: &LoginRecord) -> RunInputs {
    RunInputs::Login {
        credentials: record.credentials(),
    }
}

fn search_inputs(record: &SearchRecord, config: &SuiteConfig) -> RunInputs {
    RunInputs::Search {
        credentials: config.resolve_credentials(None),
        criteria: record.criteria(),
    }
}
