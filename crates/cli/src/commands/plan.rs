//! Run plan export

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hrsuite_testdata::{Catalog, Plan, PlannedRun, RunInputs, SuiteConfig, TestDataStore};

use crate::output::{
    print_list, print_success, print_value, print_warning, OutputFormat, TableDisplay,
};

#[derive(Args)]
pub struct PlanArgs {
    /// Directory of test case catalogs
    #[arg(long, default_value = "suite")]
    pub suite: PathBuf,

    /// Plan only cases carrying this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Directory to write plan.json into
    #[arg(short, long, default_value = "test-results")]
    pub output: PathBuf,
}

#[derive(Serialize)]
pub struct RunDisplay {
    pub title: String,
    pub row_index: usize,
    pub flow: String,
}

impl From<&PlannedRun> for RunDisplay {
    fn from(run: &PlannedRun) -> Self {
        let flow = match &run.inputs {
            RunInputs::Login { .. } => "login",
            RunInputs::Search { .. } => "search",
        };

        Self {
            title: run.title.clone(),
            row_index: run.row_index,
            flow: flow.to_string(),
        }
    }
}

impl TableDisplay for RunDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Run", "Sheet Row", "Flow"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.title.clone(), self.row_index.to_string(), self.flow.clone()]
    }
}

pub fn execute(args: PlanArgs, config: &SuiteConfig, format: OutputFormat) -> Result<()> {
    let mut catalog = Catalog::load_all(&args.suite)?;
    if let Some(tag) = &args.tag {
        catalog = catalog.filter_by_tag(tag);
    }

    let store = TestDataStore::open_with(&config.data)
        .with_context(|| format!("loading test data from {}", config.data.workbook.display()))?;
    let plan = Plan::build(&catalog, &store, config)?;

    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            let displays: Vec<RunDisplay> = plan.runs.iter().map(RunDisplay::from).collect();
            print_list(&displays, format);
        }
        _ => print_value(&plan, format),
    }

    for case in &plan.empty_cases {
        print_warning(&format!("{} has no data rows; no runs generated", case));
    }

    let path = plan.write_json(&args.output)?;
    print_success(&format!(
        "{} run(s) x {} browser(s) = {} execution(s), plan written to {}",
        plan.runs.len(),
        plan.browsers.len(),
        plan.executions(),
        path.display()
    ));

    Ok(())
}
