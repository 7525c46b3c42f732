//! Declarative YAML catalog of data-driven test cases

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{DataError, DataResult};
use crate::record::SheetKind;

/// One declared test case. Its data rows come from the workbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDeclaration {
    /// Test case identifier, e.g. `TC_Login_01`
    pub id: String,

    /// Sheet that holds the rows for this case
    pub sheet: SheetKind,

    /// Human-readable title used in run names
    pub title: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A set of declarations, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub cases: Vec<CaseDeclaration>,
}

impl Catalog {
    /// Parse a catalog from YAML string
    pub fn from_yaml(yaml: &str) -> DataResult<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.check_unique()?;
        Ok(catalog)
    }

    /// Parse a catalog from a YAML file
    pub fn from_file(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load and merge every catalog file below a directory
    pub fn load_all(dir: &Path) -> DataResult<Self> {
        if !dir.is_dir() {
            return Err(DataError::Catalog(format!(
                "catalog directory not found: {}",
                dir.display()
            )));
        }

        let mut cases = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let catalog = Self::from_file(entry.path())?;
            cases.extend(catalog.cases);
        }

        let catalog = Self { cases };
        catalog.check_unique()?;
        Ok(catalog)
    }

    /// Declarations carrying a tag
    pub fn filter_by_tag(&self, tag: &str) -> Self {
        Self {
            cases: self
                .cases
                .iter()
                .filter(|c| c.tags.iter().any(|t| t == tag))
                .cloned()
                .collect(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&CaseDeclaration> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    fn check_unique(&self) -> DataResult<()> {
        let mut seen = HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.id.as_str()) {
                return Err(DataError::Catalog(format!("duplicate test case id: {}", case.id)));
            }
        }
        Ok(())
    }
}
