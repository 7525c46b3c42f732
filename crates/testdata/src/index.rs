//! Records grouped by test case identifier

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{LoginRecord, SearchRecord, SheetRecord};

/// All rows of one test case, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseData {
    pub login: Vec<LoginRecord>,
    pub search: Vec<SearchRecord>,
}

impl TestCaseData {
    pub fn len(&self) -> usize {
        self.login.len() + self.search.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Immutable mapping from test case to its login and search rows.
///
/// Keys iterate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedIndex {
    entries: BTreeMap<String, TestCaseData>,
}

impl GroupedIndex {
    /// Partition each sequence by test case, then merge the two partitions
    pub fn build(login: Vec<LoginRecord>, search: Vec<SearchRecord>) -> Self {
        let login = partition(login);
        let search = partition(search);

        let mut entries: BTreeMap<String, TestCaseData> = login
            .into_iter()
            .map(|(tc, login)| (tc, TestCaseData { login, search: Vec::new() }))
            .collect();

        for (tc, search) in search {
            entries.entry(tc).or_default().search = search;
        }

        Self { entries }
    }

    pub fn get(&self, test_case: &str) -> Option<&TestCaseData> {
        self.entries.get(test_case)
    }

    pub fn test_cases(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestCaseData)> {
        self.entries.iter().map(|(tc, data)| (tc.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn login_count(&self) -> usize {
        self.entries.values().map(|d| d.login.len()).sum()
    }

    pub fn search_count(&self) -> usize {
        self.entries.values().map(|d| d.search.len()).sum()
    }
}

/// Bucket records by test case, keeping source order inside each bucket
fn partition<R: SheetRecord>(records: Vec<R>) -> BTreeMap<String, Vec<R>> {
    records.into_iter().fold(BTreeMap::new(), |mut acc, record| {
        acc.entry(record.test_case().to_string())
            .or_insert_with(Vec::new)
            .push(record);
        acc
    })
}
