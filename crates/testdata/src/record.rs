//! Typed records parsed from the data sheets

use serde::{Deserialize, Serialize};

/// Which data sheet a record (or a declared test case) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Login,
    Search,
}

impl SheetKind {
    /// Default sheet name in the workbook
    pub const fn default_sheet(self) -> &'static str {
        match self {
            SheetKind::Login => "Login",
            SheetKind::Search => "Search",
        }
    }

    /// Populated positional fields a row needs to be kept
    pub fn min_fields(&self) -> usize {
        match self {
            SheetKind::Login => LoginRecord::MIN_FIELDS,
            SheetKind::Search => SearchRecord::MIN_FIELDS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SheetKind::Login => "login",
            SheetKind::Search => "search",
        }
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type that can be parsed from positional sheet fields
pub trait SheetRecord: Sized {
    const KIND: SheetKind;
    const MIN_FIELDS: usize;

    /// Build a record from a row that passed the field-count check.
    /// Missing cells read as empty strings.
    fn from_fields(fields: &[String], row_index: usize) -> Self;

    fn test_case(&self) -> &str;

    fn row_index(&self) -> usize;

    /// The field that identifies the row in diagnostics
    fn primary_field(&self) -> &str;
}

fn field(fields: &[String], pos: usize) -> String {
    fields.get(pos).cloned().unwrap_or_default()
}

/// One row of the "Login" sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub test_case: String,
    pub username: String,
    pub password: String,
    /// 1-based sheet row (header is row 1); diagnostics only
    pub row_index: usize,
}

impl LoginRecord {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl SheetRecord for LoginRecord {
    const KIND: SheetKind = SheetKind::Login;
    const MIN_FIELDS: usize = 3;

    fn from_fields(fields: &[String], row_index: usize) -> Self {
        Self {
            test_case: field(fields, 0),
            username: field(fields, 1),
            password: field(fields, 2),
            row_index,
        }
    }

    fn test_case(&self) -> &str {
        &self.test_case
    }

    fn row_index(&self) -> usize {
        self.row_index
    }

    fn primary_field(&self) -> &str {
        &self.username
    }
}

/// One row of the "Search" sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecord {
    pub test_case: String,
    pub employee_name: String,
    pub employee_id: String,
    pub employment_status: String,
    pub supervisor_name: String,
    pub sub_unit: String,
    pub job_title: String,
    pub row_index: usize,
}

impl SearchRecord {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            employee_name: self.employee_name.clone(),
            employee_id: self.employee_id.clone(),
            employment_status: self.employment_status.clone(),
            supervisor_name: self.supervisor_name.clone(),
            sub_unit: self.sub_unit.clone(),
            job_title: self.job_title.clone(),
        }
    }
}

impl SheetRecord for SearchRecord {
    const KIND: SheetKind = SheetKind::Search;
    const MIN_FIELDS: usize = 7;

    fn from_fields(fields: &[String], row_index: usize) -> Self {
        Self {
            test_case: field(fields, 0),
            employee_name: field(fields, 1),
            employee_id: field(fields, 2),
            employment_status: field(fields, 3),
            supervisor_name: field(fields, 4),
            sub_unit: field(fields, 5),
            job_title: field(fields, 6),
            row_index,
        }
    }

    fn test_case(&self) -> &str {
        &self.test_case
    }

    fn row_index(&self) -> usize {
        self.row_index
    }

    fn primary_field(&self) -> &str {
        &self.employee_name
    }
}

/// Either kind of record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sheet", rename_all = "snake_case")]
pub enum Record {
    Login(LoginRecord),
    Search(SearchRecord),
}

impl Record {
    pub fn kind(&self) -> SheetKind {
        match self {
            Record::Login(_) => SheetKind::Login,
            Record::Search(_) => SheetKind::Search,
        }
    }

    pub fn test_case(&self) -> &str {
        match self {
            Record::Login(r) => r.test_case(),
            Record::Search(r) => r.test_case(),
        }
    }

    pub fn row_index(&self) -> usize {
        match self {
            Record::Login(r) => r.row_index(),
            Record::Search(r) => r.row_index(),
        }
    }

    /// Username for login rows, employee name for search rows
    pub fn primary_field(&self) -> &str {
        match self {
            Record::Login(r) => r.primary_field(),
            Record::Search(r) => r.primary_field(),
        }
    }
}

impl From<LoginRecord> for Record {
    fn from(r: LoginRecord) -> Self {
        Record::Login(r)
    }
}

impl From<SearchRecord> for Record {
    fn from(r: SearchRecord) -> Self {
        Record::Search(r)
    }
}

/// Username/password pair typed into the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Filters typed into the employee search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub employee_name: String,
    pub employee_id: String,
    pub employment_status: String,
    pub supervisor_name: String,
    pub sub_unit: String,
    pub job_title: String,
}
