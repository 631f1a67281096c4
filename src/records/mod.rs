use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// One company entry as served by the data endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: String,
    pub country: String,
    pub industry: String,
    pub number_of_employees: u64,
}

impl Record {
    pub fn new(name: &str, country: &str, industry: &str, number_of_employees: u64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            industry: industry.to_string(),
            number_of_employees,
        }
    }

    pub fn field(&self, key: RecordField) -> &str {
        match key {
            RecordField::Country => &self.country,
            RecordField::Industry => &self.industry,
        }
    }
}

/// Text fields that carry a filter control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordField {
    Country,
    Industry,
}

impl RecordField {
    pub fn control_id(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Industry => "industry",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub country: Option<String>,
    pub industry: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    #[serde(rename = "employees")]
    EmployeeCount,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "employees" | "employee_count" | "employeecount" => Some(Self::EmployeeCount),
            _ => None,
        }
    }

    /// Value of the matching `sort` radio button.
    pub fn control_value(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::EmployeeCount => "employees",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    /// Value of the matching `order` radio button.
    pub fn control_value(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortSelection {
    pub field: SortField,
    pub order: SortOrder,
}

/// Occurrence count per distinct field value.
///
/// Iteration follows discovery order; use [`CountTable::sorted_entries`]
/// before display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(v, c)| (v.as_str(), *c))
    }

    pub fn sorted_entries(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self.iter().collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}
