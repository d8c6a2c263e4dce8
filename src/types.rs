use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Wire value of the "no filter" selector.
pub const ALL: &str = "All";

/// One row of the leads CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lead {
    pub name: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    pub monthly_total_income: Option<f64>,
    pub source: Option<String>,
    pub call_id: Option<String>,
}

/// The loaded CSV, in file order. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub leads: Vec<Lead>,
    pub names: Vec<String>, // distinct, first-appearance order
}

impl Dataset {
    pub fn new(leads: Vec<Lead>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let names = leads
            .iter()
            .filter(|lead| seen.insert(lead.name.as_str()))
            .map(|lead| lead.name.clone())
            .collect();
        Self { leads, names }
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    #[default]
    All,
    Name(String),
}

impl Selector {
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Selector::All
        } else {
            Selector::Name(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => ALL,
            Selector::Name(name) => name,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Selector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
}

pub fn selector_options(dataset: &Dataset) -> Vec<SelectorOption> {
    std::iter::once(SelectorOption {
        label: "All Names".to_string(),
        value: ALL.to_string(),
    })
    .chain(dataset.names.iter().map(|name| SelectorOption {
        label: name.clone(),
        value: name.clone(),
    }))
    .collect()
}
