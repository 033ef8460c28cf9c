use crate::utils::error::{EtlError, Result};
use std::collections::{HashMap, HashSet};

/// Label of the roll-up row and column.
pub const TOTAL: &str = "TOTAL";

/// Fallback bucket for an empty contract type or an unresolved profession.
pub const OTHER: &str = "Other";

/// A parsed tabular file: row 0 is the header, every cell is a string.
pub type Rows = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Raw profession id cell; may not be an integer.
    pub profession_id: String,
    pub contract_type: String,
}

impl JobRecord {
    const MIN_COLUMNS: usize = 2;

    pub fn new(profession_id: impl Into<String>, contract_type: impl Into<String>) -> Self {
        Self {
            profession_id: profession_id.into(),
            contract_type: contract_type.into(),
        }
    }

    /// Converts job rows, skipping the header row.
    pub fn from_table(rows: &[Vec<String>]) -> Result<Vec<Self>> {
        rows.iter()
            .enumerate()
            .skip(1)
            .map(|(index, row)| {
                check_width("jobs", index, row, Self::MIN_COLUMNS)?;
                Ok(Self::new(row[0].as_str(), row[1].as_str()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionEntry {
    pub profession_id: i64,
    pub category: String,
}

impl ProfessionEntry {
    const MIN_COLUMNS: usize = 3;

    pub fn new(profession_id: i64, category: impl Into<String>) -> Self {
        Self {
            profession_id,
            category: category.into(),
        }
    }

    /// Converts profession rows, skipping the header row. Rows whose id is not
    /// an integer can never be matched and are dropped.
    pub fn from_table(rows: &[Vec<String>]) -> Result<Vec<Self>> {
        let mut entries = Vec::with_capacity(rows.len().saturating_sub(1));

        for (index, row) in rows.iter().enumerate().skip(1) {
            check_width("professions", index, row, Self::MIN_COLUMNS)?;

            match row[0].parse::<i64>() {
                Ok(id) => entries.push(Self::new(id, row[2].as_str())),
                Err(_) => {
                    tracing::warn!(
                        "Skipping profession row {}: id '{}' is not an integer",
                        index,
                        row[0]
                    );
                }
            }
        }

        Ok(entries)
    }
}

fn check_width(table: &str, index: usize, row: &[String], expected: usize) -> Result<()> {
    if row.len() < expected {
        return Err(EtlError::MalformedRow {
            table: table.to_string(),
            row: index,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

/// One observed (contract, category) combination and its frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountCell {
    pub contract: String,
    pub category: String,
    pub count: u64,
}

/// Insertion-ordered set of labels with O(1) membership checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedSet {
    items: Vec<String>,
    index: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` unless already present. Returns whether it was added.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.index.contains(value) {
            return false;
        }
        self.index.insert(value.to_string());
        self.items.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index.contains(value)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Count matrix keyed by contract (row) and category (column).
///
/// Both axes start with [`TOTAL`] and then grow in first-seen order. Cells are
/// only ever created by [`CrosstabMatrix::increment`], so a stored count is
/// never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosstabMatrix {
    rows: HashMap<String, Vec<CountCell>>,
    contracts: OrderedSet,
    categories: OrderedSet,
}

impl Default for CrosstabMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstabMatrix {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            contracts: [TOTAL].into_iter().collect(),
            categories: [TOTAL].into_iter().collect(),
        }
    }

    /// Counts one observation: the cell itself plus the three roll-ups.
    pub fn record(&mut self, contract: &str, category: &str) {
        self.contracts.insert(contract);
        self.categories.insert(category);

        self.increment(contract, category, 1);
        self.increment(TOTAL, category, 1);
        self.increment(contract, TOTAL, 1);
        self.increment(TOTAL, TOTAL, 1);
    }

    fn increment(&mut self, contract: &str, category: &str, by: u64) {
        let cells = self.rows.entry(contract.to_string()).or_default();

        match cells.iter_mut().find(|cell| cell.category == category) {
            Some(cell) => cell.count += by,
            None => cells.push(CountCell {
                contract: contract.to_string(),
                category: category.to_string(),
                count: by,
            }),
        }
    }

    /// Folds `other` into `self`: same-keyed cells are summed and labels new
    /// to `self` are appended in `other`'s order.
    pub fn merge(mut self, other: CrosstabMatrix) -> Self {
        for contract in other.contracts.iter() {
            self.contracts.insert(contract);
        }
        for category in other.categories.iter() {
            self.categories.insert(category);
        }

        for cells in other.rows.into_values() {
            for cell in cells {
                self.increment(&cell.contract, &cell.category, cell.count);
            }
        }

        self
    }

    pub fn contracts(&self) -> &[String] {
        self.contracts.as_slice()
    }

    pub fn categories(&self) -> &[String] {
        self.categories.as_slice()
    }

    /// Cells of one contract row, in first-seen order.
    pub fn cells(&self, contract: &str) -> &[CountCell] {
        self.rows.get(contract).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, contract: &str, category: &str) -> u64 {
        self.cells(contract)
            .iter()
            .find(|cell| cell.category == category)
            .map(|cell| cell.count)
            .unwrap_or(0)
    }

    pub fn grand_total(&self) -> u64 {
        self.count(TOTAL, TOTAL)
    }
}

/// Both input files as parsed rows.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub jobs: Rows,
    pub professions: Rows,
}

#[derive(Debug, Clone)]
pub struct CrosstabReport {
    pub matrix: CrosstabMatrix,
    pub rendered: String,
    pub job_count: usize,
}
