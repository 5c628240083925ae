//! Header Model Module
//! Parses the four stacked header rows of the wide table into typed column roles.

use std::collections::HashSet;
use std::fmt;

use super::loader::FormatError;

/// Number of stacked header rows above the data.
pub const HEADER_ROWS: usize = 4;

/// Leading columns holding the row identifiers (Year, Cause of Death).
pub const IDENTIFIER_COLUMNS: usize = 2;

/// Literal prefix stripped from age group labels.
const AGE_GROUP_PREFIX: &str = "groups ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Male" => Some(Sex::Male),
            "Female" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex x age group slice encoded by one demographic column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemographicSlice {
    pub sex: Sex,
    pub qualifier: String,
    pub age_group: String,
    /// Unique composite label, used as the wide-table column name.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRole {
    Year,
    CauseOfDeath,
    Demographic(DemographicSlice),
    /// All-sex, all-age total of the row.
    RowTotal { label: String },
}

/// Typed view of the header rows, one role per column.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    roles: Vec<ColumnRole>,
}

impl HeaderModel {
    /// Build the model from the header rows, given top level first.
    ///
    /// Levels per column: marker (e.g. `Year`), sex, qualifier (e.g. `age
    /// groups`), age group label.
    pub fn parse(rows: &[Vec<String>]) -> Result<Self, FormatError> {
        if rows.len() != HEADER_ROWS {
            return Err(FormatError::HeaderRows {
                expected: HEADER_ROWS,
                found: rows.len(),
            });
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width <= IDENTIFIER_COLUMNS {
            return Err(FormatError::NoDemographicColumns);
        }

        let mut roles = vec![ColumnRole::Year, ColumnRole::CauseOfDeath];
        let mut seen = HashSet::new();
        let mut has_total = false;

        for column in IDENTIFIER_COLUMNS..width {
            let levels = [0, 1, 2, 3].map(|level| cell(rows, level, column));
            let label = composite_label(&levels);
            if !seen.insert(label.clone()) {
                return Err(FormatError::DuplicateColumn { label });
            }

            let role = match (Sex::parse(levels[1]), levels[1]) {
                (Some(sex), _) => ColumnRole::Demographic(DemographicSlice {
                    sex,
                    qualifier: levels[2].to_string(),
                    age_group: age_group_label(levels[2], levels[3]),
                    label,
                }),
                (None, "Total") if has_total => {
                    return Err(FormatError::DuplicateRowTotal { column })
                }
                (None, "Total") => {
                    has_total = true;
                    ColumnRole::RowTotal { label }
                }
                (None, other) => {
                    return Err(FormatError::UnexpectedSex {
                        column,
                        label: other.to_string(),
                    })
                }
            };
            roles.push(role);
        }

        Ok(Self { roles })
    }

    pub fn width(&self) -> usize {
        self.roles.len()
    }

    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Demographic slices with their column index.
    pub fn demographic_columns(&self) -> impl Iterator<Item = (usize, &DemographicSlice)> {
        self.roles.iter().enumerate().filter_map(|(i, role)| match role {
            ColumnRole::Demographic(slice) => Some((i, slice)),
            _ => None,
        })
    }

    pub fn row_total_column(&self) -> Option<(usize, &str)> {
        self.roles.iter().enumerate().find_map(|(i, role)| match role {
            ColumnRole::RowTotal { label } => Some((i, label.as_str())),
            _ => None,
        })
    }
}

fn cell(rows: &[Vec<String>], level: usize, column: usize) -> &str {
    rows[level].get(column).map(|s| s.trim()).unwrap_or("")
}

/// Space-joined, non-empty header levels of one column.
fn composite_label(levels: &[&str]) -> String {
    levels
        .iter()
        .filter(|l| !l.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Age group label of a column.
///
/// The first two qualifier tokens are dropped; any further qualifier tokens
/// belong to the label. A leading `groups ` is then stripped.
pub fn age_group_label(qualifier: &str, label: &str) -> String {
    let joined = qualifier
        .split_whitespace()
        .chain(label.split_whitespace())
        .skip(2)
        .collect::<Vec<_>>()
        .join(" ");
    match joined.strip_prefix(AGE_GROUP_PREFIX) {
        Some(rest) => rest.to_string(),
        None => joined,
    }
}
