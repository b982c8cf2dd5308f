use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::board::entry::round_quantity;
use crate::error::{BoardError, BoardResult};

const MISSING_PARAMETERS: &str = "Missing required parameters";

/// Numeric field as sent by clients: forms post numbers as strings, scripts as
/// JSON numbers. Both are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl Quantity {
    /// Parses the quantity as a finite, non-negative number rounded to 3 decimals.
    pub fn parse(&self, field: &str) -> BoardResult<f64> {
        let value = match self {
            Quantity::Number(n) => *n,
            Quantity::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                BoardError::Validation(format!("{field} must be a number, got '{text}'"))
            })?,
        };
        // Scaling may overflow a finite input, so the rounded value is checked.
        let rounded = round_quantity(value);
        match rounded.is_finite() && value >= 0.0 {
            true => Ok(rounded),
            false => Err(BoardError::Validation(format!(
                "{field} must be a finite non-negative number, got {value}"
            ))),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity::Number(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Quantity::Text(value.to_string())
    }
}

/// Body of a result submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    pub name: Option<String>,
    pub cleaned_gb: Option<Quantity>,
    pub starting_gb: Option<Quantity>,
    pub location: Option<String>,
}

/// A submission that passed validation, ready to be written to the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSubmission {
    pub name: String,
    pub cleaned_gb: f64,
    pub starting_gb: f64,
    pub location: String,
}

impl Submission {
    pub fn new(name: &str, cleaned_gb: impl Into<Quantity>) -> Self {
        Submission {
            name: Some(name.to_string()),
            cleaned_gb: Some(cleaned_gb.into()),
            ..Default::default()
        }
    }

    pub fn with_starting_gb(mut self, starting_gb: impl Into<Quantity>) -> Self {
        self.starting_gb = Some(starting_gb.into());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn validate(self) -> BoardResult<ValidSubmission> {
        let name = required_name(self.name)?;
        let cleaned_gb = self
            .cleaned_gb
            .ok_or_else(|| BoardError::Validation("cleaned_gb is required".to_string()))?
            .parse("cleaned_gb")?;
        let starting_gb = match self.starting_gb {
            Some(q) => q.parse("starting_gb")?,
            None => 0.0,
        };

        Ok(ValidSubmission {
            name,
            cleaned_gb,
            starting_gb,
            location: self.location.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EditAction {
    Add,
    Update,
    Remove,
}

/// Parameters of the administrative edit path, sent either as a JSON body or
/// as query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditRequest {
    pub action: Option<String>,
    pub name: Option<String>,
    pub cleaned_gb: Option<Quantity>,
}

/// A validated edit. Every action writes full entries, never bare scores.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add { name: String, cleaned_gb: f64 },
    Update { name: String, cleaned_gb: f64 },
    Remove { name: String },
}

impl EditRequest {
    pub fn validate(self) -> BoardResult<Edit> {
        let action = match self.action.as_deref() {
            Some(a) if !a.is_empty() => EditAction::from_str(a)
                .map_err(|_| BoardError::Validation(format!("Unknown action '{a}'")))?,
            _ => return Err(BoardError::Validation(MISSING_PARAMETERS.to_string())),
        };
        let name = required_name(self.name)
            .map_err(|_| BoardError::Validation(MISSING_PARAMETERS.to_string()))?;

        match action {
            EditAction::Add => Ok(Edit::Add {
                name,
                cleaned_gb: required_quantity(self.cleaned_gb)?,
            }),
            EditAction::Update => Ok(Edit::Update {
                name,
                cleaned_gb: required_quantity(self.cleaned_gb)?,
            }),
            EditAction::Remove => Ok(Edit::Remove { name }),
        }
    }
}

fn required_quantity(quantity: Option<Quantity>) -> BoardResult<f64> {
    quantity
        .ok_or_else(|| BoardError::Validation(MISSING_PARAMETERS.to_string()))?
        .parse("cleaned_gb")
}

fn required_name(name: Option<String>) -> BoardResult<String> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n),
        _ => Err(BoardError::Validation("name is required".to_string())),
    }
}

impl Edit {
    pub fn action(&self) -> EditAction {
        match self {
            Edit::Add { .. } => EditAction::Add,
            Edit::Update { .. } => EditAction::Update,
            Edit::Remove { .. } => EditAction::Remove,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Edit::Add { name, .. } | Edit::Update { name, .. } | Edit::Remove { name } => name,
        }
    }
}
