use serde::Deserialize;

use crate::error::DashboardError;
use crate::model::DEFAULT_PAGE_SIZE;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    #[serde(default)]
    pub owners: OwnerColumns,
    #[serde(default)]
    pub history: HistoryFormat,
    #[serde(default)]
    pub display: DisplayConfig,
}

// ---------------------------------------------------------------------------
// Owner file
// ---------------------------------------------------------------------------

/// Header names of the owner registry. These are a contract with whoever
/// produces the file, so they are configurable rather than validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OwnerColumns {
    pub delimiter: char,
    pub registration_column: String,
    pub boat_name_column: String,
    pub owner_name_column: String,
}

impl Default for OwnerColumns {
    fn default() -> Self {
        Self {
            delimiter: ',',
            registration_column: "immatriculation".into(),
            boat_name_column: "nom_bateau".into(),
            owner_name_column: "proprietaire".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// History file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryFormat {
    pub delimiter: char,
    pub date_separator: char,
}

impl Default for HistoryFormat {
    fn default() -> Self {
        Self {
            delimiter: ';',
            date_separator: '/',
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub page_size: usize,
    /// Shown in place of an empty or missing boat / owner name.
    pub placeholder: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            placeholder: "Non renseigné".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl BoardConfig {
    pub fn from_toml(input: &str) -> Result<Self, DashboardError> {
        let config: BoardConfig =
            toml::from_str(input).map_err(|e| DashboardError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.display.page_size == 0 {
            return Err(DashboardError::ConfigValidation(
                "display.page_size must be at least 1".into(),
            ));
        }

        let cols = &self.owners;
        let names = [
            ("registration_column", &cols.registration_column),
            ("boat_name_column", &cols.boat_name_column),
            ("owner_name_column", &cols.owner_name_column),
        ];
        for (key, name) in &names {
            if name.trim().is_empty() {
                return Err(DashboardError::ConfigValidation(format!(
                    "owners.{key} must not be empty"
                )));
            }
        }
        for (i, (key_a, a)) in names.iter().enumerate() {
            for (key_b, b) in &names[i + 1..] {
                if a == b {
                    return Err(DashboardError::ConfigValidation(format!(
                        "owners.{key_a} and owners.{key_b} both map to column '{a}'"
                    )));
                }
            }
        }

        // The CSV reader takes a single byte delimiter.
        for (key, c) in [
            ("owners.delimiter", cols.delimiter),
            ("history.delimiter", self.history.delimiter),
            ("history.date_separator", self.history.date_separator),
        ] {
            if !c.is_ascii() || c == '\n' || c == '\r' {
                return Err(DashboardError::ConfigValidation(format!(
                    "{key} must be a single ASCII character other than a line break, got {c:?}"
                )));
            }
        }
        if self.history.delimiter == self.history.date_separator {
            return Err(DashboardError::ConfigValidation(
                "history.delimiter and history.date_separator must differ".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
