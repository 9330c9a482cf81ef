use std::path::Path;

use crate::error::FixtureError;
use crate::plan::types::Plan;

/// Parse a YAML plan file into a [`Plan`].
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if the file cannot be read,
/// or [`FixtureError::Yaml`] if the YAML is malformed.
pub fn parse_plan(path: &Path) -> Result<Plan, FixtureError> {
    let content = std::fs::read_to_string(path)?;
    parse_plan_str(&content)
}

/// Parse a YAML plan from a string.
///
/// # Errors
///
/// Returns [`FixtureError::Yaml`] if the YAML is malformed or names an
/// unknown field.
pub fn parse_plan_str(yaml: &str) -> Result<Plan, FixtureError> {
    let plan: Plan = serde_yaml::from_str(yaml)?;
    Ok(plan)
}
