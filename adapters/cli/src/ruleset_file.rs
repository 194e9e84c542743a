//! Loading and rendering of rulesets stored as TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use license_to_grill_core::Ruleset;

/// Loads the ruleset at `path`, or the default ruleset when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<Ruleset> {
    let Some(path) = path else {
        return Ok(Ruleset::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read ruleset {}", path.display()))?;
    let ruleset = parse(&text).with_context(|| format!("invalid ruleset {}", path.display()))?;
    log::info!("loaded ruleset from {}", path.display());
    Ok(ruleset)
}

/// Parses and validates a ruleset. Omitted sections keep their defaults.
pub(crate) fn parse(text: &str) -> Result<Ruleset> {
    let ruleset: Ruleset = toml::from_str(text).context("could not parse ruleset TOML")?;
    ruleset.validate()?;
    Ok(ruleset)
}

/// Renders `ruleset` as TOML.
pub(crate) fn render(ruleset: &Ruleset) -> Result<String> {
    toml::to_string_pretty(ruleset).context("could not serialise ruleset")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_default_loads_back() {
        let text = render(&Ruleset::default()).expect("default ruleset renders");
        let parsed = parse(&text).expect("rendered ruleset parses");
        assert_eq!(parsed, Ruleset::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").expect("empty ruleset"), Ruleset::default());
    }

    #[test]
    fn zero_refill_batch_fails_validation() {
        let error = parse("[refill]\nbatch_size = 0\n").expect_err("batch of zero");
        assert!(error.to_string().contains("batch size"), "{error}");
    }

    #[test]
    fn misweighted_table_fails_to_load() {
        let error = parse(
            "[generation]\nveg_count = [{ value = 0, weight = 50 }, { value = 1, weight = 60 }]\n",
        )
        .expect_err("weights sum to 110");
        assert!(format!("{error:#}").contains("sum to 110"), "{error:#}");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load(Some(Path::new("/nonexistent/ruleset.toml"))).expect_err("no such file");
        assert!(error.to_string().contains("/nonexistent/ruleset.toml"));
    }
}
