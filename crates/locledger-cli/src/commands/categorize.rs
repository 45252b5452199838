//! Rule testing command for categories and locations

use std::path::Path;

use anyhow::{Context, Result};
use locledger_core::{Categorizer, Category, LocationResolver};

use super::load_config;

pub fn cmd_categorize(code: &str, description: &str, config: Option<&Path>) -> Result<()> {
    let (category, location) = categorize_description(code, description, config)?;

    println!("Account:     {}", code);
    println!("Description: {}", description);
    println!("Category:    {}", category);
    println!("Location:    {}", location);

    Ok(())
}

/// Category and resolved location for one description
pub fn categorize_description(
    code: &str,
    description: &str,
    config: Option<&Path>,
) -> Result<(Category, String)> {
    let config = load_config(config)?;
    let categorizer = Categorizer::new(&config);
    let resolver = LocationResolver::new(&config).context("Failed to build location rules")?;

    Ok((
        categorizer.categorize(code, description),
        resolver.resolve(description),
    ))
}
