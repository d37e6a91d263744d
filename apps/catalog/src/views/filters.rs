use anyhow::{anyhow, bail, Result};
use clap::Args;
use shared::domain::{FilterCriteria, FilterPatch, SortField, SortOrder};

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive substring of the product name.
    #[arg(long)]
    pub search: Option<String>,
    /// Inclusive lower price bound. An empty value clears it.
    #[arg(long)]
    pub min_price: Option<String>,
    /// Inclusive upper price bound. An empty value clears it.
    #[arg(long)]
    pub max_price: Option<String>,
    /// name | price | category
    #[arg(long)]
    pub sort_by: Option<String>,
    /// asc | desc
    #[arg(long)]
    pub order: Option<String>,
}

impl FilterArgs {
    pub fn to_patch(&self) -> Result<FilterPatch> {
        Ok(FilterPatch {
            search_name: self.search.clone(),
            min_price: self.min_price.as_deref().map(parse_price_bound).transpose()?,
            max_price: self.max_price.as_deref().map(parse_price_bound).transpose()?,
            sort_field: self.sort_by.as_deref().map(parse_sort_field).transpose()?,
            sort_order: self.order.as_deref().map(parse_sort_order).transpose()?,
        })
    }
}

/// Empty input means "no bound". Accepts `12.5` as well as `12,5`.
pub fn parse_price_bound(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| anyhow!("invalid price bound: {raw}"))?;
    if !value.is_finite() || value < 0.0 {
        bail!("price bound must be a non-negative number, got {raw}");
    }
    Ok(Some(value))
}

pub fn parse_sort_field(raw: &str) -> Result<SortField> {
    SortField::parse(raw).ok_or_else(|| anyhow!("unknown sort field: {raw} (name, price, category)"))
}

pub fn parse_sort_order(raw: &str) -> Result<SortOrder> {
    SortOrder::parse(raw).ok_or_else(|| anyhow!("unknown sort order: {raw} (asc, desc)"))
}

/// One-line summary of the active criteria.
pub fn render(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();
    if !criteria.search_name.is_empty() {
        parts.push(format!("search \"{}\"", criteria.search_name));
    }
    if let Some(min) = criteria.min_price {
        parts.push(format!("min {min:.2}"));
    }
    if let Some(max) = criteria.max_price {
        parts.push(format!("max {max:.2}"));
    }
    parts.push(format!(
        "sort {} {}",
        criteria.sort_field.label(),
        criteria.sort_order.label()
    ));
    format!("filters: {}", parts.join(", "))
}

#[cfg(test)]
#[path = "../tests/filters_tests.rs"]
mod tests;
