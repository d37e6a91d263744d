use shared::domain::{FilterPatch, SortOrder};

use crate::views::filters::{parse_price_bound, parse_sort_field, parse_sort_order};

pub const HELP: &str = "\
commands:
  filter search <text>     name contains <text> (empty clears)
  filter min <price>       lower bound (empty clears)
  filter max <price>       upper bound (empty clears)
  sort <field> [asc|desc]  name, price or category
  page <n> | next | prev
  reload
  add                      create a product
  help
  quit";

/// One line typed at the `browse` prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Filter(FilterPatch),
    Page(u32),
    Next,
    Prev,
    Reload,
    Add,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
        match verb.to_ascii_lowercase().as_str() {
            "filter" => parse_filter(rest).map(Self::Filter),
            "sort" => parse_sort(rest).map(Self::Filter),
            "page" => rest
                .parse::<u32>()
                .map(Self::Page)
                .map_err(|_| format!("expected a page number, got {rest:?}")),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "reload" | "r" => Ok(Self::Reload),
            "add" => Ok(Self::Add),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {other} (try help)")),
        }
    }
}

fn parse_filter(rest: &str) -> Result<FilterPatch, String> {
    let (key, value) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(key, value)| (key, value.trim()));
    match key.to_ascii_lowercase().as_str() {
        "search" | "name" => Ok(FilterPatch::search(value)),
        "min" => parse_price_bound(value)
            .map(FilterPatch::min_price)
            .map_err(|e| e.to_string()),
        "max" => parse_price_bound(value)
            .map(FilterPatch::max_price)
            .map_err(|e| e.to_string()),
        other => Err(format!("unknown filter: {other:?} (search, min, max)")),
    }
}

fn parse_sort(rest: &str) -> Result<FilterPatch, String> {
    let mut words = rest.split_whitespace();
    let field = words
        .next()
        .ok_or_else(|| "sort needs a field".to_string())
        .and_then(|raw| parse_sort_field(raw).map_err(|e| e.to_string()))?;
    let order = match words.next() {
        Some(raw) => parse_sort_order(raw).map_err(|e| e.to_string())?,
        None => SortOrder::Ascending,
    };
    Ok(FilterPatch::sort(field, order))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
