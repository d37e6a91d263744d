use client_core::{PageInfo, PaginationMode};
use shared::domain::Item;

use super::{pagination, product_card};

pub const EMPTY_MESSAGE: &str = "No products found.";

/// The visible page of the filtered view. An empty view is a normal state,
/// not an error.
pub fn render(visible: &[Item], info: &PageInfo, mode: PaginationMode) -> String {
    if info.filtered_count == 0 {
        return format!("{EMPTY_MESSAGE}\n");
    }
    let total = match mode {
        PaginationMode::Server => info.total_count.max(info.filtered_count as u64),
        PaginationMode::Client => info.filtered_count as u64,
    };
    let mut out = format!("Showing {} of {} products\n\n", visible.len(), total);
    for item in visible {
        out.push_str(&product_card::render(item));
        out.push('\n');
    }
    if info.total_pages > 1 {
        let controls = pagination::PageControls::new(info.current_page, info.total_pages);
        out.push_str(&pagination::render(&controls));
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../tests/product_list_tests.rs"]
mod tests;
