use shared::domain::Item;

/// Price as shown on a card: two decimals, comma separator, no grouping.
pub fn format_price(price: f64) -> String {
    format!("R$ {:.2}", price).replace('.', ",")
}

pub fn render(item: &Item) -> String {
    let mut out = format!(
        "{}  [{}]\n  {}\n  category: {}\n",
        item.name,
        item.id,
        format_price(item.price),
        item.category
    );
    if !item.description.trim().is_empty() {
        out.push_str(&format!("  {}\n", item.description.trim()));
    }
    if let Some(url) = item.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        out.push_str(&format!("  image: {url}\n"));
    }
    out
}

#[cfg(test)]
#[path = "../tests/product_card_tests.rs"]
mod tests;
