//! Product creation form: field buffers, the price input mask and
//! per-field validation.

use std::collections::BTreeMap;
use std::fmt;

use shared::domain::{Item, NewItem};
use tracing::{debug, warn};

use crate::store::CatalogStore;

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to create product";

/// Longest digit run the mask accepts; longer input fails validation.
const MAX_PRICE_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Category,
    Price,
    Description,
    ImageUrl,
}

impl FormField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" | "nome" => Some(Self::Name),
            "category" | "categoria" => Some(Self::Category),
            "price" | "preco" => Some(Self::Price),
            "description" | "descricao" => Some(Self::Description),
            "image" | "image_url" | "imagem" => Some(Self::ImageUrl),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Price => "price",
            Self::Description => "description",
            Self::ImageUrl => "image",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation messages keyed by field. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    price: String,
    pub description: String,
    pub image_url: String,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` for `field` and clears that field's error. Price input
    /// goes through [`format_price_input`].
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Category => self.category = value.to_string(),
            FormField::Price => self.price = format_price_input(value),
            FormField::Description => self.description = value.to_string(),
            FormField::ImageUrl => self.image_url = value.to_string(),
        }
        self.errors.clear(field);
    }

    /// The masked price as displayed, e.g. `R$ 1.234,56`.
    pub fn price_input(&self) -> &str {
        &self.price
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks every field and builds the creation payload.
    pub fn validate(&self) -> Result<NewItem, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Name is required");
        }
        if self.category.trim().is_empty() {
            errors.insert(FormField::Category, "Category is required");
        }
        let price = unmask_price(&self.price);
        if price_overflows(&self.price) {
            errors.insert(FormField::Price, "Price is too large");
        } else if self.price.is_empty() || price <= 0.0 {
            errors.insert(FormField::Price, "Price must be greater than zero");
        }
        if self.description.trim().is_empty() {
            errors.insert(FormField::Description, "Description is required");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let new = NewItem::new(
            self.name.clone(),
            self.category.clone(),
            price,
            self.description.clone(),
        )
        .map_err(|_| {
            let mut errors = FieldErrors::default();
            errors.insert(FormField::Price, "Price must be greater than zero");
            errors
        })?;
        let image_url = self.image_url.trim();
        Ok(if image_url.is_empty() {
            new
        } else {
            new.with_image_url(image_url)
        })
    }

    /// Validates, creates the item through the store and resets on success.
    /// Failures are kept on the form: per-field errors from validation, or a
    /// single submit-level message from the remote call.
    pub async fn submit(&mut self, store: &CatalogStore) -> Option<Item> {
        self.submit_error = None;
        let new = match self.validate() {
            Ok(new) => new,
            Err(errors) => {
                debug!(fields = errors.len(), "form: validation failed");
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::default();

        match store.add_product(new).await {
            Ok(item) => {
                self.reset();
                Some(item)
            }
            Err(err) => {
                warn!(%err, "form: submit failed");
                let message = err.to_string();
                self.submit_error = Some(if message.trim().is_empty() {
                    SUBMIT_FALLBACK_MESSAGE.to_string()
                } else {
                    message
                });
                None
            }
        }
    }
}

/// Masks free-form price input: non-digits are dropped, the digits are read
/// as cents and rendered as `R$ 1.234,56`. No digits gives an empty string.
/// Amounts longer than the mask can hold are left as bare digits so
/// validation can reject them.
pub fn format_price_input(raw: &str) -> String {
    if price_overflows(raw) {
        return significant_digits(raw);
    }
    match cents(raw) {
        Some(cents) => format_cents_grouped(cents),
        None => String::new(),
    }
}

/// Inverse of [`format_price_input`]: the decimal amount, `0.0` when the
/// input has no digits or is too long to represent.
pub fn unmask_price(masked: &str) -> f64 {
    cents(masked).map_or(0.0, |cents| cents as f64 / 100.0)
}

fn price_overflows(raw: &str) -> bool {
    significant_digits(raw).len() > MAX_PRICE_DIGITS
}

fn significant_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .collect()
}

fn cents(raw: &str) -> Option<u64> {
    if !raw.chars().any(|c| c.is_ascii_digit()) || price_overflows(raw) {
        return None;
    }
    let digits = significant_digits(raw);
    if digits.is_empty() {
        return Some(0);
    }
    digits.parse().ok()
}

fn format_cents_grouped(cents: u64) -> String {
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("R$ {grouped},{:02}", cents % 100)
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
