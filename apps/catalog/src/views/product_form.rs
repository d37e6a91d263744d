use anyhow::Result;
use clap::Args;
use client_core::{FormField, ProductForm};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPTS: [(FormField, &str); 5] = [
    (FormField::Name, "Name"),
    (FormField::Category, "Category"),
    (FormField::Price, "Price"),
    (FormField::Description, "Description"),
    (FormField::ImageUrl, "Image URL (optional)"),
];

#[derive(Args, Debug, Clone, Default)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Digits are read as cents: `123456` is R$ 1.234,56.
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

impl ProductArgs {
    pub fn fill(&self, form: &mut ProductForm) {
        let fields = [
            (FormField::Name, &self.name),
            (FormField::Category, &self.category),
            (FormField::Price, &self.price),
            (FormField::Description, &self.description),
            (FormField::ImageUrl, &self.image_url),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_field(field, value);
            }
        }
    }
}

/// Asks for every field on `output`, reading answers line by line. Returns
/// `false` when input ends before the form is complete.
pub async fn prompt<R, W>(form: &mut ProductForm, input: &mut R, output: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    for (field, label) in PROMPTS {
        output.write_all(format!("{label}: ").as_bytes()).await?;
        output.flush().await?;
        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            return Ok(false);
        }
        form.set_field(field, line.trim_end_matches(['\r', '\n']));
        if field == FormField::Price && !form.price_input().is_empty() {
            output
                .write_all(format!("  -> {}\n", form.price_input()).as_bytes())
                .await?;
        }
    }
    Ok(true)
}

/// Field errors, then the submit-level error, one per line.
pub fn render_feedback(form: &ProductForm) -> String {
    let mut out = String::new();
    for (field, message) in form.errors().iter() {
        out.push_str(&format!("{field}: {message}\n"));
    }
    if let Some(message) = form.submit_error() {
        out.push_str(&format!("error: {message}\n"));
    }
    out
}

#[cfg(test)]
#[path = "../tests/product_form_tests.rs"]
mod tests;
