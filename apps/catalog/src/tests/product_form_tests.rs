use super::*;

#[tokio::test]
async fn prompt_fills_every_field_and_echoes_masked_price() {
    let mut form = ProductForm::new();
    let mut input: &[u8] = b"Webcam\nPerifericos\n15990\nFull HD\n\n";
    let mut output = Vec::new();

    let complete = prompt(&mut form, &mut input, &mut output)
        .await
        .expect("prompt");

    assert!(complete);
    assert_eq!(form.name, "Webcam");
    assert_eq!(form.price_input(), "R$ 159,90");
    assert_eq!(form.image_url, "");
    let shown = String::from_utf8(output).expect("utf8");
    assert!(shown.starts_with("Name: Category: Price:   -> R$ 159,90\n"));
    assert!(form.validate().is_ok());
}

#[tokio::test]
async fn prompt_reports_truncated_input() {
    let mut form = ProductForm::new();
    let mut input: &[u8] = b"Webcam\n";
    let mut output = Vec::new();

    let complete = prompt(&mut form, &mut input, &mut output)
        .await
        .expect("prompt");

    assert!(!complete);
}

#[test]
fn args_fill_only_given_fields() {
    let args = ProductArgs {
        name: Some("Hub USB".into()),
        price: Some("89.90".into()),
        ..ProductArgs::default()
    };
    let mut form = ProductForm::new();
    args.fill(&mut form);

    assert_eq!(form.name, "Hub USB");
    assert_eq!(form.price_input(), "R$ 89,90");
    assert_eq!(form.category, "");
}

#[tokio::test]
async fn feedback_lists_field_errors_after_rejected_submit() {
    let settings = client_core::Settings {
        api_url: "http://127.0.0.1:9/".to_string(),
        ..client_core::Settings::default()
    };
    let client = client_core::CatalogClient::with_session(
        settings,
        std::sync::Arc::new(client_core::MemorySessionStore::with_token("t")),
    )
    .expect("client");
    let mut form = ProductForm::new();
    form.set_field(FormField::Name, "Hub");

    assert!(form.submit(&client.store).await.is_none());

    assert_eq!(
        render_feedback(&form),
        "category: Category is required\n\
         price: Price must be greater than zero\n\
         description: Description is required\n"
    );
}
