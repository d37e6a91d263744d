use super::*;
use shared::domain::ItemId;

#[test]
fn price_uses_comma_and_two_decimals() {
    assert_eq!(format_price(1234.5), "R$ 1234,50");
    assert_eq!(format_price(0.0), "R$ 0,00");
    assert_eq!(format_price(399.99), "R$ 399,99");
}

#[test]
fn card_shows_image_only_when_present() {
    let mut item = Item {
        id: ItemId::from("2"),
        name: "Mouse Logitech MX Master".into(),
        category: "Periféricos".into(),
        price: 399.99,
        description: "Mouse sem fio".into(),
        image_url: None,
    };
    let card = render(&item);
    assert!(card.starts_with("Mouse Logitech MX Master  [2]\n"));
    assert!(card.contains("R$ 399,99"));
    assert!(card.contains("category: Periféricos"));
    assert!(card.contains("Mouse sem fio"));
    assert!(!card.contains("image:"));

    item.image_url = Some("https://img.example/mouse.png".into());
    assert!(render(&item).contains("image: https://img.example/mouse.png"));
}
