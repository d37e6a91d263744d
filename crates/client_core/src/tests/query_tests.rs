use super::*;
use proptest::prelude::*;
use shared::domain::ItemId;

fn item(id: &str, name: &str, category: &str, price: f64) -> Item {
    Item {
        id: ItemId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        price,
        description: String::new(),
        image_url: None,
    }
}

fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn min_price_keeps_only_expensive_items() {
    let items = vec![
        item("1", "Mouse", "Periféricos", 50.0),
        item("2", "Keyboard", "Periféricos", 150.0),
    ];
    let criteria = FilterCriteria {
        min_price: Some(100.0),
        ..FilterCriteria::default()
    };
    assert_eq!(names(&apply_filters(&items, &criteria)), ["Keyboard"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let items = vec![
        item("1", "Mouse Logitech MX", "Periféricos", 399.99),
        item("2", "Notebook Dell", "Eletrônicos", 2999.99),
        item("3", "mousepad", "Periféricos", 39.9),
    ];
    let criteria = FilterCriteria {
        search_name: "MOUSE".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        names(&apply_filters(&items, &criteria)),
        ["Mouse Logitech MX", "mousepad"]
    );

    let criteria = FilterCriteria {
        search_name: "dell".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(names(&apply_filters(&items, &criteria)), ["Notebook Dell"]);
}

#[test]
fn bounds_are_inclusive() {
    let items = vec![item("1", "A", "x", 10.0), item("2", "B", "x", 20.0)];
    let criteria = FilterCriteria {
        min_price: Some(10.0),
        max_price: Some(20.0),
        ..FilterCriteria::default()
    };
    assert_eq!(apply_filters(&items, &criteria).len(), 2);
}

#[test]
fn inverted_bounds_yield_empty_view() {
    let items = vec![item("1", "A", "x", 10.0), item("2", "B", "x", 20.0)];
    let criteria = FilterCriteria {
        min_price: Some(30.0),
        max_price: Some(5.0),
        ..FilterCriteria::default()
    };
    assert!(apply_filters(&items, &criteria).is_empty());
}

#[test]
fn empty_items_give_empty_view() {
    assert!(apply_filters(&[], &FilterCriteria::default()).is_empty());
}

#[test]
fn name_sort_ignores_case() {
    let items = vec![
        item("1", "Banana", "x", 1.0),
        item("2", "apple", "x", 1.0),
    ];
    let view = apply_filters(&items, &FilterCriteria::default());
    assert_eq!(names(&view), ["apple", "Banana"]);
}

#[test]
fn category_sort_descending() {
    let items = vec![
        item("1", "A", "cozinha", 1.0),
        item("2", "B", "Banho", 1.0),
        item("3", "C", "Áudio", 1.0),
        item("4", "D", "Eletrônicos", 1.0),
    ];
    let criteria = FilterCriteria {
        sort_field: SortField::Category,
        sort_order: SortOrder::Descending,
        ..FilterCriteria::default()
    };
    let view = apply_filters(&items, &criteria);
    let categories: Vec<&str> = view.iter().map(|i| i.category.as_str()).collect();
    // Lowercase code-point order puts the accented letter last.
    assert_eq!(categories, ["Áudio", "Eletrônicos", "cozinha", "Banho"]);
}

#[test]
fn price_ties_keep_input_order_in_both_directions() {
    let items = vec![
        item("1", "first", "x", 10.0),
        item("2", "second", "x", 5.0),
        item("3", "third", "x", 10.0),
    ];
    let mut criteria = FilterCriteria {
        sort_field: SortField::Price,
        ..FilterCriteria::default()
    };
    assert_eq!(
        names(&apply_filters(&items, &criteria)),
        ["second", "first", "third"]
    );

    criteria.sort_order = SortOrder::Descending;
    assert_eq!(
        names(&apply_filters(&items, &criteria)),
        ["first", "third", "second"]
    );
}

fn arb_item() -> impl Strategy<Value = Item> {
    (
        "[a-z0-9]{1,8}",
        "[A-Za-z ]{0,12}",
        "[A-Za-z]{1,8}",
        0u32..100_000,
    )
        .prop_map(|(id, name, category, cents)| {
            item(&id, &name, &category, f64::from(cents) / 100.0)
        })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        "[A-Za-z]{0,3}",
        proptest::option::of(0u32..1_000),
        proptest::option::of(0u32..1_000),
        prop_oneof![
            Just(SortField::Name),
            Just(SortField::Price),
            Just(SortField::Category)
        ],
        prop_oneof![Just(SortOrder::Ascending), Just(SortOrder::Descending)],
    )
        .prop_map(|(search_name, min, max, sort_field, sort_order)| FilterCriteria {
            search_name,
            min_price: min.map(f64::from),
            max_price: max.map(f64::from),
            sort_field,
            sort_order,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: the view holds exactly the items satisfying every predicate.
    #[test]
    fn view_is_exactly_the_matching_items(
        items in proptest::collection::vec(arb_item(), 0..40),
        criteria in arb_criteria(),
    ) {
        let view = apply_filters(&items, &criteria);
        prop_assert!(view.iter().all(|i| matches(i, &criteria)));
        let expected = items.iter().filter(|i| matches(i, &criteria)).count();
        prop_assert_eq!(view.len(), expected);
    }

    /// Property: price sort is monotone in the requested direction.
    #[test]
    fn price_sort_is_monotone(
        items in proptest::collection::vec(arb_item(), 0..40),
        descending in any::<bool>(),
    ) {
        let criteria = FilterCriteria {
            sort_field: SortField::Price,
            sort_order: if descending { SortOrder::Descending } else { SortOrder::Ascending },
            ..FilterCriteria::default()
        };
        let view = apply_filters(&items, &criteria);
        for pair in view.windows(2) {
            if descending {
                prop_assert!(pair[0].price >= pair[1].price);
            } else {
                prop_assert!(pair[0].price <= pair[1].price);
            }
        }
    }

    /// Property: equal sort keys keep their relative input order.
    #[test]
    fn sort_is_stable(
        items in proptest::collection::vec(arb_item(), 0..40),
        criteria in arb_criteria(),
    ) {
        let items: Vec<Item> = items
            .into_iter()
            .enumerate()
            .map(|(index, mut it)| {
                it.id = ItemId(index.to_string());
                it
            })
            .collect();
        let position = |it: &Item| it.id.as_str().parse::<usize>().unwrap_or(usize::MAX);
        let view = apply_filters(&items, &criteria);
        for pair in view.windows(2) {
            if compare_by(&pair[0], &pair[1], criteria.sort_field) == Ordering::Equal {
                prop_assert!(
                    position(&pair[0]) < position(&pair[1]),
                    "tie reordered: {:?} before {:?}",
                    pair[0].id,
                    pair[1].id
                );
            }
        }
    }

    /// Property: deriving the view twice from the same inputs gives the same sequence.
    #[test]
    fn apply_filters_is_idempotent(
        items in proptest::collection::vec(arb_item(), 0..40),
        criteria in arb_criteria(),
    ) {
        let once = apply_filters(&items, &criteria);
        let twice = apply_filters(&items, &criteria);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(apply_filters(&once, &criteria), once);
    }
}
