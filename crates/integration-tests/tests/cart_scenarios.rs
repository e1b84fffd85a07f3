//! End-to-end cart scenarios: mutations through the store, then checkout
//! messages and links built from what was persisted.

use fa_portfolio_integration_tests::{TEST_PHONE, TestContext, pid};
use fa_portfolio_storefront::{CartLoad, CartState, EMPTY_CART_MESSAGE, KeyValueStorage};

// =============================================================================
// Merge, remove, totals
// =============================================================================

#[test]
fn test_add_merges_into_single_line() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();

    store.add(&pid("w1"), 1).unwrap();
    store.add(&pid("w1"), 2).unwrap();

    let cart = store.read();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.lines()[0].product_id.as_str(), "w1");
    assert_eq!(cart.lines()[0].quantity.get(), 3);
    assert_eq!(store.total_quantity(), 3);

    let message = ctx.links.build_cart_message(&cart, &ctx.catalog);
    assert!(message.contains("3 × Aurora Classic — ₹3,499"));
    assert!(message.contains("Total: ₹10,497"));
}

#[test]
fn test_add_then_remove_gives_empty_message() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();

    store.add(&pid("w1"), 1).unwrap();
    store.remove(&pid("w1")).unwrap();

    let cart = store.read();
    assert!(cart.is_empty());
    assert_eq!(store.total_quantity(), 0);
    assert_eq!(
        ctx.links.build_cart_message(&cart, &ctx.catalog),
        EMPTY_CART_MESSAGE
    );
}

#[test]
fn test_remove_twice_is_harmless() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();
    store.add(&pid("a1"), 2).unwrap();
    store.add(&pid("s1"), 1).unwrap();

    let once = store.remove(&pid("a1")).unwrap();
    let twice = store.remove(&pid("a1")).unwrap();
    assert_eq!(once, twice);
    assert_eq!(store.read(), once);
}

#[test]
fn test_ghost_product_counts_but_is_not_billed() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();

    store.add(&pid("ghost-id"), 5).unwrap();
    assert_eq!(store.total_quantity(), 5);

    store.add(&pid("s1"), 1).unwrap();
    let message = ctx.links.build_cart_message(&store.read(), &ctx.catalog);
    assert!(!message.contains("ghost-id"));
    assert_eq!(
        message.lines().filter(|l| l.contains(" × ")).count(),
        1,
        "only the stopwatch line should be itemized"
    );
    assert!(message.contains("Total: ₹999"));
}

#[test]
fn test_total_quantity_tracks_line_sum() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();

    let steps: [(&str, u32); 4] = [("w1", 1), ("w2", 4), ("w1", 2), ("a1", 3)];
    let mut expected = 0;
    for (id, qty) in steps {
        store.add(&pid(id), qty).unwrap();
        expected += u64::from(qty);
        let sum: u64 = store
            .read()
            .lines()
            .iter()
            .map(|l| u64::from(l.quantity.get()))
            .sum();
        assert_eq!(store.total_quantity(), expected);
        assert_eq!(sum, expected);
    }
}

// =============================================================================
// Persistence format and round trip
// =============================================================================

#[test]
fn test_write_read_round_trip() {
    let ctx = TestContext::new();
    let state = CartState::from_json(r#"[{"id":"w3","qty":2},{"id":"s1","qty":1}]"#).unwrap();

    let mut store = ctx.open_store();
    store.write(&state).unwrap();

    let reopened = ctx.open_store();
    assert_eq!(reopened.load(), CartLoad::Loaded(state));
    assert_eq!(reopened.read(), reopened.read());
}

#[test]
fn test_persisted_value_format() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();
    store.add(&pid("w2"), 2).unwrap();

    let raw = store
        .storage()
        .get(fa_portfolio_storefront::CART_KEY)
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([{"id": "w2", "qty": 2}]));
}

// =============================================================================
// Links
// =============================================================================

#[test]
fn test_cart_link_decodes_to_message() {
    let ctx = TestContext::new();
    let mut store = ctx.open_store();
    store.add(&pid("w1"), 1).unwrap();
    store.add(&pid("a1"), 2).unwrap();

    let cart = store.read();
    let link = ctx.links.cart_link(&cart, &ctx.catalog);
    let url = url::Url::parse(&link).unwrap();
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), format!("/{TEST_PHONE}"));

    let (_, text) = url.query_pairs().find(|(k, _)| k == "text").unwrap();
    assert_eq!(text, ctx.links.build_cart_message(&cart, &ctx.catalog));
    assert!(text.ends_with("Total: ₹6,497\nPlease confirm the order and payment method."));
}

#[test]
fn test_item_link_for_every_product() {
    let ctx = TestContext::new();
    for product in ctx.catalog.iter() {
        let link = ctx.links.item_link(product);
        let url = url::Url::parse(&link).unwrap();
        let (_, text) = url.query_pairs().find(|(k, _)| k == "text").unwrap();
        assert!(text.contains(&format!("*{}*", product.name)));
        assert!(text.contains(&format!("https://fa.example/{}", product.image)));
    }
}
