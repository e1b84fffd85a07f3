//! Checkout deep links.
//!
//! There is no payment flow: checking out means opening a chat with the
//! seller, pre-filled with an order message. Everything here is a pure
//! function of the catalog, the cart snapshot and the link configuration.
//!
//! A cart message looks like:
//!
//! ```text
//! Hello, I'd like to order the following from F&A portfolio:
//! 3 × Aurora Classic — ₹3,499 (img: https://fa.example/images/wrist1.png)
//! Total: ₹10,497
//! Please confirm the order and payment method.
//! ```

use fa_portfolio_core::{CurrencyCode, DestinationId};
use url::Url;

use crate::cart::{CartState, CartSummary};
use crate::catalog::{Catalog, Product};
use crate::config::StorefrontConfig;

/// Message sent when checking out an empty cart.
pub const EMPTY_CART_MESSAGE: &str =
    "Hello, I'm interested in your collection. Please share details.";

const ORDER_HEADER: &str = "Hello, I'd like to order the following from F&A portfolio:";
const ORDER_FOOTER: &str = "Please confirm the order and payment method.";

/// Marks that `urlencoding` escapes but browsers' `encodeURIComponent`
/// leaves as-is.
const KEPT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode `text` for a query value, byte-for-byte like
/// `encodeURIComponent`.
fn encode_component(text: &str) -> String {
    KEPT_MARKS
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |encoded, (escaped, mark)| {
            encoded.replace(escaped, mark)
        })
}

/// Builds order messages and messaging-app links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLinks {
    messaging_domain: String,
    destination: DestinationId,
    site_origin: String,
    currency: CurrencyCode,
}

impl CheckoutLinks {
    /// Create a builder.
    ///
    /// Only the origin of `site_url` (scheme, host and port) is used to make
    /// image paths absolute; any path component is ignored.
    #[must_use]
    pub fn new(
        messaging_domain: impl Into<String>,
        destination: DestinationId,
        site_url: &Url,
        currency: CurrencyCode,
    ) -> Self {
        Self {
            messaging_domain: messaging_domain.into(),
            destination,
            site_origin: site_url.origin().ascii_serialization(),
            currency,
        }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(
            config.messaging_domain.clone(),
            config.seller_phone.clone(),
            &config.base_url,
            config.currency,
        )
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Absolute URL of a product's image.
    #[must_use]
    pub fn image_url(&self, product: &Product) -> String {
        format!(
            "{}/{}",
            self.site_origin,
            product.image.trim_start_matches('/')
        )
    }

    /// Order request for a single product.
    #[must_use]
    pub fn build_item_message(&self, product: &Product) -> String {
        format!(
            "Hello, I want to buy *{}*.\nPrice: {}\nImage: {}\nPlease assist.",
            product.name,
            product.unit_price(self.currency),
            self.image_url(product),
        )
    }

    /// Order request for the whole cart.
    ///
    /// Lines whose product is missing from `catalog` are skipped and do not
    /// count toward the total.
    #[must_use]
    pub fn build_cart_message(&self, cart: &CartState, catalog: &Catalog) -> String {
        if cart.is_empty() {
            return EMPTY_CART_MESSAGE.to_string();
        }

        let summary = CartSummary::build(cart, catalog, self.currency);
        let mut lines = Vec::with_capacity(summary.lines.len() + 3);
        lines.push(ORDER_HEADER.to_string());
        for line in &summary.lines {
            lines.push(format!(
                "{} × {} — {} (img: {})",
                line.quantity,
                line.product.name,
                line.unit_price,
                self.image_url(line.product),
            ));
        }
        lines.push(format!("Total: {}", summary.total));
        lines.push(ORDER_FOOTER.to_string());
        lines.join("\n")
    }

    /// Link that opens a chat with the seller pre-filled with `message`.
    #[must_use]
    pub fn build_deep_link(&self, message: &str) -> String {
        format!(
            "https://{}/{}?text={}",
            self.messaging_domain,
            self.destination,
            encode_component(message)
        )
    }

    /// "Buy now" link for a single product.
    #[must_use]
    pub fn item_link(&self, product: &Product) -> String {
        self.build_deep_link(&self.build_item_message(product))
    }

    /// Checkout link for the whole cart.
    #[must_use]
    pub fn cart_link(&self, cart: &CartState, catalog: &Catalog) -> String {
        self.build_deep_link(&self.build_cart_message(cart, catalog))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use fa_portfolio_core::ProductId;

    use super::*;

    fn links() -> CheckoutLinks {
        CheckoutLinks::new(
            "wa.me",
            DestinationId::parse("919798303821").unwrap(),
            &Url::parse("https://fa.example/shop/index.html").unwrap(),
            CurrencyCode::INR,
        )
    }

    fn add(state: &mut CartState, id: &str, qty: u32) {
        state
            .add(&ProductId::parse(id).unwrap(), NonZeroU32::new(qty).unwrap())
            .unwrap();
    }

    #[test]
    fn test_image_url_uses_origin_only() {
        let catalog = Catalog::builtin();
        let w1 = catalog.get_by_id("w1").unwrap();
        assert_eq!(
            links().image_url(w1),
            "https://fa.example/images/wrist1.png"
        );
    }

    #[test]
    fn test_image_url_keeps_port() {
        let links = CheckoutLinks::new(
            "wa.me",
            DestinationId::parse("919798303821").unwrap(),
            &Url::parse("http://localhost:8000/").unwrap(),
            CurrencyCode::INR,
        );
        let catalog = Catalog::builtin();
        assert_eq!(
            links.image_url(catalog.get_by_id("s1").unwrap()),
            "http://localhost:8000/images/stopwatch1.png"
        );
    }

    #[test]
    fn test_item_message() {
        let catalog = Catalog::builtin();
        let message = links().build_item_message(catalog.get_by_id("w1").unwrap());
        assert_eq!(
            message,
            "Hello, I want to buy *Aurora Classic*.\n\
             Price: ₹3,499\n\
             Image: https://fa.example/images/wrist1.png\n\
             Please assist."
        );
    }

    #[test]
    fn test_cart_message_empty() {
        let catalog = Catalog::builtin();
        assert_eq!(
            links().build_cart_message(&CartState::new(), &catalog),
            EMPTY_CART_MESSAGE
        );
    }

    #[test]
    fn test_cart_message_lines_and_total() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        add(&mut cart, "w1", 3);
        add(&mut cart, "a1", 1);

        let message = links().build_cart_message(&cart, &catalog);
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(
            lines,
            [
                ORDER_HEADER,
                "3 × Aurora Classic — ₹3,499 (img: https://fa.example/images/wrist1.png)",
                "1 × Morning Bell Alarm — ₹1,499 (img: https://fa.example/images/alarm1.png)",
                "Total: ₹11,996",
                ORDER_FOOTER,
            ]
        );
    }

    #[test]
    fn test_cart_message_skips_stale_lines() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        add(&mut cart, "ghost-id", 5);
        add(&mut cart, "w1", 1);

        let message = links().build_cart_message(&cart, &catalog);
        assert!(!message.contains("ghost-id"));
        assert!(message.contains("Total: ₹3,499"));
    }

    #[test]
    fn test_cart_message_all_stale() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        add(&mut cart, "ghost-id", 5);

        let message = links().build_cart_message(&cart, &catalog);
        assert_eq!(
            message,
            format!("{ORDER_HEADER}\nTotal: ₹0\n{ORDER_FOOTER}")
        );
    }

    #[test]
    fn test_deep_link_encoding() {
        let link = links().build_deep_link("1 × *A* — ₹5\nok?");
        assert_eq!(
            link,
            "https://wa.me/919798303821?text=1%20%C3%97%20*A*%20%E2%80%94%20%E2%82%B95%0Aok%3F"
        );
    }

    #[test]
    fn test_encode_component_keeps_marks() {
        assert_eq!(encode_component("I'm (here)! *"), "I'm%20(here)!%20*");
        assert_eq!(encode_component("-_.~"), "-_.~");
        assert_eq!(encode_component("a&b=c/d"), "a%26b%3Dc%2Fd");
        // A literal percent sign stays escaped.
        assert_eq!(encode_component("%21"), "%2521");
    }

    #[test]
    fn test_cart_link_round_trips_message() {
        let catalog = Catalog::builtin();
        let mut cart = CartState::new();
        add(&mut cart, "w2", 2);

        let links = links();
        let link = links.cart_link(&cart, &catalog);
        let url = Url::parse(&link).unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/919798303821");

        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(text, links.build_cart_message(&cart, &catalog));
    }
}
