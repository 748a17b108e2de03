//! Cart line item.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId};

/// One product-quantity pairing in a cart.
///
/// The product's fields are copied in at add time and serialized flat next to
/// `quantity`, so a stored cart is a JSON array of
/// `{"id": .., "title": .., ..., "stock": .., "quantity": ..}` objects.
///
/// `product.stock` is a snapshot taken when the line was created. It is not
/// refreshed from the live catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line for `product` with a quantity of one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// `price * quantity` for this line.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Pemrograman JavaScript".to_string(),
            author: "John Doe".to_string(),
            price: Price::new(120_000),
            stock: 15,
            image: String::new(),
            category: "Pemrograman".to_string(),
        }
    }

    #[test]
    fn test_serializes_flat() {
        let line = CartLine {
            product: sample_product(),
            quantity: 3,
        };

        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["stock"], 15);
        assert_eq!(value["quantity"], 3);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: sample_product(),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Price::new(240_000));
    }

    #[test]
    fn test_reads_stored_line() {
        let json = r#"{"id":2,"title":"Desain UI/UX Modern","author":"Jane Smith",
            "price":95000,"stock":8,"image":"","category":"Desain","quantity":4}"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product_id(), ProductId::new(2));
        assert_eq!(line.quantity, 4);
    }
}
