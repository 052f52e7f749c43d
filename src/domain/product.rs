use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A cart line item: catalog details plus the quantity in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl Product {
    /// Builds a line item from catalog details with the given quantity.
    pub fn from_details(details: ProductDetails, amount: u32) -> Self {
        Self {
            id: details.id,
            title: details.title,
            price: details.price,
            image: details.image,
            amount,
        }
    }

    /// Price of this line item (`price × amount`).
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Product as served by the catalog. Fields the cart does not keep are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl ProductDetails {
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal_multiplies_price_by_amount() {
        let details = ProductDetails::new(1, "Tênis de Caminhada", 179.9, "https://img/1.jpg");
        let item = Product::from_details(details, 3);
        assert!((item.subtotal() - 539.7).abs() < 1e-9);
    }

    #[test]
    fn test_catalog_payload_ignores_extra_fields() {
        let body = r#"{"id":2,"title":"Tênis VR","price":139.9,"image":"https://img/2.jpg","brand":"x"}"#;
        let details: ProductDetails = serde_json::from_str(body).unwrap();
        assert_eq!(details.id, ProductId(2));
        assert_eq!(details.title, "Tênis VR");
    }
}
