use serde::{Deserialize, Serialize};

use super::{Product, ProductId};
use crate::error::InvalidCart;

/// Ordered list of line items, unique by product id, every amount at least 1.
///
/// Deserialization goes through [`Cart::from_items`], so a payload that breaks
/// either rule never becomes a `Cart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from line items, checking the cart invariants.
    pub fn from_items(items: Vec<Product>) -> Result<Self, InvalidCart> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(InvalidCart::ZeroAmount(item.id));
            }
            if items[..index].iter().any(|other| other.id == item.id) {
                return Err(InvalidCart::DuplicateItem(item.id));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(Product::subtotal).sum()
    }

    /// Appends a new line item. Fails if the product is already in the cart
    /// or the item has no quantity.
    pub fn push(&mut self, item: Product) -> Result<(), InvalidCart> {
        if item.amount == 0 {
            return Err(InvalidCart::ZeroAmount(item.id));
        }
        if self.contains(item.id) {
            return Err(InvalidCart::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Adds one unit to an existing line item. Returns the new amount.
    pub fn increment(&mut self, id: ProductId) -> Option<u32> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.amount = item.amount.saturating_add(1);
        Some(item.amount)
    }

    /// Sets the amount of an existing line item. Zero is refused, the item is
    /// left as it was and `false` is returned, as it is for an unknown id.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Removes a line item, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductDetails;

    fn item(id: u64, amount: u32) -> Product {
        Product::from_details(
            ProductDetails::new(id, format!("Tênis {id}"), 100.0 + id as f64, format!("https://img/{id}.jpg")),
            amount,
        )
    }

    #[test]
    fn test_duplicate_ids_are_refused() {
        let result = Cart::from_items(vec![item(1, 1), item(1, 2)]);
        assert_eq!(result, Err(InvalidCart::DuplicateItem(ProductId(1))));

        let mut cart = Cart::from_items(vec![item(1, 1)]).unwrap();
        assert!(cart.push(item(1, 1)).is_err());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_zero_amount_never_enters_the_cart() {
        assert_eq!(
            Cart::from_items(vec![item(3, 0)]),
            Err(InvalidCart::ZeroAmount(ProductId(3)))
        );

        let mut cart = Cart::from_items(vec![item(3, 2)]).unwrap();
        assert!(!cart.set_amount(ProductId(3), 0));
        assert_eq!(cart.get(ProductId(3)).map(|p| p.amount), Some(2));
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_items() {
        let mut cart = Cart::from_items(vec![item(1, 1), item(2, 1), item(3, 1)]).unwrap();
        let removed = cart.remove(ProductId(2)).unwrap();
        assert_eq!(removed.id, ProductId(2));
        let ids: Vec<_> = cart.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(3)]);
        assert!(cart.remove(ProductId(2)).is_none());
    }

    #[test]
    fn test_total_sums_subtotals() {
        let cart = Cart::from_items(vec![item(1, 2), item(2, 1)]).unwrap();
        assert!((cart.total() - (101.0 * 2.0 + 102.0)).abs() < 1e-9);
    }

    #[test]
    fn test_payload_breaking_invariants_does_not_deserialize() {
        let payload = r#"[{"id":1,"title":"a","price":1.0,"image":"i","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(payload).is_err());
    }
}
