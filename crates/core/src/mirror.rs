//! Optimistic local copies of fetched collections.
//!
//! A view fetches a collection once, keeps it in a [`Mirror`], and patches the
//! mirror in place after each successful mutating request. The backend is
//! never re-read to confirm the patch.

use serde::{Deserialize, Serialize};

use crate::models::{Order, Pharmacist, Product};
use crate::types::{OrderId, PharmacistId, ProductId, ReviewAction, ReviewStatus};

/// A record with a backend identifier.
pub trait Record {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// A record that goes through approve/reject moderation.
pub trait Reviewable: Record {
    fn set_status(&mut self, status: ReviewStatus);
}

impl Record for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.id
    }
}

impl Reviewable for Order {
    fn set_status(&mut self, status: ReviewStatus) {
        self.status = status;
    }
}

impl Record for Pharmacist {
    type Id = PharmacistId;

    fn id(&self) -> &PharmacistId {
        &self.id
    }
}

impl Reviewable for Pharmacist {
    fn set_status(&mut self, status: ReviewStatus) {
        self.status = status;
    }
}

impl Record for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// What a review patch did to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The record is now shown as approved.
    Approved,
    /// The record was dropped from the view.
    Removed,
    /// No record with that ID was in the view.
    Missing,
}

/// Ordered local copy of a backend collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mirror<T> {
    items: Vec<T>,
}

impl<T> Default for Mirror<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Mirror<T> {
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Append one record at the end.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }
}

impl<T: Record> Mirror<T> {
    /// Remove the first record with this ID.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

impl<T: Reviewable> Mirror<T> {
    /// Mirror a successful approve/reject request.
    ///
    /// Approve marks matching records `Approved`; reject drops the record.
    pub fn apply_review(&mut self, id: &T::Id, action: ReviewAction) -> ReviewOutcome {
        match action {
            ReviewAction::Approve => {
                let mut found = false;
                for item in self.items.iter_mut().filter(|item| item.id() == id) {
                    item.set_status(ReviewStatus::Approved);
                    found = true;
                }
                if found {
                    ReviewOutcome::Approved
                } else {
                    ReviewOutcome::Missing
                }
            }
            ReviewAction::Reject => self
                .remove(id)
                .map_or(ReviewOutcome::Missing, |_| ReviewOutcome::Removed),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Price;

    fn order(id: &str, status: ReviewStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: format!("customer-{id}"),
            total_amount: Price::parse("10").unwrap(),
            status,
        }
    }

    fn pharmacist(id: &str, status: ReviewStatus) -> Pharmacist {
        Pharmacist {
            id: PharmacistId::new(id),
            name: format!("pharmacist-{id}"),
            email: format!("{id}@pharmacy.test"),
            status,
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            description: String::new(),
            price: Price::parse("2").unwrap(),
            category: "Allergy".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn test_approve_updates_only_target_order() {
        let mut orders = Mirror::new(vec![
            order("a", ReviewStatus::Pending),
            order("b", ReviewStatus::Pending),
            order("c", ReviewStatus::Other("Shipped".to_string())),
        ]);
        let before = orders.clone();

        let outcome = orders.apply_review(&OrderId::new("b"), ReviewAction::Approve);

        assert_eq!(outcome, ReviewOutcome::Approved);
        assert_eq!(orders.items().len(), 3);
        assert_eq!(orders.items()[1].status, ReviewStatus::Approved);
        assert_eq!(orders.items()[0], before.items()[0]);
        assert_eq!(orders.items()[2], before.items()[2]);
    }

    #[test]
    fn test_reject_removes_exactly_that_order() {
        let mut orders = Mirror::new(vec![
            order("a", ReviewStatus::Pending),
            order("b", ReviewStatus::Pending),
            order("c", ReviewStatus::Pending),
        ]);

        let outcome = orders.apply_review(&OrderId::new("b"), ReviewAction::Reject);

        assert_eq!(outcome, ReviewOutcome::Removed);
        let ids: Vec<&str> = orders.items().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_review_unknown_id_is_noop() {
        let mut orders = Mirror::new(vec![order("a", ReviewStatus::Pending)]);
        let before = orders.clone();

        assert_eq!(
            orders.apply_review(&OrderId::new("zzz"), ReviewAction::Approve),
            ReviewOutcome::Missing
        );
        assert_eq!(
            orders.apply_review(&OrderId::new("zzz"), ReviewAction::Reject),
            ReviewOutcome::Missing
        );
        assert_eq!(orders, before);
    }

    #[test]
    fn test_pharmacist_review_contract() {
        let mut pharmacists = Mirror::new(vec![
            pharmacist("p1", ReviewStatus::Pending),
            pharmacist("p2", ReviewStatus::Pending),
        ]);

        pharmacists.apply_review(&PharmacistId::new("p1"), ReviewAction::Approve);
        assert_eq!(pharmacists.items()[0].status, ReviewStatus::Approved);
        assert!(pharmacists.items()[1].status.is_pending());

        pharmacists.apply_review(&PharmacistId::new("p2"), ReviewAction::Reject);
        assert_eq!(pharmacists.items().len(), 1);
        assert_eq!(pharmacists.items()[0].id.as_str(), "p1");
    }

    #[test]
    fn test_push_appends_one() {
        let mut products = Mirror::new(vec![product("1"), product("2")]);
        products.push(product("3"));

        assert_eq!(products.items().len(), 3);
        assert_eq!(products.items()[2].id.as_str(), "3");
    }

    #[test]
    fn test_remove_deletes_exactly_one() {
        let mut products = Mirror::new(vec![product("1"), product("2"), product("3")]);

        let removed = products.remove(&ProductId::new("2")).unwrap();

        assert_eq!(removed.id.as_str(), "2");
        assert_eq!(products.items().len(), 2);
        let ids: Vec<&str> = products.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(products.remove(&ProductId::new("2")).is_none());
    }

    #[test]
    fn test_mirror_serializes_as_plain_list() {
        let products = Mirror::new(vec![product("1")]);
        let value = serde_json::to_value(&products).unwrap();
        assert!(value.is_array());

        let back: Mirror<Product> = serde_json::from_value(value).unwrap();
        assert_eq!(back, products);
    }
}
