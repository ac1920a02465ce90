//! Cart state and the reducer that transitions it.
//!
//! All mutation goes through [`apply`]. Every recognized intent rebuilds the
//! item sequence and then recomputes the derived totals with a full fold, so
//! `amount` and `total` can never disagree with `items`.

use super::models::{ItemId, LineItem, Money};
use serde::{Deserialize, Serialize};

/// A user-initiated request to change the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Increment(ItemId),
    Decrement(ItemId),
    RemoveItem(ItemId),
    ClearCart,
}

/// The raw, untyped form of an intent, as read from a script or event source.
///
/// ```json
/// { "type": "INCREMENT", "payload": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ItemId>,
}

impl Action {
    pub fn new(kind: impl Into<String>, payload: Option<ItemId>) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

impl Intent {
    /// Decodes a raw action. Unknown types, and id-carrying types without a
    /// payload, are not intents.
    pub fn from_action(action: &Action) -> Option<Intent> {
        match (action.kind.as_str(), action.payload) {
            ("INCREMENT", Some(id)) => Some(Intent::Increment(id)),
            ("DECREMENT", Some(id)) => Some(Intent::Decrement(id)),
            ("REMOVE_ITEM", Some(id)) => Some(Intent::RemoveItem(id)),
            ("CLEAR_CART", _) => Some(Intent::ClearCart),
            _ => None,
        }
    }
}

/// Item sequence plus its derived totals.
///
/// The totals are private so nothing outside this module can set them
/// independently of a recompute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartState {
    items: Vec<LineItem>,
    amount: u64,
    total: Money,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(seed_items())
    }
}

impl CartState {
    pub fn new(items: Vec<LineItem>) -> Self {
        let (amount, total) = calculate_totals(&items);
        Self { items, amount, total }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total unit count across all items.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Folds the item sequence into `(unit count, monetary total)`.
///
/// Both sums saturate rather than overflow.
pub fn calculate_totals(items: &[LineItem]) -> (u64, Money) {
    items.iter().fold((0, Money::ZERO), |(amount, total), item| {
        (amount.saturating_add(u64::from(item.amount)), total + item.line_total())
    })
}

/// Applies an intent, returning the next state.
///
/// Total over all inputs: ids that match nothing leave the items untouched.
///
/// # Examples
///
/// ```
/// use tcart::domain::{apply, CartState, Intent};
///
/// let state = apply(CartState::default(), Intent::Increment(1));
/// assert_eq!(state.amount(), 4);
/// assert_eq!(state.total().to_string(), "2399.96");
/// ```
pub fn apply(state: CartState, intent: Intent) -> CartState {
    let CartState { mut items, .. } = state;

    match intent {
        Intent::Increment(id) => {
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.amount = item.amount.saturating_add(1);
            }
        }
        Intent::Decrement(id) => {
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.amount = item.amount.saturating_sub(1);
            }
        }
        Intent::RemoveItem(id) => items.retain(|item| item.id != id),
        Intent::ClearCart => return CartState::empty(),
    }

    CartState::new(items)
}

/// Applies a raw action. Anything that does not decode to an [`Intent`]
/// returns the state unchanged.
pub fn apply_action(state: CartState, action: &Action) -> CartState {
    match Intent::from_action(action) {
        Some(intent) => apply(state, intent),
        None => state,
    }
}

/// The fixed product list the cart starts with.
pub fn seed_items() -> Vec<LineItem> {
    vec![
        LineItem::new(
            1,
            "Samsung Galaxy S7",
            Money::from_cents(59999),
            "https://res.cloudinary.com/diqqf3eq2/image/upload/v1583368215/phone-2_ohtt5s.png",
        ),
        LineItem::new(
            2,
            "google pixel",
            Money::from_cents(49999),
            "https://res.cloudinary.com/diqqf3eq2/image/upload/v1583371867/phone-1_gvesln.png",
        ),
        LineItem::new(
            3,
            "Xiaomi Redmi Note 2",
            Money::from_cents(69999),
            "https://res.cloudinary.com/diqqf3eq2/image/upload/v1583368224/phone-3_h2s6fo.png",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_totals_consistent(state: &CartState) {
        let amount: u64 = state.items().iter().map(|i| u64::from(i.amount)).sum();
        let total: Money = state.items().iter().map(|i| i.price * i.amount).sum();
        assert_eq!(state.amount(), amount);
        assert_eq!(state.total(), total);
    }

    #[test]
    fn test_seed_state() {
        let state = CartState::default();
        assert_eq!(state.items().len(), 3);
        assert!(state.items().iter().all(|i| i.amount == 1));
        assert_eq!(state.amount(), 3);
        assert_eq!(state.total().to_string(), "1799.97");
    }

    #[test]
    fn test_full_scenario() {
        let state = CartState::default();

        let state = apply(state, Intent::Increment(1));
        assert_eq!(state.item(1).unwrap().amount, 2);
        assert_eq!(state.amount(), 4);
        assert_eq!(state.total(), Money::from_cents(239996));

        let state = apply(state, Intent::Decrement(2));
        assert_eq!(state.item(2).unwrap().amount, 0);
        assert_eq!(state.amount(), 3);
        assert_eq!(state.total(), Money::from_cents(189997));

        let state = apply(state, Intent::RemoveItem(3));
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.amount(), 2);
        assert_eq!(state.total(), Money::from_cents(119998));

        let state = apply(state, Intent::ClearCart);
        assert!(state.is_empty());
        assert_eq!(state.amount(), 0);
        assert_eq!(state.total(), Money::ZERO);
        assert_eq!(state.total().to_string(), "0.00");
    }

    #[test]
    fn test_decrement_floors_at_zero_and_keeps_item() {
        let mut state = CartState::default();
        for _ in 0..5 {
            state = apply(state, Intent::Decrement(1));
        }
        let item = state.item(1).unwrap();
        assert_eq!(item.amount, 0);
        assert_eq!(state.items().len(), 3);
        assert_eq!(state.amount(), 2);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let before = CartState::default();
        for intent in [Intent::Increment(99), Intent::Decrement(99), Intent::RemoveItem(99)] {
            let after = apply(before.clone(), intent);
            assert_eq!(after, before);
        }
    }

    #[test]
    fn test_remove_twice_is_idempotent() {
        let once = apply(CartState::default(), Intent::RemoveItem(2));
        let twice = apply(once.clone(), Intent::RemoveItem(2));
        assert_eq!(once, twice);
        assert!(once.item(2).is_none());
    }

    #[test]
    fn test_clear_twice_is_idempotent() {
        let once = apply(CartState::default(), Intent::ClearCart);
        let twice = apply(once.clone(), Intent::ClearCart);
        assert_eq!(once, twice);
        assert_eq!(once, CartState::empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let state = apply(CartState::default(), Intent::Increment(2));
        let ids: Vec<_> = state.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_action_decoding() {
        assert_eq!(
            Intent::from_action(&Action::new("INCREMENT", Some(1))),
            Some(Intent::Increment(1))
        );
        assert_eq!(
            Intent::from_action(&Action::new("CLEAR_CART", None)),
            Some(Intent::ClearCart)
        );
        assert_eq!(Intent::from_action(&Action::new("DECREMENT", None)), None);
        assert_eq!(Intent::from_action(&Action::new("CHECKOUT", Some(1))), None);
        assert_eq!(Intent::from_action(&Action::new("increment", Some(1))), None);
    }

    #[test]
    fn test_unrecognized_action_is_identity() {
        let before = CartState::default();
        let after = apply_action(before.clone(), &Action::new("APPLY_COUPON", Some(1)));
        assert_eq!(after, before);
    }

    #[test]
    fn test_action_json_shape() {
        let action: Action = serde_json::from_str(r#"{"type":"REMOVE_ITEM","payload":3}"#).unwrap();
        assert_eq!(Intent::from_action(&action), Some(Intent::RemoveItem(3)));

        let json = serde_json::to_string(&Action::new("CLEAR_CART", None)).unwrap();
        assert_eq!(json, r#"{"type":"CLEAR_CART"}"#);
    }

    #[test]
    fn test_huge_totals_saturate() {
        let items = vec![
            LineItem {
                id: 1,
                title: "Yacht".to_string(),
                price: Money::from_cents(i64::MAX / 2),
                image: String::new(),
                amount: 2,
            },
            LineItem::new(2, "Dinghy", Money::from_cents(i64::MAX / 2), ""),
        ];
        let state = apply(CartState::new(items), Intent::Increment(1));
        assert_eq!(state.item(1).unwrap().amount, 3);
        assert_eq!(state.amount(), 4);
        assert_eq!(state.total(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_increment_saturates_at_max_quantity() {
        let mut item = LineItem::new(1, "Bolt", Money::from_cents(1), "");
        item.amount = u32::MAX;
        let state = apply(CartState::new(vec![item]), Intent::Increment(1));
        assert_eq!(state.item(1).unwrap().amount, u32::MAX);
        assert_eq!(state.total(), Money::from_cents(i64::from(u32::MAX)));
    }

    fn intent_strategy() -> impl Strategy<Value = Intent> {
        prop_oneof![
            4 => (0u32..6).prop_map(Intent::Increment),
            4 => (0u32..6).prop_map(Intent::Decrement),
            2 => (0u32..6).prop_map(Intent::RemoveItem),
            1 => Just(Intent::ClearCart),
        ]
    }

    fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec((0i64..200_000, 0u32..10), 0..6).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(idx, (cents, amount))| LineItem {
                    id: idx as ItemId + 1,
                    title: format!("item {}", idx + 1),
                    price: Money::from_cents(cents),
                    image: String::new(),
                    amount,
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn totals_always_match_fold(
            items in items_strategy(),
            intents in prop::collection::vec(intent_strategy(), 0..40),
        ) {
            let mut state = CartState::new(items);
            assert_totals_consistent(&state);
            for intent in intents {
                state = apply(state, intent);
                assert_totals_consistent(&state);
            }
        }

        #[test]
        fn decrement_never_removes(items in items_strategy(), id in 0u32..6, times in 0usize..15) {
            let before = CartState::new(items);
            let mut state = before.clone();
            for _ in 0..times {
                state = apply(state, Intent::Decrement(id));
            }
            prop_assert_eq!(state.items().len(), before.items().len());
        }

        #[test]
        fn clear_is_idempotent(items in items_strategy()) {
            let once = apply(CartState::new(items), Intent::ClearCart);
            let twice = apply(once.clone(), Intent::ClearCart);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn missing_id_leaves_state_unchanged(items in items_strategy(), intent in intent_strategy()) {
            let missing = match intent {
                Intent::ClearCart => return Ok(()),
                Intent::Increment(_) => Intent::Increment(1000),
                Intent::Decrement(_) => Intent::Decrement(1000),
                Intent::RemoveItem(_) => Intent::RemoveItem(1000),
            };
            let before = CartState::new(items);
            let after = apply(before.clone(), missing);
            prop_assert_eq!(after, before);
        }
    }
}
