//! The cart store: single owner of the live cart state.
//!
//! Views never mutate the state. They read it through [`CartStore::state`]
//! and submit intents through [`CartStore::dispatch`]. Observers register
//! interest in a derived field and are called synchronously, in registration
//! order, after any transition that changed that field.

use crate::domain::{apply, Action, CartState, Intent, LineItem};
use tracing::debug;

/// A piece of cart state an observer can watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Items,
    Amount,
    Total,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Items, Field::Amount, Field::Total];

    fn changed(self, before: &CartState, after: &CartState) -> bool {
        match self {
            Field::Items => before.items() != after.items(),
            Field::Amount => before.amount() != after.amount(),
            Field::Total => before.total() != after.total(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CartState)>;

struct Subscription {
    id: SubscriptionId,
    field: Field,
    callback: Callback,
}

pub struct CartStore {
    state: CartState,
    revision: u64,
    subscriptions: Vec<Subscription>,
    next_subscription: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::from_state(CartState::default())
    }
}

impl CartStore {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self::from_state(CartState::new(items))
    }

    pub fn from_state(state: CartState) -> Self {
        Self {
            state,
            revision: 0,
            subscriptions: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Number of intents applied since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies an intent and notifies observers of the fields it changed.
    ///
    /// Returns the fields that changed.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Field> {
        let next = apply(self.state.clone(), intent);
        let changed: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| field.changed(&self.state, &next))
            .collect();

        self.state = next;
        self.revision += 1;
        debug!(
            ?intent,
            revision = self.revision,
            amount = self.state.amount(),
            total = %self.state.total(),
            ?changed,
            "dispatched intent"
        );

        self.notify(&changed);
        changed
    }

    /// Decodes and dispatches a raw action. Unrecognized actions leave the
    /// state and revision untouched.
    pub fn dispatch_action(&mut self, action: &Action) -> Vec<Field> {
        match Intent::from_action(action) {
            Some(intent) => self.dispatch(intent),
            None => {
                debug!(kind = %action.kind, payload = ?action.payload, "ignoring unrecognized action");
                Vec::new()
            }
        }
    }

    pub fn subscribe<F>(&mut self, field: Field, callback: F) -> SubscriptionId
    where
        F: FnMut(&CartState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id,
            field,
            callback: Box::new(callback),
        });
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    fn notify(&mut self, changed: &[Field]) {
        let state = &self.state;
        for subscription in self
            .subscriptions
            .iter_mut()
            .filter(|s| changed.contains(&s.field))
        {
            (subscription.callback)(state);
        }
    }
}
