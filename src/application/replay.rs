use super::store::CartStore;
use crate::domain::{Action, Intent};
use tracing::info;

/// Outcome of replaying a batch of actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub ignored: usize,
}

/// Dispatches each action in order. Unrecognized actions are counted and
/// skipped without touching the state.
pub fn replay(store: &mut CartStore, actions: &[Action]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for action in actions {
        match Intent::from_action(action) {
            Some(intent) => {
                store.dispatch(intent);
                summary.applied += 1;
            }
            None => {
                store.dispatch_action(action);
                summary.ignored += 1;
            }
        }
    }

    info!(applied = summary.applied, ignored = summary.ignored, "replayed actions");
    summary
}
