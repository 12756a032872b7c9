//! Property-based tests for the capability classifier.

use proptest::prelude::*;

use crate::model::{modules, Action, ActionSet, ModuleSelector, PermissionEntry};
use crate::permission::{classify, Capabilities};

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Show),
        Just(Action::Junior),
        Just(Action::All),
        Just(Action::Wildcard),
        "[a-z]{1,8}".prop_map(Action::from),
    ]
}

fn action_set_strategy() -> impl Strategy<Value = ActionSet> {
    prop_oneof![
        action_strategy().prop_map(ActionSet::Single),
        prop::collection::vec(action_strategy(), 0..4).prop_map(ActionSet::List),
    ]
}

fn module_strategy() -> impl Strategy<Value = ModuleSelector> {
    prop_oneof![
        Just(ModuleSelector::Any),
        prop::sample::select(vec![modules::LEADS, modules::TASKS, modules::LOGIN])
            .prop_map(|name| ModuleSelector::Named(name.to_string())),
    ]
}

fn entry_strategy() -> impl Strategy<Value = PermissionEntry> {
    (module_strategy(), action_set_strategy())
        .prop_map(|(module, actions)| PermissionEntry { module, actions })
}

fn entries_strategy() -> impl Strategy<Value = Vec<PermissionEntry>> {
    prop::collection::vec(entry_strategy(), 0..8)
}

/// Flag-wise implication: every flag set in `weaker` is set in `stronger`.
fn implies(weaker: Capabilities, stronger: Capabilities) -> bool {
    (!weaker.is_super_admin || stronger.is_super_admin)
        && (!weaker.is_module_admin || stronger.is_module_admin)
        && (!weaker.has_basic_view || stronger.has_basic_view)
        && (!weaker.has_junior_cascade || stronger.has_junior_cascade)
}

proptest! {
    #[test]
    fn classification_is_order_independent(entries in entries_strategy()) {
        let forward = classify(&entries, modules::LEADS);
        let mut reversed = entries.clone();
        reversed.reverse();
        prop_assert_eq!(forward, classify(&reversed, modules::LEADS));

        if !entries.is_empty() {
            let mut rotated = entries.clone();
            rotated.rotate_left(1);
            prop_assert_eq!(forward, classify(&rotated, modules::LEADS));
        }
    }

    #[test]
    fn classification_is_monotonic_under_extension(
        entries in entries_strategy(),
        extra in entry_strategy(),
    ) {
        let base = classify(&entries, modules::LEADS);
        let mut extended = entries;
        extended.push(extra);
        let grown = classify(&extended, modules::LEADS);
        prop_assert!(implies(base, grown), "adding an entry must never revoke a flag");
    }

    #[test]
    fn wildcard_action_list_never_grants_super_admin(module in module_strategy()) {
        let entries = vec![PermissionEntry {
            module,
            actions: ActionSet::List(vec![Action::Wildcard]),
        }];
        prop_assert!(!classify(&entries, modules::LEADS).is_super_admin);
    }

    #[test]
    fn unknown_tokens_alone_grant_nothing(tokens in prop::collection::vec("[b-z]{4,10}", 1..4)) {
        // Length >= 4 rules out "all"; filter the other known tokens.
        let entries: Vec<PermissionEntry> = tokens
            .into_iter()
            .filter(|t| t != "show" && t != "junior" && t != "all")
            .map(|t| PermissionEntry {
                module: ModuleSelector::Any,
                actions: ActionSet::List(vec![Action::from(t)]),
            })
            .collect();
        prop_assert!(!classify(&entries, modules::LEADS).any_view());
    }
}
