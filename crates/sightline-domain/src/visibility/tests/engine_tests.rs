//! Visibility engine tests: precedence tiers, ownership, dual assignee
//! forms, sub-module scoping, and filter construction.

use std::sync::Arc;

use crate::filter::FilterExpression as F;
use crate::model::{
    fields, modules, Action, Assignees, PermissionEntry, RecordOwnership, Role, User,
};
use crate::resolver::tests::mocks::MockDirectory;
use crate::visibility::VisibilityEngine;

fn engine_on(directory: Arc<MockDirectory>) -> VisibilityEngine<MockDirectory, MockDirectory> {
    VisibilityEngine::new(Arc::clone(&directory), directory)
}

fn show_on_leads() -> Vec<PermissionEntry> {
    vec![PermissionEntry::new(modules::LEADS, [Action::Show])]
}

fn show_and_junior_on_leads() -> Vec<PermissionEntry> {
    vec![PermissionEntry::new(
        modules::LEADS,
        [Action::Show, Action::Junior],
    )]
}

/// Manager role above an agent role, with one user on each.
async fn seed_manager_and_agent(directory: &MockDirectory) {
    directory.add_role(Role::new("r-mgr", "Manager")).await;
    directory
        .add_role(Role::with_parent("r-agent", "Agent", "r-mgr"))
        .await;
    directory.add_user(User::with_role("M", "r-mgr")).await;
    directory.add_user(User::with_role("A", "r-agent")).await;
}

// ========== Single-record decisions ==========

#[tokio::test]
async fn empty_permissions_deny_every_record() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let record = RecordOwnership::created_by("someone")
        .with_assignees(Assignees::Many(vec!["other".to_string()]));

    let visible = engine
        .can_view(&record, "U", &[], modules::LEADS)
        .await
        .unwrap();
    assert!(!visible, "no permissions means no records, not an error");
}

#[tokio::test]
async fn super_admin_sees_unrelated_records() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let record = RecordOwnership::created_by("U2")
        .with_assignees(Assignees::One("U3".to_string()));

    let visible = engine
        .can_view(&record, "U", &[PermissionEntry::super_admin()], modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "super admin is module- and ownership-independent");
}

#[tokio::test]
async fn creator_sees_own_record_regardless_of_assignment() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let record = RecordOwnership::created_by("U")
        .with_assignees(Assignees::Many(vec!["U9".to_string()]));

    let visible = engine
        .can_view(&record, "U", &show_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "creator ownership is sufficient under basic view");
}

#[tokio::test]
async fn assignee_is_visible_under_both_storage_forms() {
    let engine = engine_on(Arc::new(MockDirectory::new()));

    let scalar = RecordOwnership::created_by("U2")
        .with_assignees(Assignees::One("U1".to_string()));
    let list = RecordOwnership::created_by("U2")
        .with_assignees(Assignees::Many(vec!["U1".to_string()]));

    for record in [scalar, list] {
        let visible = engine
            .can_view(&record, "U1", &show_on_leads(), modules::LEADS)
            .await
            .unwrap();
        assert!(visible, "both assignee forms must reach the assignee");
    }
}

#[tokio::test]
async fn reporter_sees_record_without_being_assignee() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let record = RecordOwnership::created_by("U2")
        .with_assignees(Assignees::One("U3".to_string()))
        .with_reporters(["U1".to_string()]);

    let visible = engine
        .can_view(&record, "U1", &show_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible);
}

#[tokio::test]
async fn direct_assignment_is_visible() {
    // Agent U, lead created by someone else but assigned to U.
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let lead = RecordOwnership::created_by("U2")
        .with_assignees(Assignees::Many(vec!["U".to_string()]));

    let visible = engine
        .can_view(&lead, "U", &show_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible);
}

#[tokio::test]
async fn unrelated_unassigned_record_is_hidden_from_basic_view() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let lead = RecordOwnership::created_by("U3").with_assignees(Assignees::Many(vec![]));

    let visible = engine
        .can_view(&lead, "U", &show_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(!visible, "basic view does not reach unassigned records");
}

#[tokio::test]
async fn unassigned_record_is_visible_under_cascade() {
    let directory = Arc::new(MockDirectory::new());
    seed_manager_and_agent(&directory).await;
    let engine = engine_on(directory);

    let lead = RecordOwnership::created_by("someone-else");
    let visible = engine
        .can_view(&lead, "M", &show_and_junior_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "cascade-capable users see unassigned records");
}

#[tokio::test]
async fn cascade_reaches_subordinate_created_records() {
    let directory = Arc::new(MockDirectory::new());
    seed_manager_and_agent(&directory).await;
    let engine = engine_on(directory);

    // Created by the agent, assigned elsewhere: reachable only through
    // the subordinate relationship.
    let lead = RecordOwnership::created_by("A")
        .with_assignees(Assignees::One("outsider".to_string()));
    let visible = engine
        .can_view(&lead, "M", &show_and_junior_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "cascade follows created_by into the subtree");
}

#[tokio::test]
async fn cascade_reaches_subordinate_assigned_records() {
    let directory = Arc::new(MockDirectory::new());
    seed_manager_and_agent(&directory).await;
    let engine = engine_on(directory);

    let lead = RecordOwnership::created_by("outsider")
        .with_assignees(Assignees::Many(vec!["A".to_string()]));
    let visible = engine
        .can_view(&lead, "M", &show_and_junior_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "cascade follows assigned_to into the subtree");
}

#[tokio::test]
async fn cascade_does_not_reach_non_subordinates() {
    let directory = Arc::new(MockDirectory::new());
    seed_manager_and_agent(&directory).await;
    // A peer manager outside M's subtree.
    directory.add_role(Role::new("r-peer", "Manager")).await;
    directory.add_user(User::with_role("P", "r-peer")).await;
    let engine = engine_on(directory);

    let lead = RecordOwnership::created_by("P")
        .with_assignees(Assignees::One("P".to_string()));
    let visible = engine
        .can_view(&lead, "M", &show_and_junior_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(!visible, "cascade stops at the manager's own subtree");
}

#[tokio::test]
async fn module_admin_is_scoped_to_its_exact_module() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let login_lead = RecordOwnership::created_by("U2").in_submodule(modules::LOGIN);

    // Admin of "leads" does not reach a record living in the login queue.
    let leads_admin = vec![PermissionEntry::admin_of(modules::LEADS)];
    let visible = engine
        .can_view(&login_lead, "U", &leads_admin, modules::LEADS)
        .await
        .unwrap();
    assert!(!visible, "module admin does not cross sub-module boundaries");

    // Admin of "login" sees it, requested under leads or not.
    let login_admin = vec![PermissionEntry::admin_of(modules::LOGIN)];
    let visible = engine
        .can_view(&login_lead, "U", &login_admin, modules::LEADS)
        .await
        .unwrap();
    assert!(visible, "the effective module's admin sees the record");

    // So does a super admin.
    let visible = engine
        .can_view(&login_lead, "U", &[PermissionEntry::super_admin()], modules::LEADS)
        .await
        .unwrap();
    assert!(visible);
}

#[tokio::test]
async fn basic_view_follows_the_effective_module() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let login_lead = RecordOwnership::created_by("U").in_submodule(modules::LOGIN);

    // Creator with show on leads only: the record answers to login.
    let visible = engine
        .can_view(&login_lead, "U", &show_on_leads(), modules::LEADS)
        .await
        .unwrap();
    assert!(!visible, "leads-only view does not cover a login-queue record");

    let login_view = vec![PermissionEntry::new(modules::LOGIN, [Action::Show])];
    let visible = engine
        .can_view(&login_lead, "U", &login_view, modules::LEADS)
        .await
        .unwrap();
    assert!(visible);
}

// ========== Filter construction ==========

#[tokio::test]
async fn deny_filter_for_empty_permissions() {
    let engine = engine_on(Arc::new(MockDirectory::new()));

    let filter = engine
        .build_filter("U", &[], modules::LEADS, None)
        .await
        .unwrap();
    assert!(filter.matches_nothing(), "deny-by-default yields the sentinel");
}

#[tokio::test]
async fn admins_get_extra_constraints_back_unchanged() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let extra = F::eq(fields::SUBMODULE, modules::LOGIN);

    let filter = engine
        .build_filter(
            "U",
            &[PermissionEntry::super_admin()],
            modules::LEADS,
            Some(extra.clone()),
        )
        .await
        .unwrap();
    assert_eq!(filter, extra);

    let filter = engine
        .build_filter(
            "U",
            &[PermissionEntry::admin_of(modules::LEADS)],
            modules::LEADS,
            None,
        )
        .await
        .unwrap();
    assert_eq!(filter, F::All, "no extra constraints means everything");
}

#[tokio::test]
async fn basic_view_filter_emits_both_assignee_forms() {
    let engine = engine_on(Arc::new(MockDirectory::new()));

    let filter = engine
        .build_filter("U", &show_on_leads(), modules::LEADS, None)
        .await
        .unwrap();

    assert_eq!(
        filter,
        F::Or {
            children: vec![
                F::eq(fields::CREATED_BY, "U"),
                F::eq(fields::ASSIGNED_TO, "U"),
                F::has(fields::ASSIGNED_TO, "U"),
                F::has(fields::ASSIGN_REPORT_TO, "U"),
            ]
        },
        "scalar and list assignee clauses are both present"
    );
}

#[tokio::test]
async fn cascade_filter_includes_subordinates_and_unassigned() {
    let directory = Arc::new(MockDirectory::new());
    seed_manager_and_agent(&directory).await;
    let engine = engine_on(directory);

    let filter = engine
        .build_filter("M", &show_and_junior_on_leads(), modules::LEADS, None)
        .await
        .unwrap();

    assert_eq!(
        filter,
        F::Or {
            children: vec![
                F::eq(fields::CREATED_BY, "M"),
                F::eq(fields::ASSIGNED_TO, "M"),
                F::has(fields::ASSIGNED_TO, "M"),
                F::has(fields::ASSIGN_REPORT_TO, "M"),
                F::is_in(fields::CREATED_BY, ["A"]),
                F::is_in(fields::ASSIGNED_TO, ["A"]),
                F::has_any(fields::ASSIGNED_TO, ["A"]),
                F::Unassigned,
            ]
        }
    );
}

#[tokio::test]
async fn cascade_filter_without_subordinates_still_covers_unassigned() {
    let directory = Arc::new(MockDirectory::new());
    directory.add_role(Role::new("r-solo", "Solo")).await;
    directory.add_user(User::with_role("S", "r-solo")).await;
    let engine = engine_on(directory);

    let filter = engine
        .build_filter("S", &show_and_junior_on_leads(), modules::LEADS, None)
        .await
        .unwrap();

    assert_eq!(
        filter,
        F::Or {
            children: vec![
                F::eq(fields::CREATED_BY, "S"),
                F::eq(fields::ASSIGNED_TO, "S"),
                F::has(fields::ASSIGNED_TO, "S"),
                F::has(fields::ASSIGN_REPORT_TO, "S"),
                F::Unassigned,
            ]
        },
        "empty subordinate set adds no membership clauses"
    );
}

#[tokio::test]
async fn extra_constraints_narrow_the_ownership_clause() {
    let engine = engine_on(Arc::new(MockDirectory::new()));
    let extra = F::eq(fields::SUBMODULE, modules::LOGIN);

    let filter = engine
        .build_filter("U", &show_on_leads(), modules::LEADS, Some(extra.clone()))
        .await
        .unwrap();

    let F::And { children } = filter else {
        panic!("expected a conjunction, got {filter:?}");
    };
    assert_eq!(children.len(), 2);
    assert!(
        matches!(children[0], F::Or { .. }),
        "first arm is the ownership disjunction"
    );
    assert_eq!(children[1], extra);
}

#[tokio::test]
async fn deny_filter_ignores_extra_constraints() {
    let engine = engine_on(Arc::new(MockDirectory::new()));

    let filter = engine
        .build_filter(
            "U",
            &[],
            modules::LEADS,
            Some(F::eq(fields::SUBMODULE, modules::LOGIN)),
        )
        .await
        .unwrap();
    assert!(
        filter.matches_nothing(),
        "narrowing a deny-all filter must not widen it"
    );
}
