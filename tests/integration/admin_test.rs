//! Integration tests for projects, users, the catalog and the dashboard.

use chrono::Utc;

use docflow_core::error::ErrorKind;
use docflow_entity::catalog::CatalogKind;
use docflow_entity::document::WorkflowStatus;
use docflow_entity::project::CreateProject;
use docflow_entity::user::{CreateUser, RoleSet, UserRole};

use crate::helpers::TestApp;

fn project_payload(code: &str) -> CreateProject {
    CreateProject {
        name: "Southern Expansion".to_string(),
        code: code.to_string(),
        description: String::new(),
        wbs: "WBS-S-003".to_string(),
        substation: "SE South".to_string(),
        direct_client: "South Energy".to_string(),
        final_client: "Regulator".to_string(),
    }
}

#[tokio::test]
async fn test_project_codes_are_unique() {
    let app = TestApp::new().await;
    let admin = app.actor("admin@docflow.local").await;
    let leader = app.actor("alice@docflow.local").await;

    let created = app
        .admin
        .create_project(&admin, project_payload("SOUTH-1"))
        .await
        .unwrap();
    assert_eq!(created.code, "SOUTH-1");

    let err = app
        .admin
        .create_project(&admin, project_payload("south-1"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = app
        .admin
        .create_project(&leader, project_payload("SOUTH-2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_leader_creates_users_in_own_project() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let other_project = app.project("LT-NORTH").await;

    let user = app
        .admin
        .create_user(
            &leader,
            CreateUser {
                name: "Erin Designer".to_string(),
                email: "Erin@Docflow.local".to_string(),
                roles: RoleSet::single(UserRole::Designer),
                project_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(user.email, "erin@docflow.local");
    assert_eq!(user.project_id, leader.project_id);

    let err = app
        .admin
        .create_user(
            &leader,
            CreateUser {
                name: "Frank".to_string(),
                email: "frank@docflow.local".to_string(),
                roles: RoleSet::single(UserRole::Designer),
                project_id: Some(other_project),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .admin
        .create_user(
            &leader,
            CreateUser {
                name: "Root".to_string(),
                email: "root@docflow.local".to_string(),
                roles: RoleSet::single(UserRole::Admin),
                project_id: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .admin
        .create_user(
            &leader,
            CreateUser {
                name: "Erin Again".to_string(),
                email: "erin@docflow.local".to_string(),
                roles: RoleSet::single(UserRole::Reader),
                project_id: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_toggle_role_keeps_at_least_one() {
    let app = TestApp::new().await;
    let admin = app.actor("admin@docflow.local").await;
    let bob = app.admin.find_user_by_email("BOB@docflow.local").await.unwrap();

    let updated = app
        .admin
        .toggle_role(&admin, bob.id, UserRole::TechLeader)
        .await
        .unwrap();
    assert!(updated.has_role(UserRole::Designer));
    assert!(updated.has_role(UserRole::TechLeader));

    let updated = app
        .admin
        .toggle_role(&admin, bob.id, UserRole::TechLeader)
        .await
        .unwrap();
    assert!(!updated.has_role(UserRole::TechLeader));

    let err = app
        .admin
        .toggle_role(&admin, bob.id, UserRole::Designer)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_scoped_leader_lists_own_project_users() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let designer = app.actor("bob@docflow.local").await;

    let users = app.admin.list_users(&leader).await.unwrap();
    let emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(
        emails,
        vec![
            "alice@docflow.local",
            "bob@docflow.local",
            "carol@client.local"
        ]
    );

    let err = app.admin.list_users(&designer).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_catalog_edits_require_manager() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let designer = app.actor("bob@docflow.local").await;

    let catalog = app
        .catalog
        .add(&leader, CatalogKind::Discipline, "Telecom - TC")
        .await
        .unwrap();
    assert!(catalog.contains(CatalogKind::Discipline, "Telecom - TC"));

    let err = app
        .catalog
        .add(&leader, CatalogKind::Discipline, "Telecom - TC")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let err = app
        .catalog
        .remove(&designer, CatalogKind::Discipline, "Telecom - TC")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let catalog = app
        .catalog
        .remove(&leader, CatalogKind::Discipline, "Telecom - TC")
        .await
        .unwrap();
    assert!(!catalog.contains(CatalogKind::Discipline, "Telecom - TC"));
}

#[tokio::test]
async fn test_dashboard_for_tech_leader() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let today = Utc::now().date_naive();

    let report = app.dashboard.build(&leader, None, today).await.unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.pending_client, 2);
    assert_eq!(report.execution, 1);
    assert_eq!(report.cancelled, 0);
    assert_eq!(report.my_tasks, 1);

    let overdue: Vec<&str> = report.overdue.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(overdue, vec!["XV-CV-015"]);
    assert_eq!(report.overdue[0].days_left, -2);

    let upcoming: Vec<&str> = report.upcoming.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(upcoming, vec!["XV-EL-001"]);

    let evaluating = report
        .by_status
        .iter()
        .find(|c| c.status == WorkflowStatus::EvaluationLt)
        .expect("status row");
    assert_eq!(evaluating.count, 1);
}

#[tokio::test]
async fn test_dashboard_rejects_foreign_project() {
    let app = TestApp::new().await;
    let reader = app.actor("dave@docflow.local").await;
    let substation = app.project("XINGU-500").await;
    let today = Utc::now().date_naive();

    let err = app
        .dashboard
        .build(&reader, Some(substation), today)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}
