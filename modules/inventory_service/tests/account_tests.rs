//! Account, token and activity log integration tests

mod common;

use common::{entry, print_test_header, sign_in, test_module, TestEnv, SUPERADMIN_PASSWORD};
use inventory_service::contract::{InventoryError, NewUser, ProfileUpdate, Role};

fn new_user(username: &str, role: Role) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "secret".to_string(),
        role,
    }
}

#[tokio::test]
async fn test_superadmin_is_bootstrapped_once() {
    let module = test_module().await;
    let accounts = module.accounts();

    // second bootstrap on the same database is a no-op
    assert!(!accounts.ensure_superadmin("other").await.unwrap());

    let ctx = sign_in(&accounts, "superadmin", SUPERADMIN_PASSWORD).await;
    assert_eq!(ctx.role, Role::Superadmin);
    assert!(accounts.login("superadmin", "other").await.is_err());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let env = TestEnv::new().await;

    let err = env.accounts.login("superadmin", "wrong").await.unwrap_err();
    assert_eq!(err, InventoryError::unauthorized("Invalid username or password"));

    let err = env.accounts.login("nobody", "wrong").await.unwrap_err();
    assert_eq!(err, InventoryError::unauthorized("Invalid username or password"));
}

#[tokio::test]
async fn test_token_round_trip_and_tampering() {
    let env = TestEnv::new().await;
    let session = env
        .accounts
        .login("superadmin", SUPERADMIN_PASSWORD)
        .await
        .unwrap();
    assert_eq!(session.expires_in, 480 * 60);
    assert_eq!(session.user.username, "superadmin");

    let ctx = env.accounts.authenticate(&session.access_token).await.unwrap();
    assert_eq!(ctx.user_id, session.user.id);

    let tampered = format!("{}x", session.access_token);
    let err = env.accounts.authenticate(&tampered).await.unwrap_err();
    assert!(matches!(err, InventoryError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let env = TestEnv::new().await;
    let user = env
        .accounts
        .register(&env.superadmin, new_user("temp", Role::Viewer))
        .await
        .unwrap();
    let session = env.accounts.login("temp", "secret").await.unwrap();

    env.accounts.delete_user(&env.superadmin, user.id).await.unwrap();

    let err = env
        .accounts
        .authenticate(&session.access_token)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_register_role_rules() {
    print_test_header(
        "test_register_role_rules",
        "Admins may only create editors and viewers; usernames are unique",
    );
    let env = TestEnv::new().await;
    let admin = env.user("manager", Role::Admin).await;

    let editor = env
        .accounts
        .register(&admin, new_user("clerk", Role::Editor))
        .await
        .unwrap();
    assert_eq!(editor.role, Role::Editor);
    assert!(editor.password_hash.starts_with("$pbkdf2"));

    let err = env
        .accounts
        .register(&admin, new_user("boss", Role::Admin))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    let err = env
        .accounts
        .register(&env.superadmin, new_user("clerk", Role::Viewer))
        .await
        .unwrap_err();
    assert_eq!(err, InventoryError::conflict("Username already exists"));

    let editor_ctx = sign_in(&env.accounts, "clerk", "secret").await;
    let err = env
        .accounts
        .register(&editor_ctx, new_user("someone", Role::Viewer))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    let err = env
        .accounts
        .register(&env.superadmin, new_user("has space", Role::Viewer))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation { .. }));
}

#[tokio::test]
async fn test_delete_user_rules() {
    let env = TestEnv::new().await;
    let admin = env.user("manager", Role::Admin).await;
    let other_admin = env.user("deputy", Role::Admin).await;
    let viewer = env.user("watcher", Role::Viewer).await;

    let err = env
        .accounts
        .delete_user(&admin, admin.user_id)
        .await
        .unwrap_err();
    assert_eq!(err, InventoryError::conflict("Cannot delete your own account"));

    let err = env
        .accounts
        .delete_user(&admin, other_admin.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    let err = env
        .accounts
        .delete_user(&admin, env.superadmin.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    let removed = env.accounts.delete_user(&admin, viewer.user_id).await.unwrap();
    assert_eq!(removed, "watcher");

    let err = env
        .accounts
        .delete_user(&admin, viewer.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NotFound { .. }));

    // superadmin may remove admins
    env.accounts
        .delete_user(&env.superadmin, other_admin.user_id)
        .await
        .unwrap();

    let users = env.accounts.list_users(&env.superadmin).await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert!(names.contains(&"superadmin"));
    assert!(names.contains(&"manager"));
    assert_eq!(names.len(), 2);
}

#[tokio::test]
async fn test_update_profile() {
    let env = TestEnv::new().await;
    let editor = env.user("clerk", Role::Editor).await;
    env.user("watcher", Role::Viewer).await;

    let err = env
        .accounts
        .update_profile(
            &editor,
            ProfileUpdate {
                username: Some("watcher".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, InventoryError::conflict("Username already exists"));

    let user = env
        .accounts
        .update_profile(
            &editor,
            ProfileUpdate {
                name: Some("  Clara Clerk ".to_string()),
                username: Some("clara".to_string()),
                password: Some("new-secret".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.name.as_deref(), Some("Clara Clerk"));
    assert_eq!(user.username, "clara");
    assert_eq!(user.role, Role::Editor);

    assert!(env.accounts.login("clerk", "clerk-pw").await.is_err());
    let ctx = sign_in(&env.accounts, "clara", "new-secret").await;
    assert_eq!(ctx.user_id, editor.user_id);

    let profile = env.accounts.profile(&ctx).await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Clara Clerk"));
}

#[tokio::test]
async fn test_activity_log_records_actions_newest_first() {
    print_test_header(
        "test_activity_log_records_actions_newest_first",
        "Mutating operations leave an audit entry with the actor's name and role",
    );
    let env = TestEnv::new().await;
    let editor = env.user("clerk", Role::Editor).await;
    env.service
        .add_stock(&editor, entry("Soap", 2, "1.50", "2025-10-01"))
        .await
        .unwrap();
    env.service.create_item(&editor, "Bandage").await.unwrap();

    let viewer = env.user("watcher", Role::Viewer).await;
    let logs = env.accounts.activity_logs(&viewer).await.unwrap();

    let actions: Vec<_> = logs.iter().map(|l| l.action.as_str()).collect();
    assert_eq!(
        actions,
        vec!["Create User", "Create Item", "Add Product", "Create User"]
    );

    let add = &logs[2];
    assert_eq!(add.username, "clerk");
    assert_eq!(add.user_role, Role::Editor);
    assert_eq!(add.target, "product Soap");
    assert_eq!(
        add.details.as_deref(),
        Some("Added 2 units at $1.50 each (Total: $3.00)")
    );
}
