//! Storage layer tests: migrations on restart and database constraints

mod common;

use chrono::Utc;
use common::{memory_db, print_test_header, sign_in, test_config, SUPERADMIN_PASSWORD};
use inventory_service::contract::{InventoryError, Role, User};
use inventory_service::domain::UserRepository;
use inventory_service::infra::storage::repositories::SeaOrmUserRepository;
use inventory_service::InventoryModule;
use std::sync::Arc;

fn user(username: &str) -> User {
    User {
        id: 0,
        username: username.to_string(),
        name: None,
        password_hash: "$pbkdf2-sha256$unused".to_string(),
        role: Role::Viewer,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_restart_over_migrated_database() {
    print_test_header(
        "test_restart_over_migrated_database",
        "Migrations and the superadmin bootstrap are no-ops on an existing database",
    );
    let db = memory_db().await;
    let config = test_config();

    InventoryModule::migrate(&db).await.unwrap();
    InventoryModule::migrate(&db).await.unwrap();

    let first = InventoryModule::from_connection(db.clone(), &config)
        .await
        .unwrap();
    let restarted = InventoryModule::from_connection(db, &config).await.unwrap();

    let ctx = sign_in(&restarted.accounts(), "superadmin", SUPERADMIN_PASSWORD).await;
    let users = first.accounts().list_users(&ctx).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Superadmin);
}

#[tokio::test]
async fn test_duplicate_username_insert_is_a_conflict() {
    let db = memory_db().await;
    InventoryModule::migrate(&db).await.unwrap();
    let users = SeaOrmUserRepository::new(Arc::new(db));

    let created = users.create(&user("clerk")).await.unwrap();
    assert!(created.id > 0);

    let err = users.create(&user("clerk")).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<InventoryError>(),
        Some(&InventoryError::conflict("Username already exists"))
    );

    let other = users.create(&user("watcher")).await.unwrap();
    let renamed = User {
        username: "clerk".to_string(),
        ..other
    };
    let err = users.update(&renamed).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<InventoryError>(),
        Some(&InventoryError::conflict("Username already exists"))
    );
}
