//! Customer order integration tests

mod common;

use chrono::Utc;
use common::{dec, entry, print_test_header, TestEnv};
use inventory_service::contract::{
    DateRange, InventoryError, MovementKind, NewOrder, OrderFilter, Role,
};

fn order(product_id: i32, quantity_sold: i64, unit_price: &str, customer: Option<&str>) -> NewOrder {
    NewOrder {
        product_id,
        quantity_sold,
        unit_price: dec(unit_price),
        customer_name: customer.map(str::to_string),
        customer_address: Some("  ".to_string()),
        customer_phone: Some("555-0100".to_string()),
    }
}

#[tokio::test]
async fn test_create_order_sells_stock() {
    print_test_header(
        "test_create_order_sells_stock",
        "An order records a sell movement dated today and updates product totals",
    );
    let env = TestEnv::new().await;
    let editor = env.user("clerk", Role::Editor).await;
    let product = env
        .service
        .add_stock(&editor, entry("Soap", 10, "1.00", "2025-10-01"))
        .await
        .unwrap();

    let created = env
        .service
        .create_order(&editor, order(product.id, 3, "2.50", Some("Alice")))
        .await
        .unwrap();
    assert_eq!(created.product_name, "Soap");
    assert_eq!(created.quantity_sold, 3);
    assert_eq!(created.total_amount, dec("7.50"));
    assert_eq!(created.customer_name.as_deref(), Some("Alice"));
    assert_eq!(created.customer_address, None);
    assert_eq!(created.created_by, "clerk");

    let products = env.service.summary(&editor).await.unwrap();
    assert_eq!(products[0].total_sold_qty, 3);
    assert_eq!(products[0].total_sold_amount, dec("7.50"));
    assert_eq!(products[0].available_stock, 7);

    let journal = env.service.transactions(&editor, None).await.unwrap();
    let sell = journal.iter().find(|t| t.kind == MovementKind::Sell).unwrap();
    assert_eq!(sell.quantity, 3);
    assert_eq!(sell.date, Utc::now().date_naive());
}

#[tokio::test]
async fn test_create_order_failures_leave_no_trace() {
    let env = TestEnv::new().await;
    let product = env
        .service
        .add_stock(&env.superadmin, entry("Soap", 2, "1.00", "2025-10-01"))
        .await
        .unwrap();

    let err = env
        .service
        .create_order(&env.superadmin, order(product.id, 3, "2.00", None))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        InventoryError::InsufficientStock {
            product: "Soap".to_string(),
            available: 2,
            requested: 3,
        }
    );

    let err = env
        .service
        .create_order(&env.superadmin, order(product.id + 100, 1, "2.00", None))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::NotFound { .. }));

    let err = env
        .service
        .create_order(&env.superadmin, order(product.id, 0, "2.00", None))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Validation { .. }));

    let orders = env
        .service
        .list_orders(&env.superadmin, &OrderFilter::default())
        .await
        .unwrap();
    assert!(orders.is_empty());
    assert_eq!(env.service.summary(&env.superadmin).await.unwrap()[0].total_sold_qty, 0);
}

#[tokio::test]
async fn test_list_orders_filters() {
    let env = TestEnv::new().await;
    let ctx = &env.superadmin;
    let soap = env
        .service
        .add_stock(ctx, entry("Soap", 10, "1.00", "2025-10-01"))
        .await
        .unwrap();
    let gauze = env
        .service
        .add_stock(ctx, entry("Gauze", 10, "1.00", "2025-10-01"))
        .await
        .unwrap();

    let first = env
        .service
        .create_order(ctx, order(soap.id, 1, "2.00", Some("Alice")))
        .await
        .unwrap();
    let second = env
        .service
        .create_order(ctx, order(gauze.id, 2, "2.00", Some("Bob")))
        .await
        .unwrap();

    let all = env
        .service
        .list_orders(ctx, &OrderFilter::default())
        .await
        .unwrap();
    let ids: Vec<_> = all.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let only_soap = env
        .service
        .list_orders(
            ctx,
            &OrderFilter {
                product_id: Some(soap.id),
                ..OrderFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(only_soap.len(), 1);
    assert_eq!(only_soap[0].customer_name.as_deref(), Some("Alice"));

    let today = Utc::now().date_naive();
    let today_range = OrderFilter {
        range: Some(DateRange::new(today, today)),
        product_id: None,
    };
    assert_eq!(env.service.list_orders(ctx, &today_range).await.unwrap().len(), 2);

    let yesterday = today.pred_opt().unwrap();
    let past_range = OrderFilter {
        range: Some(DateRange::new(yesterday, yesterday)),
        product_id: None,
    };
    assert!(env.service.list_orders(ctx, &past_range).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_order_permissions() {
    let env = TestEnv::new().await;
    let product = env
        .service
        .add_stock(&env.superadmin, entry("Soap", 10, "1.00", "2025-10-01"))
        .await
        .unwrap();
    let viewer = env.user("watcher", Role::Viewer).await;
    let editor = env.user("clerk", Role::Editor).await;

    let err = env
        .service
        .create_order(&viewer, order(product.id, 1, "2.00", None))
        .await
        .unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    assert!(env
        .service
        .list_orders(&viewer, &OrderFilter::default())
        .await
        .is_err());

    let err = env.service.export_orders(&editor).await.unwrap_err();
    assert!(matches!(err, InventoryError::Forbidden { .. }));

    env.service
        .create_order(&editor, order(product.id, 1, "2.00", None))
        .await
        .unwrap();
    let admin = env.user("manager", Role::Admin).await;
    assert_eq!(env.service.export_orders(&admin).await.unwrap().len(), 1);
}
