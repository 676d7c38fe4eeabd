//! SeaORM entities for database tables
//!
//! Money columns hold whole cents; see `mapper` for the conversion.

/// Products with running totals
pub mod product {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        #[sea_orm(unique)]
        pub name: String,

        pub total_added_qty: i64,
        pub total_added_cents: i64,
        pub total_sold_qty: i64,
        pub total_sold_cents: i64,
        pub available_stock: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::stock_movement::Entity")]
        StockMovements,
        #[sea_orm(has_many = "super::order::Entity")]
        Orders,
    }

    impl Related<super::stock_movement::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::StockMovements.def()
        }
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Add and sell history in one table, told apart by `kind`
pub mod stock_movement {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "stock_movements")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub product_id: i32,

        /// "add" or "sell"
        pub kind: String,

        pub quantity: i64,
        pub unit_price_cents: i64,
        pub total_cents: i64,
        pub date: Date,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id"
        )]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Customer orders
pub mod order {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub product_id: i32,

        /// Product name at the time of sale
        pub product_name: String,

        pub quantity_sold: i64,
        pub total_cents: i64,
        pub customer_name: Option<String>,
        pub customer_address: Option<String>,
        pub customer_phone: Option<String>,
        pub sale_date: DateTimeUtc,
        pub created_by: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id"
        )]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Catalogue item names
pub mod item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        #[sea_orm(unique)]
        pub item_name: String,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Accounts
pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        #[sea_orm(unique)]
        pub username: String,

        /// Display name, added after the initial schema
        pub name: Option<String>,

        pub password_hash: String,

        /// "superadmin", "admin", "editor" or "viewer"
        pub role: String,

        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Audit trail; username and role are copied so entries outlive the account
pub mod activity_log {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "activity_logs")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,

        pub user_id: i32,
        pub username: String,
        pub user_role: String,
        pub action: String,
        pub target: String,
        pub details: Option<String>,
        pub timestamp: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
