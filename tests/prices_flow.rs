use adega_price_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        clients::GetOrCreateClientRequest,
        prices::RegisterPriceRequest,
        products::CreateProductRequest,
    },
    entity::{
        competitors::{Column as CompetitorCol, Entity as Competitors},
        price_history::{ActiveModel as HistoryActive, ChangeType},
        prices::{Column as PriceCol, Entity as Prices},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::HistoryQuery,
    services::{client_service, history_service, price_service, product_service},
    state::AppState,
};
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    Statement,
};

// Integration flow: register prices for one product, watch the comparison
// matrix and the audit trail evolve, then delete; plus client get-or-create.
#[tokio::test]
async fn price_registration_history_and_comparison_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let user_id = create_user(&state, "staff@example.com").await?;
    let staff = AuthUser {
        user_id,
        role: "user".into(),
    };

    // The four fixed competitors come from the seed migration.
    let competitors = Competitors::find()
        .order_by_asc(CompetitorCol::Id)
        .all(&state.orm)
        .await?;
    assert_eq!(competitors.len(), 4);
    let dinho = competitors.iter().find(|c| c.code == "DINHO").unwrap().id;
    let adega_brasil = competitors
        .iter()
        .find(|c| c.code == "ADEGA_BRASIL")
        .unwrap()
        .id;

    // Create the product
    let created = product_service::create_product(
        &state,
        &staff,
        CreateProductRequest {
            name: "Smirnoff Ice".into(),
            description: Some("Vodka RTD 275ml".into()),
            category: Some("RTD".into()),
        },
    )
    .await?;
    let product_id = created.data.unwrap().id;

    // Duplicate names are rejected with Conflict
    let duplicate = product_service::create_product(
        &state,
        &staff,
        CreateProductRequest {
            name: "Smirnoff Ice".into(),
            description: None,
            category: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // First registration creates the price and a "created" audit row
    price_service::register_price(
        &state,
        &staff,
        RegisterPriceRequest {
            product_id,
            competitor_id: dinho,
            value: "12.90".into(),
        },
    )
    .await?;

    let rows = price_service::comparison_rows(&state).await?;
    let row = rows.iter().find(|r| r.product_id == product_id).unwrap();
    let dinho_cell = row.prices.iter().find(|c| c.competitor_id == dinho).unwrap();
    assert_eq!(dinho_cell.value.as_deref(), Some("12.90"));
    assert!(row
        .prices
        .iter()
        .filter(|c| c.competitor_id != dinho)
        .all(|c| c.value.is_none()));
    assert_eq!(row.average.as_deref(), Some("12.90"));
    assert!(row.last_updated.is_some());

    // Second competitor shifts the average
    price_service::register_price(
        &state,
        &staff,
        RegisterPriceRequest {
            product_id,
            competitor_id: adega_brasil,
            value: "13.50".into(),
        },
    )
    .await?;

    let rows = price_service::comparison_rows(&state).await?;
    let row = rows.iter().find(|r| r.product_id == product_id).unwrap();
    assert_eq!(row.average.as_deref(), Some("13.20"));

    // Re-registering the same pair updates in place and appends to history
    price_service::register_price(
        &state,
        &staff,
        RegisterPriceRequest {
            product_id,
            competitor_id: dinho,
            value: "11.90".into(),
        },
    )
    .await?;

    let rows = price_service::comparison_rows(&state).await?;
    let row = rows.iter().find(|r| r.product_id == product_id).unwrap();
    assert_eq!(row.average.as_deref(), Some("12.70"));

    let history = history_service::history_entries(
        &state,
        &HistoryQuery {
            product_id: Some(product_id),
            competitor_id: None,
            days: None,
        },
    )
    .await?;
    assert_eq!(history.len(), 3);
    // Newest first
    assert_eq!(history[0].change_type, ChangeType::Updated);
    assert_eq!(history[0].previous_value.as_deref(), Some("12.90"));
    assert_eq!(history[0].new_value.as_deref(), Some("11.90"));
    assert!(history[1..]
        .iter()
        .all(|e| e.change_type == ChangeType::Created));

    // Still exactly one current price per pair
    let current = Prices::find()
        .filter(PriceCol::ProductId.eq(product_id))
        .filter(PriceCol::CompetitorId.eq(dinho))
        .all(&state.orm)
        .await?;
    assert_eq!(current.len(), 1);

    // Malformed values and unknown ids are rejected
    let bad_value = price_service::register_price(
        &state,
        &staff,
        RegisterPriceRequest {
            product_id,
            competitor_id: dinho,
            value: "12.999".into(),
        },
    )
    .await;
    assert!(matches!(bad_value, Err(AppError::BadRequest(_))));

    let unknown_product = price_service::register_price(
        &state,
        &staff,
        RegisterPriceRequest {
            product_id: 999_999,
            competitor_id: dinho,
            value: "9.90".into(),
        },
    )
    .await;
    assert!(matches!(unknown_product, Err(AppError::NotFound)));

    // Deleting a price appends a "deleted" row and clears the cell
    let price_id = current[0].id;
    price_service::delete_price(&state, price_id).await?;

    let history = history_service::history_entries(
        &state,
        &HistoryQuery {
            product_id: Some(product_id),
            competitor_id: Some(dinho),
            days: None,
        },
    )
    .await?;
    assert_eq!(history[0].change_type, ChangeType::Deleted);
    assert_eq!(history[0].previous_value.as_deref(), Some("11.90"));
    assert_eq!(history[0].new_value, None);

    let rows = price_service::comparison_rows(&state).await?;
    let row = rows.iter().find(|r| r.product_id == product_id).unwrap();
    let dinho_cell = row.prices.iter().find(|c| c.competitor_id == dinho).unwrap();
    assert_eq!(dinho_cell.value, None);

    let missing = price_service::delete_price(&state, price_id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // The days filter cuts off old audit rows
    HistoryActive {
        id: NotSet,
        product_id: Set(product_id),
        competitor_id: Set(dinho),
        previous_value: Set(None),
        new_value: Set(Some(rust_decimal::Decimal::new(999, 2))),
        changed_by: Set(user_id),
        change_type: Set(ChangeType::Created),
        changed_at: Set((Utc::now() - Duration::days(40)).into()),
    }
    .insert(&state.orm)
    .await?;

    let all = history_service::history_entries(
        &state,
        &HistoryQuery {
            product_id: Some(product_id),
            competitor_id: Some(dinho),
            days: None,
        },
    )
    .await?;
    let recent = history_service::history_entries(
        &state,
        &HistoryQuery {
            product_id: Some(product_id),
            competitor_id: Some(dinho),
            days: Some(7),
        },
    )
    .await?;
    assert_eq!(all.len(), recent.len() + 1);
    assert!(
        all.windows(2).all(|w| w[0].changed_at >= w[1].changed_at),
        "history must be newest first"
    );

    // Client get-or-create is idempotent and first-write-wins on the name
    let first = client_service::get_or_create_client(
        &state,
        GetOrCreateClientRequest {
            code: "CLI-001".into(),
            name: "Mercado Central".into(),
            description: None,
        },
    )
    .await?
    .data
    .unwrap();

    let second = client_service::get_or_create_client(
        &state,
        GetOrCreateClientRequest {
            code: "CLI-001".into(),
            name: "Outro Nome".into(),
            description: None,
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Mercado Central");

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs; competitors are seed data and stay.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE price_history, prices, skus, evidence, clients, products, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(state: &AppState, email: &str) -> anyhow::Result<i32> {
    let user = UserActive {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set("user".to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}
