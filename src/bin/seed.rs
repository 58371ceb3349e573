use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use adega_price_api::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@adegamufs.com", "admin123", "admin").await?;
    let staff_id = ensure_user(&pool, "staff@adegamufs.com", "staff123", "user").await?;
    seed_competitors(&pool).await?;
    seed_products(&pool, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, Staff ID: {staff_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<i32> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(i32,)> = sqlx::query_as(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (i32,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_competitors(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // Also inserted by the seed migration; this keeps a rebuilt database
    // consistent either way.
    let competitors = [
        ("Dinho", "DINHO"),
        ("Adega Brasil", "ADEGA_BRASIL"),
        ("Franco", "FRANCO"),
        ("Diversos", "DIVERSOS"),
    ];

    for (name, code) in competitors {
        sqlx::query(
            r#"
            INSERT INTO competitors (name, code)
            VALUES ($1, $2)
            ON CONFLICT (code) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(code)
        .execute(pool)
        .await?;
    }

    println!("Seeded competitors");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool, created_by: i32) -> anyhow::Result<()> {
    let products = vec![
        ("Smirnoff Ice", "Vodka RTD 275ml", "RTD"),
        ("Heineken Long Neck", "Cerveja 330ml", "Cerveja"),
        ("Vinho Tinto Reserva", "Garrafa 750ml", "Vinho"),
        ("Red Bull Energy", "Lata 250ml", "Energético"),
    ];

    for (name, desc, category) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, category, created_by)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(category)
        .bind(created_by)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
