//! notekeep-admin - maintenance commands run against the database directly.
//!
//! ```text
//! notekeep-admin create-admin --email admin@example.com --password s3cret!
//! notekeep-admin promote someone@example.com
//! notekeep-admin seed-categories
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use notekeep_api::auth::password::{Argon2Hasher, PasswordConfig};
use notekeep_core::categories::SEED_CATEGORIES;
use notekeep_core::credentials::CredentialHasher;
use notekeep_core::roles::Role;
use notekeep_core::users::{normalize_email, validate_registration};
use notekeep_db::models::user::{CreateUser, UpdateUser};
use notekeep_db::repositories::{CategoryRepo, UserRepo};
use notekeep_db::DbPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// notekeep-admin - account and catalog maintenance
#[derive(Parser, Debug)]
#[command(name = "notekeep-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an admin account, or reset an existing account to admin with a new password
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Grant the admin role to an existing user
    Promote {
        /// Email of the user to promote
        email: String,
    },

    /// Insert or refresh the built-in note categories
    SeedCategories,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = notekeep_db::create_pool(&cli.database_url, 2)
        .await
        .context("failed to connect to database")?;
    notekeep_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    match cli.command {
        Commands::CreateAdmin { email, password } => create_admin(&pool, &email, &password).await,
        Commands::Promote { email } => promote(&pool, &email).await,
        Commands::SeedCategories => seed_categories(&pool).await,
    }
}

async fn create_admin(pool: &DbPool, email: &str, password: &str) -> Result<()> {
    validate_registration(Some(email), Some(password), Some(password))?;

    let email = normalize_email(email);
    let hasher = Argon2Hasher::new(PasswordConfig::from_env())
        .map_err(|e| anyhow!("invalid password hash parameters: {e}"))?;
    let owned = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&owned))
        .await
        .context("hashing task failed")??;

    match UserRepo::find_by_email(pool, &email).await? {
        Some(existing) => {
            UserRepo::update_password(pool, existing.id, &password_hash).await?;
            UserRepo::update(
                pool,
                existing.id,
                &UpdateUser {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await?;
            tracing::info!(user_id = existing.id, %email, "Existing account reset to admin");
        }
        None => {
            let user = UserRepo::create(
                pool,
                &CreateUser {
                    email: email.clone(),
                    password_hash,
                    role: Role::Admin,
                },
            )
            .await?;
            tracing::info!(user_id = user.id, %email, "Admin account created");
        }
    }
    Ok(())
}

async fn promote(pool: &DbPool, email: &str) -> Result<()> {
    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        bail!("user with email \"{email}\" not found");
    };

    if user.role == Role::Admin {
        tracing::info!(user_id = user.id, email = %user.email, "User is already an admin");
        return Ok(());
    }

    UserRepo::update(
        pool,
        user.id,
        &UpdateUser {
            role: Some(Role::Admin),
            ..Default::default()
        },
    )
    .await?;
    tracing::info!(user_id = user.id, email = %user.email, "User promoted to admin");
    Ok(())
}

async fn seed_categories(pool: &DbPool) -> Result<()> {
    for seed in SEED_CATEGORIES {
        let category = CategoryRepo::upsert_seed(pool, seed).await?;
        tracing::info!(category_id = category.id, name = %category.name, "Category seeded");
    }
    tracing::info!(count = SEED_CATEGORIES.len(), "Default categories in place");
    Ok(())
}
