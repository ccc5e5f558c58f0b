//! First-run bootstrap: make sure an admin account exists.

use manualcraft_core::credentials::{generate_password, GENERATED_PASSWORD_LEN};
use manualcraft_core::roles::ROLE_ADMIN;
use manualcraft_db::repositories::user_repo::NewUser;
use manualcraft_db::repositories::UserRepo;
use manualcraft_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::AppError;

/// Create the initial admin account when the users table is empty.
///
/// Username and email come from `ADMIN_USERNAME` / `ADMIN_EMAIL` (defaults
/// `admin` / `admin@localhost`). The password comes from `ADMIN_PASSWORD`;
/// when unset, a random one is generated and logged once at startup so the
/// operator can sign in and change it.
pub async fn ensure_admin(pool: &DbPool) -> Result<(), AppError> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(());
    }

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@localhost".into());

    let (password, generated) = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, false),
        _ => (generate_password(GENERATED_PASSWORD_LEN), true),
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let admin = UserRepo::create(
        pool,
        &NewUser {
            username: username.clone(),
            email,
            password_hash,
            full_name: None,
            department_id: None,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    if generated {
        tracing::warn!(
            username = %admin.username,
            %password,
            "Created initial admin account with a generated password; change it after first login"
        );
    } else {
        tracing::info!(username = %admin.username, "Created initial admin account");
    }

    Ok(())
}
