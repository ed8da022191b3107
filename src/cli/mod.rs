//! Administrative commands that run against the database directly,
//! outside the HTTP surface. Admin creation codes in particular are only
//! ever minted here; the API can consume them but never create them.

pub mod seeder;

use rand::Rng;
use sqlx::PgPool;

/// Mints a one-time admin creation code. The code is printed once; the
/// register-admin endpoint burns it on use.
pub async fn create_admin_code(db: &PgPool) -> Result<String, Box<dyn std::error::Error>> {
    let mut rng = rand::thread_rng();
    let code: String = (0..32)
        .map(|_| {
            const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
            CHARSET[rng.gen_range(0..CHARSET.len())] as char
        })
        .collect();

    sqlx::query("INSERT INTO admin_creation_codes (code) VALUES ($1)")
        .bind(&code)
        .execute(db)
        .await?;

    Ok(code)
}
