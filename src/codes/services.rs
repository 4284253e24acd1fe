use rand::{distributions::Uniform, Rng};
use sqlx::SqlitePool;
use tracing::debug;

use super::repo::{self, InsertError, VerificationCode};

pub const CODE_LEN: usize = 6;

/// Six characters, each drawn uniformly from `0..=9`.
pub fn random_code<R: Rng>(rng: &mut R) -> String {
    let digits = Uniform::new_inclusive(b'0', b'9');
    (0..CODE_LEN).map(|_| char::from(rng.sample(&digits))).collect()
}

pub fn is_valid_code(candidate: &str) -> bool {
    candidate.len() == CODE_LEN && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// Issue a fresh code, re-sampling until the insert is accepted.
pub async fn issue_code(db: &SqlitePool) -> Result<VerificationCode, sqlx::Error> {
    issue_code_with(db, || random_code(&mut rand::thread_rng())).await
}

async fn issue_code_with<F>(db: &SqlitePool, mut next: F) -> Result<VerificationCode, sqlx::Error>
where
    F: FnMut() -> String,
{
    loop {
        let candidate = next();
        match repo::insert(db, &candidate).await {
            Ok(issued) => return Ok(issued),
            Err(InsertError::Duplicate) => {
                debug!(code = %candidate, "code collision, resampling");
            }
            Err(InsertError::Database(e)) => return Err(e),
        }
    }
}
