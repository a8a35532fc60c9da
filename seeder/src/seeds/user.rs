use db::models::user::{self, NewUser, Role};
use fake::Fake;
use fake::faker::internet::en::{Password, SafeEmail, Username};
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::sampling::UniqueValues;
use crate::seed::Stage;

const STAGE: Stage = Stage::Users;

/// Creates `num_users` users with unique usernames and emails.
pub async fn seed<C, R>(
    db: &C,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<user::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut usernames = UniqueValues::new(config.max_unique_attempts);
    let mut emails = UniqueValues::new(config.max_unique_attempts);
    let mut users = Vec::with_capacity(config.num_users);

    for _ in 0..config.num_users {
        let username = usernames.next(rng, STAGE, "username", |rng| Username().fake_with_rng(rng))?;
        let email = emails.next(rng, STAGE, "email", |rng| SafeEmail().fake_with_rng(rng))?;
        let password: String = Password(8..16).fake_with_rng(rng);
        let role = if rng.random_bool(0.5) { Role::Teacher } else { Role::Student };

        let user = NewUser { username, email, password, role }
            .insert(db)
            .await
            .at(STAGE)?;
        users.push(user);
    }

    Ok(users)
}
