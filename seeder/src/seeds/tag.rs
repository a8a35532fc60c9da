use db::models::tag::{self, NewTag};
use fake::Fake;
use fake::faker::lorem::en::Word;
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::config::GenerationConfig;
use crate::error::{AtStage, SeedError};
use crate::sampling::UniqueValues;
use crate::seed::Stage;

const STAGE: Stage = Stage::Tags;

/// Creates `num_tags` tags named after distinct random words.
pub async fn seed<C, R>(
    db: &C,
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<Vec<tag::Model>, SeedError>
where
    C: ConnectionTrait,
    R: Rng,
{
    let mut names = UniqueValues::new(config.max_unique_attempts);
    let mut tags = Vec::with_capacity(config.num_tags);

    for _ in 0..config.num_tags {
        let name = names.next(rng, STAGE, "tag name", |rng| Word().fake_with_rng(rng))?;
        tags.push(NewTag { name }.insert(db).await.at(STAGE)?);
    }

    Ok(tags)
}
