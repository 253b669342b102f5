//! Starter-pack composition and draw.

use crate::{
    error::GameError,
    game::{card::CardTemplate, types::Position},
};
use rand::{seq::IndexedRandom, Rng};

/// Cards per native position in a starter pack: one full line-up.
pub const STARTER_PACK: [(Position, usize); 3] = [
    (Position::Goaltender, 1),
    (Position::Defenseman, 2),
    (Position::Forward, 3),
];

/// Pick template ids for a starter pack, without repeats inside a position.
pub fn draw_starter_pack<R: Rng>(
    templates: &[CardTemplate],
    rng: &mut R,
) -> Result<Vec<i32>, GameError> {
    let mut picked = Vec::with_capacity(STARTER_PACK.iter().map(|(_, n)| n).sum());

    for (position, needed) in STARTER_PACK {
        let mut pool: Vec<i32> = templates
            .iter()
            .filter(|t| t.position == position)
            .map(|t| t.id)
            .collect();
        if pool.len() < needed {
            return Err(GameError::CatalogueIncomplete(format!(
                "need {needed} {position} templates, catalogue has {}",
                pool.len()
            )));
        }
        // Stable input order keeps seeded draws reproducible.
        pool.sort_unstable();
        picked.extend(pool.choose_multiple(rng, needed).copied());
    }

    Ok(picked)
}
