use chrono::Datelike;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use lotto645_db::models::{PICK_COUNT, POOL_SIZE};

use crate::engine::History;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("limite de {max_attempts} tentatives atteinte ({found}/{requested} grilles acceptées)")]
    AttemptsExhausted {
        max_attempts: u64,
        found: usize,
        requested: usize,
    },
}

#[derive(Debug, Clone)]
pub struct Generation {
    pub target_draw_no: u32,
    pub picks: Vec<[u8; 6]>,
    pub attempts: u64,
}

/// Seed déterministe basé sur la date du jour (YYYYMMDD).
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

/// Échantillonnage par rejet : tire des combinaisons uniformes dans [1, 45]
/// jusqu'à en accumuler `count` absentes de l'historique et acceptées par
/// `filter`. `max_attempts` borne la boucle ; l'épuiser est une erreur
/// distincte, pas un blocage.
pub fn generate_picks(
    history: &History,
    filter: impl Fn(&[u8; 6]) -> bool,
    count: usize,
    seed: u64,
    max_attempts: u64,
) -> Result<Generation, GenerateError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picks: Vec<[u8; 6]> = Vec::with_capacity(count);
    let mut attempts = 0u64;

    while picks.len() < count {
        if attempts >= max_attempts {
            return Err(GenerateError::AttemptsExhausted {
                max_attempts,
                found: picks.len(),
                requested: count,
            });
        }
        attempts += 1;

        let candidate = sample_candidate(&mut rng);
        if history.contains(&candidate) {
            continue;
        }
        if !filter(&candidate) {
            continue;
        }
        picks.push(candidate);
    }

    Ok(Generation {
        target_draw_no: history.next_draw_no(),
        picks,
        attempts,
    })
}

fn sample_candidate(rng: &mut StdRng) -> [u8; 6] {
    let indices = rand::seq::index::sample(rng, POOL_SIZE as usize, PICK_COUNT);
    let mut numbers = [0u8; 6];
    for (slot, idx) in numbers.iter_mut().zip(indices.iter()) {
        *slot = (idx + 1) as u8;
    }
    numbers.sort();
    numbers
}
