//! Expansion of seed papers into catalog entries.
//!
//! The catalog shows each seed several times as distinct variants. Variant
//! ids carry a `-v<n>` suffix so they all collapse to the seed's id when the
//! ranking engine aggregates ratings.

use crate::types::{Card, Paper, SeedPaper};

/// Expand every seed into `variants_per_seed` papers, seed order preserved
///
/// Variant 1 keeps the seed's id and title; variant `n` gets `{id}-v{n}` and
/// `{title} (v{n})`. A count of 0 is treated as 1.
pub fn expand_seeds(seeds: &[SeedPaper], variants_per_seed: usize) -> Vec<Paper> {
    let variants = variants_per_seed.max(1);
    let mut papers = Vec::with_capacity(seeds.len() * variants);

    for seed in seeds {
        for n in 1..=variants {
            papers.push(seed_to_paper(seed, n));
        }
    }

    papers
}

fn seed_to_paper(seed: &SeedPaper, variant: usize) -> Paper {
    let (id, title) = if variant == 1 {
        (seed.id.clone(), seed.title.clone())
    } else {
        (
            format!("{}-v{}", seed.id, variant),
            format!("{} (v{})", seed.title, variant),
        )
    };

    Paper {
        id,
        title,
        topic: seed.topic.clone(),
        source: seed.source.clone(),
        cards: build_cards(seed),
    }
}

/// The five-card deck in reading order
fn build_cards(seed: &SeedPaper) -> Vec<Card> {
    let fields = &seed.cards;
    vec![
        Card::Hook {
            text: fields.hook.clone(),
        },
        Card::Intuition {
            text: fields.intuition.clone(),
        },
        Card::Method {
            steps: fields.method.clone(),
        },
        Card::Tradeoff {
            good: fields.tradeoff.good.clone(),
            bad: fields.tradeoff.bad.clone(),
        },
        Card::Who {
            audience: fields.who.audience.clone(),
            skip: fields.who.skip.clone(),
        },
    ]
}
