use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::HashMap;

use crate::catalog::CatalogItem;

/// Person name -> relative sampling weight. Absent entries fall back to the
/// configured default.
pub type WeightMap = HashMap<String, u32>;

/// Draws one item from `pool`: the owning person is chosen proportionally to
/// their weight, then one of that person's pooled items uniformly. A pool
/// whose total weight is zero falls back to a uniform draw over the raw pool.
/// Empty pool means no selection, never an error.
pub fn weighted_draw<'a>(
    pool: &'a [CatalogItem],
    weights: &WeightMap,
    default_weight: u32,
    rng: &mut impl Rng,
) -> Option<&'a CatalogItem> {
    if pool.is_empty() {
        return None;
    }

    let mut owners: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&CatalogItem>> = HashMap::new();
    for item in pool {
        grouped
            .entry(item.person.as_str())
            .or_insert_with(|| {
                owners.push(item.person.as_str());
                Vec::new()
            })
            .push(item);
    }

    let owner_weights: Vec<u32> = owners
        .iter()
        .map(|name| weights.get(*name).copied().unwrap_or(default_weight))
        .collect();

    let owned = match WeightedIndex::new(&owner_weights) {
        Ok(dist) => &grouped[owners[dist.sample(rng)]],
        // All weights zero: uniform over the raw pool.
        Err(_) => return pool.get(rng.gen_range(0..pool.len())),
    };

    Some(owned[rng.gen_range(0..owned.len())])
}
