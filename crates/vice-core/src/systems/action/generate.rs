//! Candidate Pool Generation
//!
//! Draws the actions offered to the agent this turn.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::actions::{Action, ActionCatalog};

/// Sample `pool_size` distinct actions uniformly, or the whole catalog if it
/// is smaller than that.
pub fn generate_pool<'a, R: Rng + ?Sized>(
    catalog: &'a ActionCatalog,
    pool_size: usize,
    rng: &mut R,
) -> Vec<&'a Action> {
    let size = pool_size.min(catalog.len());
    catalog.actions().choose_multiple(rng, size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pool_has_distinct_actions() {
        let catalog = ActionCatalog::default();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..100 {
            let pool = generate_pool(&catalog, 5, &mut rng);
            assert_eq!(pool.len(), 5);
            let names: HashSet<&str> = pool.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names.len(), 5);
        }
    }

    #[test]
    fn test_pool_capped_by_catalog_size() {
        let catalog = ActionCatalog::new(vec![
            Action::new("Sleep", 8, 2, 1),
            Action::new("Work", -4, -1, -2).with_money(300),
        ])
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(generate_pool(&catalog, 5, &mut rng).len(), 2);
    }

    #[test]
    fn test_every_action_eventually_offered() {
        let catalog = ActionCatalog::default();
        let mut rng = SmallRng::seed_from_u64(8);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            for action in generate_pool(&catalog, 5, &mut rng) {
                seen.insert(action.name.clone());
            }
        }
        assert_eq!(seen.len(), catalog.len());
    }
}
