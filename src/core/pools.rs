use pathfinding::undirected::connected_components::connected_components;
use serde::{Deserialize, Serialize};

use crate::core::filters::is_pool_eligible;
use crate::models::Profile;

/// How users are grouped before pairwise scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStrategy {
    /// Single pass; each pool absorbs users eligible with its seed
    #[default]
    Seed,
    /// Connected components of the pairwise eligibility graph
    Components,
}

/// Ordered group of users that are matched only among themselves
#[derive(Debug, Clone)]
pub struct Pool<'a> {
    members: Vec<&'a Profile>,
}

impl<'a> Pool<'a> {
    pub fn new(members: Vec<&'a Profile>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[&'a Profile] {
        &self.members
    }

    pub fn get(&self, index: usize) -> Option<&'a Profile> {
        self.members.get(index).copied()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.members.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Split `users` into disjoint pools covering every user exactly once
pub fn partition_pools(users: &[Profile], strategy: PoolStrategy) -> Vec<Pool<'_>> {
    let pools = match strategy {
        PoolStrategy::Seed => seed_pools(users),
        PoolStrategy::Components => component_pools(users),
    };

    tracing::debug!(
        "Partitioned {} users into {} pools ({:?})",
        users.len(),
        pools.len(),
        strategy
    );

    pools
}

/// Greedy seed-relative grouping in input order
///
/// Candidates are checked against the seed only, so members absorbed through
/// an open-to-all seed need not be eligible with each other.
fn seed_pools(users: &[Profile]) -> Vec<Pool<'_>> {
    let mut assigned = vec![false; users.len()];
    let mut pools = Vec::new();

    for (seed_idx, seed) in users.iter().enumerate() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;

        let mut members = vec![seed];
        for (other_idx, other) in users.iter().enumerate().skip(seed_idx + 1) {
            if assigned[other_idx] {
                continue;
            }

            if is_pool_eligible(seed, other) {
                assigned[other_idx] = true;
                members.push(other);
            }
        }

        pools.push(Pool::new(members));
    }

    pools
}

/// Connected components of the eligibility graph, in input order
fn component_pools(users: &[Profile]) -> Vec<Pool<'_>> {
    let starts: Vec<usize> = (0..users.len()).collect();

    let components = connected_components(&starts, |&i| {
        (0..users.len())
            .filter(|&j| j != i && is_pool_eligible(&users[i], &users[j]))
            .collect::<Vec<usize>>()
    });

    let mut groups: Vec<Vec<usize>> = components
        .into_iter()
        .map(|component| {
            let mut indices: Vec<usize> = component.into_iter().collect();
            indices.sort_unstable();
            indices
        })
        .collect();
    groups.sort_unstable_by_key(|indices| indices[0]);

    groups
        .into_iter()
        .map(|indices| Pool::new(indices.into_iter().map(|i| &users[i]).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn user(id: &str, gender: Gender, seeking: &[Gender]) -> Profile {
        Profile::new(id)
            .with_gender(gender)
            .seeking(seeking.iter().copied())
    }

    fn pool_ids(pools: &[Pool<'_>]) -> Vec<Vec<String>> {
        pools
            .iter()
            .map(|p| p.ids().into_iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_heterosexual_pair_shares_pool() {
        let users = vec![
            user("m", Gender::Male, &[Gender::Female]),
            user("f", Gender::Female, &[Gender::Male]),
        ];

        let pools = partition_pools(&users, PoolStrategy::Seed);
        assert_eq!(pool_ids(&pools), vec![vec!["m", "f"]]);
    }

    #[test]
    fn test_incompatible_users_get_singleton_pools() {
        let users = vec![
            user("a", Gender::Male, &[Gender::Male]),
            user("b", Gender::Female, &[Gender::Female]),
            user("c", Gender::Female, &[Gender::Male]),
        ];

        let pools = partition_pools(&users, PoolStrategy::Seed);
        assert_eq!(pool_ids(&pools), vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn test_pools_cover_every_user_once() {
        let users = vec![
            user("a", Gender::Male, &[Gender::Female]),
            user("b", Gender::Female, &[]),
            user("c", Gender::NonBinary, &[]),
            user("d", Gender::Female, &[Gender::Male]),
            user("e", Gender::Male, &[Gender::Male]),
        ];

        for strategy in [PoolStrategy::Seed, PoolStrategy::Components] {
            let pools = partition_pools(&users, strategy);
            let mut seen: Vec<String> = pool_ids(&pools).into_iter().flatten().collect();
            seen.sort();
            assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
        }
    }

    #[test]
    fn test_seed_pool_is_not_transitive() {
        // Open seed absorbs both, though they are not eligible with each other
        let users = vec![
            user("open", Gender::Female, &[]),
            user("m", Gender::Male, &[Gender::Female]),
            user("f", Gender::Female, &[Gender::Female]),
        ];

        let pools = partition_pools(&users, PoolStrategy::Seed);
        assert_eq!(pool_ids(&pools), vec![vec!["open", "m", "f"]]);
        assert!(!is_pool_eligible(&users[1], &users[2]));
    }

    #[test]
    fn test_components_follow_reachability() {
        // Both strategies agree when each pool is already a clique
        let users = vec![
            user("a", Gender::Male, &[Gender::Female]),
            user("b", Gender::NonBinary, &[Gender::NonBinary]),
            user("c", Gender::NonBinary, &[]),
            user("d", Gender::Female, &[Gender::Male]),
        ];

        let seed = partition_pools(&users, PoolStrategy::Seed);
        assert_eq!(pool_ids(&seed), vec![vec!["a", "d"], vec!["b", "c"]]);

        let components = partition_pools(&users, PoolStrategy::Components);
        assert_eq!(pool_ids(&components), vec![vec!["a", "d"], vec!["b", "c"]]);
    }

    #[test]
    fn test_components_merge_through_bridge() {
        let users = vec![
            user("m", Gender::Male, &[Gender::Female]),
            user("f", Gender::Female, &[Gender::Male]),
            user("open", Gender::Female, &[]),
            user("g", Gender::Female, &[Gender::Female]),
        ];

        // Seed pass: m absorbs f and open; g stands alone
        let seed = partition_pools(&users, PoolStrategy::Seed);
        assert_eq!(pool_ids(&seed), vec![vec!["m", "f", "open"], vec!["g"]]);

        // open links g to the rest of the graph
        let components = partition_pools(&users, PoolStrategy::Components);
        assert_eq!(pool_ids(&components), vec![vec!["m", "f", "open", "g"]]);
    }
}
