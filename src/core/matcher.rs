use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::core::{
    crush::CrushIndex,
    error::MatchingError,
    matrix::CompatibilityMatrix,
    pools::{partition_pools, Pool, PoolStrategy},
    scoring::CompatibilityScorer,
    validation::{validate_matches, ValidationBaseline},
};
use crate::models::{CategoryWeights, CrushEntry, MatchCandidate, MatchRecord, Profile, ValidationReport};

/// Candidates scoring below this are never offered as matches
pub const MIN_MATCH_SCORE: f64 = 30.0;

/// Matches kept per user unless configured otherwise
pub const DEFAULT_NUM_MATCHES: usize = 7;

/// Ranked matches per user id, in pool order
pub type MatchMap = IndexMap<String, Vec<MatchCandidate>>;

/// Everything a single campaign run produces
#[derive(Debug, Clone, Serialize)]
pub struct MatchingOutcome {
    pub matches: MatchMap,
    pub records: Vec<MatchRecord>,
    pub report: ValidationReport,
}

/// Campaign matching orchestrator
///
/// # Pipeline Stages
/// 1. Partition users into preference pools
/// 2. Build the pairwise compatibility matrix of each pool
/// 3. Select each user's top-N candidates above the score cutoff
/// 4. Deduplicate into undirected match records
/// 5. Validate aggregate match quality
///
/// Holds configuration only, so one engine can serve concurrent runs.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    scorer: CompatibilityScorer,
    num_matches: usize,
    min_score: f64,
    pool_strategy: PoolStrategy,
    validation_baseline: ValidationBaseline,
}

impl MatchingEngine {
    pub fn new(weights: CategoryWeights, num_matches: usize) -> Result<Self, MatchingError> {
        if num_matches == 0 {
            return Err(MatchingError::InvalidMatchCount(num_matches));
        }
        weights.validate()?;

        Ok(Self {
            scorer: CompatibilityScorer::new(weights),
            num_matches,
            min_score: MIN_MATCH_SCORE,
            pool_strategy: PoolStrategy::default(),
            validation_baseline: ValidationBaseline::default(),
        })
    }

    pub fn with_default_weights() -> Self {
        Self {
            scorer: CompatibilityScorer::default(),
            num_matches: DEFAULT_NUM_MATCHES,
            min_score: MIN_MATCH_SCORE,
            pool_strategy: PoolStrategy::default(),
            validation_baseline: ValidationBaseline::default(),
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_pool_strategy(mut self, strategy: PoolStrategy) -> Self {
        self.pool_strategy = strategy;
        self
    }

    pub fn with_validation_baseline(mut self, baseline: ValidationBaseline) -> Self {
        self.validation_baseline = baseline;
        self
    }

    /// Copy of this engine with per-run overrides applied
    ///
    /// Cutoff, pool strategy and validation baseline carry over unchanged.
    pub fn reconfigured(
        &self,
        weights: Option<CategoryWeights>,
        num_matches: Option<usize>,
    ) -> Result<Self, MatchingError> {
        let weights = weights.unwrap_or(*self.scorer.weights());
        let num_matches = num_matches.unwrap_or(self.num_matches);

        Ok(Self::new(weights, num_matches)?
            .with_min_score(self.min_score)
            .with_pool_strategy(self.pool_strategy)
            .with_validation_baseline(self.validation_baseline))
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    pub fn num_matches(&self) -> usize {
        self.num_matches
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn pool_strategy(&self) -> PoolStrategy {
        self.pool_strategy
    }

    /// Match count each user is validated against
    pub fn validation_target(&self) -> usize {
        self.validation_baseline.target(self.num_matches)
    }

    /// Generate ranked matches for every user in pools of two or more
    ///
    /// Users left alone in their pool get no entry.
    pub fn generate_matches(&self, users: &[Profile], crushes: &[CrushEntry]) -> MatchMap {
        let crush_index = CrushIndex::new(crushes);
        let pools = partition_pools(users, self.pool_strategy);

        let mut all_matches = MatchMap::with_capacity(users.len());
        for pool in &pools {
            all_matches.extend(self.match_pool(pool, &crush_index));
        }

        tracing::debug!(
            "Generated matches for {} of {} users across {} pools",
            all_matches.len(),
            users.len(),
            pools.len()
        );

        all_matches
    }

    /// Score one pool and select each member's top matches
    pub fn match_pool(&self, pool: &Pool<'_>, crushes: &CrushIndex) -> MatchMap {
        let Some(matrix) = CompatibilityMatrix::build(pool, &self.scorer, crushes) else {
            return MatchMap::new();
        };

        pool.members()
            .iter()
            .enumerate()
            .map(|(i, user)| (user.id.clone(), self.select_top_matches(pool, &matrix, i)))
            .collect()
    }

    /// Top-N candidates for the pool member at `index`
    ///
    /// Ties on score go to the candidate earlier in the pool.
    pub fn select_top_matches(
        &self,
        pool: &Pool<'_>,
        matrix: &CompatibilityMatrix,
        index: usize,
    ) -> Vec<MatchCandidate> {
        let members = pool.members();
        let row = matrix.row(index);

        let mut ranked: Vec<usize> = (0..members.len())
            .filter(|&j| j != index && row[j] >= self.min_score)
            .collect();

        ranked.sort_by(|&x, &y| {
            row[y]
                .partial_cmp(&row[x])
                .unwrap_or(Ordering::Equal)
                .then_with(|| x.cmp(&y))
        });
        ranked.truncate(self.num_matches);

        ranked
            .into_iter()
            .enumerate()
            .map(|(position, j)| MatchCandidate {
                user_id: members[index].id.clone(),
                matched_user_id: members[j].id.clone(),
                score: row[j],
                rank: position + 1,
                is_mutual_crush: matrix.is_mutual_crush(index, j),
            })
            .collect()
    }

    /// Run the whole pipeline for one campaign
    pub fn run(&self, users: &[Profile], crushes: &[CrushEntry], campaign_id: &str) -> MatchingOutcome {
        let matches = self.generate_matches(users, crushes);
        let report = validate_matches(&matches, users, self.validation_target());
        let records = create_match_records(&matches, campaign_id);

        tracing::info!(
            "Campaign {}: {} users, {} matches, {} records (avg score {:.1})",
            campaign_id,
            report.total_users,
            report.total_matches,
            records.len(),
            report.avg_compatibility
        );

        MatchingOutcome {
            matches,
            records,
            report,
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Collapse per-user match lists into undirected records
///
/// The first occurrence of each unordered pair wins, in map order. When the
/// other user also selected the pair, their rank is carried as `rank_for_b`.
pub fn create_match_records(matches: &MatchMap, campaign_id: &str) -> Vec<MatchRecord> {
    let ranks: HashMap<(&str, &str), usize> = matches
        .iter()
        .flat_map(|(user_id, list)| {
            list.iter()
                .map(move |m| ((user_id.as_str(), m.matched_user_id.as_str()), m.rank))
        })
        .collect();

    let mut records = Vec::new();
    let mut processed_pairs: HashSet<(&str, &str)> = HashSet::new();

    for (user_a_id, match_list) in matches {
        for candidate in match_list {
            let user_b_id = candidate.matched_user_id.as_str();

            let pair_key = if user_a_id.as_str() <= user_b_id {
                (user_a_id.as_str(), user_b_id)
            } else {
                (user_b_id, user_a_id.as_str())
            };

            if !processed_pairs.insert(pair_key) {
                continue;
            }

            records.push(MatchRecord {
                campaign_id: campaign_id.to_string(),
                user_a_id: user_a_id.clone(),
                user_b_id: user_b_id.to_string(),
                score: candidate.score,
                rank_for_a: candidate.rank,
                rank_for_b: ranks.get(&(user_b_id, user_a_id.as_str())).copied(),
                is_mutual_crush: candidate.is_mutual_crush,
            });
        }
    }

    records
}
