use crate::core::crush::CrushIndex;
use crate::core::pools::Pool;
use crate::core::scoring::CompatibilityScorer;

/// Pairwise compatibility scores for one pool
///
/// Row-major `n x n`; the diagonal is zero.
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    size: usize,
    scores: Vec<f64>,
    mutual_crush: Vec<bool>,
}

impl CompatibilityMatrix {
    /// Score every ordered pair of distinct pool members
    ///
    /// Returns `None` for pools with fewer than two members.
    pub fn build(pool: &Pool<'_>, scorer: &CompatibilityScorer, crushes: &CrushIndex) -> Option<Self> {
        let n = pool.len();
        if n < 2 {
            return None;
        }

        let members = pool.members();
        let mut scores = vec![0.0; n * n];
        let mut mutual_crush = vec![false; n * n];

        for (i, user_a) in members.iter().enumerate() {
            for (j, user_b) in members.iter().enumerate() {
                if i == j {
                    continue;
                }

                let status = crushes.status(&user_a.id, &user_b.id);
                let score = scorer.score(user_a, user_b, status.bonus());

                tracing::trace!("score({}, {}) = {:.2}", user_a.id, user_b.id, score);

                scores[i * n + j] = score;
                mutual_crush[i * n + j] = status.is_mutual();
            }
        }

        Some(Self {
            size: n,
            scores,
            mutual_crush,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.size + j]
    }

    #[inline]
    pub fn is_mutual_crush(&self, i: usize, j: usize) -> bool {
        self.mutual_crush[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.scores[i * self.size..(i + 1) * self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AcademicYear, CrushEntry, Gender, Profile};

    fn pool_users() -> Vec<Profile> {
        vec![
            Profile::new("m1")
                .with_gender(Gender::Male)
                .seeking([Gender::Female])
                .with_year(AcademicYear::Second)
                .with_interests(["music", "art"]),
            Profile::new("f1")
                .with_gender(Gender::Female)
                .seeking([Gender::Male])
                .with_year(AcademicYear::Second)
                .with_interests(["music"]),
            Profile::new("f2")
                .with_gender(Gender::Female)
                .with_year(AcademicYear::Graduate),
        ]
    }

    #[test]
    fn test_small_pool_has_no_matrix() {
        let users = vec![Profile::new("solo")];
        let pool = Pool::new(users.iter().collect());

        let matrix =
            CompatibilityMatrix::build(&pool, &CompatibilityScorer::default(), &CrushIndex::default());
        assert!(matrix.is_none());
    }

    #[test]
    fn test_matrix_is_symmetric_with_zero_diagonal() {
        let users = pool_users();
        let pool = Pool::new(users.iter().collect());
        let crushes = CrushIndex::new(&[CrushEntry::new("m1", "f2")]);

        let matrix = CompatibilityMatrix::build(&pool, &CompatibilityScorer::default(), &crushes)
            .expect("pool of three builds a matrix");

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_eq!(matrix.row(0).len(), 3);
    }

    #[test]
    fn test_mutual_crush_flag_recorded() {
        let users = pool_users();
        let pool = Pool::new(users.iter().collect());
        let crushes = CrushIndex::new(&[CrushEntry::new("m1", "f1"), CrushEntry::new("f1", "m1")]);

        let matrix = CompatibilityMatrix::build(&pool, &CompatibilityScorer::default(), &crushes)
            .expect("pool of three builds a matrix");
        let plain = CompatibilityMatrix::build(
            &pool,
            &CompatibilityScorer::default(),
            &CrushIndex::default(),
        )
        .expect("pool of three builds a matrix");

        assert!(matrix.is_mutual_crush(0, 1));
        assert!(matrix.is_mutual_crush(1, 0));
        assert!(!matrix.is_mutual_crush(0, 2));
        assert!(matrix.get(0, 1) > plain.get(0, 1));
    }
}
