use std::collections::{HashMap, HashSet};

use crate::models::CrushEntry;

/// Multiplier when neither user declared interest
pub const NO_CRUSH_BONUS: f64 = 1.0;
/// Multiplier when exactly one user declared interest
pub const ONE_WAY_CRUSH_BONUS: f64 = 1.1;
/// Multiplier when both users declared interest in each other
pub const MUTUAL_CRUSH_BONUS: f64 = 1.2;

/// Declared interest between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrushStatus {
    None,
    OneWay,
    Mutual,
}

impl CrushStatus {
    fn from_directions(a_likes_b: bool, b_likes_a: bool) -> Self {
        match (a_likes_b, b_likes_a) {
            (true, true) => CrushStatus::Mutual,
            (true, false) | (false, true) => CrushStatus::OneWay,
            (false, false) => CrushStatus::None,
        }
    }

    pub fn bonus(self) -> f64 {
        match self {
            CrushStatus::None => NO_CRUSH_BONUS,
            CrushStatus::OneWay => ONE_WAY_CRUSH_BONUS,
            CrushStatus::Mutual => MUTUAL_CRUSH_BONUS,
        }
    }

    pub fn is_mutual(self) -> bool {
        self == CrushStatus::Mutual
    }
}

/// Crush bonus for a pair, scanning the raw declaration list
///
/// Both directions are checked, so argument order does not matter.
pub fn calculate_crush_bonus(id_a: &str, id_b: &str, crushes: &[CrushEntry]) -> f64 {
    let a_likes_b = crushes
        .iter()
        .any(|c| c.source_user_id == id_a && c.target_user_id == id_b);
    let b_likes_a = crushes
        .iter()
        .any(|c| c.source_user_id == id_b && c.target_user_id == id_a);

    CrushStatus::from_directions(a_likes_b, b_likes_a).bonus()
}

/// Hashed view of a run's crush declarations
///
/// Gives the same answers as [`calculate_crush_bonus`] in constant time per
/// pair, which matters once a pool's matrix is built.
#[derive(Debug, Clone, Default)]
pub struct CrushIndex {
    declared: HashMap<String, HashSet<String>>,
}

impl CrushIndex {
    pub fn new(crushes: &[CrushEntry]) -> Self {
        let mut declared: HashMap<String, HashSet<String>> = HashMap::new();
        for crush in crushes {
            declared
                .entry(crush.source_user_id.clone())
                .or_default()
                .insert(crush.target_user_id.clone());
        }

        Self { declared }
    }

    /// Number of distinct declarations
    pub fn len(&self) -> usize {
        self.declared.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    #[inline]
    fn likes(&self, source: &str, target: &str) -> bool {
        self.declared
            .get(source)
            .map_or(false, |targets| targets.contains(target))
    }

    pub fn status(&self, id_a: &str, id_b: &str) -> CrushStatus {
        if self.declared.is_empty() {
            return CrushStatus::None;
        }

        CrushStatus::from_directions(self.likes(id_a, id_b), self.likes(id_b, id_a))
    }

    pub fn bonus(&self, id_a: &str, id_b: &str) -> f64 {
        self.status(id_a, id_b).bonus()
    }
}
