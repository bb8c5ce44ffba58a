use crate::models::Profile;

/// Whether two profiles satisfy each other's stated gender preference
///
/// An empty `seeking_gender` set is open to all genders. A profile without a
/// gender only passes against partners who are open to all.
#[inline]
pub fn meets_preferences(a: &Profile, b: &Profile) -> bool {
    if !accepts(b, a) {
        return false;
    }

    if !accepts(a, b) {
        return false;
    }

    true
}

/// Whether `seeker` is open to `candidate`'s gender
#[inline]
fn accepts(seeker: &Profile, candidate: &Profile) -> bool {
    if seeker.seeking_gender.is_empty() {
        return true;
    }

    match candidate.gender {
        Some(gender) => seeker.seeking_gender.contains(&gender),
        None => false,
    }
}

/// Pool eligibility between two users
///
/// Same rule as the scoring gate; kept as a separate entry point because pool
/// assignment and pair scoring apply it at different stages.
#[inline]
pub fn is_pool_eligible(a: &Profile, b: &Profile) -> bool {
    meets_preferences(a, b)
}
