//! Statistics aggregation.
//!
//! Pure reduction over the complete face set of a task. Deterministic and
//! order-independent: counts and sums commute, and the final division is
//! performed once per bucket.

use crate::face::{Face, GENDER_FEMALE, GENDER_MALE};
use crate::task::Statistics;

/// Reduce a task's faces into denormalized statistics.
///
/// Empty buckets yield an average of 0 rather than a division error.
/// Genders other than "male"/"female" contribute to `faces_total` only.
pub fn aggregate_statistics<'a, I>(faces: I) -> Statistics
where
    I: IntoIterator<Item = &'a Face>,
{
    let mut total = 0u32;
    let mut male = 0u32;
    let mut female = 0u32;
    let mut male_age_sum = 0u32;
    let mut female_age_sum = 0u32;

    for face in faces {
        total += 1;

        match face.gender.as_str() {
            GENDER_MALE => {
                male += 1;
                male_age_sum += face.age;
            }
            GENDER_FEMALE => {
                female += 1;
                female_age_sum += face.age;
            }
            _ => {}
        }
    }

    Statistics {
        faces_total: total,
        faces_male: male,
        faces_female: female,
        age_male_avg: if male > 0 { male_age_sum / male } else { 0 },
        age_female_avg: if female > 0 { female_age_sum / female } else { 0 },
    }
}
