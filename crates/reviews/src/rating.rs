//! Derived product-rating math.

use crate::review::Grade;

/// Round to 2-decimal precision, the stored precision of `Product.rating`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Arithmetic mean of the given grades, rounded to 2 decimals.
///
/// An empty set yields `0.0` — a product with no active reviews carries a
/// zero rating, not a null one.
pub fn average_rating(grades: &[Grade]) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    let sum: i64 = grades.iter().map(|g| i64::from(g.value())).sum();
    round2(sum as f64 / grades.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades(values: &[i16]) -> Vec<Grade> {
        values.iter().map(|&v| Grade::try_new(v).unwrap()).collect()
    }

    #[test]
    fn no_grades_means_zero_rating() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn single_grade_is_its_own_mean() {
        assert_eq!(average_rating(&grades(&[4])), 4.0);
    }

    #[test]
    fn mean_of_four_and_five_is_four_point_five() {
        assert_eq!(average_rating(&grades(&[4, 5])), 4.5);
    }

    #[test]
    fn repeating_thirds_round_to_two_decimals() {
        assert_eq!(average_rating(&grades(&[4, 4, 5])), 4.33);
        assert_eq!(average_rating(&grades(&[2, 3, 3])), 2.67);
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(4.333_333), 4.33);
        assert_eq!(round2(4.666_666), 4.67);
        assert_eq!(round2(5.0), 5.0);
    }

    mod properties {
        use super::*;
        use crate::review::{MAX_GRADE, MIN_GRADE};
        use proptest::prelude::*;

        proptest! {
            /// Property: the mean of non-empty grades stays within the grade range.
            #[test]
            fn mean_is_bounded_by_grade_range(values in prop::collection::vec(MIN_GRADE..=MAX_GRADE, 1..50)) {
                let rating = average_rating(&grades(&values));
                prop_assert!(rating >= f64::from(MIN_GRADE));
                prop_assert!(rating <= f64::from(MAX_GRADE));
            }

            /// Property: the rating is already at 2-decimal precision.
            #[test]
            fn mean_is_round2_stable(values in prop::collection::vec(MIN_GRADE..=MAX_GRADE, 0..50)) {
                let rating = average_rating(&grades(&values));
                prop_assert_eq!(round2(rating), rating);
            }

            /// Property: identical grades average to exactly that grade.
            #[test]
            fn uniform_grades_average_to_themselves(value in MIN_GRADE..=MAX_GRADE, count in 1usize..50) {
                let rating = average_rating(&grades(&vec![value; count]));
                prop_assert_eq!(rating, f64::from(value));
            }
        }
    }
}
