//! Percentage-to-grade lookup used when storing exam results.
//!
//! Bangladesh-style letter+point grades. Thresholds are evaluated top-down
//! and the first match wins; they are configuration data, not tunable
//! algorithm parameters.

const GRADE_TABLE: &[(f64, &str)] = &[
    (80.0, "5.00 (A+)"),
    (70.0, "4.00 (A)"),
    (60.0, "3.50 (A-)"),
    (50.0, "3.00 (B)"),
    (40.0, "2.00 (C)"),
    (33.0, "1.00 (D)"),
];

/// Derives the grade label from marks obtained against the exam maximum.
/// Callers only invoke this when the client did not supply a grade.
pub fn grade_for_marks(marks_obtained: f64, max_marks: f64) -> String {
    let percentage = marks_obtained / max_marks * 100.0;
    for (threshold, label) in GRADE_TABLE {
        if percentage >= *threshold {
            return (*label).to_string();
        }
    }
    "0.00 (F)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_first_match_wins() {
        assert_eq!(grade_for_marks(100.0, 100.0), "5.00 (A+)");
        assert_eq!(grade_for_marks(80.0, 100.0), "5.00 (A+)");
        assert_eq!(grade_for_marks(79.9, 100.0), "4.00 (A)");
        assert_eq!(grade_for_marks(60.0, 100.0), "3.50 (A-)");
        assert_eq!(grade_for_marks(50.0, 100.0), "3.00 (B)");
        assert_eq!(grade_for_marks(49.9, 100.0), "2.00 (C)");
        assert_eq!(grade_for_marks(33.0, 100.0), "1.00 (D)");
        assert_eq!(grade_for_marks(32.9, 100.0), "0.00 (F)");
        assert_eq!(grade_for_marks(0.0, 100.0), "0.00 (F)");
    }

    #[test]
    fn scales_with_max_marks() {
        assert_eq!(grade_for_marks(40.0, 50.0), "5.00 (A+)");
        assert_eq!(grade_for_marks(16.5, 50.0), "1.00 (D)");
    }
}
