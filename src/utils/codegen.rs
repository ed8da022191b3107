//! Generators for the identifiers the system mints on behalf of users:
//! subject codes, student roll numbers, and login usernames for approved
//! admissions. All of them scan existing values supplied by the caller,
//! so the functions stay pure and testable; services re-check the result
//! against the store before insert and rely on unique indexes as the
//! final arbiter under concurrency.

/// Builds the next subject code from the subject name: first three
/// letters, spaces stripped and uppercased, followed by the successor of
/// the highest numeric suffix among existing codes sharing that prefix,
/// zero-padded to two digits. "Math" with no priors yields `MAT01`.
pub fn next_subject_code(name: &str, existing_codes: &[String]) -> String {
    let prefix: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(3)
        .collect::<String>()
        .to_uppercase();

    let max_suffix = existing_codes
        .iter()
        .filter_map(|code| code.strip_prefix(prefix.as_str()))
        .filter_map(|rest| rest.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:02}", prefix, max_suffix + 1)
}

/// Next free roll number: strip non-digits from every existing roll
/// number, take max+1, format as `STU{n:03}`, and keep incrementing past
/// any collision with an existing value.
pub fn next_roll_number(existing: &[String]) -> String {
    let mut n = existing
        .iter()
        .map(|r| {
            r.chars()
                .filter(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse::<u32>()
                .unwrap_or(0)
        })
        .max()
        .unwrap_or(0)
        + 1;

    loop {
        let candidate = format!("STU{:03}", n);
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Numeric part of a roll number, used as the username suffix for
/// admission-approved students.
pub fn roll_number_digits(roll_number: &str) -> u32 {
    roll_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

/// Username stem for an approved applicant: first 3 letters of the first
/// name plus the first letter of the last name (first 4 letters of a
/// single-word name), lowercased, followed by the roll suffix zero-padded
/// to three digits. Collision handling is the caller's job: append an
/// incrementing numeric suffix until free.
pub fn admission_username(full_name: &str, roll_suffix: u32) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();

    let stem: String = match parts.as_slice() {
        [] => "user".to_string(),
        [single] => single.chars().take(4).collect(),
        [first, .., last] => {
            let mut s: String = first.chars().take(3).collect();
            s.extend(last.chars().take(1));
            s
        }
    };

    format!("{}{:03}", stem.to_lowercase(), roll_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subject_code_first_of_prefix() {
        assert_eq!(next_subject_code("Math", &[]), "MAT01");
    }

    #[test]
    fn subject_code_increments_max_suffix() {
        let existing = strings(&["MAT01", "MAT02", "PHY01"]);
        assert_eq!(next_subject_code("Mathematics II", &existing), "MAT03");
    }

    #[test]
    fn subject_code_strips_spaces() {
        assert_eq!(next_subject_code("E n glish", &[]), "ENG01");
    }

    #[test]
    fn subject_code_ignores_unrelated_prefixes() {
        let existing = strings(&["PHY07"]);
        assert_eq!(next_subject_code("Physics", &existing), "PHY08");
        assert_eq!(next_subject_code("Chemistry", &existing), "CHE01");
    }

    #[test]
    fn roll_number_starts_at_one() {
        assert_eq!(next_roll_number(&[]), "STU001");
    }

    #[test]
    fn roll_number_takes_max_plus_one() {
        let existing = strings(&["STU001", "STU007", "R-003"]);
        assert_eq!(next_roll_number(&existing), "STU008");
    }

    #[test]
    fn roll_number_handles_mixed_formats() {
        let existing = strings(&["STU005", "R-003"]);
        assert_eq!(next_roll_number(&existing), "STU006");
    }

    #[test]
    fn admission_username_two_words() {
        assert_eq!(admission_username("John Doe", 7), "johd007");
    }

    #[test]
    fn admission_username_single_word() {
        assert_eq!(admission_username("Rahim", 12), "rahi012");
    }

    #[test]
    fn admission_username_middle_names_use_last() {
        assert_eq!(admission_username("Anna Maria Silva", 3), "anns003");
    }

    #[test]
    fn roll_digits_extracted() {
        assert_eq!(roll_number_digits("STU042"), 42);
        assert_eq!(roll_number_digits("no-digits"), 0);
    }
}
