//! Centralized validation and helper functions.

/// Longest search term accepted from the symptom search box
pub const MAX_SEARCH_TERM_LENGTH: usize = 100;

/// Maximum number of symptoms that may be passed on one command line or form
pub const MAX_SELECTED_SYMPTOMS: usize = 64;

/// Check whether `n` is prime by trial division.
///
/// Catalog primes are small, so trial division up to `sqrt(n)` is plenty.
///
/// # Examples
///
/// ```
/// use symptom_checker::utils::validation::is_prime;
///
/// assert!(is_prime(2));
/// assert!(is_prime(173));
/// assert!(!is_prime(1));
/// assert!(!is_prime(91)); // 7 * 13
/// ```
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let mut divisor = 3u64;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Compute a signature quotient: the product of a set of symptom primes.
///
/// Returns `None` if the product does not fit in a `u64`.
#[must_use]
pub fn compute_signature<I>(primes: I) -> Option<u64>
where
    I: IntoIterator<Item = u64>,
{
    primes
        .into_iter()
        .try_fold(1u64, |acc, prime| acc.checked_mul(prime))
}

/// Product of primes in a wider type, used for user selections which may be
/// much larger than any condition signature.
///
/// Returns `None` on overflow.
#[must_use]
pub fn prime_product<I>(primes: I) -> Option<u128>
where
    I: IntoIterator<Item = u64>,
{
    primes
        .into_iter()
        .try_fold(1u128, |acc, prime| acc.checked_mul(u128::from(prime)))
}

/// Whether `prime` divides `signature`, i.e. the symptom contributes to the
/// condition identified by the signature.
#[must_use]
pub fn divides(signature: u64, prime: u64) -> bool {
    prime != 0 && signature % prime == 0
}

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search term too long: exceeds {MAX_SEARCH_TERM_LENGTH} characters")]
    SearchTermTooLong,
    #[error("Search term contains control characters")]
    InvalidSearchTerm,
    #[error("Too many symptoms: at most {MAX_SELECTED_SYMPTOMS} may be selected")]
    TooManySymptoms,
}

/// Validate a free-text search term and return it trimmed.
///
/// Blank terms are valid and mean "no search".
///
/// # Errors
///
/// Returns `ValidationError::SearchTermTooLong` if the term exceeds the limit,
/// or `ValidationError::InvalidSearchTerm` if it contains control characters.
pub fn validate_search_term(term: &str) -> Result<&str, ValidationError> {
    let trimmed = term.trim();

    if trimmed.chars().count() > MAX_SEARCH_TERM_LENGTH {
        return Err(ValidationError::SearchTermTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidSearchTerm);
    }

    Ok(trimmed)
}

/// Check that a batch of symptom references stays within the selection limit.
///
/// # Errors
///
/// Returns `ValidationError::TooManySymptoms` when `count` exceeds the limit.
pub fn check_selection_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_SELECTED_SYMPTOMS {
        Err(ValidationError::TooManySymptoms)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes = [2, 3, 5, 7, 11, 13, 29, 97, 101, 163, 167, 173];
        for p in primes {
            assert!(is_prime(p), "{p} should be prime");
        }

        let composites = [0, 1, 4, 9, 15, 21, 25, 49, 91, 169];
        for n in composites {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn test_compute_signature() {
        assert_eq!(compute_signature([2, 3, 5, 7, 11]), Some(2310));
        assert_eq!(compute_signature(Vec::<u64>::new()), Some(1));

        // Influenza: Fever, Cough, Sore throat, Runny nose, Body aches,
        // Fatigue, Headache, Chills
        assert_eq!(
            compute_signature([13, 2, 3, 5, 17, 11, 19, 23]),
            Some(31_870_410)
        );
    }

    #[test]
    fn test_compute_signature_overflow() {
        assert_eq!(compute_signature([u64::MAX, 2]), None);
    }

    #[test]
    fn test_prime_product_wider_than_signature() {
        // 2^70 overflows u64 but fits u128
        let primes = std::iter::repeat(2u64).take(70);
        assert_eq!(prime_product(primes), Some(1u128 << 70));
        assert_eq!(prime_product(std::iter::repeat(2u64).take(128)), None);
    }

    #[test]
    fn test_divides() {
        assert!(divides(2310, 7));
        assert!(!divides(2310, 13));
        assert!(!divides(2310, 0));
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("  cough "), Ok("cough"));
        assert_eq!(validate_search_term(""), Ok(""));
        assert_eq!(
            validate_search_term(&"a".repeat(MAX_SEARCH_TERM_LENGTH + 1)),
            Err(ValidationError::SearchTermTooLong)
        );
        assert_eq!(
            validate_search_term("co\u{0}ugh"),
            Err(ValidationError::InvalidSearchTerm)
        );
    }

    #[test]
    fn test_check_selection_limit() {
        assert!(check_selection_limit(MAX_SELECTED_SYMPTOMS).is_ok());
        assert_eq!(
            check_selection_limit(MAX_SELECTED_SYMPTOMS + 1),
            Err(ValidationError::TooManySymptoms)
        );
    }
}
