//! Property-based tests for primality and factorization.
//!
//! - is_prime agrees with plain trial division
//! - prime_factors multiplies back to n, every factor prime, ascending
//! - repeated queries give the same answer and leave the prefix alone

use proptest::prelude::*;

use primecache::core::engine::PrimeEngine;

fn trial_division(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn is_prime_matches_trial_division(n in 0u64..200_000u64) {
        let mut engine = PrimeEngine::new();
        prop_assert_eq!(engine.is_prime(n), trial_division(n));
    }

    #[test]
    fn shared_engine_matches_trial_division(ns in proptest::collection::vec(2u64..50_000u64, 1..40)) {
        // One engine across many queries: cache reuse must not change answers.
        let mut engine = PrimeEngine::new();
        for n in ns {
            prop_assert_eq!(engine.is_prime(n), trial_division(n), "n = {}", n);
        }
    }

    #[test]
    fn factors_multiply_back(n in 2u64..1_000_000u64) {
        let mut engine = PrimeEngine::new();
        let factors = engine.prime_factors(n);

        let product: u64 = factors.iter().product();
        prop_assert_eq!(product, n);
        prop_assert!(factors.windows(2).all(|w| w[0] <= w[1]));
        for &p in &factors {
            prop_assert!(trial_division(p), "{} is not prime", p);
        }
        prop_assert!(engine.are_prime(&factors));
    }

    #[test]
    fn known_factorization_agrees(n in 2u64..10_000u64) {
        let mut engine = PrimeEngine::new();
        engine.first_primes(30); // last = 113, covers n < 12769
        let known = engine.prime_factors_known(n).unwrap();
        let full = engine.prime_factors(n);
        prop_assert_eq!(known.as_slice(), full.as_slice());
    }

    #[test]
    fn is_prime_idempotent(n in 2u64..100_000u64) {
        let mut engine = PrimeEngine::new();
        let first = engine.is_prime(n);
        let prefix = engine.cache().prefix().to_vec();

        let second = engine.is_prime(n);
        prop_assert_eq!(first, second);
        prop_assert_eq!(engine.cache().prefix(), prefix.as_slice());
    }

    #[test]
    fn prefix_stays_gap_free(count in 1usize..400usize) {
        let mut engine = PrimeEngine::new();
        let primes = engine.first_primes(count);

        prop_assert_eq!(primes.len(), count);
        let last = *primes.last().unwrap();
        let expected: Vec<u64> = (2..=last).filter(|&n| trial_division(n)).collect();
        prop_assert_eq!(engine.cache().prefix(), expected.as_slice());
        for p in &primes {
            prop_assert!(engine.cache().is_known(*p));
        }
    }
}
