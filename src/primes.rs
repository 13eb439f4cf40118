//! Prime generation.
//!
//! A plain sieve of Eratosthenes. Every call builds its own sieve, so there
//! is no shared state between callers.

/// Returns all primes `p <= limit` in ascending order.
pub fn primes_up_to(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }

    let n = limit as usize;
    let mut composite = vec![false; n + 1];
    let mut primes = Vec::new();

    for i in 2..=n {
        if composite[i] {
            continue;
        }
        primes.push(i as u64);

        let mut multiple = match i.checked_mul(i) {
            Some(m) => m,
            None => continue,
        };
        while multiple <= n {
            composite[multiple] = true;
            multiple += i;
        }
    }

    primes
}

/// Returns the first `count` primes.
pub fn first_primes(count: usize) -> Vec<u64> {
    if count == 0 {
        return Vec::new();
    }

    // p_n < n (ln n + ln ln n) for n >= 6
    let mut limit = if count < 6 {
        13
    } else {
        let n = count as f64;
        (n * (n.ln() + n.ln().ln())).ceil() as u64
    };

    loop {
        let mut primes = primes_up_to(limit);
        if primes.len() >= count {
            primes.truncate(count);
            return primes;
        }
        limit *= 2;
    }
}
