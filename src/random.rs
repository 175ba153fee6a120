use rand::prelude::*;
use rand::rngs::SmallRng;
use seahash::hash;

/// Source of uniform indices. Sampling is written against this so callers can
/// swap the PRNG for a scripted one.
pub trait RandomSource {
    /// returns a value in `[0, n)`, n must be larger than zero
    fn below(&mut self, n: usize) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64);

impl Seed {
    pub fn from_u64(seed: u64) -> Seed {
        Seed(seed)
    }

    pub fn from_str(seed: &str) -> Seed {
        Seed(hash(seed.as_bytes()))
    }

    /// numeric strings are used as is, anything else gets hashed
    pub fn parse(seed: &str) -> Seed {
        match seed.parse::<u64>() {
            Ok(seed) => Seed::from_u64(seed),
            Err(_) => Seed::from_str(seed),
        }
    }

    pub fn random() -> Seed {
        Seed::from_u64(Random::get_random_u64())
    }
}

pub struct Random {
    pub seed: Seed,
    gen: SmallRng,
}

impl Random {
    pub fn new(seed: Seed) -> Random {
        Random {
            gen: SmallRng::seed_from_u64(seed.0),
            seed,
        }
    }

    /// derive a u64 seed from entropy
    pub fn get_random_u64() -> u64 {
        let mut tmp_rng = SmallRng::from_entropy();
        tmp_rng.next_u64()
    }
}

impl RandomSource for Random {
    fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "no valid range");
        self.gen.gen_range(0..n)
    }
}

pub fn pick_element<'a, T, R: RandomSource>(rnd: &mut R, values: &'a [T]) -> Option<&'a T> {
    if values.is_empty() {
        return None;
    }

    values.get(rnd.below(values.len()))
}

/// Draws `amount` elements without replacement, in draw order. Returns None if
/// `amount` exceeds the number of values.
pub fn sample_distinct<T: Clone, R: RandomSource>(
    rnd: &mut R,
    values: &[T],
    amount: usize,
) -> Option<Vec<T>> {
    if amount > values.len() {
        return None;
    }

    // partial fisher-yates over a scratch copy
    let mut pool = values.to_vec();
    for i in 0..amount {
        let j = i + rnd.below(pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(amount);

    Some(pool)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// replays a fixed list of offsets, wrapping around
    pub(crate) struct Scripted {
        pub offsets: Vec<usize>,
        pub cursor: usize,
    }

    impl Scripted {
        pub(crate) fn new(offsets: Vec<usize>) -> Scripted {
            Scripted { offsets, cursor: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn below(&mut self, n: usize) -> usize {
            let value = self.offsets[self.cursor % self.offsets.len()];
            self.cursor += 1;
            value % n
        }
    }

    #[test]
    fn numeric_seed_strings_are_not_hashed() {
        assert_eq!(Seed::parse("1337"), Seed::from_u64(1337));
        assert_eq!(Seed::parse("kobe"), Seed::from_str("kobe"));
        assert_ne!(Seed::parse("kobe"), Seed::parse("paris"));
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Random::new(Seed::from_u64(42));
        let mut b = Random::new(Seed::from_u64(42));
        let values: Vec<u32> = (0..100).collect();

        assert_eq!(
            sample_distinct(&mut a, &values, 20),
            sample_distinct(&mut b, &values, 20)
        );
    }

    #[test]
    fn below_stays_in_range() {
        let mut rnd = Random::new(Seed::from_str("range"));
        for n in 1..50 {
            assert!(rnd.below(n) < n);
        }
    }

    #[test]
    fn zero_offsets_take_prefix() {
        let mut rnd = Scripted::new(vec![0]);
        assert_eq!(sample_distinct(&mut rnd, &[5, 6, 7, 8], 3), Some(vec![5, 6, 7]));
    }

    #[test]
    fn scripted_swaps() {
        // i=0 picks index 2, i=1 picks 1 + 1 = 2 (which now holds the old first element)
        let mut rnd = Scripted::new(vec![2, 1]);
        assert_eq!(sample_distinct(&mut rnd, &[10, 20, 30], 2), Some(vec![30, 10]));
    }

    #[test]
    fn sample_is_distinct_and_bounded() {
        let mut rnd = Random::new(Seed::from_u64(7));
        let values: Vec<u32> = (0..37).collect();

        for amount in 0..=values.len() {
            let mut sample = sample_distinct(&mut rnd, &values, amount).unwrap();
            assert_eq!(sample.len(), amount);
            sample.sort_unstable();
            sample.dedup();
            assert_eq!(sample.len(), amount);
        }

        assert_eq!(sample_distinct(&mut rnd, &values, 38), None);
    }

    #[test]
    fn pick_from_empty() {
        let mut rnd = Scripted::new(vec![0]);
        let empty: [u32; 0] = [];
        assert_eq!(pick_element(&mut rnd, &empty), None);
        assert_eq!(pick_element(&mut rnd, &[9]), Some(&9));
    }
}
