use crate::error::{PipelineError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;
use tracing::debug;

/// Indexy riadkov trénovacej a testovacej množiny (zoradené vzostupne)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Partition {
    pub fn train_size(&self) -> usize {
        self.train.len()
    }

    pub fn test_size(&self) -> usize {
        self.test.len()
    }
}

/// Stratifikované rozdelenie train/test s pevným seedom.
/// Podiel tried v oboch množinách kopíruje celý dataset.
#[derive(Debug, Clone)]
pub struct StratifiedSplitter {
    test_fraction: f64,
    seed: u64,
}

impl StratifiedSplitter {
    pub fn new(test_fraction: f64, seed: u64) -> Result<Self> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "test_fraction musí byť v intervale (0, 1), zadané {}",
                test_fraction
            )));
        }
        Ok(Self { test_fraction, seed })
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn split(&self, labels: &[u8]) -> Result<Partition> {
        let n = labels.len();
        let n_test = (self.test_fraction * n as f64).ceil() as usize;
        let n_train = n.saturating_sub(n_test);

        if n_test == 0 || n_train == 0 {
            return Err(PipelineError::InvalidSplit(format!(
                "{} vzoriek nestačí na rozdelenie s test_fraction {}",
                n, self.test_fraction
            )));
        }

        let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
        for (idx, &label) in labels.iter().enumerate() {
            by_class.entry(label).or_default().push(idx);
        }

        if let Some((label, members)) = by_class.iter().find(|(_, m)| m.len() < 2) {
            return Err(PipelineError::InvalidSplit(format!(
                "trieda {} má iba {} vzorku, potrebné sú aspoň 2",
                label,
                members.len()
            )));
        }
        if n_test < by_class.len() || n_train < by_class.len() {
            return Err(PipelineError::InvalidSplit(format!(
                "train ({}) aj test ({}) musia obsahovať aspoň {} vzoriek",
                n_train,
                n_test,
                by_class.len()
            )));
        }

        let allocation = allocate_test_counts(&by_class, n, n_test);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut train = Vec::with_capacity(n_train);
        let mut test = Vec::with_capacity(n_test);
        for (label, members) in by_class.iter_mut() {
            members.shuffle(&mut rng);
            let k = allocation[label];
            test.extend_from_slice(&members[..k]);
            train.extend_from_slice(&members[k..]);
        }
        train.sort_unstable();
        test.sort_unstable();

        debug!(
            train = train.len(),
            test = test.len(),
            seed = self.seed,
            "stratified split done"
        );

        Ok(Partition { train, test })
    }
}

/// Počet testovacích vzoriek pre každú triedu: dolné celé časti podielu
/// a zvyšok podľa najväčšieho zlomkového zvyšku (remíza -> nižší label).
fn allocate_test_counts(
    by_class: &BTreeMap<u8, Vec<usize>>,
    n: usize,
    n_test: usize,
) -> BTreeMap<u8, usize> {
    let mut allocation = BTreeMap::new();
    let mut remainders = Vec::with_capacity(by_class.len());

    for (&label, members) in by_class {
        let exact = n_test * members.len();
        allocation.insert(label, exact / n);
        remainders.push((exact % n, label));
    }

    let assigned: usize = allocation.values().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, label) in remainders.iter().take(n_test - assigned) {
        if let Some(count) = allocation.get_mut(&label) {
            *count += 1;
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize, positives: usize) -> Vec<u8> {
        // pozitívne rozhádzané cez celý dataset
        (0..n).map(|i| u8::from(i * positives % n < positives)).collect()
    }

    #[test]
    fn split_is_disjoint_and_complete() {
        let y = labels(1000, 150);
        let partition = StratifiedSplitter::new(0.2, 42).unwrap().split(&y).unwrap();

        let mut all: Vec<usize> = partition.train.iter().chain(&partition.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn scenario_1000_rows_150_positives() {
        let y = labels(1000, 150);
        assert_eq!(y.iter().filter(|&&l| l == 1).count(), 150);

        let partition = StratifiedSplitter::new(0.2, 42).unwrap().split(&y).unwrap();
        assert_eq!(partition.test_size(), 200);
        assert_eq!(partition.train_size(), 800);

        let test_pos = partition.test.iter().filter(|&&i| y[i] == 1).count();
        assert!((25..=35).contains(&test_pos));
        assert_eq!(test_pos, 30);

        let train_pos = partition.train.iter().filter(|&&i| y[i] == 1).count();
        let train_frac = train_pos as f64 / partition.train_size() as f64;
        assert!((train_frac - 0.15).abs() <= 0.02);
    }

    #[test]
    fn same_seed_same_partition() {
        let y = labels(500, 60);
        let a = StratifiedSplitter::new(0.2, 7).unwrap().split(&y).unwrap();
        let b = StratifiedSplitter::new(0.2, 7).unwrap().split(&y).unwrap();
        assert_eq!(a, b);

        let c = StratifiedSplitter::new(0.2, 8).unwrap().split(&y).unwrap();
        assert_ne!(a.test, c.test);
    }

    #[test]
    fn test_size_rounds_up() {
        let y = labels(11, 4);
        let partition = StratifiedSplitter::new(0.2, 1).unwrap().split(&y).unwrap();
        assert_eq!(partition.test_size(), 3);
        assert_eq!(partition.train_size(), 8);
    }

    #[test]
    fn remainder_goes_to_largest_fraction() {
        let mut by_class = BTreeMap::new();
        by_class.insert(0u8, (0..7).collect::<Vec<_>>());
        by_class.insert(1u8, (7..10).collect::<Vec<_>>());
        // 3 * 7 / 10 = 2.1, 3 * 3 / 10 = 0.9
        let allocation = allocate_test_counts(&by_class, 10, 3);
        assert_eq!(allocation[&0], 2);
        assert_eq!(allocation[&1], 1);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(StratifiedSplitter::new(0.0, 42).is_err());
        assert!(StratifiedSplitter::new(1.0, 42).is_err());
        assert!(StratifiedSplitter::new(f64::NAN, 42).is_err());

        let splitter = StratifiedSplitter::new(0.2, 42).unwrap();
        assert!(matches!(splitter.split(&[0]), Err(PipelineError::InvalidSplit(_))));
        assert!(matches!(
            splitter.split(&[0, 0, 0, 0, 0, 1]),
            Err(PipelineError::InvalidSplit(_))
        ));
    }
}
