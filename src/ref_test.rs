// Reference index over keys in [0, capacity), each slot holding the
// value for its key. Answers every ordered query by a linear scan.
struct RefIndex {
    entries: Vec<Option<i64>>,
}

impl RefIndex {
    fn new(capacity: usize) -> RefIndex {
        RefIndex {
            entries: vec![None; capacity],
        }
    }

    fn len(&self) -> usize {
        self.entries.iter().filter(|v| v.is_some()).count()
    }

    fn get(&self, key: i64) -> Option<i64> {
        self.entries[key as usize]
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        self.entries[key as usize].replace(value)
    }

    fn delete(&mut self, key: i64) -> Option<i64> {
        self.entries[key as usize].take()
    }

    fn iter(&self) -> std::vec::IntoIter<(i64, i64)> {
        self.range(Bound::Unbounded, Bound::Unbounded)
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, i64)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(key, value)| value.map(|value| (key as i64, value)))
            .filter(|(key, _)| (low, high).contains(key))
            .collect::<Vec<(i64, i64)>>()
            .into_iter()
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, i64)> {
        let mut entries: Vec<(i64, i64)> = self.range(low, high).collect();
        entries.reverse();
        entries.into_iter()
    }

    fn keys(&self) -> Vec<i64> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn min(&self) -> Option<i64> {
        self.keys().first().cloned()
    }

    fn max(&self) -> Option<i64> {
        self.keys().last().cloned()
    }

    fn floor(&self, key: i64) -> Option<i64> {
        self.keys().into_iter().filter(|k| *k <= key).last()
    }

    fn ceiling(&self, key: i64) -> Option<i64> {
        self.keys().into_iter().find(|k| *k >= key)
    }

    fn rank(&self, key: i64) -> usize {
        self.keys().into_iter().filter(|k| *k < key).count()
    }

    fn select(&self, k: usize) -> Option<i64> {
        self.keys().get(k).cloned()
    }
}

fn random_low_high(rng: &mut StdRng, size: usize) -> (Bound<i64>, Bound<i64>) {
    let low = rng.gen_range(0..size as i64);
    let high = rng.gen_range(0..size as i64);
    let low = match rng.gen_range(0..3) {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        _ => Bound::Unbounded,
    };
    let high = match rng.gen_range(0..3) {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        _ => Bound::Unbounded,
    };
    (low, high)
}

fn make_rng() -> StdRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64;
    println!("seed {}", seed);
    StdRng::seed_from_u64(seed)
}
