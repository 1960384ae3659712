// Performance measurement for OrderedMap, against the plain Bst baseline.
// Measure, for `load` entries and `ops` operations:
// * Initial load with random keys.
// * Get operation, hits and misses.
// * Range operation, short scans starting at random keys.
// * Delete operation, half of the loaded entries.
// * Initial load with sorted keys, where the baseline degrades.
//
// For each phase log the elapsed time and the per-op latency, and after
// each load log depth statistics from validate().
//
// Usage: llrb-perf [load] [ops] [seed]

use std::{
    env,
    error::Error,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use llrb_map::{Bst, OrderedMap, Stats};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

// Sorted sets into the baseline walk the whole chain, quadratic in n.
const SORTED_LIMIT: usize = 10_000;

const SCAN_LEN: usize = 100;

struct Opts {
    load: usize,
    ops: usize,
    seed: u64,
}

impl Opts {
    fn from_args() -> Result<Opts> {
        let args: Vec<String> = env::args().skip(1).collect();
        if args.len() > 3 {
            return Err("usage: llrb-perf [load] [ops] [seed]".into());
        }
        let load = match args.get(0) {
            Some(arg) => arg.parse::<usize>()?,
            None => 100_000,
        };
        let ops = match args.get(1) {
            Some(arg) => arg.parse::<usize>()?,
            None => 100_000,
        };
        let seed = match args.get(2) {
            Some(arg) => arg.parse::<u64>()?,
            None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
        };
        if load == 0 {
            return Err("load must be greater than zero".into());
        }
        Ok(Opts { load, ops, seed })
    }
}

// The operations measured here, common to both trees.
trait Index {
    fn name(&self) -> &'static str;
    fn set(&mut self, key: i64, value: i64) -> Option<i64>;
    fn get(&self, key: &i64) -> Option<i64>;
    fn delete(&mut self, key: &i64) -> Option<i64>;
    fn scan(&self, key: i64, n: usize) -> usize;
    fn validate(&self) -> Result<Stats>;
}

impl Index for OrderedMap<i64, i64> {
    fn name(&self) -> &'static str {
        "llrb"
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        OrderedMap::set(self, key, value)
    }

    fn get(&self, key: &i64) -> Option<i64> {
        OrderedMap::get(self, key)
    }

    fn delete(&mut self, key: &i64) -> Option<i64> {
        OrderedMap::delete(self, key)
    }

    fn scan(&self, key: i64, n: usize) -> usize {
        self.range(key..).take(n).count()
    }

    fn validate(&self) -> Result<Stats> {
        Ok(OrderedMap::validate(self)?)
    }
}

impl Index for Bst<i64, i64> {
    fn name(&self) -> &'static str {
        "bst"
    }

    fn set(&mut self, key: i64, value: i64) -> Option<i64> {
        Bst::set(self, key, value)
    }

    fn get(&self, key: &i64) -> Option<i64> {
        Bst::get(self, key)
    }

    fn delete(&mut self, key: &i64) -> Option<i64> {
        Bst::delete(self, key)
    }

    fn scan(&self, key: i64, n: usize) -> usize {
        self.range(key..).take(n).count()
    }

    fn validate(&self) -> Result<Stats> {
        Ok(Bst::validate(self)?)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = Opts::from_args()?;
    info!("load:{} ops:{} seed:{}", opts.load, opts.ops, opts.seed);

    perf(&mut OrderedMap::<i64, i64>::new(), &opts)?;
    perf(&mut Bst::<i64, i64>::with_seed(opts.seed), &opts)?;

    let n = opts.load.min(SORTED_LIMIT);
    sorted_load(&mut OrderedMap::<i64, i64>::new(), n)?;
    sorted_load(&mut Bst::<i64, i64>::with_seed(opts.seed), n)?;
    Ok(())
}

fn perf<I: Index>(index: &mut I, opts: &Opts) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let keyspace = (opts.load as i64) * 4;
    let name = index.name();

    let start = Instant::now();
    let mut keys = Vec::with_capacity(opts.load);
    for _ in 0..opts.load {
        let key = rng.gen_range(0..keyspace);
        index.set(key, key * 10);
        keys.push(key);
    }
    log_elapsed(name, "load", start.elapsed(), opts.load);
    log_stats(name, &index.validate()?);

    let (start, mut hits) = (Instant::now(), 0);
    for _ in 0..opts.ops {
        let key = rng.gen_range(0..keyspace);
        if index.get(&key).is_some() {
            hits += 1;
        }
    }
    log_elapsed(name, "get", start.elapsed(), opts.ops);
    info!("{}: get hits {}/{}", name, hits, opts.ops);

    let (start, mut scanned) = (Instant::now(), 0);
    for _ in 0..opts.ops {
        scanned += index.scan(rng.gen_range(0..keyspace), SCAN_LEN);
    }
    log_elapsed(name, "range", start.elapsed(), opts.ops);
    info!("{}: range scanned {} entries", name, scanned);

    let start = Instant::now();
    let n = keys.len() / 2;
    for key in keys[..n].iter() {
        index.delete(key);
    }
    log_elapsed(name, "delete", start.elapsed(), n);
    log_stats(name, &index.validate()?);

    Ok(())
}

fn sorted_load<I: Index>(index: &mut I, n: usize) -> Result<()> {
    let name = index.name();
    let start = Instant::now();
    for key in 0..(n as i64) {
        index.set(key, key);
    }
    log_elapsed(name, "sorted-load", start.elapsed(), n);
    log_stats(name, &index.validate()?);
    Ok(())
}

fn log_elapsed(name: &str, phase: &str, elapsed: Duration, n: usize) {
    let latency = elapsed.as_nanos() / (n.max(1) as u128);
    info!(
        "{}: {} {} ops in {:?}, {}ns/op",
        name, phase, n, elapsed, latency
    );
}

fn log_stats(name: &str, stats: &Stats) {
    info!(
        "{}: entries:{} node_size:{} blacks:{:?}",
        name,
        stats.entries(),
        stats.node_size(),
        stats.blacks()
    );
    if let Some(depths) = stats.depths() {
        info!("{}: {}", name, depths);
        info!("{}: {}", name, depths.json());
    }
}
