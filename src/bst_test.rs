use std::ops::{Bound, RangeBounds};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::bst::Bst;
use crate::error::Error;

#[test]
fn test_fixture() {
    let mut bst: Bst<&str, i64> = Bst::with_seed(7);
    for (key, value) in vec![("e", 1), ("a", 2), ("m", 3), ("i", 4), ("d", 5)] {
        assert!(bst.set(key, value).is_none());
    }
    let orig = bst.clone();

    assert_eq!(bst.len(), 5);
    assert_eq!(bst.get("e"), Some(1));
    assert_eq!(bst.min(), Ok("a"));
    assert_eq!(bst.max(), Ok("m"));
    assert_eq!(bst.floor("b"), Ok(Some("a")));
    assert_eq!(bst.ceiling("b"), Ok(Some("d")));
    assert_eq!(bst.select(3), Ok("i"));
    assert_eq!(bst.rank("i"), Ok(3));

    assert_eq!(bst.delete_min(), Ok(("a", 2)));
    assert_eq!(bst.len(), 4);
    assert_eq!(bst.min(), Ok("d"));

    assert_eq!(bst.delete_max(), Ok(("m", 3)));
    assert_eq!(bst.len(), 3);
    assert_eq!(bst.max(), Ok("i"));

    assert_eq!(bst.delete("e"), Some(1));
    assert_eq!(bst.len(), 2);
    assert_eq!(bst.min(), Ok("d"));
    assert_eq!(bst.max(), Ok("i"));
    assert!(bst.validate().is_ok());

    let keys: Vec<&str> = orig.keys_in_range(&"d", &"i").collect();
    assert_eq!(keys, vec!["d", "e", "i"]);
}

#[test]
fn test_empty_preconditions() {
    let mut bst: Bst<i64, i64> = Bst::new();

    assert_eq!(bst.get(&1), None);
    assert_eq!(bst.delete(&1), None);
    assert_eq!(bst.min(), Err(Error::EmptyTree("min")));
    assert_eq!(bst.max(), Err(Error::EmptyTree("max")));
    assert_eq!(bst.floor(&1), Err(Error::EmptyTree("floor")));
    assert_eq!(bst.ceiling(&1), Err(Error::EmptyTree("ceiling")));
    assert_eq!(bst.select(0), Err(Error::EmptyTree("select")));
    assert_eq!(bst.rank(&1), Err(Error::EmptyTree("rank")));
    assert_eq!(bst.delete_min(), Err(Error::EmptyTree("delete_min")));
    assert_eq!(bst.delete_max(), Err(Error::EmptyTree("delete_max")));

    assert_eq!(bst.create(1, 10), Ok(()));
    assert_eq!(bst.create(1, 20), Err(Error::OverwriteKey));
    assert_eq!(bst.select(1), Err(Error::SelectOutOfRange(1, 1)));
    assert!(bst.validate().unwrap().blacks().is_none());
}

#[test]
fn test_sorted_degrades() {
    let n = 1000;
    let bst: Bst<i64, i64> = (0..n).map(|k| (k, k)).collect();
    let stats = bst.validate().unwrap();
    // every entry hangs off the right of the previous one.
    assert_eq!(stats.depths().unwrap().max(), n as usize);
    assert_eq!(bst.select(999), Ok(999));
    assert_eq!(bst.rank(&500), Ok(500));
}

#[test]
fn test_sorted_deep() {
    // a single chain, deeper than any thread stack could recurse.
    let n: u64 = 200_000;
    let mut bst: Bst<u64, u64> = (0..n).map(|k| (k, k)).collect();
    assert_eq!(bst.len(), n as usize);

    let stats = bst.validate().unwrap();
    assert_eq!(stats.depths().unwrap().max(), n as usize);
    assert_eq!(stats.depths().unwrap().min(), 1);

    assert!(bst.iter().eq((0..n).map(|k| (k, k))));
    assert!(bst.keys().eq(0..n));
    assert!(bst.range(n - 10..).map(|(k, _)| k).eq(n - 10..n));
    assert!(bst.iter().rev().map(|(k, _)| k).take(3).eq((n - 3..n).rev()));
    assert_eq!(bst.get(&(n - 1)), Some(n - 1));
    assert_eq!(bst.floor(&(n + 5)), Ok(Some(n - 1)));
    assert_eq!(bst.ceiling(&(n - 1)), Ok(Some(n - 1)));
    assert_eq!(bst.rank(&(n - 1)), Ok(n as usize - 1));
    assert_eq!(bst.select(n as usize - 1), Ok(n - 1));

    let copy = bst.clone();
    assert_eq!(copy.len(), bst.len());
    assert_eq!(copy.max(), Ok(n - 1));

    // setting one more key walks the whole chain.
    assert_eq!(bst.set(n, n), None);
    assert_eq!(bst.delete_max(), Ok((n, n)));
    assert_eq!(bst.delete_max(), Ok((n - 1, n - 1)));
    assert_eq!(bst.delete(&(n / 2)), Some(n / 2));
    assert_eq!(bst.delete(&(n / 2)), None);
    assert_eq!(bst.delete_min(), Ok((0, 0)));
    for key in 1..1000 {
        assert_eq!(bst.delete(&key), Some(key));
    }
    assert_eq!(bst.len(), n as usize - 1002);
    let stats = bst.validate().unwrap();
    assert_eq!(stats.depths().unwrap().max(), n as usize - 1002);
    assert_eq!(bst.min(), Ok(1000));

    drop(copy);
    drop(bst);
}

#[test]
fn test_load_matches_set() {
    // runs of ascending keys mixed with overwrites and smaller keys.
    let mut rng = make_rng();
    let mut entries: Vec<(i64, i64)> = vec![];
    for _ in 0..50 {
        let start = rng.gen_range(0..1000);
        let len = rng.gen_range(0..40);
        entries.extend((start..start + len).map(|k| (k, rng.gen_range(0..100))));
    }

    let loaded: Bst<i64, i64> = entries.iter().cloned().collect();
    let mut bst: Bst<i64, i64> = Bst::new();
    for (key, value) in entries.iter().cloned() {
        bst.set(key, value);
    }
    assert_eq!(loaded.shape(), bst.shape());
    assert!(loaded.iter().eq(bst.iter()));
    assert_eq!(loaded.validate().unwrap().depths(), bst.validate().unwrap().depths());
}

#[test]
fn test_join_both_sides() {
    // two-child deletes join from either side, depending on the seed.
    for seed in 0..8 {
        let mut bst: Bst<i64, i64> = Bst::with_seed(seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut refns = RefIndex::new(512);
        for _ in 0..512 {
            let key = rng.gen_range(0..512);
            assert_eq!(bst.set(key, key), refns.set(key, key));
        }
        for key in 0..512 {
            assert_eq!(bst.delete(&key), refns.delete(key));
            assert!(bst.validate().is_ok());
            assert!(bst.iter().eq(refns.iter()));
        }
        assert!(bst.is_empty());
    }
}

#[test]
fn test_crud() {
    let size = 1000;
    let mut bst: Bst<i64, i64> = Bst::new();
    let mut refns = RefIndex::new(size);
    let mut rng = make_rng();

    for _ in 0..50_000 {
        let key: i64 = rng.gen_range(0..size as i64);
        let value: i64 = rng.gen();
        match rng.gen_range(0..5) {
            0 => assert_eq!(bst.set(key, value), refns.set(key, value)),
            1 => assert_eq!(bst.delete(&key), refns.delete(key)),
            2 => assert_eq!(bst.get(&key), refns.get(key)),
            3 => {
                if refns.len() > 0 {
                    assert_eq!(bst.floor(&key), Ok(refns.floor(key)));
                    assert_eq!(bst.ceiling(&key), Ok(refns.ceiling(key)));
                    assert_eq!(bst.rank(&key), Ok(refns.rank(key)));
                }
            }
            4 => {
                let (item, refkey) = match rng.gen_range(0..2) {
                    0 => (bst.delete_min().ok(), refns.min()),
                    _ => (bst.delete_max().ok(), refns.max()),
                };
                let refitem = refkey.and_then(|k| refns.delete(k).map(|v| (k, v)));
                assert_eq!(item, refitem);
            }
            op => panic!("unreachable {}", op),
        }
        assert_eq!(bst.len(), refns.len());
        assert!(bst.validate().is_ok());
    }

    assert!(bst.iter().eq(refns.iter()));
    for k in 0..bst.len() {
        assert_eq!(bst.select(k).ok(), refns.select(k));
    }
    assert_eq!(bst.random(&mut rng).is_some(), bst.len() > 0);

    for _ in 0..1000 {
        let (low, high) = random_low_high(&mut rng, size);
        assert!(bst.range((low, high)).eq(refns.range(low, high)));
        assert!(bst.range((low, high)).rev().eq(refns.reverse(low, high)));
    }
}

include!("./ref_test.rs");
