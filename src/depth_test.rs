use crate::depth::Depth;

#[test]
fn test_depth_empty() {
    let depth = Depth::new();
    assert_eq!(depth.samples(), 0);
    assert_eq!(depth.mean(), 0);
    assert!(depth.percentiles().is_empty());
}

#[test]
fn test_depth_sample() {
    let mut depth = Depth::new();
    for d in vec![3, 3, 4, 4, 4, 5, 5, 6, 7, 9] {
        depth.sample(d);
    }
    assert_eq!(depth.samples(), 10);
    assert_eq!(depth.min(), 3);
    assert_eq!(depth.max(), 9);
    assert_eq!(depth.mean(), 5);
    // cumulative: 7 -> 90%, 9 -> 100%
    assert_eq!(depth.percentiles(), vec![(90, 7), (100, 9)]);

    let json = depth.json();
    assert!(json.starts_with("{ \"min\": 3, \"mean\": 5, \"max\": 9"));
    assert!(json.contains("\"100\": 9"));
    assert!(depth.to_string().contains("(3, 5, 9)"));
}

#[test]
fn test_depth_zero() {
    // a single absent root is sampled at depth zero.
    let mut depth = Depth::new();
    depth.sample(0);
    assert_eq!((depth.min(), depth.max()), (0, 0));
    depth.sample(300);
    assert_eq!((depth.min(), depth.max()), (0, 300));
    assert_eq!(depth.mean(), 150);
}
