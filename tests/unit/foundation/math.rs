use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_seeds_diverge() {
    let mut a = Rng64::new(1);
    let mut b = Rng64::new(2);
    assert_ne!(a.next_u64(), b.next_u64());
}

#[test]
fn next_below_stays_in_range() {
    let mut rng = Rng64::new(99);
    for _ in 0..1000 {
        assert!(rng.next_below(10) < 10);
    }
    assert_eq!(rng.next_below(0), 0);
    let f = rng.next_f64_01();
    assert!((0.0..1.0).contains(&f));
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp_f64(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp_f64(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp_f64(2.0, 6.0, 0.25), 3.0);
}
