use std::thread;

use thermal_load::registry;

#[test]
fn thermal_load_before_register_is_safe() {
    let loads = (0..4)
        .map(|_| thread::spawn(registry::thermal_load))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|hdl| hdl.join().unwrap())
        .collect::<Vec<_>>();
    for load in loads {
        assert!((0..=100).contains(&load), "load out of range: {load}");
    }
    assert!(registry::is_registered());
    // Already set up by the queries above.
    assert!(!registry::register());
}
