//! Several stores joined to one group.

use crate::common::*;
use std::thread;

#[test]
fn shapes_replicate_to_every_member() {
    let config = isolated_config();
    let (alice, alice_changes) = open_counted(config.clone());
    let (bob, bob_changes) = open_counted(config);

    let id = alice.add_point(Color::new(0xFF, 0, 0), 123.45, 98.76).unwrap();
    bob.add_circle(Color::new(0, 0xFF, 0), 400.0, 400.0, 75.0).unwrap();

    assert_eq!(alice_changes.count(), 2);
    assert_eq!(bob_changes.count(), 2);
    assert_eq!(visit_all(&alice), visit_all(&bob));
    assert!(bob.shapes().unwrap().iter().any(|(seen, _)| *seen == id));
}

#[test]
fn late_joiner_only_sees_later_shapes() {
    let config = isolated_config();
    let (early, _) = open_counted(config.clone());
    early.add_point(Color::default(), 1.0, 1.0).unwrap();

    let (late, late_changes) = open_counted(config);
    assert!(late.shapes().unwrap().is_empty());

    early.add_point(Color::default(), 2.0, 2.0).unwrap();
    assert_eq!(late_changes.count(), 1);
    assert_eq!(
        visit_all(&late),
        vec![Visited::Point(Color::default(), 2.0, 2.0)]
    );
}

#[test]
fn groups_do_not_leak_into_each_other() {
    let (left, _) = open_counted(isolated_config());
    let (right, right_changes) = open_counted(isolated_config());

    left.add_point(Color::default(), 0.0, 0.0).unwrap();

    assert_eq!(right_changes.count(), 0);
    assert!(right.shapes().unwrap().is_empty());
}

#[test]
fn closed_member_stops_receiving() {
    let config = isolated_config();
    let (sender, _) = open_counted(config.clone());
    let (mut receiver, receiver_changes) = open_counted(config);

    sender.add_point(Color::default(), 0.0, 0.0).unwrap();
    receiver.close().unwrap();
    sender.add_point(Color::default(), 1.0, 1.0).unwrap();

    assert_eq!(receiver_changes.count(), 1);
    assert_eq!(sender.shapes().unwrap().len(), 2);
}

#[test]
fn dropped_member_stops_receiving() {
    let config = isolated_config();
    let (sender, sender_changes) = open_counted(config.clone());
    let receiver_changes = {
        let (_receiver, changes) = open_counted(config);
        changes
    };

    sender.add_point(Color::default(), 0.0, 0.0).unwrap();

    assert_eq!(receiver_changes.count(), 0);
    assert_eq!(sender_changes.count(), 1);
}

#[test]
fn concurrent_publishers_converge() {
    let config = isolated_config();
    let (observer, observer_changes) = open_counted(config.clone());

    let handles: Vec<_> = (0..4u8)
        .map(|worker| {
            let config = config.clone();
            thread::spawn(move || {
                let (store, _) = open_counted(config);
                for i in 0..25 {
                    store
                        .add_point(Color::new(worker, 0, 0), f64::from(i), f64::from(worker))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Concurrent deliveries may be folded into one refresh.
    assert!((1..=100).contains(&observer_changes.count()));
    assert_eq!(observer.shapes().unwrap().len(), 100);
}
