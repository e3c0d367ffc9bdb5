//! End-to-end usage of a single store.

use crate::common::*;
use shapecache::{Shape, ShapeKind};

const OCTAGON: [f64; 16] = [
    200.0, 200.0, 250.0, 150.0, 300.0, 150.0, 350.0, 200.0, 350.0, 250.0, 300.0, 300.0, 250.0,
    300.0, 200.0, 250.0,
];

#[test]
fn point_is_visible_after_add() {
    let (store, _) = open_counted(isolated_config());

    let id = store.add_point(Color::new(0xFF, 0, 0), 123.45, 98.76).unwrap();

    assert_eq!(
        visit_all(&store),
        vec![Visited::Point(Color::new(0xFF, 0, 0), 123.45, 98.76)]
    );
    let shapes = store.shapes().unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].0, id);
}

#[test]
fn octagon_round_trips_exactly() {
    let (store, _) = open_counted(isolated_config());

    store.add_polygon(Color::new(0, 0, 0xFF), 8, &OCTAGON).unwrap();

    match visit_all(&store).as_slice() {
        [Visited::Polygon(color, count, vertices)] => {
            assert_eq!(*color, Color::new(0, 0, 0xFF));
            assert_eq!(*count, 8);
            assert_eq!(vertices.as_slice(), &OCTAGON[..]);
        }
        other => panic!("expected one polygon, got {:?}", other),
    }
}

#[test]
fn three_shapes_three_notifications() {
    let (store, changes) = open_counted(isolated_config());

    store.add_point(Color::new(0xFF, 0, 0), 123.45, 98.76).unwrap();
    store.add_circle(Color::new(0, 0xFF, 0), 400.0, 400.0, 75.0).unwrap();
    store.add_polygon(Color::new(0, 0, 0xFF), 8, &OCTAGON).unwrap();

    assert_eq!(changes.count(), 3);
    let kinds: Vec<ShapeKind> = store
        .shapes()
        .unwrap()
        .iter()
        .map(|(_, shape)| shape.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::Point, ShapeKind::Circle, ShapeKind::Polygon]
    );
}

#[test]
fn ids_are_unique() {
    let (store, _) = open_counted(isolated_config());
    let a = store.add_point(Color::default(), 1.0, 1.0).unwrap();
    let b = store.add_point(Color::default(), 1.0, 1.0).unwrap();
    assert_ne!(a, b);
    assert_eq!(store.shapes().unwrap().len(), 2);
}

#[test]
fn open_without_callback_still_tracks_shapes() {
    let mut store = ShapeStore::new(isolated_config());
    store.open(None).unwrap();

    store.add_circle(Color::new(1, 2, 3), 0.5, -0.5, 2.0).unwrap();

    assert_eq!(
        visit_all(&store),
        vec![Visited::Circle(Color::new(1, 2, 3), 0.5, -0.5, 2.0)]
    );
}

#[test]
fn early_stop_skips_remaining_shapes() {
    let (store, _) = open_counted(isolated_config());
    store.add_circle(Color::default(), 0.0, 0.0, 1.0).unwrap();
    store.add_point(Color::default(), 0.0, 0.0).unwrap();
    store.add_polygon(Color::default(), 1, &[0.0, 0.0]).unwrap();

    let mut calls = Vec::new();
    let completed = {
        let calls = std::cell::RefCell::new(&mut calls);
        store
            .enumerate(
                ShapeIterators::new()
                    .on_point(|_, _, _| {
                        calls.borrow_mut().push("point");
                        true
                    })
                    .on_circle(|_, _, _, _| {
                        calls.borrow_mut().push("circle");
                        false
                    })
                    .on_polygon(|_, _, _| {
                        calls.borrow_mut().push("polygon");
                        true
                    }),
            )
            .unwrap()
    };

    assert!(!completed);
    assert_eq!(calls, vec!["circle"]);
}

#[test]
fn missing_iterator_is_rejected() {
    let (store, _) = open_counted(isolated_config());
    store.add_point(Color::default(), 0.0, 0.0).unwrap();

    let result = store.enumerate(
        ShapeIterators::new()
            .on_circle(|_, _, _, _| true)
            .on_polygon(|_, _, _| true),
    );
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn polygon_with_wrong_length_is_not_published() {
    let (store, changes) = open_counted(isolated_config());

    let result = store.add_polygon(Color::default(), 8, &OCTAGON[..15]);

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert_eq!(changes.count(), 0);
    assert!(store.shapes().unwrap().is_empty());
}

#[test]
fn shapes_are_returned_by_value() {
    let (store, _) = open_counted(isolated_config());
    store.add_polygon(Color::default(), 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();

    let shapes = store.shapes().unwrap();
    match &shapes[0].1 {
        Shape::Polygon(p) => assert_eq!(p.points().collect::<Vec<_>>(), vec![(1.0, 2.0), (3.0, 4.0)]),
        other => panic!("expected polygon, got {:?}", other),
    }
}
