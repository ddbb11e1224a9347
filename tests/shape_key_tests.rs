use nalgebra::Point3;
use symrs::{
    algorithm::unsymmetrize,
    errors::Skipped,
    float_types::Real,
    mesh::{MirrorDirection, MirroredSelection, ShapeKeys},
};

fn basis() -> Vec<Point3<Real>> {
    (0..8).map(|i| Point3::new(i as Real, 0.0, 0.0)).collect()
}

/// `Basis` plus a key displacing every vertex by `dy` along Y.
fn displaced(dy: Real) -> Vec<Point3<Real>> {
    basis().into_iter().map(|p| p + nalgebra::Vector3::y() * dy).collect()
}

#[test]
fn smile_moves_onto_the_right_key() {
    let mut keys = ShapeKeys::new(basis())
        .with("Smile_L", displaced(1.0))
        .with("Smile_R", basis());
    let selection = MirroredSelection::from_indices([5]);

    let skipped = unsymmetrize(&mut keys, &selection, MirrorDirection::NegativeToPositive);

    assert!(skipped.is_empty());
    let smile_l = &keys.get("Smile_L").unwrap().coords;
    let smile_r = &keys.get("Smile_R").unwrap().coords;
    assert_eq!(smile_r[5], Point3::new(5.0, 1.0, 0.0));
    assert_eq!(smile_l[5], basis()[5]);
    // vertices outside the selection keep their deltas
    assert_eq!(smile_l[4], Point3::new(4.0, 1.0, 0.0));
    assert_eq!(smile_r[4], basis()[4]);
}

#[test]
fn positive_direction_fills_the_left_key() {
    let mut keys = ShapeKeys::new(basis())
        .with("Brow.L", basis())
        .with("Brow.R", displaced(0.5));
    let selection = MirroredSelection::from_indices(0..4);

    unsymmetrize(&mut keys, &selection, MirrorDirection::PositiveToNegative);

    let brow_l = &keys.get("Brow.L").unwrap().coords;
    let brow_r = &keys.get("Brow.R").unwrap().coords;
    for v in 0..4 {
        assert_eq!(brow_l[v].y, 0.5);
        assert_eq!(brow_r[v], basis()[v]);
    }
    assert_eq!(brow_r[6].y, 0.5);
}

#[test]
fn basis_is_never_written() {
    let mut keys = ShapeKeys::new(basis())
        .with("Smile_L", displaced(1.0))
        .with("Smile_R", displaced(2.0));
    let selection = MirroredSelection::from_indices(0..8);

    unsymmetrize(&mut keys, &selection, MirrorDirection::PositiveToNegative);
    unsymmetrize(&mut keys, &selection, MirrorDirection::NegativeToPositive);

    assert_eq!(keys.basis().coords, basis());
}

#[test]
fn rest_vertices_are_stable_across_runs() {
    let mut keys = ShapeKeys::new(basis())
        .with("Smile_L", basis())
        .with("Smile_R", basis());
    let selection = MirroredSelection::from_indices([2, 3]);
    let before = keys.clone();

    for _ in 0..3 {
        unsymmetrize(&mut keys, &selection, MirrorDirection::PositiveToNegative);
    }
    assert_eq!(keys, before);
}

#[test]
fn key_without_opposite_is_skipped() {
    let mut keys = ShapeKeys::new(basis()).with("Blink_L", displaced(1.0));
    let before = keys.clone();

    let skipped = unsymmetrize(
        &mut keys,
        &MirroredSelection::from_indices(0..8),
        MirrorDirection::PositiveToNegative,
    );

    assert_eq!(
        skipped,
        vec![Skipped::ShapeKeyWithoutPair {
            name: "Blink_L".into()
        }]
    );
    assert_eq!(keys, before);
}

#[test]
fn empty_selection_is_a_noop() {
    let mut keys = ShapeKeys::new(basis())
        .with("Smile_L", displaced(1.0))
        .with("Smile_R", basis());
    let before = keys.clone();

    unsymmetrize(&mut keys, &MirroredSelection::default(), MirrorDirection::NegativeToPositive);
    assert_eq!(keys, before);
}

#[test]
fn mmd_winks_pair_through_aliases() {
    let mut keys = ShapeKeys::new(basis())
        .with("ウィンク", displaced(1.0))
        .with("ウィンク右", basis());

    unsymmetrize(
        &mut keys,
        &MirroredSelection::from_indices([0]),
        MirrorDirection::PositiveToNegative,
    );

    // names are kept as authored
    assert!(keys.get("ウィンク右").is_some());
    assert_eq!(keys.get("ウィンク右").unwrap().coords[0].y, 1.0);
    assert_eq!(keys.get("ウィンク").unwrap().coords[0], basis()[0]);
}
