use super::{noise_tile, orient};
use map_tiler::tiler::Orientation;

#[test]
fn eight_distinct_orientations() {
    let mut bits: Vec<u8> = Orientation::ALL.iter().map(|o| o.bits()).collect();
    bits.sort_unstable();
    bits.dedup();
    assert_eq!(bits.len(), 8);
    assert!(Orientation::ALL[0].is_identity());
    for orientation in Orientation::ALL {
        assert_eq!(Orientation::from_bits(orientation.bits()), orientation);
    }
}

#[test]
fn flag_bits() {
    assert_eq!(Orientation::IDENTITY.bits(), 0);
    assert_eq!(Orientation::FLIP_H.bits(), 0b100);
    assert_eq!(Orientation::FLIP_V.bits(), 0b010);
    assert_eq!(Orientation::FLIP_D.bits(), 0b001);
}

#[test]
fn primitive_flips() {
    // 1 2
    // 3 4
    let pixels = [1u8, 2, 3, 4];
    assert_eq!(Orientation::FLIP_H.apply(&pixels, 2, 2, 1), vec![2, 1, 4, 3]);
    assert_eq!(Orientation::FLIP_V.apply(&pixels, 2, 2, 1), vec![3, 4, 1, 2]);
    assert_eq!(Orientation::FLIP_D.apply(&pixels, 2, 2, 1), vec![1, 3, 2, 4]);
    assert_eq!(
        Orientation::new(true, true, false).apply(&pixels, 2, 2, 1),
        vec![4, 3, 2, 1]
    );
}

#[test]
fn diagonal_then_horizontal_is_a_clockwise_turn() {
    // 1 2 3
    // 4 5 6
    let pixels = [1u8, 2, 3, 4, 5, 6];
    let turned = Orientation::new(true, false, true).apply(&pixels, 3, 2, 1);
    // 4 1
    // 5 2
    // 6 3
    assert_eq!(turned, vec![4, 1, 5, 2, 6, 3]);
    assert_eq!(Orientation::FLIP_D.dimensions(3, 2), (2, 3));
    assert_eq!(Orientation::FLIP_H.dimensions(3, 2), (3, 2));
}

#[test]
fn composition_matches_sequential_application() {
    let pixels = noise_tile(7, 5, 5);
    for first in Orientation::ALL {
        for second in Orientation::ALL {
            let sequential = orient(second, &orient(first, &pixels, 5, 5), 5, 5);
            let composed = orient(first.then(second), &pixels, 5, 5);
            assert_eq!(sequential, composed, "{first:?} then {second:?}");
        }
    }
}

#[test]
fn inverse_undoes_every_orientation() {
    let pixels = noise_tile(11, 4, 4);
    for orientation in Orientation::ALL {
        assert!(orientation.then(orientation.inverse()).is_identity());
        assert!(orientation.inverse().then(orientation).is_identity());
        let restored = orient(orientation.inverse(), &orient(orientation, &pixels, 4, 4), 4, 4);
        assert_eq!(restored, pixels);
    }
}

#[test]
fn non_square_orbit_keeps_shape() {
    let orbit = Orientation::orbit(false);
    assert_eq!(orbit.len(), 4);
    assert_eq!(Orientation::orbit(true).len(), 8);
    let pixels = noise_tile(3, 6, 2);
    for &first in orbit {
        assert!(!first.flip_d);
        assert_eq!(first.dimensions(6, 2), (6, 2));
        for &second in orbit {
            assert!(orbit.contains(&first.then(second)));
            let sequential = orient(second, &orient(first, &pixels, 6, 2), 6, 2);
            assert_eq!(sequential, orient(first.then(second), &pixels, 6, 2));
        }
    }
}
