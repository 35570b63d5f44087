use broadside::{BitBoard, BitBoardError};

#[test]
fn test_try_new_sizes() {
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    let err = BitBoard::<u64, 10>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { n: 10, capacity: 64 })));
}

#[test]
fn test_set_clear_and_bounds() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 2).unwrap();
    assert!(bb.get(1, 2).unwrap());
    assert_eq!(bb.count_ones(), 1);

    bb.clear(1, 2).unwrap();
    assert!(!bb.get(1, 2).unwrap());
    // clearing an absent cell is fine
    bb.clear(1, 2).unwrap();

    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
}

#[test]
fn test_full_and_complement() {
    let full = BitBoard::<u16, 3>::full();
    assert_eq!(full.count_ones(), 9);
    assert!((!full).is_empty());

    let mut one = BitBoard::<u16, 3>::new();
    one.set(0, 0).unwrap();
    assert_eq!((!one).count_ones(), 8);
}

#[test]
fn test_nth_set_bit_is_row_major() {
    let mut bb = BitBoard::<u128, 10>::new();
    bb.set(7, 1).unwrap();
    bb.set(0, 9).unwrap();
    bb.set(3, 3).unwrap();
    assert_eq!(bb.nth_set_bit(0), Some((0, 9)));
    assert_eq!(bb.nth_set_bit(1), Some((3, 3)));
    assert_eq!(bb.nth_set_bit(2), Some((7, 1)));
    assert_eq!(bb.nth_set_bit(3), None);
    let cells: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(cells, vec![(0, 9), (3, 3), (7, 1)]);
}

#[test]
fn test_halo_grows_in_eight_directions() {
    let mut bb = BitBoard::<u128, 10>::new();
    bb.set(5, 5).unwrap();
    let halo = bb.halo();
    assert_eq!(halo.count_ones(), 9);
    for r in 4..=6 {
        for c in 4..=6 {
            assert!(halo.get(r, c).unwrap());
        }
    }

    let mut corner = BitBoard::<u128, 10>::new();
    corner.set(9, 9).unwrap();
    assert_eq!(corner.halo().count_ones(), 4);

    let mut ship = BitBoard::<u128, 10>::new();
    for c in 0..3 {
        ship.set(0, c).unwrap();
    }
    // 2 rows x 4 columns
    assert_eq!(ship.halo().count_ones(), 8);
}
