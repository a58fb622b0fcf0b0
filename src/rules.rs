/// Neighbor counts that bring a dead cell to life, one bit per count.
const BIRTHS: u16 = 0b0_0000_1000;

/// Neighbor counts that keep a live cell alive, one bit per count.
const SURVIVALS: u16 = 0b0_0000_1100;

/// The state of a cell in the next generation under B3/S23.
///
/// `live_neighbors` is at most 8. Anything larger can't be produced by a grid and is treated
/// as overcrowding.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    if live_neighbors > 8 {
        return false;
    }

    let count = 1u16 << live_neighbors;

    if alive {
        count & SURVIVALS == count
    } else {
        count & BIRTHS == count
    }
}

#[cfg(test)]
mod tests {
    use super::next_state;

    #[test]
    fn test_survival() {
        let survivors: Vec<u8> = (0..=8).filter(|&n| next_state(true, n)).collect();

        assert_eq!(survivors, vec![2, 3]);
    }

    #[test]
    fn test_birth() {
        let births: Vec<u8> = (0..=8).filter(|&n| next_state(false, n)).collect();

        assert_eq!(births, vec![3]);
    }

    #[test]
    fn test_out_of_range_count_is_dead() {
        assert!(!next_state(true, 9));
        assert!(!next_state(false, u8::MAX));
    }
}
