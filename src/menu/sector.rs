use super::{FULL_TURN, normalize_angle};
use crate::geometry::{Point, Size};
use std::num::NonZeroUsize;

/// Maps a pointer to the sector (and therefore the item) it falls within.
///
/// Sectors are centered on their item's angle, so sector `i` spans
/// `angular_offset + i * width ± width / 2`, counter-clockwise with +y up.
/// A pointer exactly at the container center counts as angle 0.
pub fn resolve_sector(
    pointer: Point,
    container_origin: Point,
    container_size: Size,
    item_count: NonZeroUsize,
    angular_offset: f64,
) -> usize {
    let center = container_size.half();
    let rx = pointer.x - (container_origin.x + center.x);
    // screen y grows downward
    let ry = -(pointer.y - (container_origin.y + center.y));

    let raw = pointer_angle(rx, ry);
    let width = sector_width(item_count);
    let shifted = normalize_angle(raw - (angular_offset - width / 2.0));
    sector_index(shifted, item_count)
}

/// Sector holding an angle in `[0, FULL_TURN)`.
fn sector_index(angle: f64, item_count: NonZeroUsize) -> usize {
    // angles just below FULL_TURN can still divide out to the item count
    let sector = (angle / sector_width(item_count)).floor() as usize;
    sector.min(item_count.get() - 1)
}

pub fn sector_width(item_count: NonZeroUsize) -> f64 {
    FULL_TURN / item_count.get() as f64
}

fn pointer_angle(rx: f64, ry: f64) -> f64 {
    let magnitude = rx.hypot(ry);
    if magnitude == 0.0 {
        return 0.0;
    }
    (ry / magnitude).atan2(rx / magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const ORIGIN: Point = Point { x: 50.0, y: 20.0 };
    const SIZE: Size = Size {
        width: 200.0,
        height: 100.0,
    };

    fn n(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    /// A pointer at `angle` (math convention) and `distance` from the container center.
    fn pointer_at(angle: f64, distance: f64) -> Point {
        let center = SIZE.half();
        Point::new(
            ORIGIN.x + center.x + distance * angle.cos(),
            ORIGIN.y + center.y - distance * angle.sin(),
        )
    }

    #[test]
    fn test_offset_correctness() {
        let sector_towards =
            |angle: f64| resolve_sector(pointer_at(angle, 40.0), ORIGIN, SIZE, n(4), FRAC_PI_2);

        assert_eq!(sector_towards(FRAC_PI_2), 0);
        assert_eq!(sector_towards(PI), 1);
        assert_eq!(sector_towards(3.0 * FRAC_PI_2), 2);
        assert_eq!(sector_towards(0.0), 3);
    }

    #[test]
    fn test_sector_always_in_range() {
        let pointers = [
            pointer_at(0.0, 0.0),
            pointer_at(0.3, 1e-9),
            pointer_at(-0.1, 500.0),
            Point::new(-1e9, 1e9),
            Point::new(f64::NAN, 3.0),
            Point::new(f64::INFINITY, f64::NEG_INFINITY),
        ];
        let offsets = [0.0, FRAC_PI_2, -7.0 * PI, 123.456];

        for count in 1..=12 {
            for &offset in &offsets {
                for &pointer in &pointers {
                    let sector = resolve_sector(pointer, ORIGIN, SIZE, n(count), offset);
                    assert!(sector < count, "{sector} out of range for {count} items");
                }
            }
        }
    }

    #[test]
    fn test_center_counts_as_angle_zero() {
        let center = pointer_at(0.0, 0.0);
        let east = pointer_at(0.0, 10.0);
        for count in 1..=9 {
            assert_eq!(
                resolve_sector(center, ORIGIN, SIZE, n(count), FRAC_PI_2),
                resolve_sector(east, ORIGIN, SIZE, n(count), FRAC_PI_2),
            );
        }
    }

    #[test]
    fn test_sector_index_clamps_last_sector() {
        let below_full_turn = f64::from_bits(FULL_TURN.to_bits() - 1);

        for count in [3, 6, 12] {
            // the unclamped division lands one past the last sector
            let raw = (below_full_turn / sector_width(n(count))).floor() as usize;
            assert_eq!(raw, count);
            assert_eq!(sector_index(below_full_turn, n(count)), count - 1);
        }
        for count in 1..=12 {
            assert_eq!(sector_index(FULL_TURN, n(count)), count - 1);
            assert_eq!(sector_index(0.0, n(count)), 0);
        }
    }

    #[test]
    fn test_pointer_on_item_angle_hits_item() {
        for count in 1..=12 {
            let width = sector_width(n(count));
            for index in 0..count {
                let angle = FRAC_PI_2 + index as f64 * width;
                let pointer = pointer_at(angle, 80.0);
                let sector = resolve_sector(pointer, ORIGIN, SIZE, n(count), FRAC_PI_2);
                assert_eq!(sector, index, "item {index} of {count}");
            }
        }
    }

    #[test]
    fn test_boundary_continuity_over_full_turn() {
        const STEPS: usize = 720;

        for count in 1..=8 {
            let offset = FRAC_PI_2 + 0.1 * count as f64;
            let sectors: Vec<usize> = (0..STEPS)
                .map(|step| (step as f64 + 0.5) * FULL_TURN / STEPS as f64)
                .map(|angle| {
                    resolve_sector(pointer_at(angle, 60.0), ORIGIN, SIZE, n(count), offset)
                })
                .collect();

            let mut changes = 0;
            let mut wraps = 0;
            for (i, &current) in sectors.iter().enumerate() {
                let next = sectors[(i + 1) % STEPS];
                if next != current {
                    assert_eq!(next, (current + 1) % count, "skipped a sector");
                    changes += 1;
                    if next == 0 {
                        wraps += 1;
                    }
                }
            }

            if count == 1 {
                assert_eq!(changes, 0);
            } else {
                assert_eq!(changes, count);
                assert_eq!(wraps, 1);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let pointer = pointer_at(2.0, 33.0);
        let first = resolve_sector(pointer, ORIGIN, SIZE, n(7), 0.4);
        for _ in 0..10 {
            assert_eq!(resolve_sector(pointer, ORIGIN, SIZE, n(7), 0.4), first);
        }
    }
}
