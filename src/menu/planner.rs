use super::normalize_angle;
use super::sector::sector_width;
use crate::config::CollapsePolicy;
use crate::geometry::{Point, Size};
use std::num::NonZeroUsize;

/// Angle of item `index`, wrapped into `[0, 2π)`.
pub fn item_angle(index: usize, item_count: NonZeroUsize, angular_offset: f64) -> f64 {
    normalize_angle(angular_offset + index as f64 * sector_width(item_count))
}

/// Offset that places item `index` on the ring, measured to the item's top-left corner.
pub fn plan_expanded(
    index: usize,
    item_count: NonZeroUsize,
    radius: f64,
    angular_offset: f64,
    item_size: Size,
    container_center: Point,
) -> Point {
    let angle = item_angle(index, item_count, angular_offset);
    let half = item_size.half();
    Point::new(
        container_center.x - half.x + radius * angle.cos(),
        container_center.y - half.y - radius * angle.sin(),
    )
}

/// Offset that centers an item inside its container.
pub fn plan_resting(container_size: Size, item_size: Size) -> Point {
    let (container, item) = (container_size.half(), item_size.half());
    Point::new(container.x - item.x, container.y - item.y)
}

pub fn plan_collapsed(policy: CollapsePolicy, container_size: Size, item_size: Size) -> Point {
    match policy {
        CollapsePolicy::Origin => Point::ORIGIN,
        CollapsePolicy::Resting => plan_resting(container_size, item_size),
    }
}
