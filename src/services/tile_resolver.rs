use crate::models::geometry::Rect;
use crate::models::tile_action::{Axis, TileAction};
use crate::services::geometry_calculator::{GeometryCalculator, GeometryError};

/// Turns a tile action into a target rectangle inside a monitor's work area
pub struct TileResolver;

impl TileResolver {
    /// Compute the target frame for `action` on a monitor whose usable area is
    /// `work_area`. Sliced axes get the slot's offset and size; other axes
    /// keep the work area's full extent. No border compensation is applied.
    pub fn resolve(work_area: Rect, action: &TileAction) -> Result<Rect, GeometryError> {
        let mut x = work_area.left;
        let mut y = work_area.top;
        let mut width = work_area.width();
        let mut height = work_area.height();

        if action.axes.contains(Axis::Horizontal) {
            x = x.saturating_add(GeometryCalculator::slice_offset(
                width,
                action.scheme,
                action.horizontal_slot,
            )?);
            width = GeometryCalculator::slice_size(width, action.scheme)?;
        }
        if action.axes.contains(Axis::Vertical) {
            y = y.saturating_add(GeometryCalculator::slice_offset(
                height,
                action.scheme,
                action.vertical_slot,
            )?);
            height = GeometryCalculator::slice_size(height, action.scheme)?;
        }

        Ok(Rect::from_origin_size(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tile_action::{AxisSet, SliceScheme};

    fn work_area() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    #[test]
    fn test_left_half_of_full_hd() {
        let rect = TileResolver::resolve(work_area(), &TileAction::columns(SliceScheme::Half, 0)).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 960, 1080));
    }

    #[test]
    fn test_right_half_of_full_hd() {
        let rect = TileResolver::resolve(work_area(), &TileAction::columns(SliceScheme::Half, 1)).unwrap();
        assert_eq!(rect, Rect::new(960, 0, 1920, 1080));
    }

    #[test]
    fn test_empty_axes_keep_work_area() {
        let area = Rect::new(-1280, 40, 0, 1064);
        let action = TileAction::new(AxisSet::EMPTY, SliceScheme::Third, 2, 2);
        assert_eq!(TileResolver::resolve(area, &action).unwrap(), area);
    }

    #[test]
    fn test_quarter_is_offset_from_work_area_origin() {
        // secondary monitor left of primary with a top taskbar
        let area = Rect::new(-2560, 40, 0, 1440);
        let action = TileAction::cell(SliceScheme::Half, 1, 1);
        let rect = TileResolver::resolve(area, &action).unwrap();
        assert_eq!(rect, Rect::new(-1280, 740, 0, 1440));
    }

    #[test]
    fn test_vertical_only_keeps_full_width() {
        let action = TileAction::rows(SliceScheme::Third, 1);
        let rect = TileResolver::resolve(work_area(), &action).unwrap();
        assert_eq!(rect, Rect::new(0, 360, 1920, 720));
    }

    #[test]
    fn test_resolve_is_deterministic_and_leaves_input_untouched() {
        let area = work_area();
        let action = TileAction::cell(SliceScheme::Fourth, 3, 2);
        let first = TileResolver::resolve(area, &action).unwrap();
        let second = TileResolver::resolve(area, &action).unwrap();
        assert_eq!(first, second);
        assert_eq!(area, work_area());
        assert_eq!(first, Rect::new(1440, 540, 1920, 810));
    }

    #[test]
    fn test_huge_slot_stays_past_the_monitor_end() {
        for slot in [2, 4_473_925, u32::MAX] {
            let rect = TileResolver::resolve(work_area(), &TileAction::columns(SliceScheme::Half, slot))
                .unwrap();
            assert!(rect.left >= 1920, "slot {} resolved to {}", slot, rect);
            assert!(rect.right >= rect.left);
            assert_eq!((rect.top, rect.bottom), (0, 1080));
        }
    }

    #[test]
    fn test_custom_scheme_fails() {
        let action = TileAction::columns(SliceScheme::Custom, 0);
        assert!(TileResolver::resolve(work_area(), &action).is_err());
    }
}
