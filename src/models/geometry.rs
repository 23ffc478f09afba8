use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rectangle in whole screen pixels, edges inclusive of `left`/`top` and
/// exclusive of `right`/`bottom`. Edge arithmetic saturates at the `i32`
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its top-left corner and extent
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add(width),
            bottom: y.saturating_add(height),
        }
    }

    pub const fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub const fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Grow the rectangle outward by the given insets. Positive insets move
    /// the left/top edges up-left and the right/bottom edges down-right.
    pub const fn expand(&self, insets: BorderInsets) -> Self {
        Self {
            left: self.left.saturating_sub(insets.left),
            top: self.top.saturating_sub(insets.top),
            right: self.right.saturating_add(insets.right),
            bottom: self.bottom.saturating_add(insets.bottom),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Parses `left,top,right,bottom`
impl FromStr for Rect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid rectangle '{}': {}", s, e))?;

        match parts.as_slice() {
            [left, top, right, bottom] => {
                if right < left || bottom < top {
                    return Err(format!(
                        "Invalid rectangle '{}': right/bottom must not precede left/top",
                        s
                    ));
                }
                Ok(Rect::new(*left, *top, *right, *bottom))
            }
            _ => Err(format!(
                "Invalid rectangle '{}': expected left,top,right,bottom",
                s
            )),
        }
    }
}

/// Thickness of the invisible resize border on each edge of a window.
///
/// Values are usually zero or positive; a compositor may occasionally report
/// a visible frame that pokes outside the raw frame, which shows up as a
/// negative inset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BorderInsets {
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for BorderInsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl FromStr for BorderInsets {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|part| part.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("Invalid insets '{}': {}", s, e))?;

        match parts.as_slice() {
            [left, top, right, bottom] => Ok(BorderInsets::new(*left, *top, *right, *bottom)),
            _ => Err(format!(
                "Invalid insets '{}': expected left,top,right,bottom",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_and_height_follow_edges() {
        let rect = Rect::new(100, 50, 1060, 1130);
        assert_eq!(rect.width(), 960);
        assert_eq!(rect.height(), 1080);
        assert_eq!(Rect::from_origin_size(100, 50, 960, 1080), rect);
    }

    #[test]
    fn test_expand_moves_left_top_out_and_grows_right_bottom() {
        let rect = Rect::new(0, 0, 960, 1080);
        let expanded = rect.expand(BorderInsets::new(7, 0, 7, 7));
        assert_eq!(expanded, Rect::new(-7, 0, 967, 1087));
        assert_eq!(expanded.width(), 974);
        assert_eq!(expanded.height(), 1087);
    }

    #[test]
    fn test_edge_arithmetic_saturates() {
        let huge = Rect::new(i32::MIN, 0, i32::MAX, 10);
        assert_eq!(huge.width(), i32::MAX);

        let far = Rect::from_origin_size(i32::MAX - 5, 0, 100, 100);
        assert_eq!(far.right, i32::MAX);

        let expanded = Rect::new(i32::MIN + 2, 0, i32::MAX - 2, 10)
            .expand(BorderInsets::new(7, 0, 7, 7));
        assert_eq!(expanded, Rect::new(i32::MIN, 0, i32::MAX, 17));
    }

    #[test]
    fn test_parse_rect_from_cli_string() {
        assert_eq!(
            "0, 0, 1920, 1040".parse::<Rect>().unwrap(),
            Rect::new(0, 0, 1920, 1040)
        );
        assert!("0,0,1920".parse::<Rect>().is_err());
        assert!("10,10,5,20".parse::<Rect>().is_err());
        assert!("a,b,c,d".parse::<Rect>().is_err());
    }

    #[test]
    fn test_parse_insets_allows_negative_values() {
        assert_eq!(
            "7,0,7,-1".parse::<BorderInsets>().unwrap(),
            BorderInsets::new(7, 0, 7, -1)
        );
    }
}
