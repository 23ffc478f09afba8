use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a monitor axis is divided
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SliceScheme {
    /// Whole axis; a full-scheme action maximizes the window
    Full,
    Half,
    Third,
    Fourth,
    /// Reserved for percentage-based sizing, not supported
    Custom,
}

impl SliceScheme {
    /// Number of equal slices along an axis, `None` for [`SliceScheme::Custom`]
    pub const fn denominator(&self) -> Option<i32> {
        match self {
            SliceScheme::Full => Some(1),
            SliceScheme::Half => Some(2),
            SliceScheme::Third => Some(3),
            SliceScheme::Fourth => Some(4),
            SliceScheme::Custom => None,
        }
    }

    pub const fn is_supported(&self) -> bool {
        self.denominator().is_some()
    }
}

impl fmt::Display for SliceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SliceScheme::Full => "full",
            SliceScheme::Half => "half",
            SliceScheme::Third => "third",
            SliceScheme::Fourth => "fourth",
            SliceScheme::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl FromStr for SliceScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(SliceScheme::Full),
            "half" => Ok(SliceScheme::Half),
            "third" => Ok(SliceScheme::Third),
            "fourth" | "quarter" => Ok(SliceScheme::Fourth),
            "custom" => Ok(SliceScheme::Custom),
            _ => Err(format!("Invalid slice scheme: {}", s)),
        }
    }
}

/// A single screen axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "horizontal" | "h" => Ok(Axis::Horizontal),
            "vertical" | "v" => Ok(Axis::Vertical),
            _ => Err(format!("Invalid axis: {}", s)),
        }
    }
}

/// Set of axes a slice scheme applies to. An axis outside the set keeps the
/// monitor's full extent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "Vec<Axis>", into = "Vec<Axis>")]
pub struct AxisSet {
    horizontal: bool,
    vertical: bool,
}

impl AxisSet {
    pub const EMPTY: Self = Self {
        horizontal: false,
        vertical: false,
    };
    pub const HORIZONTAL: Self = Self {
        horizontal: true,
        vertical: false,
    };
    pub const VERTICAL: Self = Self {
        horizontal: false,
        vertical: true,
    };
    pub const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    pub const fn contains(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub const fn is_empty(&self) -> bool {
        !self.horizontal && !self.vertical
    }

    pub fn with(mut self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => self.horizontal = true,
            Axis::Vertical => self.vertical = true,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .filter(|axis| self.contains(*axis))
    }
}

impl From<Vec<Axis>> for AxisSet {
    fn from(axes: Vec<Axis>) -> Self {
        axes.into_iter().fold(AxisSet::EMPTY, AxisSet::with)
    }
}

impl From<AxisSet> for Vec<Axis> {
    fn from(set: AxisSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.horizontal, self.vertical) {
            (true, true) => f.write_str("both"),
            (true, false) => f.write_str("horizontal"),
            (false, true) => f.write_str("vertical"),
            (false, false) => f.write_str("none"),
        }
    }
}

/// Where to put the focused window: which axes to slice, how finely, and
/// which zero-based slot to occupy on each sliced axis.
///
/// Slots are expected to be below the scheme's denominator. This is not
/// checked; an out-of-range slot places the window partly or fully outside
/// the monitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TileAction {
    pub axes: AxisSet,
    pub scheme: SliceScheme,
    #[serde(default)]
    pub horizontal_slot: u32,
    #[serde(default)]
    pub vertical_slot: u32,
}

impl TileAction {
    pub const fn new(
        axes: AxisSet,
        scheme: SliceScheme,
        horizontal_slot: u32,
        vertical_slot: u32,
    ) -> Self {
        Self {
            axes,
            scheme,
            horizontal_slot,
            vertical_slot,
        }
    }

    pub const fn maximize() -> Self {
        Self::new(AxisSet::EMPTY, SliceScheme::Full, 0, 0)
    }

    /// Slice the width only; the window keeps the full monitor height
    pub const fn columns(scheme: SliceScheme, slot: u32) -> Self {
        Self::new(AxisSet::HORIZONTAL, scheme, slot, 0)
    }

    /// Slice the height only; the window keeps the full monitor width
    pub const fn rows(scheme: SliceScheme, slot: u32) -> Self {
        Self::new(AxisSet::VERTICAL, scheme, 0, slot)
    }

    pub const fn cell(scheme: SliceScheme, horizontal_slot: u32, vertical_slot: u32) -> Self {
        Self::new(AxisSet::BOTH, scheme, horizontal_slot, vertical_slot)
    }

    pub fn is_maximize(&self) -> bool {
        self.scheme == SliceScheme::Full
    }

    pub const fn slot(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.horizontal_slot,
            Axis::Vertical => self.vertical_slot,
        }
    }

    /// Whether every sliced axis uses a slot inside the scheme's range
    pub fn slots_in_range(&self) -> bool {
        match self.scheme.denominator() {
            Some(denominator) => self
                .axes
                .iter()
                .all(|axis| (self.slot(axis) as i64) < denominator as i64),
            None => false,
        }
    }

    /// Short human-readable description, e.g. `half h0` or `maximize`
    pub fn describe(&self) -> String {
        if self.is_maximize() {
            return "maximize".to_string();
        }

        let slots: Vec<String> = self
            .axes
            .iter()
            .map(|axis| match axis {
                Axis::Horizontal => format!("h{}", self.horizontal_slot),
                Axis::Vertical => format!("v{}", self.vertical_slot),
            })
            .collect();

        if slots.is_empty() {
            format!("{} (no axes)", self.scheme)
        } else {
            format!("{} {}", self.scheme, slots.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denominators_match_scheme() {
        assert_eq!(SliceScheme::Full.denominator(), Some(1));
        assert_eq!(SliceScheme::Half.denominator(), Some(2));
        assert_eq!(SliceScheme::Third.denominator(), Some(3));
        assert_eq!(SliceScheme::Fourth.denominator(), Some(4));
        assert_eq!(SliceScheme::Custom.denominator(), None);
        assert!(!SliceScheme::Custom.is_supported());
    }

    #[test]
    fn test_axis_set_membership() {
        assert!(AxisSet::BOTH.contains(Axis::Horizontal));
        assert!(AxisSet::BOTH.contains(Axis::Vertical));
        assert!(!AxisSet::HORIZONTAL.contains(Axis::Vertical));
        assert!(AxisSet::EMPTY.is_empty());
        assert_eq!(AxisSet::EMPTY.with(Axis::Vertical), AxisSet::VERTICAL);
    }

    #[test]
    fn test_axis_set_deserializes_from_list() {
        let set: AxisSet = serde_json::from_str(r#"["vertical", "horizontal", "vertical"]"#).unwrap();
        assert_eq!(set, AxisSet::BOTH);

        let set: AxisSet = serde_json::from_str("[]").unwrap();
        assert!(set.is_empty());

        let json = serde_json::to_string(&AxisSet::HORIZONTAL).unwrap();
        assert_eq!(json, r#"["horizontal"]"#);
    }

    #[test]
    fn test_slot_range_check() {
        assert!(TileAction::columns(SliceScheme::Half, 1).slots_in_range());
        assert!(!TileAction::columns(SliceScheme::Half, 2).slots_in_range());
        // vertical slot is ignored when the vertical axis is not sliced
        assert!(TileAction::new(AxisSet::HORIZONTAL, SliceScheme::Third, 2, 9).slots_in_range());
        assert!(!TileAction::columns(SliceScheme::Custom, 0).slots_in_range());
    }

    #[test]
    fn test_describe_actions() {
        assert_eq!(TileAction::maximize().describe(), "maximize");
        assert_eq!(TileAction::columns(SliceScheme::Half, 1).describe(), "half h1");
        assert_eq!(TileAction::cell(SliceScheme::Fourth, 0, 1).describe(), "fourth h0 v1");
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("Half".parse::<SliceScheme>().unwrap(), SliceScheme::Half);
        assert_eq!("quarter".parse::<SliceScheme>().unwrap(), SliceScheme::Fourth);
        assert!("fifth".parse::<SliceScheme>().is_err());
    }
}
