use crate::models::tile_action::{SliceScheme, TileAction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Modifier keys for keyboard shortcuts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Control,
    Alt,
    Shift,
    /// Windows / Command / Super key
    Meta,
}

impl ModifierKey {
    /// Parse a modifier token as written in shortcut strings
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "ctrl" | "control" => Some(ModifierKey::Control),
            "alt" | "opt" | "option" => Some(ModifierKey::Alt),
            "shift" => Some(ModifierKey::Shift),
            "meta" | "win" | "cmd" | "super" => Some(ModifierKey::Meta),
            _ => None,
        }
    }
}

/// Regular keys for keyboard shortcuts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Letter keys A-Z, stored uppercase
    Letter(char),
    /// Number keys 0-9
    Number(u8),
    /// Function keys F1-F24
    Function(u8),
    /// Arrow keys
    Arrow(ArrowDirection),
    Space,
    Enter,
    Tab,
    Escape,
    /// Raw platform key code
    KeyCode(u16),
}

/// Arrow key directions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parse a key token as written in shortcut strings
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        let mut chars = lower.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Some(Key::Letter(c.to_ascii_uppercase()));
            }
            if let Some(digit) = c.to_digit(10) {
                return Some(Key::Number(digit as u8));
            }
            return None;
        }

        match lower.as_str() {
            "space" => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "esc" | "escape" => Some(Key::Escape),
            "up" => Some(Key::Arrow(ArrowDirection::Up)),
            "down" => Some(Key::Arrow(ArrowDirection::Down)),
            "left" => Some(Key::Arrow(ArrowDirection::Left)),
            "right" => Some(Key::Arrow(ArrowDirection::Right)),
            other => {
                if let Some(number) = other.strip_prefix('f') {
                    return number
                        .parse::<u8>()
                        .ok()
                        .filter(|n| (1..=24).contains(n))
                        .map(Key::Function);
                }
                if let Some(code) = other.strip_prefix("key") {
                    return code.parse::<u16>().ok().map(Key::KeyCode);
                }
                None
            }
        }
    }

    /// Letters are compared case-insensitively
    fn normalized(self) -> Self {
        match self {
            Key::Letter(c) => Key::Letter(c.to_ascii_uppercase()),
            other => other,
        }
    }
}

/// Complete keyboard shortcut combination. Always normalized, so two
/// combinations naming the same keys compare equal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(from = "ShortcutParts")]
pub struct ShortcutCombination {
    /// Modifier keys that must be held, sorted and deduplicated
    modifiers: Vec<ModifierKey>,
    /// Primary key to press
    key: Key,
}

/// Serialized form, normalized through [`ShortcutCombination::new`] on load
#[derive(Deserialize)]
struct ShortcutParts {
    modifiers: Vec<ModifierKey>,
    key: Key,
}

impl From<ShortcutParts> for ShortcutCombination {
    fn from(parts: ShortcutParts) -> Self {
        ShortcutCombination::new(parts.modifiers, parts.key)
    }
}

impl ShortcutCombination {
    /// Create a new shortcut combination
    pub fn new(modifiers: Vec<ModifierKey>, key: Key) -> Self {
        let mut sorted_modifiers = modifiers;
        sorted_modifiers.sort();
        sorted_modifiers.dedup();

        ShortcutCombination {
            modifiers: sorted_modifiers,
            key: key.normalized(),
        }
    }

    pub fn modifiers(&self) -> &[ModifierKey] {
        &self.modifiers
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn has_modifier(&self, modifier: ModifierKey) -> bool {
        self.modifiers.contains(&modifier)
    }
}

impl fmt::Display for ShortcutCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            let name = match modifier {
                ModifierKey::Control => "Ctrl",
                ModifierKey::Alt => "Alt",
                ModifierKey::Shift => "Shift",
                ModifierKey::Meta => "Meta",
            };
            write!(f, "{}+", name)?;
        }

        match &self.key {
            Key::Letter(c) => write!(f, "{}", c),
            Key::Number(n) => write!(f, "{}", n),
            Key::Function(n) => write!(f, "F{}", n),
            Key::Arrow(direction) => write!(f, "{:?}", direction),
            Key::Space => f.write_str("Space"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Esc"),
            Key::KeyCode(code) => write!(f, "Key{}", code),
        }
    }
}

/// A shortcut bound to a tiling action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotkeyBinding {
    /// Human-readable name for this binding
    pub name: String,
    pub shortcut: ShortcutCombination,
    pub action: TileAction,
}

impl HotkeyBinding {
    pub fn new(name: impl Into<String>, shortcut: ShortcutCombination, action: TileAction) -> Self {
        Self {
            name: name.into(),
            shortcut,
            action,
        }
    }

    /// Bindings shipped with the application: Ctrl+Alt+Shift plus a letter or digit
    pub fn defaults() -> Vec<HotkeyBinding> {
        let modifiers = vec![ModifierKey::Control, ModifierKey::Alt, ModifierKey::Shift];
        let bind = |name: &str, key: Key, action: TileAction| {
            HotkeyBinding::new(name, ShortcutCombination::new(modifiers.clone(), key), action)
        };

        vec![
            bind("Left half", Key::Letter('G'), TileAction::columns(SliceScheme::Half, 0)),
            bind("Right half", Key::Letter('H'), TileAction::columns(SliceScheme::Half, 1)),
            bind("Maximize", Key::Letter('N'), TileAction::maximize()),
            bind("Top half", Key::Letter('T'), TileAction::rows(SliceScheme::Half, 0)),
            bind("Bottom half", Key::Letter('B'), TileAction::rows(SliceScheme::Half, 1)),
            bind("First third", Key::Number(1), TileAction::columns(SliceScheme::Third, 0)),
            bind("Middle third", Key::Number(2), TileAction::columns(SliceScheme::Third, 1)),
            bind("Last third", Key::Number(3), TileAction::columns(SliceScheme::Third, 2)),
            bind("Top-left quarter", Key::Letter('U'), TileAction::cell(SliceScheme::Half, 0, 0)),
            bind("Top-right quarter", Key::Letter('I'), TileAction::cell(SliceScheme::Half, 1, 0)),
            bind("Bottom-left quarter", Key::Letter('J'), TileAction::cell(SliceScheme::Half, 0, 1)),
            bind("Bottom-right quarter", Key::Letter('K'), TileAction::cell(SliceScheme::Half, 1, 1)),
        ]
    }
}
