use crate::models::hotkey_binding::{HotkeyBinding, Key, ModifierKey, ShortcutCombination};
use crate::models::tile_action::{AxisSet, SliceScheme, TileAction};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigParseError {
    #[error("File IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
    #[error("Invalid shortcut '{shortcut}': {reason}")]
    InvalidShortcut { shortcut: String, reason: String },
    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// One `[[binding]]` table in a bindings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub shortcut: String,
    #[serde(default)]
    pub axes: AxisSet,
    pub scheme: SliceScheme,
    #[serde(default)]
    pub horizontal_slot: u32,
    #[serde(default)]
    pub vertical_slot: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BindingsFile {
    #[serde(default)]
    pub binding: Vec<BindingEntry>,
}

/// Reads hotkey bindings from TOML
pub struct ConfigParser {
    shortcut_regex: Regex,
    warnings: Vec<String>,
}

impl ConfigParser {
    pub fn new() -> Result<Self, ConfigParseError> {
        let shortcut_regex = Regex::new(
            r"(?i)^((ctrl|control|alt|opt|option|shift|meta|win|cmd|super)\+)+[a-z0-9]+$",
        )
        .map_err(|e| ConfigParseError::ValidationError {
            message: format!("Failed to compile keyboard shortcut regex: {}", e),
        })?;

        Ok(Self {
            shortcut_regex,
            warnings: Vec::new(),
        })
    }

    pub fn parse_bindings_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<Vec<HotkeyBinding>, ConfigParseError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_bindings_toml(&content)
    }

    pub fn parse_bindings_toml(
        &mut self,
        content: &str,
    ) -> Result<Vec<HotkeyBinding>, ConfigParseError> {
        let file: BindingsFile = toml::from_str(content)?;
        file.binding
            .into_iter()
            .map(|entry| self.binding_from_entry(entry))
            .collect()
    }

    /// Parse `ctrl+alt+shift+g` style shortcut strings
    pub fn parse_shortcut(&self, shortcut: &str) -> Result<ShortcutCombination, ConfigParseError> {
        let invalid = |reason: &str| ConfigParseError::InvalidShortcut {
            shortcut: shortcut.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = shortcut.trim();
        if !self.shortcut_regex.is_match(trimmed) {
            return Err(invalid("expected modifier(+modifier)*+key"));
        }

        let mut tokens: Vec<&str> = trimmed.split('+').collect();
        let key_token = tokens.pop().ok_or_else(|| invalid("missing key"))?;
        let key = Key::from_token(key_token).ok_or_else(|| invalid("unknown key"))?;

        let modifiers = tokens
            .into_iter()
            .map(|token| ModifierKey::from_token(token).ok_or_else(|| invalid("unknown modifier")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ShortcutCombination::new(modifiers, key))
    }

    /// Warnings collected while parsing, e.g. slots outside their scheme
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Serialize bindings back into the file format
    pub fn to_toml(bindings: &[HotkeyBinding]) -> Result<String, ConfigParseError> {
        let file = BindingsFile {
            binding: bindings.iter().map(entry_from_binding).collect(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    fn binding_from_entry(&mut self, entry: BindingEntry) -> Result<HotkeyBinding, ConfigParseError> {
        let shortcut = self.parse_shortcut(&entry.shortcut)?;
        let action = TileAction::new(
            entry.axes,
            entry.scheme,
            entry.horizontal_slot,
            entry.vertical_slot,
        );

        if entry.scheme.is_supported() && !action.slots_in_range() {
            self.warnings.push(format!(
                "Binding {} uses a slot outside its '{}' scheme ({}); the window will be placed off the monitor",
                shortcut,
                entry.scheme,
                action.describe()
            ));
        }

        let name = entry
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| action.describe());
        Ok(HotkeyBinding::new(name, shortcut, action))
    }
}

fn entry_from_binding(binding: &HotkeyBinding) -> BindingEntry {
    BindingEntry {
        name: Some(binding.name.clone()),
        shortcut: shortcut_token_string(&binding.shortcut),
        axes: binding.action.axes,
        scheme: binding.action.scheme,
        horizontal_slot: binding.action.horizontal_slot,
        vertical_slot: binding.action.vertical_slot,
    }
}

/// Lowercase `ctrl+alt+g` form accepted by [`ConfigParser::parse_shortcut`]
pub fn shortcut_token_string(shortcut: &ShortcutCombination) -> String {
    let mut tokens: Vec<String> = shortcut
        .modifiers()
        .iter()
        .map(|modifier| {
            match modifier {
                ModifierKey::Control => "ctrl",
                ModifierKey::Alt => "alt",
                ModifierKey::Shift => "shift",
                ModifierKey::Meta => "meta",
            }
            .to_string()
        })
        .collect();

    let key = match shortcut.key() {
        Key::Letter(c) => c.to_ascii_lowercase().to_string(),
        Key::Number(n) => n.to_string(),
        Key::Function(n) => format!("f{}", n),
        Key::Arrow(direction) => format!("{:?}", direction).to_lowercase(),
        Key::Space => "space".to_string(),
        Key::Enter => "enter".to_string(),
        Key::Tab => "tab".to_string(),
        Key::Escape => "escape".to_string(),
        Key::KeyCode(code) => format!("key{}", code),
    };
    tokens.push(key);
    tokens.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bindings_toml() {
        let mut parser = ConfigParser::new().unwrap();
        let content = r#"
[[binding]]
name = "Left half"
shortcut = "ctrl+alt+shift+g"
axes = ["horizontal"]
scheme = "half"

[[binding]]
shortcut = "Ctrl+Alt+Shift+N"
scheme = "full"

[[binding]]
shortcut = "win+alt+k"
axes = ["horizontal", "vertical"]
scheme = "fourth"
horizontal_slot = 3
vertical_slot = 1
"#;

        let bindings = parser.parse_bindings_toml(content).unwrap();
        assert_eq!(bindings.len(), 3);

        assert_eq!(bindings[0].name, "Left half");
        assert_eq!(bindings[0].action, TileAction::columns(SliceScheme::Half, 0));

        assert_eq!(bindings[1].name, "maximize");
        assert!(bindings[1].action.is_maximize());
        assert!(bindings[1].action.axes.is_empty());

        assert_eq!(
            bindings[2].shortcut,
            ShortcutCombination::new(vec![ModifierKey::Meta, ModifierKey::Alt], Key::Letter('K'))
        );
        assert_eq!(bindings[2].action, TileAction::cell(SliceScheme::Fourth, 3, 1));
        assert!(parser.warnings().is_empty());
    }

    #[test]
    fn test_shortcut_format_validation() {
        let parser = ConfigParser::new().unwrap();

        assert!(parser.parse_shortcut("ctrl+alt+g").is_ok());
        assert!(parser.parse_shortcut("opt+shift+1").is_ok());
        assert!(parser.parse_shortcut("ctrl+f12").is_ok());
        assert!(parser.parse_shortcut("g").is_err());
        assert!(parser.parse_shortcut("hyper+g").is_err());
        assert!(parser.parse_shortcut("ctrl+alt+").is_err());
        assert!(parser.parse_shortcut("ctrl+comma").is_err());
    }

    #[test]
    fn test_out_of_range_slot_is_warned_not_rejected() {
        let mut parser = ConfigParser::new().unwrap();
        let content = r#"
[[binding]]
shortcut = "ctrl+alt+x"
axes = ["horizontal"]
scheme = "half"
horizontal_slot = 2
"#;

        let bindings = parser.parse_bindings_toml(content).unwrap();
        assert_eq!(bindings[0].action.horizontal_slot, 2);
        assert_eq!(parser.warnings().len(), 1);
    }

    #[test]
    fn test_unknown_scheme_is_a_parse_error() {
        let mut parser = ConfigParser::new().unwrap();
        let content = r#"
[[binding]]
shortcut = "ctrl+alt+x"
scheme = "fifth"
"#;

        assert!(matches!(
            parser.parse_bindings_toml(content),
            Err(ConfigParseError::TomlError(_))
        ));
    }

    #[test]
    fn test_defaults_survive_serialization() {
        let defaults = HotkeyBinding::defaults();
        let content = ConfigParser::to_toml(&defaults).unwrap();

        let mut parser = ConfigParser::new().unwrap();
        let parsed = parser.parse_bindings_toml(&content).unwrap();
        assert_eq!(parsed, defaults);
    }
}
