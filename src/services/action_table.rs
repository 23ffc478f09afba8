use crate::models::hotkey_binding::{HotkeyBinding, Key, ModifierKey, ShortcutCombination};
use crate::models::tile_action::{SliceScheme, TileAction};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Errors raised while building an [`ActionTable`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionTableError {
    #[error("Conflicting keyboard shortcut: {shortcut} is bound to both '{existing}' and '{duplicate}'")]
    DuplicateBinding {
        shortcut: String,
        existing: String,
        duplicate: String,
    },

    #[error("Binding '{name}' uses unsupported slice scheme '{scheme}'")]
    UnsupportedScheme { name: String, scheme: SliceScheme },
}

/// Immutable mapping from shortcut to tiling action
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    bindings: HashMap<ShortcutCombination, HotkeyBinding>,
}

impl ActionTable {
    /// Build a table, rejecting duplicate shortcuts and unsupported schemes
    pub fn new(bindings: impl IntoIterator<Item = HotkeyBinding>) -> Result<Self, ActionTableError> {
        let mut table: HashMap<ShortcutCombination, HotkeyBinding> = HashMap::new();

        for binding in bindings {
            if !binding.action.scheme.is_supported() {
                return Err(ActionTableError::UnsupportedScheme {
                    name: binding.name,
                    scheme: binding.action.scheme,
                });
            }

            if !binding.action.slots_in_range() {
                warn!(
                    name = %binding.name,
                    shortcut = %binding.shortcut,
                    action = %binding.action.describe(),
                    "Binding slot is outside the slice scheme; window will be placed off the monitor"
                );
            }

            if let Some(existing) = table.get(&binding.shortcut) {
                return Err(ActionTableError::DuplicateBinding {
                    shortcut: binding.shortcut.to_string(),
                    existing: existing.name.clone(),
                    duplicate: binding.name,
                });
            }

            table.insert(binding.shortcut.clone(), binding);
        }

        debug!(bindings = table.len(), "Built action table");
        Ok(Self { bindings: table })
    }

    /// Table holding the built-in default bindings
    pub fn with_defaults() -> Result<Self, ActionTableError> {
        Self::new(HotkeyBinding::defaults())
    }

    /// Exact-match lookup; `None` means the shortcut is unmapped
    pub fn lookup(&self, shortcut: &ShortcutCombination) -> Option<&TileAction> {
        self.bindings.get(shortcut).map(|binding| &binding.action)
    }

    /// Lookup from already-decoded modifiers and key
    pub fn lookup_keys(&self, modifiers: &[ModifierKey], key: Key) -> Option<&TileAction> {
        self.lookup(&ShortcutCombination::new(modifiers.to_vec(), key))
    }

    pub fn binding(&self, shortcut: &ShortcutCombination) -> Option<&HotkeyBinding> {
        self.bindings.get(shortcut)
    }

    /// All bindings ordered by shortcut, for display and registration
    pub fn bindings(&self) -> Vec<&HotkeyBinding> {
        let mut bindings: Vec<_> = self.bindings.values().collect();
        bindings.sort_by(|a, b| a.shortcut.cmp(&b.shortcut));
        bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortcut(key: char) -> ShortcutCombination {
        ShortcutCombination::new(
            vec![ModifierKey::Control, ModifierKey::Alt, ModifierKey::Shift],
            Key::Letter(key),
        )
    }

    #[test]
    fn test_lookup_finds_exact_match() {
        let table = ActionTable::with_defaults().unwrap();
        let action = table.lookup(&shortcut('g')).unwrap();
        assert_eq!(*action, TileAction::columns(SliceScheme::Half, 0));

        let action = table
            .lookup_keys(
                &[ModifierKey::Shift, ModifierKey::Alt, ModifierKey::Control],
                Key::Letter('n'),
            )
            .unwrap();
        assert!(action.is_maximize());
    }

    #[test]
    fn test_lookup_does_not_match_partial_modifiers() {
        let table = ActionTable::with_defaults().unwrap();
        assert!(table
            .lookup_keys(&[ModifierKey::Control, ModifierKey::Alt], Key::Letter('g'))
            .is_none());
        assert!(table
            .lookup_keys(&[ModifierKey::Control, ModifierKey::Alt], Key::Letter('q'))
            .is_none());
    }

    #[test]
    fn test_duplicate_shortcut_is_a_configuration_error() {
        let error = ActionTable::new(vec![
            HotkeyBinding::new("Left", shortcut('g'), TileAction::columns(SliceScheme::Half, 0)),
            HotkeyBinding::new("Also left", shortcut('G'), TileAction::columns(SliceScheme::Third, 0)),
        ])
        .unwrap_err();

        assert!(matches!(error, ActionTableError::DuplicateBinding { .. }));
        assert!(error.to_string().contains("Ctrl+Alt+Shift+G"));
    }

    #[test]
    fn test_custom_scheme_is_rejected_at_construction() {
        let error = ActionTable::new(vec![HotkeyBinding::new(
            "Sixty percent",
            shortcut('p'),
            TileAction::columns(SliceScheme::Custom, 0),
        )])
        .unwrap_err();

        assert_eq!(
            error,
            ActionTableError::UnsupportedScheme {
                name: "Sixty percent".into(),
                scheme: SliceScheme::Custom,
            }
        );
    }

    #[test]
    fn test_out_of_range_slot_is_accepted() {
        let table = ActionTable::new(vec![HotkeyBinding::new(
            "Off screen",
            shortcut('x'),
            TileAction::columns(SliceScheme::Half, 5),
        )])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_bindings_are_sorted_by_shortcut() {
        let table = ActionTable::with_defaults().unwrap();
        let bindings = table.bindings();
        assert_eq!(bindings.len(), HotkeyBinding::defaults().len());
        assert!(bindings.windows(2).all(|pair| pair[0].shortcut < pair[1].shortcut));
    }
}
