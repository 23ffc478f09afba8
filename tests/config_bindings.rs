//! Bindings files on disk feeding the action table

use std::fs;
use tempfile::TempDir;
use tilesnap::config::{BindingStore, ConfigParseError};
use tilesnap::{
    ActionTable, ActionTableError, HotkeyBinding, Key, ModifierKey, Rect, SliceScheme, TileAction,
    TileResolver,
};

fn write_bindings(dir: &TempDir, content: &str) -> BindingStore {
    let path = dir.path().join("bindings.toml");
    fs::write(&path, content).unwrap();
    BindingStore::new(path)
}

#[test]
fn test_initialized_file_reproduces_default_table() {
    let dir = TempDir::new().unwrap();
    let store = BindingStore::new(dir.path().join("tilesnap").join("bindings.toml"));
    store.initialize(false).unwrap();

    let table = ActionTable::new(store.load().unwrap()).unwrap();
    let defaults = ActionTable::with_defaults().unwrap();
    assert_eq!(table.len(), defaults.len());

    let hyper = [ModifierKey::Shift, ModifierKey::Control, ModifierKey::Alt];
    assert_eq!(
        table.lookup_keys(&hyper, Key::Letter('G')),
        Some(&TileAction::columns(SliceScheme::Half, 0))
    );
    assert!(table
        .lookup_keys(&hyper, Key::Letter('N'))
        .unwrap()
        .is_maximize());
}

#[test]
fn test_user_bindings_resolve_against_a_monitor() {
    let dir = TempDir::new().unwrap();
    let store = write_bindings(
        &dir,
        r#"
[[binding]]
name = "Bottom right quarter"
shortcut = "cmd+opt+k"
axes = ["horizontal", "vertical"]
scheme = "fourth"
horizontal_slot = 3
vertical_slot = 3

[[binding]]
shortcut = "cmd+opt+m"
scheme = "full"
"#,
    );

    let table = ActionTable::new(store.load().unwrap()).unwrap();
    let action = table
        .lookup_keys(&[ModifierKey::Alt, ModifierKey::Meta], Key::Letter('K'))
        .unwrap();

    let rect = TileResolver::resolve(Rect::new(1920, 0, 3840, 1040), action).unwrap();
    assert_eq!(rect, Rect::new(3360, 780, 3840, 1040));
}

#[test]
fn test_duplicate_shortcuts_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = write_bindings(
        &dir,
        r#"
[[binding]]
shortcut = "ctrl+alt+g"
axes = ["horizontal"]
scheme = "half"

[[binding]]
shortcut = "control+option+G"
axes = ["horizontal"]
scheme = "half"
horizontal_slot = 1
"#,
    );

    let error = ActionTable::new(store.load().unwrap()).unwrap_err();
    assert!(matches!(error, ActionTableError::DuplicateBinding { .. }));
}

#[test]
fn test_custom_scheme_is_rejected_at_table_construction() {
    let dir = TempDir::new().unwrap();
    let store = write_bindings(
        &dir,
        r#"
[[binding]]
shortcut = "ctrl+alt+c"
axes = ["horizontal"]
scheme = "custom"
"#,
    );

    let error = ActionTable::new(store.load().unwrap()).unwrap_err();
    assert!(matches!(
        error,
        ActionTableError::UnsupportedScheme {
            scheme: SliceScheme::Custom,
            ..
        }
    ));
}

#[test]
fn test_malformed_shortcut_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let store = write_bindings(
        &dir,
        r#"
[[binding]]
shortcut = "ctrl-alt-g"
scheme = "full"
"#,
    );

    assert!(matches!(
        store.load(),
        Err(ConfigParseError::InvalidShortcut { .. })
    ));
}

#[test]
fn test_empty_file_gives_empty_table() {
    let dir = TempDir::new().unwrap();
    let store = write_bindings(&dir, "");

    let bindings: Vec<HotkeyBinding> = store.load().unwrap();
    assert!(bindings.is_empty());
    assert!(ActionTable::new(bindings).unwrap().is_empty());
}
