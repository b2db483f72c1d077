use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tint_tui::{App, ColorPickerComponent, ColorPickerState, Component, DraculaTheme, PickerConfig, Visibility};
use tint_types::{ColorValue, Hsv, Representation, Rgb};
use tint_util::{InMemoryStorage, PaletteStore};

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn store(storage: &InMemoryStorage) -> PaletteStore {
    PaletteStore::new(Arc::new(storage.clone()))
}

#[test]
fn header_interaction_opens_then_closes() {
    let storage = InMemoryStorage::new();
    let picker = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
    let mut app = App::new(picker, Box::new(DraculaTheme::new()));
    let mut component = ColorPickerComponent::default();

    assert_eq!(app.picker.visibility(), Visibility::Closed);
    component.handle_key_events(&mut app, press(KeyCode::Enter));
    assert_eq!(app.picker.visibility(), Visibility::Open);
    component.handle_key_events(&mut app, press(KeyCode::Enter));
    assert_eq!(app.picker.visibility(), Visibility::Closed);
}

#[test]
fn rgb_array_owner_gets_rgb_array_back() {
    let storage = InMemoryStorage::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let config = PickerConfig {
        value: ColorValue::parse_json("[255,0,0]").unwrap(),
        ..PickerConfig::default()
    };
    let mut picker = ColorPickerState::new(config, store(&storage), move |color| sink.borrow_mut().push(color));

    picker.on_color_change(Hsv::new(0.0, 100.0, 100.0));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].representation(), Representation::RgbArray);
    assert_eq!(seen[0], ColorValue::RgbArray(Rgb::new(255, 0, 0)));
}

#[test]
fn saved_colors_outlive_the_widget() {
    let storage = InMemoryStorage::new();
    let saved = ColorValue::RgbObject(Rgb::new(12, 34, 56));
    {
        let mut picker = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
        picker.on_add_color(saved);
    }

    let remounted = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
    assert_eq!(remounted.user_palette(), &[saved]);
    assert_eq!(remounted.view().user_palette.values, vec![Rgb::new(12, 34, 56).to_hsv()]);
}

#[test]
fn stale_index_removal_keeps_palette_intact() {
    let storage = InMemoryStorage::new();
    let mut picker = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
    let colors = [
        ColorValue::RgbArray(Rgb::new(1, 1, 1)),
        ColorValue::RgbArray(Rgb::new(2, 2, 2)),
        ColorValue::RgbArray(Rgb::new(3, 3, 3)),
    ];
    for color in colors {
        picker.on_add_color(color);
    }

    picker.on_remove_color(colors[0], 99);
    assert_eq!(picker.user_palette(), &colors);

    picker.on_remove_color(colors[1], 1);
    assert_eq!(picker.user_palette(), &[colors[0], colors[2]]);
}
