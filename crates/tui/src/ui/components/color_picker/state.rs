use std::fmt;

use ratatui::style::Style;
use tint_types::{ColorValue, Hsv, select_converter, to_hsv_all};
use tint_util::{PaletteStore, RemoveOutcome};
use tracing::{debug, error};

use super::bindings::{PaletteKey, PaletteProps, SliderProps};

/// Callback through which the owner learns about a newly chosen color.
pub type ChangeHandler = Box<dyn FnMut(ColorValue)>;

/// Owner-supplied configuration, read once when the picker is mounted.
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Start in the open state.
    pub open: bool,
    /// Text shown in the header.
    pub label: String,
    /// Current color, in whichever representation the owner works with.
    pub value: ColorValue,
    /// Developer palette shown above the user's saved colors.
    pub palette: Vec<ColorValue>,
    /// Style handed through to the HSV slider.
    pub style: Style,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            open: false,
            label: "ColorPicker".to_string(),
            value: ColorValue::default(),
            palette: Vec::new(),
            style: Style::default(),
        }
    }
}

/// Whether the picker body is shown below the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Closed => Visibility::Open,
            Visibility::Open => Visibility::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Visibility::Open)
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    pub label: String,
    pub visibility: Visibility,
    pub hsv: Hsv,
    pub swatch_hex: String,
    pub slider: SliderProps,
    pub developer_palette: PaletteProps,
    pub user_palette: PaletteProps,
}

/// State machine behind the color picker.
///
/// The current color is a pass-through of the owner's value: edits are
/// reported through the change handler and only take effect once the owner
/// calls [`ColorPickerState::set_value`]. The user palette is owned here and
/// written through to the [`PaletteStore`] on every mutation.
pub struct ColorPickerState {
    label: String,
    style: Style,
    visibility: Visibility,
    value: ColorValue,
    developer_palette: Vec<ColorValue>,
    user_palette: Vec<ColorValue>,
    store: PaletteStore,
    on_change: ChangeHandler,
}

impl fmt::Debug for ColorPickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPickerState")
            .field("label", &self.label)
            .field("visibility", &self.visibility)
            .field("value", &self.value)
            .field("developer_palette", &self.developer_palette)
            .field("user_palette", &self.user_palette)
            .field("palette_key", &self.store.key())
            .finish_non_exhaustive()
    }
}

impl ColorPickerState {
    /// Mount a picker. The user palette is read from `store` immediately.
    pub fn new(config: PickerConfig, store: PaletteStore, on_change: impl FnMut(ColorValue) + 'static) -> Self {
        let user_palette = store.load();
        let visibility = if config.open { Visibility::Open } else { Visibility::Closed };
        debug!(
            label = %config.label,
            open = config.open,
            value = %config.value,
            saved = user_palette.len(),
            "mounted color picker"
        );
        Self {
            label: config.label,
            style: config.style,
            visibility,
            value: config.value,
            developer_palette: config.palette,
            user_palette,
            store,
            on_change: Box::new(on_change),
        }
    }

    /// Mount a picker whose change notifications go nowhere.
    pub fn without_handler(config: PickerConfig, store: PaletteStore) -> Self {
        Self::new(config, store, |_| {})
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The owner's current color, exactly as supplied.
    pub fn value(&self) -> ColorValue {
        self.value
    }

    pub fn developer_palette(&self) -> &[ColorValue] {
        &self.developer_palette
    }

    pub fn user_palette(&self) -> &[ColorValue] {
        &self.user_palette
    }

    /// Header interaction: flip between open and closed.
    pub fn toggle_open(&mut self) -> Visibility {
        self.visibility = self.visibility.toggled();
        debug!(visibility = ?self.visibility, "toggled color picker");
        self.visibility
    }

    /// The owner supplies a new current color.
    pub fn set_value(&mut self, value: ColorValue) {
        self.value = value;
    }

    /// The owner replaces the developer palette.
    pub fn set_palette(&mut self, palette: Vec<ColorValue>) {
        self.developer_palette = palette;
    }

    /// A new HSV color was chosen. The owner is notified in the representation
    /// of the value it supplied; nothing here changes until it calls
    /// [`ColorPickerState::set_value`].
    pub fn on_color_change(&mut self, hsv: Hsv) {
        let converter = select_converter(&self.value);
        let color = converter.invert(hsv);
        debug!(converter = converter.name(), color = %color, "notifying owner of color change");
        (self.on_change)(color);
    }

    /// Save `color` to the end of the user palette.
    pub fn on_add_color(&mut self, color: ColorValue) {
        match self.store.append(color) {
            Ok(palette) => self.user_palette = palette,
            Err(error) => error!(color = %color, error = %error, "Failed to save color to user palette"),
        }
    }

    /// Save the current color, in HSV, to the user palette.
    pub fn add_current_color(&mut self) {
        let hsv = self.current_hsv();
        self.on_add_color(ColorValue::HsvObject(hsv));
    }

    /// Remove the user palette entry at `index`.
    pub fn on_remove_color(&mut self, color: ColorValue, index: usize) {
        match self.store.remove_at(index) {
            Ok(RemoveOutcome::Removed(palette)) => {
                debug!(color = %color, index, "removed saved color");
                self.user_palette = palette;
            }
            Ok(RemoveOutcome::OutOfRange { .. }) => self.user_palette = self.store.load(),
            Err(error) => error!(color = %color, index, error = %error, "Failed to remove color from user palette"),
        }
    }

    /// HSV form of the current color.
    pub fn current_hsv(&self) -> Hsv {
        select_converter(&self.value).to_hsv(&self.value)
    }

    /// HSV values of a palette, each entry converted on its own.
    pub fn palette_hsv(&self, key: PaletteKey) -> Vec<Hsv> {
        match key {
            PaletteKey::Developer => to_hsv_all(&self.developer_palette),
            PaletteKey::User => to_hsv_all(&self.user_palette),
        }
    }

    /// Derive the frame's display data from state.
    pub fn view(&self) -> PickerView {
        let hsv = self.current_hsv();
        PickerView {
            label: self.label.clone(),
            visibility: self.visibility,
            hsv,
            swatch_hex: hsv.to_hex(),
            slider: SliderProps {
                style: self.style,
                value: hsv,
            },
            developer_palette: PaletteProps::new(PaletteKey::Developer, self.palette_hsv(PaletteKey::Developer)),
            user_palette: PaletteProps::new(PaletteKey::User, self.palette_hsv(PaletteKey::User)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use tint_types::Rgb;
    use tint_util::{InMemoryStorage, KeyValueStorage, USER_PALETTE_KEY};

    fn store(storage: &InMemoryStorage) -> PaletteStore {
        PaletteStore::new(Arc::new(storage.clone()))
    }

    fn recording(config: PickerConfig, storage: &InMemoryStorage) -> (ColorPickerState, Rc<RefCell<Vec<ColorValue>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let state = ColorPickerState::new(config, store(storage), move |color| sink.borrow_mut().push(color));
        (state, seen)
    }

    #[test]
    fn defaults_match_the_documented_configuration() {
        let config = PickerConfig::default();
        assert!(!config.open);
        assert_eq!(config.label, "ColorPicker");
        assert_eq!(config.value, ColorValue::HsvObject(Hsv::new(1.0, 50.0, 50.0)));
        assert!(config.palette.is_empty());
    }

    #[test]
    fn header_toggle_flips_visibility() {
        let storage = InMemoryStorage::new();
        let mut state = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
        assert_eq!(state.visibility(), Visibility::Closed);
        assert_eq!(state.toggle_open(), Visibility::Open);
        assert_eq!(state.toggle_open(), Visibility::Closed);
    }

    #[test]
    fn open_flag_sets_initial_visibility() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            open: true,
            ..PickerConfig::default()
        };
        let state = ColorPickerState::without_handler(config, store(&storage));
        assert!(state.visibility().is_open());
    }

    #[test]
    fn color_change_answers_in_the_owner_representation() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            value: ColorValue::RgbArray(Rgb::new(255, 0, 0)),
            ..PickerConfig::default()
        };
        let (mut state, seen) = recording(config, &storage);

        state.on_color_change(Hsv::new(0.0, 100.0, 100.0));

        assert_eq!(*seen.borrow(), vec![ColorValue::RgbArray(Rgb::new(255, 0, 0))]);
        assert_eq!(state.value(), ColorValue::RgbArray(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn color_change_leaves_the_current_value_to_the_owner() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            value: ColorValue::RgbObject(Rgb::new(0, 0, 0)),
            ..PickerConfig::default()
        };
        let (mut state, seen) = recording(config, &storage);

        state.on_color_change(Hsv::new(120.0, 100.0, 100.0));
        assert_eq!(state.value(), ColorValue::RgbObject(Rgb::new(0, 0, 0)));
        assert_eq!(seen.borrow()[0], ColorValue::RgbObject(Rgb::new(0, 255, 0)));

        state.set_value(seen.borrow()[0]);
        assert_eq!(state.view().swatch_hex, "#00ff00");
    }

    #[test]
    fn hsv_owners_receive_hsv_unchanged() {
        let storage = InMemoryStorage::new();
        let (mut state, seen) = recording(PickerConfig::default(), &storage);
        let hsv = Hsv::new(33.3, 12.5, 87.5);
        state.on_color_change(hsv);
        assert_eq!(*seen.borrow(), vec![ColorValue::HsvObject(hsv)]);
    }

    #[test]
    fn adding_and_removing_write_through_to_storage() {
        let storage = InMemoryStorage::new();
        let mut state = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
        let red = ColorValue::RgbArray(Rgb::new(255, 0, 0));
        let blue = ColorValue::RgbObject(Rgb::new(0, 0, 255));

        state.on_add_color(red);
        state.on_add_color(blue);
        assert_eq!(state.user_palette(), &[red, blue]);
        assert_eq!(store(&storage).load(), vec![red, blue]);

        state.on_remove_color(red, 0);
        assert_eq!(state.user_palette(), &[blue]);
        assert_eq!(store(&storage).load(), vec![blue]);
    }

    #[test]
    fn stale_removal_resynchronizes_with_storage() {
        let storage = InMemoryStorage::new();
        let mut state = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
        let red = ColorValue::RgbArray(Rgb::new(255, 0, 0));
        state.on_add_color(red);

        storage.remove(USER_PALETTE_KEY).unwrap();
        state.on_remove_color(red, 0);
        assert!(state.user_palette().is_empty());
    }

    #[test]
    fn add_current_color_saves_hsv() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            value: ColorValue::RgbArray(Rgb::new(0, 0, 255)),
            ..PickerConfig::default()
        };
        let mut state = ColorPickerState::without_handler(config, store(&storage));
        state.add_current_color();
        assert_eq!(
            state.user_palette(),
            &[ColorValue::HsvObject(Hsv::new(240.0, 100.0, 100.0))]
        );
    }

    #[test]
    fn saved_palette_is_loaded_on_mount() {
        let storage = InMemoryStorage::new();
        let saved = ColorValue::RgbArray(Rgb::new(9, 9, 9));
        store(&storage).append(saved).unwrap();

        let state = ColorPickerState::without_handler(PickerConfig::default(), store(&storage));
        assert_eq!(state.user_palette(), &[saved]);
    }

    #[test]
    fn replacing_the_developer_palette_updates_the_view() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            palette: vec![ColorValue::RgbArray(Rgb::new(255, 0, 0))],
            ..PickerConfig::default()
        };
        let mut state = ColorPickerState::without_handler(config, store(&storage));

        state.set_palette(vec![
            ColorValue::RgbObject(Rgb::new(0, 255, 0)),
            ColorValue::HsvObject(Hsv::new(240.0, 100.0, 100.0)),
        ]);

        let view = state.view();
        assert_eq!(
            view.developer_palette.values,
            vec![Hsv::new(120.0, 100.0, 100.0), Hsv::new(240.0, 100.0, 100.0)]
        );
        assert!(view.user_palette.values.is_empty());
        assert!(store(&storage).load().is_empty());
    }

    #[test]
    fn view_converts_each_palette_entry_independently() {
        let storage = InMemoryStorage::new();
        let config = PickerConfig {
            value: ColorValue::RgbObject(Rgb::new(255, 0, 0)),
            palette: vec![
                ColorValue::RgbArray(Rgb::new(0, 255, 0)),
                ColorValue::HsvObject(Hsv::new(240.0, 100.0, 100.0)),
            ],
            ..PickerConfig::default()
        };
        let state = ColorPickerState::without_handler(config, store(&storage));
        let view = state.view();

        assert_eq!(view.hsv, Hsv::new(0.0, 100.0, 100.0));
        assert_eq!(view.swatch_hex, "#ff0000");
        assert_eq!(view.slider.value, view.hsv);
        assert_eq!(
            view.developer_palette.values,
            vec![Hsv::new(120.0, 100.0, 100.0), Hsv::new(240.0, 100.0, 100.0)]
        );
        assert!(!view.developer_palette.deselectable);
        assert!(view.user_palette.deselectable);
    }
}
