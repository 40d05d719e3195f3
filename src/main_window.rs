// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use iced::keyboard::key::Named;
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::text_input;
use iced::{event, time, Element, Event, Subscription, Task, Theme};
use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

use crate::clipboard::{self, ClipboardWriter, SystemClipboard, TemporaryClipboard};
use crate::color_engine::{self, ColorEngine, ColorSnapshot, ColorSource, ColorSurface, SourceKind};
use crate::config;
use crate::copy_feedback::CopyFeedback;
use crate::main_window_widgets::*;
use crate::style;

const FEEDBACK_TICK_INTERVAL: Duration = Duration::from_millis(100);

// these should be static not just const
pub(crate) static HEX_INPUT_ID: Lazy<text_input::Id> = Lazy::new(text_input::Id::unique);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    pub const ALL: [ColorChannel; 3] = [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue];

    pub fn index(self) -> usize {
        match self {
            ColorChannel::Red => 0,
            ColorChannel::Green => 1,
            ColorChannel::Blue => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorChannel::Red => "Red",
            ColorChannel::Green => "Green",
            ColorChannel::Blue => "Blue",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowMessage {
    PickerColorSelected(String),
    HexInputEdited(String),
    SliderMoved(ColorChannel, u8),
    CopyRequested,
    FocusHexInput,
    Tick(Instant),
}

// what each of the color views of the window currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSurfaces {
    pub picker_hex: String,
    pub hex_input: String,
    pub slider_values: [u8; 3],
    pub swatch_color: iced::Color,
    pub ox_readout: String,
}

impl ColorSurfaces {
    fn from_snapshot(snapshot: &ColorSnapshot) -> Self {
        Self {
            picker_hex: snapshot.hex.clone(),
            hex_input: snapshot.hex.clone(),
            slider_values: snapshot.color.to_array(),
            swatch_color: snapshot.color.into(),
            ox_readout: snapshot.ox_hex.clone(),
        }
    }
}

impl ColorSurface for ColorSurfaces {
    fn render(&mut self, snapshot: &ColorSnapshot, origin: SourceKind) {
        self.picker_hex = snapshot.hex.clone();
        // keep what the user is typing, rewriting it to the canonical form
        // would break typing a 6 digit color that starts like a valid 3 digit one
        self.hex_input = if origin == SourceKind::HexField {
            color_engine::normalize_hex_field_input(&self.hex_input)
        } else {
            snapshot.hex.clone()
        };
        self.slider_values = snapshot.color.to_array();
        self.swatch_color = snapshot.color.into();
        self.ox_readout = snapshot.ox_hex.clone();
    }
}

pub struct MainWindow {
    engine: ColorEngine,
    surfaces: ColorSurfaces,
    primary_clipboard: Box<dyn ClipboardWriter>,
    fallback_clipboard: Box<dyn ClipboardWriter>,
    copy_feedback: Option<CopyFeedback>,
    app_config: config::AppConfig,
    theme: Theme,
}

impl MainWindow {
    pub fn new(app_config: config::AppConfig) -> (Self, Task<WindowMessage>) {
        let main_window = Self::with_clipboards(
            app_config,
            Box::new(SystemClipboard::default()),
            Box::new(TemporaryClipboard::<arboard::Clipboard>::default()),
        );
        (main_window, Task::none())
    }

    pub fn with_clipboards(
        app_config: config::AppConfig,
        primary_clipboard: Box<dyn ClipboardWriter>,
        fallback_clipboard: Box<dyn ClipboardWriter>,
    ) -> Self {
        let engine = ColorEngine::with_initial_hex(app_config.get_start_color()).unwrap_or_else(|| {
            log::warn!(
                "Can't use '{}' as the start color, using {}",
                app_config.get_start_color(),
                color_engine::DEFAULT_HEX_COLOR
            );
            ColorEngine::new()
        });
        log::info!("Starting with color {}", engine.snapshot().hex);

        Self {
            surfaces: ColorSurfaces::from_snapshot(engine.snapshot()),
            engine,
            primary_clipboard,
            fallback_clipboard,
            copy_feedback: None,
            theme: style::get_theme(&app_config),
            app_config,
        }
    }

    pub fn title(&self) -> String {
        let title = self.app_config.custom_title.as_deref().unwrap_or("oxpicker");
        format!("{} - {}", title, self.engine.snapshot().hex)
    }

    pub fn update(&mut self, message: WindowMessage) -> Task<WindowMessage> {
        match message {
            WindowMessage::PickerColorSelected(hex) => {
                self.engine
                    .apply(ColorSource::NativePicker(hex), &mut self.surfaces);
            }
            WindowMessage::HexInputEdited(text) => {
                self.surfaces.hex_input = text.clone();
                let is_updated = self
                    .engine
                    .apply(ColorSource::HexField(text.clone()), &mut self.surfaces);
                // the text was changed under the cursor, keep typing at the end
                if is_updated && self.surfaces.hex_input != text {
                    return text_input::move_cursor_to_end(HEX_INPUT_ID.clone());
                }
            }
            WindowMessage::SliderMoved(channel, value) => {
                let mut rgb = self.surfaces.slider_values;
                rgb[channel.index()] = value;
                self.engine
                    .apply(ColorSource::RgbSliders(rgb), &mut self.surfaces);
            }
            WindowMessage::CopyRequested => {
                self.copy_ox_readout(Instant::now());
            }
            WindowMessage::FocusHexInput => {
                return text_input::focus(HEX_INPUT_ID.clone());
            }
            WindowMessage::Tick(now) => {
                let duration = self.app_config.get_copy_feedback_duration();
                if self
                    .copy_feedback
                    .is_some_and(|copy_feedback| copy_feedback.is_expired(now, duration))
                {
                    self.copy_feedback = None;
                }
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, WindowMessage> {
        produce_main_content(
            &self.surfaces,
            &self.app_config,
            self.copy_feedback.as_ref(),
        )
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn subscription(&self) -> Subscription<WindowMessage> {
        let hotkeys = event::listen_with(|event, status, _window| {
            let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
                return None;
            };

            let is_input_captured_by_a_widget = status == event::Status::Captured;
            get_hotkey_message(&key, modifiers, is_input_captured_by_a_widget)
        });

        if self.copy_feedback.is_some() {
            Subscription::batch([
                hotkeys,
                time::every(FEEDBACK_TICK_INTERVAL).map(WindowMessage::Tick),
            ])
        } else {
            hotkeys
        }
    }

    fn copy_ox_readout(&mut self, now: Instant) {
        let outcome = clipboard::copy_with_fallback(
            self.primary_clipboard.as_mut(),
            self.fallback_clipboard.as_mut(),
            &self.surfaces.ox_readout,
        );
        self.copy_feedback = Some(CopyFeedback::new(outcome, now));
    }
}

fn get_hotkey_message(
    key: &Key,
    modifiers: Modifiers,
    is_input_captured_by_a_widget: bool,
) -> Option<WindowMessage> {
    // a focused text input captures its keys, so copying text from it is not hijacked
    if is_input_captured_by_a_widget {
        return None;
    }

    if modifiers.command() {
        handle_command_hotkey(key)
    } else {
        handle_key_press(key)
    }
}

fn handle_command_hotkey(key: &Key) -> Option<WindowMessage> {
    match key.as_ref() {
        Key::Character("c") => Some(WindowMessage::CopyRequested),
        Key::Character("l") => Some(WindowMessage::FocusHexInput),
        _ => None,
    }
}

fn handle_key_press(key: &Key) -> Option<WindowMessage> {
    match key.as_ref() {
        Key::Named(Named::Enter) => Some(WindowMessage::CopyRequested),
        _ => None,
    }
}
