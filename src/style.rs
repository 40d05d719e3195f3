// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::color_utils;
use crate::config;
use iced::theme::{self, Theme};
use iced::widget::{button, container};
use iced::{Border, Color};

pub fn swatch_preview(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();

        container::Style {
            background: Some(color.into()),
            border: Border {
                color: palette.background.strong.color,
                width: 2.0,
                radius: 6.0.into(),
            },
            ..Default::default()
        }
    }
}

pub fn palette_entry(
    color: Color,
    is_selected: bool,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let palette = theme.extended_palette();

        let border_color = if is_selected {
            palette.primary.strong.color
        } else if status == button::Status::Hovered {
            palette.background.strong.text
        } else {
            palette.background.strong.color
        };

        button::Style {
            background: Some(color.into()),
            border: Border {
                color: border_color,
                width: if is_selected { 3.0 } else { 1.0 },
                radius: 4.0.into(),
            },
            ..button::primary(theme, status)
        }
    }
}

pub fn copy_feedback_positive(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        text_color: Some(palette.success.strong.text),
        background: Some(palette.success.strong.color.into()),
        ..Default::default()
    }
}

pub fn copy_feedback_negative(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        text_color: Some(palette.danger.base.text),
        background: Some(palette.danger.base.color.into()),
        ..Default::default()
    }
}

pub fn config_error_banner(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        text_color: Some(palette.danger.strong.color),
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: palette.danger.base.color,
            width: 1.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn hex_to_iced_color(hex: &str) -> Option<Color> {
    color_utils::hex_to_rgb(hex).map(Color::from)
}

pub fn get_custom_theme(custom_config: &config::CustomTheme) -> Option<Theme> {
    Some(Theme::custom(
        "custom".to_string(),
        theme::Palette {
            background: hex_to_iced_color(&custom_config.background)?,
            text: hex_to_iced_color(&custom_config.text)?,
            primary: hex_to_iced_color(&custom_config.primary)?,
            success: hex_to_iced_color(&custom_config.success)?,
            danger: hex_to_iced_color(&custom_config.danger)?,
        },
    ))
}

pub fn get_theme(app_config: &config::AppConfig) -> Theme {
    app_config
        .custom_theme
        .as_ref()
        .and_then(get_custom_theme)
        .unwrap_or(Theme::Dark)
}
