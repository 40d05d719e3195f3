// Copyright (C) Pavel Grebnev 2023-2025
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::color_utils;
use crate::config;
use crate::copy_feedback::CopyFeedback;
use crate::main_window::*;
use crate::style;
use iced::widget::{
    button, column, container, row, scrollable, slider, text, text_input, tooltip, Button,
    Column, Row, Space,
};
use iced::{alignment, Alignment, Element, Length};

const PALETTE_COLUMNS: usize = 8;
const PALETTE_ENTRY_SIZE: f32 = 28.0;
const SWATCH_HEIGHT: f32 = 120.0;
const CAPTION_SIZE: u16 = 16;
const COPY_HINT: &str = "Enter or Ctrl/Cmd+C copy from anywhere outside the hex field";

fn caption<'a>(label: &'a str) -> Element<'a, WindowMessage> {
    text(label).size(CAPTION_SIZE).into()
}

pub fn main_button(label: &str, message: WindowMessage) -> Button<WindowMessage> {
    button(text(label).align_y(alignment::Vertical::Center).size(16))
        .padding(6)
        .on_press(message)
}

pub fn produce_config_error_content<'a>(problems: String) -> Element<'a, WindowMessage> {
    container(text(problems).size(14))
        .padding(8)
        .width(Length::Fill)
        .style(style::config_error_banner)
        .into()
}

pub fn produce_picker_content<'a>(
    palette: &'a [String],
    picker_hex: &'a str,
) -> Element<'a, WindowMessage> {
    let mut grid = Column::new().spacing(4);
    for palette_row_colors in palette.chunks(PALETTE_COLUMNS) {
        let mut palette_row = Row::new().spacing(4);
        for hex in palette_row_colors {
            // palette is validated when the config is read
            let Some(color) = color_utils::hex_to_rgb(hex) else {
                continue;
            };
            // the picker always reports the full 6 digit form
            let picker_value = color_utils::rgb_to_hex(color.red, color.green, color.blue);
            let is_selected = picker_value == picker_hex;
            palette_row = palette_row.push(
                button(Space::new(PALETTE_ENTRY_SIZE, PALETTE_ENTRY_SIZE))
                    .padding(0)
                    .style(style::palette_entry(color.into(), is_selected))
                    .on_press(WindowMessage::PickerColorSelected(picker_value)),
            );
        }
        grid = grid.push(palette_row);
    }

    column![
        caption("Color picker"),
        grid,
        text(format!("Picked: {}", picker_hex)).size(14),
    ]
    .spacing(6)
    .into()
}

pub fn produce_hex_input_content<'a>(hex_input: &'a str) -> Element<'a, WindowMessage> {
    column![
        caption("Hex"),
        text_input("#rrggbb", hex_input)
            .id(HEX_INPUT_ID.clone())
            .on_input(WindowMessage::HexInputEdited)
            .padding(5),
    ]
    .spacing(6)
    .into()
}

fn produce_slider_row<'a>(channel: ColorChannel, value: u8) -> Element<'a, WindowMessage> {
    row![
        text(channel.label()).width(Length::Fixed(50.0)),
        slider(0..=255, value, move |value| WindowMessage::SliderMoved(
            channel, value
        )),
        text(value.to_string()).width(Length::Fixed(36.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

pub fn produce_sliders_content<'a>(slider_values: [u8; 3]) -> Element<'a, WindowMessage> {
    let mut content = Column::new().spacing(6).push(caption("RGB"));
    for channel in ColorChannel::ALL {
        content = content.push(produce_slider_row(channel, slider_values[channel.index()]));
    }
    content.into()
}

pub fn produce_preview_content<'a>(surfaces: &'a ColorSurfaces) -> Element<'a, WindowMessage> {
    column![
        caption("Preview"),
        container(Space::new(Length::Fill, Length::Fixed(SWATCH_HEIGHT)))
            .width(Length::Fill)
            .style(style::swatch_preview(surfaces.swatch_color)),
        row![
            // no on_input, the readout can't be edited
            text_input("0xrrggbb", &surfaces.ox_readout)
                .padding(5)
                .width(Length::Fill),
            tooltip(
                main_button("Copy", WindowMessage::CopyRequested),
                container(text(COPY_HINT).size(12)).padding(4),
                tooltip::Position::Bottom,
            )
            .style(container::rounded_box),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(6)
    .into()
}

fn produce_copy_feedback_content<'a>(
    copy_feedback: &CopyFeedback,
    report_failures: bool,
) -> Element<'a, WindowMessage> {
    let content = container(text(copy_feedback.message(report_failures)).size(14))
        .padding(6)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center);

    if copy_feedback.is_positive(report_failures) {
        content.style(style::copy_feedback_positive).into()
    } else {
        content.style(style::copy_feedback_negative).into()
    }
}

pub fn produce_main_content<'a>(
    surfaces: &'a ColorSurfaces,
    app_config: &'a config::AppConfig,
    copy_feedback: Option<&CopyFeedback>,
) -> Element<'a, WindowMessage> {
    let mut content = Column::new().spacing(16).padding(16);

    if let Some(problems) = app_config.get_config_problems() {
        content = content.push(produce_config_error_content(problems));
    }

    content = content
        .push(produce_picker_content(
            &app_config.palette,
            &surfaces.picker_hex,
        ))
        .push(produce_hex_input_content(&surfaces.hex_input))
        .push(produce_sliders_content(surfaces.slider_values))
        .push(produce_preview_content(surfaces));

    content = match copy_feedback {
        Some(copy_feedback) => content.push(produce_copy_feedback_content(
            copy_feedback,
            app_config.report_copy_failures,
        )),
        // keep the layout from jumping when the feedback appears
        None => content.push(Space::with_height(Length::Fixed(30.0))),
    };

    scrollable(content).into()
}
