// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

#![windows_subsystem = "windows"]

mod app_arguments;
mod clipboard;
mod color_engine;
mod color_utils;
mod config;
mod copy_feedback;
mod main_window;
mod main_window_widgets;
mod style;

use iced::{window, Size};
use simplelog::WriteLogger;

fn init_logging(app_config: &config::AppConfig) {
    let log_file = match std::fs::File::create(&app_config.paths.log_path) {
        Ok(log_file) => log_file,
        Err(err) => {
            eprintln!(
                "Can't create log file {}, error {}",
                app_config.paths.log_path.display(),
                err
            );
            return;
        }
    };

    if let Err(err) = WriteLogger::init(
        app_config.get_log_level_filter(),
        simplelog::Config::default(),
        log_file,
    ) {
        eprintln!("Can't initialize logging, error {}", err);
    }
}

pub fn main() -> iced::Result {
    let app_arguments = app_arguments::get_app_arguments();
    if let Some(exit_message) = &app_arguments.exit_message {
        println!("{}", exit_message);
        return Ok(());
    }

    let app_config = config::read_config(&app_arguments);
    init_logging(&app_config);

    log::info!(
        "Using config file {}",
        app_config.paths.config_path.display()
    );
    if let Some(config_read_error) = &app_config.config_read_error {
        log::error!("{}", config_read_error);
    }
    for validation_error in &app_config.validation_errors {
        log::warn!("{}", validation_error);
    }

    let window_settings = window::Settings {
        size: Size::new(480.0, 640.0),
        position: window::Position::Centered,
        level: if app_config.always_on_top {
            window::Level::AlwaysOnTop
        } else {
            window::Level::Normal
        },
        ..Default::default()
    };

    iced::application(
        main_window::MainWindow::title,
        main_window::MainWindow::update,
        main_window::MainWindow::view,
    )
    .subscription(main_window::MainWindow::subscription)
    .theme(main_window::MainWindow::theme)
    .window(window_settings)
    .run_with(move || main_window::MainWindow::new(app_config))
}
