// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AppArguments {
    pub custom_config_path: Option<String>,
    pub custom_log_path: Option<String>,
    pub start_color: Option<String>,
    pub custom_title: Option<String>,
    // help text, version or an argument error; the app prints it and exits
    pub exit_message: Option<String>,
}

struct ArgumentDefinition {
    name: &'static str,
    syntax: &'static str,
    description: &'static str,
    number_of_args: usize,
}

const SUPPORTED_ARGS: &[ArgumentDefinition] = &[
    ArgumentDefinition {
        name: "--help",
        syntax: "--help",
        description: "Show this help",
        number_of_args: 0,
    },
    ArgumentDefinition {
        name: "--version",
        syntax: "--version",
        description: "Show the application version",
        number_of_args: 0,
    },
    ArgumentDefinition {
        name: "--config-path",
        syntax: "--config-path <path>",
        description: "Set custom path to the config file",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--log-path",
        syntax: "--log-path <path>",
        description: "Set path to the log file",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--color",
        syntax: "--color <hex>",
        description: "Start with the given color (e.g. #283d46 or fa0)",
        number_of_args: 1,
    },
    ArgumentDefinition {
        name: "--title",
        syntax: "--title <title>",
        description: "Set custom window title",
        number_of_args: 1,
    },
];

fn with_exit_message(message: String) -> AppArguments {
    AppArguments {
        exit_message: Some(message),
        ..Default::default()
    }
}

fn get_help_text() -> String {
    let mut help_text = "Supported arguments:\n".to_string();
    let max_syntax_len = SUPPORTED_ARGS
        .iter()
        .map(|arg| arg.syntax.len())
        .max()
        .unwrap_or_default();
    for arg in SUPPORTED_ARGS {
        help_text.push_str(arg.syntax);
        for _ in 0..max_syntax_len - arg.syntax.len() + 1 {
            help_text.push(' ');
        }
        help_text.push_str(arg.description);
        help_text.push('\n');
    }
    help_text.push('\n');
    help_text.push_str(
        "Example: oxpicker --config-path C:\\oxpicker.json --color \"#ffa500\" --title Palette",
    );
    help_text
}

pub fn get_app_arguments() -> AppArguments {
    let args: Vec<String> = std::env::args().collect();
    parse_app_arguments(&args)
}

// args[0] is the executable path
pub fn parse_app_arguments(args: &[String]) -> AppArguments {
    let mut result = AppArguments::default();

    let mut i: usize = 1;
    while i < args.len() {
        let arg = &args[i];

        let found_arg = if arg.starts_with("--") {
            SUPPORTED_ARGS
                .iter()
                .find(|supported_arg| supported_arg.name == arg)
        } else {
            None
        };

        let Some(found_arg) = found_arg else {
            return with_exit_message(format!(
                "Unknown argument: {}\nUse --help to see the list of supported arguments",
                arg
            ));
        };

        if found_arg.number_of_args > 0 && i + found_arg.number_of_args >= args.len() {
            return with_exit_message(format!(
                "Not enough arguments for {}\nUse --help to see the list of supported arguments",
                arg
            ));
        }

        match found_arg.name {
            "--help" => return with_exit_message(get_help_text()),
            "--version" => return with_exit_message(env!("CARGO_PKG_VERSION").to_string()),
            "--config-path" => result.custom_config_path = Some(args[i + 1].clone()),
            "--log-path" => result.custom_log_path = Some(args[i + 1].clone()),
            "--color" => result.start_color = Some(args[i + 1].clone()),
            "--title" => result.custom_title = Some(args[i + 1].clone()),
            _ => {}
        }

        i += 1 + found_arg.number_of_args;
    }

    result
}
