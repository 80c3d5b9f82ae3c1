pub fn about() -> Vec<String> {
    vec![
        "A small control panel for switching USB power and \
        choosing the headphone jack mode.".to_string(),
        "\n".to_string(),
        "Keyboard: U toggles USB, H opens the headphone dialog, \
        1/2/3 pick 3 Pin / 4 Pin / Disconnected, Escape closes it.".to_string(),
        "\n".to_string(),
        system_info(),
    ]
}

/// Host platform line shown on the about screen.
pub fn system_info() -> String {
    format!(
        "OS: {}, Architecture: {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
