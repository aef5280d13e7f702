//! Settings display formatting

use std::path::Path;

use crate::config::Settings;

/// Format the settings with the resolved file locations
pub fn format_settings(settings: &Settings, settings_file: &Path, vault_root: &Path) -> String {
    let yes_no = |b: bool| if b { "Yes" } else { "No" };

    let mut output = String::new();
    output.push_str("Casual Capture Configuration\n");
    output.push_str("============================\n");
    output.push_str(&format!("Settings file: {}\n", settings_file.display()));
    output.push_str(&format!("Vault:         {}\n", vault_root.display()));
    output.push('\n');
    output.push_str("Capture:\n");
    output.push_str(&format!("  Insert timestamps:   {}\n", yes_no(settings.insert_timestamps)));
    output.push_str(&format!("  Add horizontal rule: {}\n", yes_no(settings.add_horizontal_rule)));
    output.push_str(&format!(
        "  Rule:                {} x{}\n",
        settings.hr_char, settings.hr_width
    ));
    output.push_str(&format!("  Popup hotkey:        {}\n", settings.hotkey));
    output.push('\n');
    output.push_str("Window:\n");
    output.push_str(&format!("  Dark mode: {}\n", yes_no(settings.dark_mode)));
    output.push_str(&format!("  Position:  {}\n", settings.app_position));
    output.push_str(&format!(
        "  Size:      {}x{}\n",
        settings.win_width, settings.win_height
    ));
    output.push_str(&format!(
        "  Font:      {} {}pt\n",
        settings.font_choice, settings.font_size
    ));
    output.push_str(&format!("  Word wrap: {}\n", yes_no(settings.word_wrap)));
    output
}
