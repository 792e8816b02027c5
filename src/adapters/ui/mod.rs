pub mod cli;
pub mod commands;
pub mod output;
pub mod prompt;
pub mod table;

use inquire::ui::{Color, RenderConfig, Styled};

/// Applies the prompt theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightCyan))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}
