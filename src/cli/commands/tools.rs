//! External tool check.

use console::style;

use crate::config::ExtractorConfig;
use crate::ocr::check_tools;

/// Report which external tools are installed.
pub fn cmd_tools(settings: &ExtractorConfig) -> anyhow::Result<()> {
    let tools = check_tools(
        &settings.rasterizer_binary,
        &settings.text_reader_binary,
        &settings.ocr_binary,
    );

    for tool in &tools {
        match &tool.resolved {
            Some(path) => println!(
                "  {} {:<12} {}",
                style("✓").green(),
                tool.role,
                path.display()
            ),
            None => println!(
                "  {} {:<12} {} not found ({})",
                style("✗").red(),
                tool.role,
                tool.binary.display(),
                tool.install_hint
            ),
        }
    }

    if tools.iter().all(|t| t.is_available()) {
        println!("{} All tools available", style("✓").green());
    } else {
        println!(
            "{} Some strategies will fail until the missing tools are installed",
            style("!").yellow()
        );
    }
    Ok(())
}
