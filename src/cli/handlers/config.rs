use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::Result;

/// Print the effective configuration as YAML, or JSON when requested
pub fn handle_config_show(config: &Config, json: bool, formatter: &OutputFormatter) -> Result<()> {
    if json || formatter.is_json() {
        return formatter.print_json(config);
    }

    formatter.info(serde_yaml::to_string(config)?.trim_end());
    Ok(())
}
