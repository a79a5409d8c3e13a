use clap::ValueEnum;
use tm_config::TmConfig;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    Table,
    /// Single-line JSON, for piping.
    Raw,
}

/// Flags shared by every subcommand, detached from the clap parser.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub quiet: bool,
    pub verbose: bool,
    pub database: Option<String>,
}

impl GlobalFlags {
    /// Row limit for list commands: `--limit`, else `general.default_limit`.
    #[must_use]
    pub fn list_limit(&self, config: &TmConfig) -> u32 {
        self.limit.unwrap_or(config.general.default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobalFlags, OutputFormat};
    use tm_config::TmConfig;

    fn flags(limit: Option<u32>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Table,
            limit,
            quiet: false,
            verbose: false,
            database: None,
        }
    }

    #[test]
    fn limit_flag_wins_over_config() {
        assert_eq!(flags(Some(5)).list_limit(&TmConfig::default()), 5);
    }

    #[test]
    fn config_limit_used_without_flag() {
        let mut config = TmConfig::default();
        config.general.default_limit = 25;
        assert_eq!(flags(None).list_limit(&config), 25);
    }
}
