use tm_config::TmConfig;

use crate::cli::root_commands::ServeArgs;

/// Handle `taskmaster serve`.
pub async fn handle(args: &ServeArgs, config: &TmConfig) -> anyhow::Result<()> {
    let mut config = config.clone();
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
        config.validate()?;
    }
    tm_server::serve(&config).await
}
