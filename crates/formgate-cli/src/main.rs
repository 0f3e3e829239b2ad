use std::process::ExitCode;

use formgate_cli::command::load_settings;
use formgate_cli::{register_builtin_commands, CommandContext, CommandRegistry};
use formgate_core::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let settings = match load_settings(&matches) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };
    setup_logging(&settings);

    let ctx = CommandContext::new(settings, matches.get_flag("json"));
    match registry.execute(&matches, &ctx).await {
        Ok(output) => {
            println!("{}", output.render(ctx.json));
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}
