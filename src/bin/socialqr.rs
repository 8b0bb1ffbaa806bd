// Binary entry point: TUI by default, one-shot commands otherwise.
use anyhow::Result;
use socialqr::cli::{self, Command};
use socialqr::config::Config;
use socialqr::context::{AppContext, StandardContext};
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = match cli::parse_args(&args) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(invocation.root));
    let cfg = match Config::load_or_default(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    match invocation.command {
        #[cfg(feature = "tui")]
        Command::Tui => {
            if let Err(e) = socialqr::logging::init_file_logger(ctx.as_ref(), cfg.log_level_filter()) {
                eprintln!("Warning: file logging disabled: {}", e);
            }
            socialqr::tui::run(ctx, cfg).await
        }
        command => {
            if !matches!(command, Command::Help | Command::Modes)
                && let Err(e) = socialqr::logging::init_stderr_logger(cfg.log_level_filter())
            {
                eprintln!("Warning: logging disabled: {}", e);
            }
            if let Err(e) = cli::run_command(command, ctx, &cfg).await {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
