mod aggregate;
mod cli;
mod error;
mod export;
mod fmt;
mod models;
mod normalize;
mod reports;
mod session;
mod settings;
mod source;
mod summary;
mod view;

use clap::Parser;

use cli::export::ExportArgs;
use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reports => {
            cli::reports::run();
            Ok(())
        }
        Commands::Show {
            report,
            view,
            page,
            page_size,
        } => cli::show::run(report, &view, page, page_size),
        Commands::Export {
            report,
            view,
            format,
            file_name,
            sheet_name,
            output_dir,
        } => cli::export::run(
            report,
            &view,
            ExportArgs {
                format,
                file_name,
                sheet_name,
                output_dir,
            },
        ),
        Commands::Series { input, range } => cli::series::run(&input, range),
        Commands::Config { command } => cli::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
