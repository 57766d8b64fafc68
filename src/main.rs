use owo_colors::OwoColorize;
use std::path::Path;
use std::process::ExitCode;

use thrive_migrate::cli::{Cli, Commands};
use thrive_migrate::commands::{
    execute_apply, execute_apply_all, execute_new, execute_seed, execute_split, execute_verify,
    print_apply_summary, print_new_summary, print_seed_summary, print_split_summary,
    print_verify_summary, split_to_json, ApplyOptions,
};
use thrive_migrate::config::{MigrateConfig, ENV_FILE};
use thrive_migrate::error::{format_error_chain, suggest_fix, Result};
use thrive_migrate::output::CliOutputHandler;
use thrive_migrate::remote::RestClient;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the variables may already be exported
    let dotenv_result = MigrateConfig::load_env_file(Path::new(ENV_FILE));

    let cli = Cli::parse_args();

    if let Err(e) = thrive_migrate::logging::init(cli.verbose) {
        eprintln!("failed to initialize logging: {}", e);
    }

    if let Err(e) = dotenv_result {
        eprintln!("{} {}", "⚠".yellow(), e);
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("{} {}", "✗".red().bold(), format_error_chain(&err).red());
            if let Some(suggestion) = suggest_fix(&err) {
                eprintln!("\n{}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Precedence: CLI flag > environment > thrive.toml > defaults
    let file_config = MigrateConfig::load_from_file()?
        .unwrap_or_default()
        .with_env(|key| std::env::var(key).ok());
    let config = MigrateConfig::merge_with_cli(
        Some(file_config),
        cli.project_url,
        cli.service_key,
        None,
    );

    let output = CliOutputHandler;

    match cli.command {
        Commands::Init => {
            let path = MigrateConfig::write_sample_config(&std::env::current_dir()?)?;
            println!("{} Wrote {}", "✓".green().bold(), path.display().to_string().cyan());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Split { file, json } => {
            let result = execute_split(&file)?;
            if json {
                println!("{}", split_to_json(&result)?);
            } else {
                print_split_summary(&result);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Apply { file, no_split } => {
            let client = RestClient::new(config.remote_config()?)?;
            let result = execute_apply(&client, &file, ApplyOptions { no_split }, &output).await?;
            print_apply_summary(&result);
            Ok(exit_code(result.total_failures() == 0))
        }

        Commands::ApplyAll { migrations_dir, skip_verify } => {
            let client = RestClient::new(config.remote_config()?)?;
            let migrations_dir = migrations_dir.unwrap_or_else(|| config.migrations_dir());
            let verify = config.verify_config();
            let verify = if skip_verify { None } else { Some(&verify) };

            let result = execute_apply_all(
                &client,
                &migrations_dir,
                ApplyOptions::default(),
                verify,
                &output,
            )
            .await?;
            print_apply_summary(&result);
            Ok(exit_code(result.total_failures() == 0))
        }

        Commands::Verify => {
            let client = RestClient::new(config.remote_config()?)?;
            let result = execute_verify(&client, &config.verify_config(), &output).await;
            print_verify_summary(&result);
            Ok(exit_code(result.all_passed()))
        }

        Commands::Seed { seed_dir } => {
            let client = RestClient::new(config.remote_config()?)?;
            let seed_dir = seed_dir.unwrap_or_else(|| config.seed_dir());
            let result = execute_seed(&client, &seed_dir, &output).await?;
            print_seed_summary(&result);
            Ok(exit_code(result.is_success()))
        }

        Commands::New { name, migrations_dir } => {
            let migrations_dir = migrations_dir.unwrap_or_else(|| config.migrations_dir());
            let result = execute_new(&migrations_dir, &name)?;
            print_new_summary(&result);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
