use clap::Parser;
use dons::application::{AggregateYearService, ExportFormat, ExportMonthService, RecordService};
use dons::cli::{format_record_list, Cli, Commands, RecordAction};
use dons::domain::period::validate_year;
use dons::domain::YearMonth;
use dons::error::{DonsError, Result};
use dons::infrastructure::{Config, HttpPageSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref()).and_then(|config| {
        init_tracing(&config);
        run(cli, &config)
    });

    match result {
        Ok(output) => {
            print!("{}", output);
            std::process::exit(0)
        }
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli, config: &Config) -> Result<String> {
    match cli.command {
        Some(Commands::Records { db, action }) => {
            let path = db.unwrap_or_else(|| config.database.clone());

            match action {
                RecordAction::Add {
                    date,
                    name,
                    amount,
                    comment,
                } => {
                    let service = RecordService::open(&path)?;
                    let record = service.add(&date, &name, &amount, &comment)?;
                    service.close()?;
                    Ok(format!("Saved {}\n", record))
                }
                RecordAction::List => {
                    let service = RecordService::open(&path)?;
                    let records = service.list()?;
                    Ok(format_record_list(&records))
                }
                RecordAction::Reset => {
                    RecordService::reset(&path)?;
                    Ok(format!("Donations table reset in {}\n", path.display()))
                }
            }
        }
        None => {
            // Check every argument before anything goes over the network
            let year = cli
                .year
                .ok_or_else(|| DonsError::Validation("--year is required".to_string()))?;
            let year = validate_year(year)?;

            if cli.all {
                // An explicit month is still checked even though the year covers it
                if let Some(month) = cli.month {
                    YearMonth::new(year as i64, month)?;
                }
                let service = AggregateYearService::new(HttpPageSource::from_config(config));
                let summary = service.execute(year)?;
                return Ok(summary.to_string());
            }

            let month = cli.month.ok_or_else(|| {
                DonsError::Validation("--month is required unless --all is given".to_string())
            })?;
            let period = YearMonth::new(year as i64, month)?;
            if let Some(day) = cli.day {
                period.validate_day(day)?;
            }

            let service = ExportMonthService::new(HttpPageSource::from_config(config));
            service.execute(period, cli.day, &ExportFormat::from_js_name(cli.js))
        }
    }
}
