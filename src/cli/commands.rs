use crate::analyzers::{ChartBuilder, TsunamiAnalyzer};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::lookup::IpLookupClient;
use crate::processors::{normalize_column_name, CleaningPipeline};
use crate::readers::EventReader;
use crate::settings::AppConfig;
use crate::utils::filename::generate_default_charts_filename;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::ChartWriter;
use tracing::{error, info};

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{}", v))
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let settings = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            charts_out,
            no_charts,
            sample,
        } => {
            println!("Analyzing earthquake data...");
            println!("Input file: {}", input.display());

            let progress = ProgressReporter::new_spinner("Reading events...", false);

            let reader = EventReader::with_delimiter(settings.reader.delimiter()?)?;
            let table = reader.read_table(&input)?;

            progress.set_message("Cleaning events...");
            let pipeline = CleaningPipeline::with_candidates(settings.roles.clone());
            let cleaned = pipeline.run(&table);

            progress.finish_with_message(&format!(
                "Kept {} of {} events",
                cleaned.rows.len(),
                cleaned.input_rows
            ));

            println!("\nColumn roles:\n{}", cleaned.assignment.summary());

            let analyzer = TsunamiAnalyzer::with_thresholds(
                settings.analysis.strong_magnitude,
                settings.analysis.shallow_depth_km,
            );
            let statistics = analyzer.analyze(&cleaned)?;

            println!("\n{}", statistics.summary_table());
            println!("\n{}", statistics.key_findings());

            if sample > 0 {
                println!("Sample Records (showing up to {} records):", sample);
                for (i, row) in cleaned.rows.iter().take(sample).enumerate() {
                    println!(
                        "{}. magnitude={}, depth={}, lat={}, lon={}, tsunami={}",
                        i + 1,
                        fmt_value(row.magnitude),
                        fmt_value(row.depth),
                        fmt_value(row.latitude),
                        fmt_value(row.longitude),
                        row.tsunami_flag.map_or_else(|| "-".to_string(), |f| f.to_string())
                    );
                }
            }

            if no_charts {
                println!("Chart export skipped");
                return Ok(());
            }

            let charts = ChartBuilder::new().build(&cleaned);
            let output_file = charts_out.unwrap_or_else(generate_default_charts_filename);

            let writer = ChartWriter::new();
            writer.write_charts(&charts, &output_file)?;

            let file_info = writer.get_file_info(&output_file)?;
            println!("\n{}", file_info.summary());
            println!("Analysis complete!");
        }

        Commands::Inspect { input } => {
            println!("Inspecting columns of: {}", input.display());

            let reader = EventReader::with_delimiter(settings.reader.delimiter()?)?;
            let table = reader.read_table(&input)?;

            println!("\nColumns ({}):", table.columns().len());
            for (i, column) in table.columns().iter().enumerate() {
                println!("  {}. {:?} -> {}", i + 1, column, normalize_column_name(column));
            }

            let cleaned = CleaningPipeline::with_candidates(settings.roles.clone()).run(&table);
            println!("\nRole assignment:\n{}", cleaned.assignment.summary());
            println!(
                "\nRows: {} total, {} usable, {} dropped",
                cleaned.input_rows,
                cleaned.rows.len(),
                cleaned.dropped_rows()
            );

            let missing = cleaned.assignment.unassigned_required();
            if missing.is_empty() {
                println!("✅ All required roles resolved");
            } else {
                let names: Vec<&str> = missing.iter().map(|r| r.as_str()).collect();
                println!("⚠️  Unresolved required roles: {}", names.join(", "));
            }
        }

        Commands::LocateIp { endpoint } => {
            let mut lookup = settings.lookup.clone();
            if let Some(endpoint) = endpoint {
                lookup.endpoint = endpoint;
            }
            info!("Looking up public IP via {}", lookup.endpoint);

            let client = IpLookupClient::from_settings(&lookup)?;
            let progress = ProgressReporter::new_spinner("Querying geolocation service...", false);

            match client.lookup().await {
                Ok(location) => {
                    progress.finish_with_message("Lookup complete");
                    println!("{}", location.summary());
                }
                Err(e) => {
                    progress.abandon_with_message("Lookup failed");
                    error!("IP lookup against {} failed: {}", client.endpoint(), e);
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
