use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use coalprint::analysis::batch::run_batch;
use coalprint::analysis::reporting;
use coalprint::cli::cli::Args;
use coalprint::config::calculator_config::CalculatorConfig;
use coalprint::data::factors_loader::load_factor_table;
use coalprint::data::scenarios_loader::{load_scenarios, Scenario};
use coalprint::models::emission_factors::BUILTIN_FACTOR_TABLE;
use coalprint::utils::csv_export::CsvExporter;
use coalprint::utils::logging::{self, FileIOType, OperationCategory};
use coalprint::EmissionCalculator;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .context("failed to set up logging")?;

    let calculator = build_calculator(&args)?;

    if args.list_regions() {
        if args.json() {
            println!("{}", serde_json::to_string_pretty(&calculator.supported_regions())?);
        } else {
            print!("{}", reporting::format_factor_table(calculator.factors()));
        }
        return Ok(());
    }

    match args.scenarios() {
        Some(path) => run_scenarios(&args, &calculator, path)?,
        None => run_single(&args, &calculator)?,
    }

    logging::print_timing_report();
    Ok(())
}

fn build_calculator(args: &Args) -> Result<EmissionCalculator> {
    let mut config = match args.config() {
        Some(path) => {
            let _timing = logging::start_timing("load_config",
                OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });
            CalculatorConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path))?
        }
        None => CalculatorConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("invalid calculator config")?;

    let mut factors = BUILTIN_FACTOR_TABLE.clone();
    if let Some(path) = args.factors() {
        let extra = load_factor_table(path)
            .with_context(|| format!("failed to load emission factors from {}", path))?;
        factors.merge(extra);
    }

    let calculator = EmissionCalculator::with_config(factors, config);
    let config = calculator.config();
    debug!(
        distance_basis = %config.distance_basis,
        rounding = %config.rounding,
        decimal_places = config.decimal_places,
        "calculator config"
    );
    Ok(calculator)
}

fn run_single(args: &Args, calculator: &EmissionCalculator) -> Result<()> {
    let inputs = args.inputs();

    if args.strict_ranges() {
        let out_of_range = inputs.out_of_range_fields();
        if !out_of_range.is_empty() {
            let fields: Vec<String> = out_of_range
                .iter()
                .map(|field| {
                    let range = field.input_range();
                    format!("{} (allowed {}-{} {})", field, range.min, range.max, field.unit())
                })
                .collect();
            bail!("inputs outside the allowed ranges: {}", fields.join(", "));
        }
    }

    let result = calculator
        .compute_annual_emissions(args.region(), &inputs)
        .context("emission calculation failed")?;
    info!(region = args.region(), total = result.total, "calculation complete");

    if args.json() {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        reporting::print_result_report(args.region(), &result);
    }

    if let Some(dir) = args.csv_export() {
        let exporter = CsvExporter::new(dir)
            .with_context(|| format!("failed to create export directory under {}", dir))?;
        let scenario = Scenario {
            name: "cli".to_string(),
            region: args.region().to_string(),
            inputs,
        };
        let path = exporter
            .export_result(&scenario, &result)
            .context("failed to export results")?;
        println!("CSV export written to: {}", path.display());
    }

    Ok(())
}

fn run_scenarios(args: &Args, calculator: &EmissionCalculator, path: &str) -> Result<()> {
    let scenarios = load_scenarios(path)
        .with_context(|| format!("failed to load scenarios from {}", path))?;
    let outcomes = run_batch(calculator, &scenarios, args.parallel());

    if args.json() {
        let rows: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(result) => serde_json::json!({
                    "name": outcome.scenario.name,
                    "region": outcome.scenario.region,
                    "result": result,
                }),
                Err(e) => serde_json::json!({
                    "name": outcome.scenario.name,
                    "region": outcome.scenario.region,
                    "error": e.to_string(),
                }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        reporting::print_batch_report(&outcomes);
    }

    if let Some(dir) = args.csv_export() {
        let exporter = CsvExporter::new(dir)
            .with_context(|| format!("failed to create export directory under {}", dir))?;
        let path = exporter
            .export_batch(&outcomes)
            .context("failed to export batch results")?;
        println!("CSV export written to: {}", path.display());
    }

    Ok(())
}
