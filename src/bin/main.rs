//! Vigil CLI - Run AML warehouse analytics from the command line
//!
//! Usage:
//!   vigil kpi <report> [--db <path>] [--output <format>]
//!   vigil explore --dimensions <names> [--group <col> --metric <col> --agg <kind>]
//!   vigil sql (--report <name> | --dimensions <names>) [--dialect <dialect>]
//!
//! Examples:
//!   vigil kpi summary --db warehouse.db
//!   vigil explore --dimensions Date,Customer --group risk_level --metric amount --agg sum
//!   vigil sql --report monthly-trends --dialect mysql

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use vigil::config::{ConnectionConfig, Driver};
use vigil::explorer;
use vigil::export::{pivot_to_csv, table_to_csv};
use vigil::kpi::KpiReport;
use vigil::pivot::{pivot, Aggregation, PivotSpec};
use vigil::schema::AML_FRAUD;
use vigil::sql::Dialect;
use vigil::table::TableResult;
use vigil::warehouse::SqliteWarehouse;

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Vigil - AML warehouse analytics: KPI reports, dimensional exploration, pivots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fixed KPI report
    Kpi {
        /// Report name (summary, monthly-trends, risk-distribution,
        /// channel-distribution, top-customers, foreign-transactions)
        report: String,

        /// Path to the SQLite warehouse file (falls back to VIGIL_DB_* env)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Fetch fact rows joined to selected dimensions, optionally pivoted
    Explore {
        /// Dimension names, comma separated (Date, Customer, Account, Channel, Product)
        #[arg(short, long, value_delimiter = ',', required = true)]
        dimensions: Vec<String>,

        /// Column to group by (enables the pivot)
        #[arg(long)]
        group: Option<String>,

        /// Metric column to aggregate
        #[arg(long, default_value = "amount")]
        metric: String,

        /// Aggregation kind (sum, mean, count, min, max)
        #[arg(long, default_value = "sum")]
        agg: String,

        /// Path to the SQLite warehouse file (falls back to VIGIL_DB_* env)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the SQL a report or exploration would run, without executing it
    Sql {
        /// KPI report name
        #[arg(short, long, conflicts_with = "dimensions")]
        report: Option<String>,

        /// Dimension names, comma separated
        #[arg(short, long, value_delimiter = ',')]
        dimensions: Vec<String>,

        /// SQL dialect to render (defaults to the configured driver's dialect)
        #[arg(long)]
        dialect: Option<DialectArg>,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Mysql,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Table,
    /// RFC 4180 CSV with header row
    Csv,
    /// JSON with column metadata
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Kpi { report, db, output } => cmd_kpi(report, db, output),
        Commands::Explore {
            dimensions,
            group,
            metric,
            agg,
            db,
            output,
        } => cmd_explore(dimensions, group, metric, agg, db, output),
        Commands::Sql {
            report,
            dimensions,
            dialect,
        } => cmd_sql(report, dimensions, dialect),
    }
}

/// Open the warehouse from --db, or from VIGIL_DB_* environment variables.
fn open_warehouse(db: Option<PathBuf>) -> Result<SqliteWarehouse, String> {
    let path = match db {
        Some(path) => path.display().to_string(),
        None => {
            let config = ConnectionConfig::from_env().map_err(|e| e.to_string())?;
            if config.driver != Driver::Sqlite {
                return Err(format!(
                    "Driver '{}' is not executable from the CLI; use 'vigil sql' to render \
                     its queries",
                    config.driver_name()
                ));
            }
            config.to_connection_string()
        }
    };
    SqliteWarehouse::open(&path).map_err(|e| e.to_string())
}

fn cmd_kpi(report: String, db: Option<PathBuf>, output: OutputFormat) -> ExitCode {
    let report: KpiReport = match report.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let warehouse = match open_warehouse(db) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match report.fetch(&warehouse, &AML_FRAUD) {
        Ok(table) => {
            print_table(&table, output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error running report '{}': {}", report, e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_explore(
    dimensions: Vec<String>,
    group: Option<String>,
    metric: String,
    agg: String,
    db: Option<PathBuf>,
    output: OutputFormat,
) -> ExitCode {
    let warehouse = match open_warehouse(db) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let schema = &*AML_FRAUD;

    let table = match explorer::fetch(&warehouse, schema, &dimensions) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(group_column) = group else {
        print_table(&table, output);
        return ExitCode::SUCCESS;
    };

    let aggregation: Aggregation = match agg.parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let spec = PivotSpec {
        group_column,
        metric_column: metric,
        aggregation,
    };

    match pivot(&table, &spec) {
        Ok(result) => {
            match output {
                OutputFormat::Csv => print!("{}", pivot_to_csv(&result)),
                OutputFormat::Json => match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error serializing result: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
                OutputFormat::Table => print_text_table(&result.to_table()),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_sql(report: Option<String>, dimensions: Vec<String>, dialect: Option<DialectArg>) -> ExitCode {
    let schema = &*AML_FRAUD;
    // Explicit flag wins; otherwise render for the configured driver
    let dialect: Dialect = match dialect {
        Some(arg) => arg.into(),
        None => ConnectionConfig::from_env()
            .map(|config| config.dialect())
            .unwrap_or_default(),
    };

    let query = match (report, dimensions.is_empty()) {
        (Some(name), _) => match name.parse::<KpiReport>() {
            Ok(report) => report.query(schema),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, false) => match explorer::compose(schema, &dimensions) {
            Ok(query) => query,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        (None, true) => {
            eprintln!("Error: pass --report <name> or --dimensions <names>");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", query.to_sql(dialect));
    ExitCode::SUCCESS
}

fn print_table(table: &TableResult, output: OutputFormat) {
    match output {
        OutputFormat::Table => print_text_table(table),
        OutputFormat::Csv => print!("{}", table_to_csv(table)),
        OutputFormat::Json => match serde_json::to_string_pretty(table) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing result: {}", e),
        },
    }
}

/// Render an aligned text table with a header rule.
fn print_text_table(table: &TableResult) {
    let names = table.column_names();
    let mut widths: Vec<usize> = names.iter().map(|n| n.len()).collect();
    let rendered: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.render()).collect())
        .collect();
    for row in &rendered {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.len());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    println!("{}", line(&header));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len().saturating_sub(1))));
    for row in &rendered {
        println!("{}", line(row));
    }
    println!("({} rows)", table.row_count());
}
