use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use querykit::config::DialectConfig;
use querykit::query_spec::QuerySpec;
use querykit::sql_generator::preset_names;
use querykit::DialectContext;
use std::path::PathBuf;

/// QueryKit - render a query description to SQL
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query description (YAML, or JSON with a .json extension)
    #[arg(long)]
    query: PathBuf,

    /// Dialect configuration file (YAML)
    #[arg(long, conflicts_with = "dialect")]
    dialect_config: Option<PathBuf>,

    /// Built-in dialect preset
    #[arg(long, ignore_case = true, value_parser = PossibleValuesParser::new(preset_names()))]
    dialect: Option<String>,

    /// Build a dynamic FROM clause even if the query description does not ask for one
    #[arg(long)]
    dynamic: bool,
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let mut spec = QuerySpec::from_file(&cli.query)
        .with_context(|| format!("loading query {}", cli.query.display()))?;
    spec.dynamic |= cli.dynamic;

    let dialect_config = match (&cli.dialect_config, cli.dialect.as_deref().or(spec.dialect.as_deref())) {
        (Some(path), _) => DialectConfig::from_yaml_file(path)
            .with_context(|| format!("loading dialect config {}", path.display()))?,
        (None, Some(preset)) => DialectConfig::for_preset(preset)?,
        (None, None) => DialectConfig::from_env()?,
    };
    log::info!("rendering for dialect '{}'", dialect_config.name);

    let context = DialectContext::bound(dialect_config.into_dialect()?);
    let statement = spec.build(context).context("building statement")?;
    Ok(statement.to_sql_string()?)
}

fn main() {
    dotenvy::dotenv().ok();
    // Initialize logger - defaults to INFO level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(sql) => println!("{}", sql),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
