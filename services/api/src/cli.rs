use crate::report::{render_reference_summary, ScoreReport};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ecoscore::config::AppConfig;
use ecoscore::error::AppError;
use ecoscore::pricing::{load_predictor, PriceQuery};
use ecoscore::reference::ReferenceSource;
use ecoscore::scoring::{ProductInput, ScoringEngine};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "ecoscore",
    about = "Score the sustainability of fashion products from LCA reference data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a product described in a JSON file
    Score(ScoreArgs),
    /// Summarise the reference tables and their indicator bounds
    Reference(ReferenceArgs),
    /// Predict a retail price from a score and catalog attributes
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the product attributes
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReferenceArgs {
    /// Directory of reference CSV exports (overrides APP_REFERENCE_DIR)
    #[arg(long)]
    pub(crate) dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[arg(long)]
    pub(crate) score: f64,
    #[arg(long)]
    pub(crate) brand: String,
    #[arg(long)]
    pub(crate) category: String,
    #[arg(long)]
    pub(crate) subcategory: String,
    /// Exported price model (overrides APP_PRICE_MODEL)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Reference(args) => run_reference(args),
        Command::Predict(args) => run_predict(args),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let product: ProductInput = serde_json::from_str(&fs::read_to_string(&args.input)?)?;

    let snapshot = config.data.reference.load()?;
    let engine = ScoringEngine::new(Arc::new(snapshot), config.scoring);
    let result = engine.score(&product)?;
    let report = ScoreReport::new(&product, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}

pub(crate) fn run_reference(args: ReferenceArgs) -> Result<(), AppError> {
    let source = match args.dir {
        Some(dir) => ReferenceSource::Directory(dir),
        None => AppConfig::load()?.data.reference,
    };
    let snapshot = source.load()?;
    print!("{}", render_reference_summary(&snapshot.summary()));
    Ok(())
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let model = match args.model {
        Some(path) => Some(path),
        None => AppConfig::load()?.data.price_model,
    };
    let predictor = load_predictor(model.as_deref());
    let prediction = predictor.predict(&PriceQuery::new(
        args.score,
        args.brand,
        args.category,
        args.subcategory,
    ))?;

    println!(
        "Predicted price: EUR {:.2} (confidence {}, model {})",
        prediction.predicted_price, prediction.confidence, prediction.model_type
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["ecoscore"]).expect("parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["ecoscore", "serve", "--port", "8080"]).expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(8080)),
            other => panic!("expected serve, got {other:?}"),
        }
    }

    #[test]
    fn predict_requires_all_attributes() {
        assert!(Cli::try_parse_from(["ecoscore", "predict", "--score", "50"]).is_err());

        let cli = Cli::try_parse_from([
            "ecoscore",
            "predict",
            "--score",
            "72.5",
            "--brand",
            "Ridgeline",
            "--category",
            "Man",
            "--subcategory",
            "Sweater",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.score, 72.5);
                assert!(args.model.is_none());
            }
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn score_reads_product_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("product.json");
        fs::write(
            &input,
            r#"{"product_name": "Linen Overshirt", "materials": [{"name": "Linen", "percentage": 100}],
                "origin": "Portugal", "care_instruction": "Machine Wash 40C"}"#,
        )
        .expect("write input");

        run_score(ScoreArgs { input, json: true }).expect("scores");
    }
}
