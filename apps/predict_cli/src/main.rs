use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{ClientConfig, PredictionClient, PredictionService};
use shared::{
    domain::{display_number, FeatureKey, FeatureSet, DISCLAIMER},
    protocol::{FeatureCatalog, PredictionResult, ServiceHealth},
};

/// Queries the tumor prediction service. The service location comes from
/// `API_BASE_URL` (default `http://localhost:5000`).
#[derive(Parser, Debug)]
#[command(name = "predict_cli")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one feature set and print the classification.
    Predict(PredictArgs),
    /// Print the service health report.
    Health,
    /// Print the feature names the model was trained on.
    Features,
}

/// Omitted fields keep their reference defaults. Values are coerced the same
/// way the desktop form coerces typed input, so junk becomes 0.
#[derive(Args, Debug, Default)]
struct PredictArgs {
    #[arg(long, allow_hyphen_values = true)]
    mean_radius: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_texture: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_perimeter: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_area: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_smoothness: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_compactness: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_concavity: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_concave_points: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_symmetry: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    mean_fractal_dimension: Option<String>,
    /// Print the raw JSON response instead of a summary.
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn overrides(&self) -> [(FeatureKey, Option<&str>); 10] {
        [
            (FeatureKey::MeanRadius, self.mean_radius.as_deref()),
            (FeatureKey::MeanTexture, self.mean_texture.as_deref()),
            (FeatureKey::MeanPerimeter, self.mean_perimeter.as_deref()),
            (FeatureKey::MeanArea, self.mean_area.as_deref()),
            (FeatureKey::MeanSmoothness, self.mean_smoothness.as_deref()),
            (FeatureKey::MeanCompactness, self.mean_compactness.as_deref()),
            (FeatureKey::MeanConcavity, self.mean_concavity.as_deref()),
            (FeatureKey::MeanConcavePoints, self.mean_concave_points.as_deref()),
            (FeatureKey::MeanSymmetry, self.mean_symmetry.as_deref()),
            (
                FeatureKey::MeanFractalDimension,
                self.mean_fractal_dimension.as_deref(),
            ),
        ]
    }

    fn feature_set(&self) -> FeatureSet {
        let mut features = FeatureSet::default();
        for (key, raw) in self.overrides() {
            if let Some(raw) = raw {
                features.update_from_input(key, raw);
            }
        }
        features
    }
}

const BAR_WIDTH: usize = 20;

fn text_bar(percent: f64) -> String {
    let filled = ((percent / 100.0).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render_prediction(features: &FeatureSet, result: &PredictionResult) -> String {
    let mut out = String::new();
    out.push_str("Input features:\n");
    for (key, value) in features.iter() {
        out.push_str(&format!(
            "  {:<24} {}\n",
            key.descriptor().label,
            display_number(value)
        ));
    }
    out.push('\n');
    out.push_str(&format!("Diagnosis:  {}\n", result.prediction));
    out.push_str(&format!(
        "Confidence: {}%\n",
        display_number(result.confidence)
    ));
    for (name, percent) in [
        ("Malignant", result.probability.malignant),
        ("Benign", result.probability.benign),
    ] {
        out.push_str(&format!(
            "{:<11} {:>7} {}\n",
            format!("{name}:"),
            format!("{}%", display_number(percent)),
            text_bar(percent)
        ));
    }
    out.push('\n');
    out.push_str(DISCLAIMER);
    out
}

fn render_health(health: &ServiceHealth) -> String {
    format!(
        "status: {}\nmodel loaded: {}\nscaler loaded: {}\nready: {}",
        health.status,
        health.model_loaded,
        health.scaler_loaded,
        health.is_ready()
    )
}

fn render_catalog(catalog: &FeatureCatalog) -> String {
    let mut out = format!("{} features\n", catalog.count);
    for name in &catalog.features {
        out.push_str(&format!("  {name}\n"));
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("failed to resolve prediction service url")?;
    let client = PredictionClient::new(config);

    match cli.command {
        Command::Predict(args) => {
            let features = args.feature_set();
            let result = client.predict(&features).await.map_err(|err| {
                tracing::error!("prediction failed: {err}");
                anyhow!(err.user_message())
            })?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", render_prediction(&features, &result));
            }
        }
        Command::Health => {
            let health = client
                .health()
                .await
                .with_context(|| format!("health check against {} failed", client.config().api_base_url()))?;
            println!("{}", render_health(&health));
        }
        Command::Features => {
            let catalog = client
                .feature_catalog()
                .await
                .context("failed to fetch feature catalog")?;
            print!("{}", render_catalog(&catalog));
        }
    }

    Ok(())
}
