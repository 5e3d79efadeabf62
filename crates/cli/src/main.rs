use anyhow::Context;
use clap::Parser;
use data_loader::DataIndex;
use model::ModelManager;
use pipeline::{EngineConfig, Language, SimilarityStrategy};
use serde::Serialize;
use server::{RecommendationOrchestrator, RetrainOutcome};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Event recommendations for one user, or a model retrain
///
/// Results are written to stdout as JSON; logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "invoke")]
#[command(about = "Hybrid event recommendation engine", long_about = None)]
struct Cli {
    /// User to recommend events for
    #[arg(required_unless_present = "retrain", conflicts_with = "retrain")]
    user_id: Option<String>,

    /// Rebuild the model instead of recommending
    #[arg(long)]
    retrain: bool,

    /// Directory holding users.json and events.json
    #[arg(long, env = "RECS_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Model artifact file
    #[arg(long, env = "RECS_MODEL_PATH", default_value = "recommendation_model.json")]
    model_path: PathBuf,

    /// Number of recommendations to return
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Content similarity strategy (tfidf or overlap)
    #[arg(long, env = "RECS_STRATEGY", default_value_t = SimilarityStrategy::TfIdf)]
    strategy: SimilarityStrategy,

    /// Stop-word languages for TF-IDF, comma-separated (english, russian)
    #[arg(
        long = "language",
        env = "RECS_LANGUAGES",
        value_delimiter = ',',
        default_value = "english"
    )]
    languages: Vec<Language>,
}

/// Error categories reported on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum FailureType {
    UserError,
    RecommendationError,
    SystemError,
    RetrainError,
}

/// Structured failure printed to stderr before a non-zero exit
#[derive(Debug, Serialize)]
struct Failure {
    error: String,
    #[serde(rename = "type")]
    kind: FailureType,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'static str>,
    /// Document still owed to stdout
    #[serde(skip)]
    output: Option<String>,
}

impl Failure {
    fn new(kind: FailureType, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind,
            user_id: None,
            suggestion: None,
            output: None,
        }
    }

    fn system(err: anyhow::Error) -> Self {
        Self::new(FailureType::SystemError, format!("System error: {err:#}"))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            if let Some(output) = &failure.output {
                println!("{output}");
            }
            eprintln!("{}", to_json(&failure));
            ExitCode::FAILURE
        }
    }
}

/// Execute the command and return the JSON document for stdout
fn run(cli: &Cli) -> Result<String, Failure> {
    let start = Instant::now();
    let orchestrator = build_orchestrator(cli).map_err(Failure::system)?;
    info!("Engine ready in {:.2?}", start.elapsed());

    match &cli.user_id {
        Some(user_id) if !cli.retrain => handle_recommend(&orchestrator, user_id, cli.limit),
        _ => handle_retrain(&orchestrator),
    }
}

fn build_orchestrator(cli: &Cli) -> anyhow::Result<RecommendationOrchestrator> {
    let data_index = DataIndex::load_from_files(&cli.data_dir)
        .with_context(|| format!("Failed to load records from {}", cli.data_dir.display()))?;

    let config = EngineConfig::default()
        .with_strategy(cli.strategy)
        .with_languages(cli.languages.clone());
    let manager = ModelManager::load(Arc::new(data_index), config, cli.model_path.clone());
    Ok(RecommendationOrchestrator::new(Arc::new(manager)))
}

/// Handle a recommendation request
fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    user_id: &str,
    limit: usize,
) -> Result<String, Failure> {
    info!("Processing user: {}", user_id);

    match orchestrator.recommend_user(user_id, limit) {
        Ok(response) => Ok(to_json(&response)),
        Err(err) if err.is_not_found() => Err(Failure {
            suggestion: Some("Check if user exists in database"),
            ..Failure::new(FailureType::UserError, err.to_string())
        }),
        Err(err) => Err(Failure {
            user_id: Some(user_id.to_string()),
            ..Failure::new(
                FailureType::RecommendationError,
                format!("Recommendation generation failed: {err}"),
            )
        }),
    }
}

/// Handle a retrain request; a failed pass still prints its outcome
fn handle_retrain(orchestrator: &RecommendationOrchestrator) -> Result<String, Failure> {
    info!("Retraining model");

    let result = orchestrator.retrain();
    let output = to_json(&RetrainOutcome::from_result(&result));

    match result {
        Ok(status) => {
            info!("Model retrained with {} events", status.event_rows);
            Ok(output)
        }
        Err(err) => Err(Failure {
            output: Some(output),
            ..Failure::new(FailureType::RetrainError, err.to_string())
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        format!(r#"{{"error":"Failed to encode output: {err}","type":"system_error"}}"#)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{EventRecord, UserRecord};
    use tempfile::tempdir;

    fn write_dump(dir: &std::path::Path, users: &[UserRecord], events: &[EventRecord]) {
        std::fs::write(
            dir.join("users.json"),
            serde_json::to_string(users).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join("events.json"),
            serde_json::to_string(events).unwrap(),
        )
        .unwrap();
    }

    fn cli_for(dir: &std::path::Path, args: &[&str]) -> Cli {
        let data_dir = dir.to_string_lossy().to_string();
        let model_path = dir.join("model.json").to_string_lossy().to_string();
        let mut argv = vec![
            "invoke",
            "--data-dir",
            data_dir.as_str(),
            "--model-path",
            model_path.as_str(),
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_requires_user_or_retrain() {
        assert!(Cli::try_parse_from(["invoke"]).is_err());
        assert!(Cli::try_parse_from(["invoke", "u1", "--retrain"]).is_err());

        let cli = Cli::try_parse_from(["invoke", "u1", "--strategy", "overlap"]).unwrap();
        assert_eq!(cli.user_id.as_deref(), Some("u1"));
        assert_eq!(cli.strategy, SimilarityStrategy::Overlap);
        assert_eq!(cli.limit, 10);
        assert_eq!(cli.languages, vec![Language::English]);

        let cli = Cli::try_parse_from(["invoke", "u1", "--language", "english,russian"]).unwrap();
        assert_eq!(cli.languages, vec![Language::English, Language::Russian]);
        assert!(Cli::try_parse_from(["invoke", "u1", "--language", "klingon"]).is_err());

        assert!(Cli::try_parse_from(["invoke", "--retrain"]).unwrap().retrain);
    }

    #[test]
    fn test_failure_json_shape() {
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&Failure::new(FailureType::UserError, "nope"))).unwrap();
        assert_eq!(json["type"], "user_error");
        assert_eq!(json["error"], "nope");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_recommend_output() {
        let dir = tempdir().unwrap();
        let mut user = UserRecord::new("u1");
        user.username = Some("alice".to_string());
        write_dump(
            dir.path(),
            &[user],
            &[EventRecord::new("e1").with_creator("c1").with_tags(["music"])],
        );

        let output = run(&cli_for(dir.path(), &["u1"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["username"], "alice");
        assert_eq!(json["recommendations"][0]["event_id"], "e1");
    }

    #[test]
    fn test_unknown_user_is_user_error() {
        let dir = tempdir().unwrap();
        write_dump(dir.path(), &[], &[]);

        let failure = run(&cli_for(dir.path(), &["ghost"])).unwrap_err();
        assert_eq!(failure.kind, FailureType::UserError);
    }

    #[test]
    fn test_missing_dump_is_system_error() {
        let dir = tempdir().unwrap();

        let failure = run(&cli_for(dir.path(), &["u1"])).unwrap_err();
        assert_eq!(failure.kind, FailureType::SystemError);
    }

    #[test]
    fn test_retrain_on_empty_corpus_fails() {
        let dir = tempdir().unwrap();
        write_dump(dir.path(), &[], &[]);

        let failure = run(&cli_for(dir.path(), &["--retrain"])).unwrap_err();
        assert_eq!(failure.kind, FailureType::RetrainError);

        let outcome: serde_json::Value = serde_json::from_str(failure.output.as_deref().unwrap()).unwrap();
        assert_eq!(outcome["status"], "error");
    }

    #[test]
    fn test_retrain_output() {
        let dir = tempdir().unwrap();
        write_dump(dir.path(), &[], &[EventRecord::new("e1").with_creator("c1")]);

        let output = run(&cli_for(dir.path(), &["--retrain"])).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["status"], "success");
        assert!(dir.path().join("model.json").exists());
    }

    #[test]
    fn test_retrain_uses_configured_languages() {
        let dir = tempdir().unwrap();
        write_dump(
            dir.path(),
            &[],
            &[EventRecord::new("e1").with_creator("c1").with_tags(["концерт"])],
        );

        run(&cli_for(dir.path(), &["--retrain", "--language", "russian"])).unwrap();

        let artifact: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("model.json")).unwrap())
                .unwrap();
        assert_eq!(artifact["content_index"]["strategy"], "tfidf");
        assert_eq!(artifact["content_index"]["languages"], serde_json::json!(["russian"]));
    }
}
