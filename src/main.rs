//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Command-line entry point: runs one face engine operation and prints the handler's JSON body.
//--------------------------------------------------------------------------------------------------
// face-service represent --img-path img.jpg
// face-service verify --img1-path a.jpg --img2-path b.jpg --distance-metric euclidean_l2
// face-service find --img-path q.jpg --db-path ./faces
// face-service analyze --img-path img.jpg --actions age,emotion
// face-service request --file payload.json   (or the payload on stdin)
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use face_service::{
    Action, AnalyzeParams, Config, FaceEngine, FindParams, HandlerResponse, HttpFaceEngine,
    RepresentParams, VerifyParams, handle_analyze, handle_find, handle_represent, handle_request,
    handle_verify,
};
use face_service::domain::models::types::{
    DEFAULT_DETECTOR_BACKEND, DEFAULT_DISTANCE_METRIC, DEFAULT_MODEL_NAME, DEFAULT_NORMALIZATION,
};

/// CLI options for the application
#[derive(Parser, Debug)]
#[command(name = "face-service", about = "Face recognition request façade")]
struct Cli {
    /// Engine base URL (overrides FACE_ENGINE_URL)
    #[arg(long, global = true)]
    engine_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract face embeddings from an image
    Represent {
        #[arg(long)]
        img_path: String,
        #[arg(long, default_value = DEFAULT_MODEL_NAME)]
        model_name: String,
        #[command(flatten)]
        detection: DetectionOpts,
        #[arg(long)]
        max_faces: Option<usize>,
    },
    /// Decide whether two images show the same person
    Verify {
        #[arg(long)]
        img1_path: String,
        #[arg(long)]
        img2_path: String,
        #[arg(long, default_value = DEFAULT_MODEL_NAME)]
        model_name: String,
        #[arg(long, default_value = DEFAULT_DISTANCE_METRIC)]
        distance_metric: String,
        #[command(flatten)]
        detection: DetectionOpts,
    },
    /// Search a reference database for the query face
    Find {
        #[arg(long)]
        img_path: String,
        #[arg(long)]
        db_path: String,
        #[arg(long, default_value = DEFAULT_MODEL_NAME)]
        model_name: String,
        #[arg(long, default_value = DEFAULT_DISTANCE_METRIC)]
        distance_metric: String,
        #[arg(long, default_value = DEFAULT_NORMALIZATION)]
        normalization: String,
        /// Reuse the engine's cached embeddings without re-syncing the database
        #[arg(long)]
        no_refresh_database: bool,
        #[command(flatten)]
        detection: DetectionOpts,
    },
    /// Run demographic analyses on an image
    Analyze {
        #[arg(long)]
        img_path: String,
        /// Comma-separated list of age, gender, emotion, race
        #[arg(long, value_delimiter = ',', value_parser = parse_action)]
        actions: Vec<Action>,
        #[command(flatten)]
        detection: DetectionOpts,
    },
    /// Run a raw JSON request tagged by request_type
    Request {
        /// Payload file; stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Detector options shared by every operation
#[derive(Args, Debug)]
struct DetectionOpts {
    #[arg(long, default_value = DEFAULT_DETECTOR_BACKEND)]
    detector_backend: String,
    /// Continue when no face is detected
    #[arg(long)]
    skip_enforce_detection: bool,
    /// Skip face alignment
    #[arg(long)]
    no_align: bool,
    #[arg(long)]
    anti_spoofing: bool,
}

fn parse_action(value: &str) -> Result<Action, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| format!("unknown action '{}'", value))
}

async fn run(command: Command, engine: Arc<dyn FaceEngine>) -> Result<HandlerResponse, std::io::Error> {
    let response = match command {
        Command::Represent { img_path, model_name, detection, max_faces } => {
            let params = RepresentParams {
                model_name,
                detector_backend: detection.detector_backend,
                enforce_detection: !detection.skip_enforce_detection,
                align: !detection.no_align,
                anti_spoofing: detection.anti_spoofing,
                max_faces,
                ..RepresentParams::new(img_path)
            };
            handle_represent(params, engine).await
        }
        Command::Verify { img1_path, img2_path, model_name, distance_metric, detection } => {
            let params = VerifyParams {
                model_name,
                distance_metric,
                detector_backend: detection.detector_backend,
                enforce_detection: !detection.skip_enforce_detection,
                align: !detection.no_align,
                anti_spoofing: detection.anti_spoofing,
                ..VerifyParams::new(img1_path, img2_path)
            };
            handle_verify(params, engine).await
        }
        Command::Find {
            img_path,
            db_path,
            model_name,
            distance_metric,
            normalization,
            no_refresh_database,
            detection,
        } => {
            let params = FindParams {
                model_name,
                distance_metric,
                normalization,
                refresh_database: !no_refresh_database,
                detector_backend: detection.detector_backend,
                enforce_detection: !detection.skip_enforce_detection,
                align: !detection.no_align,
                anti_spoofing: detection.anti_spoofing,
                ..FindParams::new(img_path, db_path)
            };
            handle_find(params, engine).await
        }
        Command::Analyze { img_path, actions, detection } => {
            let mut params = AnalyzeParams {
                detector_backend: detection.detector_backend,
                enforce_detection: !detection.skip_enforce_detection,
                align: !detection.no_align,
                anti_spoofing: detection.anti_spoofing,
                ..AnalyzeParams::new(img_path)
            };
            if !actions.is_empty() {
                params.actions = actions;
            }
            handle_analyze(params, engine).await
        }
        Command::Request { file } => {
            let payload = match file {
                Some(path) => std::fs::read(path)?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            handle_request(&payload, engine).await
        }
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::try_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(url) = cli.engine_url {
        config.engine_url = url;
    }

    // Initialize logging on stderr so stdout carries only the response body
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Using face engine at {}", config.engine_url);

    let engine = match HttpFaceEngine::from_config(&config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            error!("Failed to create engine client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let response = match run(cli.command, engine).await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to read request payload: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&response.body) {
        Ok(body) => println!("{}", body),
        Err(e) => {
            error!("Failed to encode response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
