//! `lotto`: terminal front-end for the prediction API.

mod args;
mod config;
mod error;
mod http;
mod paths;
mod watch;

use std::process::ExitCode;
use std::sync::Arc;

use lotto_gate::client::PredictionClient;
use lotto_gate::error::NoticeLevel;
use lotto_gate::flow::{FeedbackForm, FlowAction, FlowOutcome, PredictFlow};
use lotto_gate::render::{render_analysis, render_prediction, RenderOptions};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, Command, PredictArgs, USAGE};
use crate::config::{FileConfig, Settings};
use crate::error::CliError;
use crate::http::ReqwestTransport;
use crate::paths::AppPaths;

type Client = PredictionClient<ReqwestTransport>;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}\n\n{USAGE}");
            ExitCode::from(2)
        }
        Err(CliError::Interrupted) => {
            eprintln!("Cancelled.");
            ExitCode::from(130)
        }
        Err(CliError::Failed(text)) => {
            eprintln!("{text}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = parse_args(std::env::args().skip(1))?;

    let paths = AppPaths::new()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());

    if cli.command == Command::Paths {
        println!("config dir:  {}", paths.config_dir().display());
        println!("config file: {}", config_path.display());
        return Ok(());
    }

    let mut file = FileConfig::load(&config_path)?;
    file.apply_env(|k| std::env::var(k).ok());

    let predict_args = match &cli.command {
        Command::Predict(p) => Some(p),
        _ => None,
    };
    let settings = Settings::resolve(file, cli.api.as_deref(), predict_args)?;
    debug!("API base: {}", settings.client.base.as_str());

    let client = Arc::new(PredictionClient::new(
        settings.client.clone(),
        ReqwestTransport::new()?,
    ));

    match cli.command {
        Command::Health => {
            if client.check_health().await {
                println!("API is up ({})", settings.client.base.as_str());
                Ok(())
            } else {
                Err(CliError::Failed(format!(
                    "API did not answer at {}",
                    settings.client.base.as_str()
                )))
            }
        }
        Command::Analysis => {
            let analysis = client.comprehensive_analysis().await?;
            print!("{}", render_analysis(&analysis));
            Ok(())
        }
        Command::Disclaimer => {
            let d = client.disclaimer().await?;
            println!("{}\n", d.title);
            for line in &d.content {
                println!("{line}");
            }
            if let Some(contact) = &d.contact {
                println!("\nContact: {contact}");
            }
            Ok(())
        }
        Command::Feedback(message) => send_feedback(&client, message).await,
        Command::Predict(ref p) => predict(client, settings, p).await,
        Command::Paths => Ok(()),
    }
}

async fn send_feedback(client: &Client, message: String) -> Result<(), CliError> {
    let mut form = FeedbackForm::new();
    form.set_draft(message);
    let Some(draft) = form.begin_send() else {
        return Ok(());
    };
    let result = form.finish(client.send_feedback(&draft).await);
    match result.notice.level {
        NoticeLevel::Info => {
            println!("{}", result.notice.text);
            Ok(())
        }
        NoticeLevel::Warning | NoticeLevel::Error => Err(CliError::Failed(result.notice.text)),
    }
}

async fn predict(client: Arc<Client>, settings: Settings, args: &PredictArgs) -> Result<(), CliError> {
    let opts = RenderOptions {
        show_details: settings.flow.show_details,
    };
    let mut flow = PredictFlow::new(settings.flow);

    let action = match flow.on_trigger() {
        FlowAction::OpenGate => {
            let warm = Arc::clone(&client);
            let prewarm = Box::new(move || {
                let client = Arc::clone(&warm);
                tokio::spawn(async move {
                    if client.check_health().await {
                        debug!("Prewarm: API answered");
                    } else {
                        debug!("Prewarm: API did not answer");
                    }
                });
            });
            let unlocked = watch::run_gate(prewarm).await?;
            if !args.yes {
                watch::wait_for_enter().await?;
            }
            flow.on_done(unlocked)
        }
        other => other,
    };

    let FlowAction::Predict(request) = action else {
        warn!("Prediction was not available");
        return Ok(());
    };

    info!(
        "Requesting {} set(s) via {}",
        request.num_sets,
        request.method.label()
    );
    println!("Calculating...");
    let result = watch::interruptible(client.predict(&request)).await?;
    match flow.finish(result) {
        FlowOutcome::Rendered(resp) => {
            print!("{}", render_prediction(&resp, opts));
            Ok(())
        }
        FlowOutcome::Failed(notice) => Err(CliError::Failed(notice.text)),
    }
}
