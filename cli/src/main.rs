//! CLI entrypoint for action-authz
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use authz_application::{
    BehaviorConfig, DispatchProgress, Dispatcher, NoProgress, RunSessionInput, RunSessionUseCase,
    SecretString, SessionContext,
};
use authz_domain::{OutputFormat, Subject};
use authz_infrastructure::{
    ConfigLoader, FileConfig, JsonSchemaToolConverter, JsonlAuditLogger, LocalToolExecutor,
    OpenAiCompletionRequester, PangeaPolicyClient, builtin_catalog,
};
use authz_presentation::{Cli, ProgressReporter, SimpleProgress, formatter_for};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Session ran but nothing executed, and `--strict` was given
const EXIT_NOTHING_EXECUTED: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration (defaults only with --no-config)
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    apply_overrides(&mut config, &cli);

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(Into::into));
    let _log_guard = init_logging(cli.verbose, log_file.as_deref())?;

    info!("Starting action-authz");

    for issue in config.check()? {
        warn!("Config: {}", issue);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let prompt = match cli.prompt.as_deref() {
        Some(p) if !p.trim().is_empty() => p.to_string(),
        _ => bail!("A prompt is required."),
    };
    let user = match cli.user.as_deref() {
        Some(u) => u,
        None => bail!("--user is required."),
    };

    let authz_token = resolve_secret(
        cli.authz_token.as_deref(),
        &config.policy.token_env,
        "policy service token (--authz-token)",
    )?;
    let api_key = resolve_secret(
        cli.openai_api_key.as_deref(),
        &config.completion.api_key_env,
        "completion API key (--openai-api-key)",
    )?;

    // === Session context ===
    let subject = Subject::new(cli.subject_type.into(), user)?;
    let catalog = Arc::new(builtin_catalog()?);
    let ctx = SessionContext::new(subject, catalog)?;

    // === Dependency Injection ===
    let policy = PangeaPolicyClient::new(config.policy.service_url(), authz_token, None)?;
    let completion = OpenAiCompletionRequester::new(
        &config.completion.base_url,
        api_key,
        &config.completion.model,
        Duration::from_secs(config.completion.timeout_seconds),
    )?
    .with_max_tokens(config.completion.max_tokens);
    let executor = LocalToolExecutor::with_settings(
        &config.search.base_url,
        Duration::from_secs(config.search.timeout_seconds),
    )?;

    let behavior = behavior_config(&config);
    info!(
        "Policy service {} (timeout {:?}), model {}",
        policy.base_url(),
        behavior.policy_timeout,
        completion.model()
    );

    let mut dispatcher = Dispatcher::from_config(Arc::new(policy), Arc::new(executor), &behavior);
    let audit_path = cli
        .audit_log
        .clone()
        .or_else(|| config.audit.file.as_ref().map(Into::into));
    if let Some(path) = audit_path {
        let audit = JsonlAuditLogger::new(&path)
            .with_context(|| format!("Could not open audit log {}", path.display()))?;
        dispatcher = dispatcher.with_audit_logger(Arc::new(audit));
    }

    let use_case = RunSessionUseCase::new(
        Arc::new(completion),
        Arc::new(JsonSchemaToolConverter),
        dispatcher,
    );
    let input = RunSessionInput::new(prompt).with_system_prompt(&config.completion.system_prompt);

    // Execute with or without progress reporting
    let progress: Box<dyn DispatchProgress> = if cli.quiet || !config.output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };
    let output = use_case
        .execute_with_progress(input, &ctx, progress.as_ref())
        .await?;

    // Output results
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let rendered = formatter_for(format).format(&output);
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }

    if cli.strict && output.nothing_executed() {
        return Ok(ExitCode::from(EXIT_NOTHING_EXECUTED));
    }
    Ok(ExitCode::SUCCESS)
}

/// Initialize tracing; the returned guard must live until exit when logging to a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid log file path: {}", path.display()))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// CLI flags take precedence over file and environment configuration
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(domain) = &cli.pangea_domain {
        // An explicit domain replaces any configured base_url
        config.policy.domain = domain.clone();
        config.policy.base_url = None;
    }
    if let Some(model) = &cli.model {
        config.completion.model = model.clone();
    }
    if let Some(seconds) = cli.policy_timeout {
        config.policy.timeout_seconds = seconds;
    }
    if cli.concurrent {
        config.dispatch.concurrent = true;
    }
    if let Some(limit) = cli.max_concurrency {
        config.dispatch.max_concurrency = limit;
    }
}

fn behavior_config(config: &FileConfig) -> BehaviorConfig {
    let behavior =
        BehaviorConfig::default().with_policy_timeout_seconds(config.policy.timeout_seconds);
    if config.dispatch.concurrent {
        behavior.with_concurrency(config.dispatch.max_concurrency)
    } else {
        behavior
    }
}

/// Flag value first, then the environment variable named in the config
fn resolve_secret(flag: Option<&str>, env_name: &str, what: &str) -> Result<SecretString> {
    let value = match flag {
        Some(v) => v.to_string(),
        None => std::env::var(env_name).unwrap_or_default(),
    };
    let secret = SecretString::new(value);
    if secret.is_blank() {
        bail!("Missing {}; set {} or pass the flag", what, env_name);
    }
    Ok(secret)
}
