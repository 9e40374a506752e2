use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::client::HttpClient;
use crate::api::powerbi::{fetch_config_status, fetch_local_schema, PowerBiBackend};
use crate::chat::dispatcher::{DispatchOutcome, Dispatcher, QueryBackend};
use crate::cli::args::{IoArgs, RuntimeArgs};
use crate::config::settings::Settings;
use crate::render::transcript;
use crate::utils::format;

fn resolve_base_url(settings: &Settings, runtime: &RuntimeArgs) -> String {
    runtime
        .base_url
        .clone()
        .unwrap_or_else(|| settings.base_url.clone())
}

fn backend_session(settings: &Settings, runtime: &RuntimeArgs) -> Result<Dispatcher<PowerBiBackend>> {
    let http = HttpClient::new()?;
    let backend = PowerBiBackend::new(http.client, resolve_base_url(settings, runtime));
    Ok(Dispatcher::new(backend))
}

/// One dispatch cycle: spinner while the request is in flight, then print
/// the messages this cycle appended. Returns the assistant's answer text.
async fn run_turn<B: QueryBackend>(
    session: &mut Dispatcher<B>,
    question: &str,
) -> Result<Option<String>> {
    if session.is_busy() {
        println!("{}", format::warn("A request is already in flight."));
        return Ok(None);
    }

    let before = session.store().len();
    let pb = ProgressBar::new_spinner().with_message("Asking backend...");
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(100));
    let outcome = session.dispatch(question).await;
    pb.finish_and_clear();

    if outcome == DispatchOutcome::Ignored {
        return Ok(None);
    }

    let snapshot = session.store().snapshot();
    println!("{}", transcript::render(&snapshot[before..]));
    Ok(snapshot.last().map(|m| m.text.clone()))
}

pub async fn handle_interactive(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    use dialoguer::Input;
    println!("{}", style("Interactive mode. Ctrl+C to exit.").cyan());
    let mut session = backend_session(settings, runtime)?;
    loop {
        let line: String = Input::new().with_prompt("You").interact_text()?;
        if line.trim().is_empty() {
            continue;
        }
        run_turn(&mut session, &line).await?;
    }
}

pub async fn handle_ask(
    settings: &Settings,
    prompt: Option<String>,
    runtime: &RuntimeArgs,
    io: &IoArgs,
) -> Result<()> {
    // Prefer file input if provided
    let question = match (&io.input_file, &prompt) {
        (Some(path), _) => crate::utils::io::read_to_string(path)?.trim().to_string(),
        (None, Some(p)) if !p.trim().is_empty() => p.to_string(),
        _ => return Err(anyhow!("Question is empty. Provide text or use interactive mode.")),
    };

    let mut session = backend_session(settings, runtime)?;
    let answer = run_turn(&mut session, &question).await?;

    if let (Some(out), Some(text)) = (&io.output_file, &answer) {
        crate::utils::io::write_string(out, text)?;
    }
    Ok(())
}

pub async fn handle_config_status(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    let http = HttpClient::new()?;
    let base_url = resolve_base_url(settings, runtime);
    let status = fetch_config_status(&http.client, &base_url).await?;

    let headline = if status.groq_configured {
        format::success("Backend LLM service is ready")
    } else {
        format::warn("Backend LLM service is not configured")
    };
    println!("{} ({})", headline, status.app_name);
    println!("API key present: {}", status.api_key_exists);
    println!("Service loaded:  {}", status.groq_service_loaded);
    Ok(())
}

pub async fn handle_schema(settings: &Settings, runtime: &RuntimeArgs) -> Result<()> {
    let http = HttpClient::new()?;
    let base_url = resolve_base_url(settings, runtime);
    let envelope = fetch_local_schema(&http.client, &base_url).await?;
    if !envelope.success {
        return Err(anyhow!("Backend reported schema as unavailable"));
    }

    for table in &envelope.schema.tables {
        println!("{}", style(&table.name).bold());
        for column in &table.columns {
            match &column.data_type {
                Some(ty) => println!("  {} ({})", column.name, ty),
                None => println!("  {}", column.name),
            }
        }
        for measure in &table.measures {
            println!("  {} {}", style("m").dim(), measure.name);
        }
    }
    if !envelope.schema.relationships.is_empty() {
        println!("{} relationships", envelope.schema.relationships.len());
    }
    Ok(())
}

pub async fn handle_config_list(settings: &Settings) -> Result<()> {
    println!("Base URL: {}", settings.base_url);
    Ok(())
}

pub async fn handle_config_set(
    settings: &mut Settings,
    key: &str,
    value: &str,
    explicit: Option<&Path>,
) -> Result<()> {
    match key {
        "base-url" | "base_url" => settings.base_url = value.to_owned(),
        _ => println!("Unknown config key: {}", key),
    }
    settings.save_with(explicit)?;
    Ok(())
}

pub async fn handle_config_init(force: bool) -> Result<()> {
    Settings::init(force)?;
    println!("{}", format::success("Wrote default config"));
    Ok(())
}
