//! CLI command implementations
//!
//! `serve` boots the backend. The other commands drive the UI controllers
//! against a running backend, the same way a screen would.

use std::path::Path;

use tokio::runtime::Runtime;
use tracing::info;

use crate::client::{LookupOutcome, StudentApi, StudentGateway, ViaCepLookup};
use crate::config::{AppConfig, ClientConfig};
use crate::http_server::HttpServer;
use crate::model::StudentRecord;
use crate::ui::{StudentForm, StudentList};

use super::args::{Cli, ClientArgs, Command, FormFields};
use super::errors::{CliError, CliResult};
use super::io::{confirm, write_details, write_list, write_notice};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(config.as_deref()),
        Command::List { client } => block_on(list(&client)),
        Command::Show { id, client } => block_on(show(&client, &id)),
        Command::Add {
            fields,
            lookup,
            client,
        } => block_on(add(&client, &fields, lookup)),
        Command::Edit {
            id,
            fields,
            lookup,
            client,
        } => block_on(edit(&client, &id, &fields, lookup)),
        Command::Delete { id, yes, client } => block_on(delete(&client, &id, yes)),
    }
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

fn block_on<F: std::future::Future<Output = CliResult<()>>>(future: F) -> CliResult<()> {
    runtime()?.block_on(future)
}

/// Start the student service and serve until interrupted
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    let store = config.store.open_store()?;
    let server = HttpServer::new(config.server, store);
    info!(addr = %server.socket_addr(), "starting student service");

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

fn connect(args: &ClientArgs) -> CliResult<(ClientConfig, StudentApi)> {
    let config = args.to_config();
    config.validate()?;
    let api = StudentApi::new(&config)?;
    Ok((config, api))
}

async fn find_record<G: StudentGateway>(gateway: &G, id: &str) -> CliResult<StudentRecord> {
    let mut list = StudentList::new();
    list.refresh(gateway).await?;
    list.records()
        .iter()
        .find(|record| record.id.to_string() == id)
        .cloned()
        .ok_or_else(|| CliError::not_found(id))
}

pub async fn list(args: &ClientArgs) -> CliResult<()> {
    let (_, api) = connect(args)?;
    let mut list = StudentList::new();
    list.on_visible(&api).await?;
    write_list(list.records())
}

pub async fn show(args: &ClientArgs, id: &str) -> CliResult<()> {
    let (_, api) = connect(args)?;
    let record = find_record(&api, id).await?;
    write_details(&record)
}

pub async fn add(args: &ClientArgs, fields: &FormFields, lookup: bool) -> CliResult<()> {
    let (config, api) = connect(args)?;
    let mut form = StudentForm::new();
    fields.apply(&mut form);
    submit(&config, &api, form, lookup).await
}

pub async fn edit(args: &ClientArgs, id: &str, fields: &FormFields, lookup: bool) -> CliResult<()> {
    let (config, api) = connect(args)?;
    let record = find_record(&api, id).await?;
    let mut form = StudentForm::edit(&record);
    fields.apply(&mut form);
    submit(&config, &api, form, lookup).await
}

async fn submit(
    config: &ClientConfig,
    api: &StudentApi,
    mut form: StudentForm,
    lookup: bool,
) -> CliResult<()> {
    if lookup {
        let service = ViaCepLookup::new(&config.postal_lookup_url, config.timeout_secs)
            .map_err(|e| CliError::config_error(e.to_string()))?;
        if form.lookup_postal_code(&service).await? == LookupOutcome::NotFound {
            write_notice("Zipcode not found; address left unchanged.")?;
        }
    }

    let record = form.submit(api).await?;
    write_details(&record)
}

pub async fn delete(args: &ClientArgs, id: &str, yes: bool) -> CliResult<()> {
    let (_, api) = connect(args)?;
    let mut list = StudentList::new();
    list.refresh(&api).await?;

    let prompt = list
        .request_delete(id)
        .map(|pending| pending.prompt())
        .ok_or_else(|| CliError::not_found(id))?;

    if !yes && !confirm(&prompt)? {
        list.cancel_delete();
        return write_notice("Cancelled.");
    }

    list.confirm_delete(&api).await?;
    write_notice("Successfully deleted student")
}
