use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    export::{download_to, upload_file},
    load_settings, search_into, ActivityLogViewer, BulkDeleteReport, BulkDeleteStatus,
    ClientError, EmailComposer, LocationCascadeController, RestClient, VendorApi,
    VendorListController, VendorMutationController,
};
use shared::{
    domain::{ExportFormat, Vendor, VendorField, VendorId},
    protocol::SearchCriteria,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vendorctl", about = "Manage vendor records against the vendor API")]
struct Cli {
    /// Overrides the base URL from vendor_client.toml and the environment.
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Search {
        #[arg(long)]
        vendor_number: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long = "type")]
        vendor_type: Option<String>,
        #[arg(long)]
        location_type: Option<String>,
        #[arg(long)]
        sort: Option<VendorField>,
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = client_core::list::DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    List,
    Create {
        /// JSON file holding the draft vendor.
        #[arg(long)]
        file: PathBuf,
    },
    Update {
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long)]
        yes: bool,
    },
    Export {
        #[arg(long, value_enum)]
        format: Format,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    Upload {
        path: PathBuf,
    },
    Logs,
    Locations {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
    Email {
        #[arg(long)]
        to: String,
        #[arg(long)]
        cc: Option<String>,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long)]
        attach: Option<PathBuf>,
        /// Use the query-string endpoint instead of the multipart one.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Xml,
    Excel,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ExportFormat::Csv,
            Format::Xml => ExportFormat::Xml,
            Format::Excel => ExportFormat::Excel,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    let client = Arc::new(RestClient::from_settings(&settings)?);
    info!(api_base_url = client.base_url(), "vendorctl starting");

    if let Err(err) = run(cli.command, client).await {
        if let Some(client_err) = err.downcast_ref::<ClientError>() {
            eprintln!("{}", client_err.user_message());
        }
        return Err(err);
    }
    Ok(())
}

async fn run(command: Command, client: Arc<RestClient>) -> Result<()> {
    match command {
        Command::Search {
            vendor_number,
            company,
            vendor_type,
            location_type,
            sort,
            desc,
            page,
            page_size,
        } => {
            let criteria = SearchCriteria {
                vendor_number,
                company,
                vendor_type,
                location_type,
            };
            let mut list = VendorListController::new(page_size);
            let outcome = search_into(client.as_ref(), &criteria, &mut list).await?;
            if let Some(message) = outcome.message() {
                println!("{message}");
                return Ok(());
            }
            if let Some(key) = sort {
                list.sort(key);
                if desc {
                    list.sort(key);
                }
            }
            list.go_to_page(page);
            print_page(&list);
        }
        Command::List => {
            let mut list = VendorListController::new(usize::MAX);
            list.replace_results(client.list_vendors().await?);
            print_page(&list);
        }
        Command::Create { file } => {
            let mut draft = read_vendor(&file).await?;
            let mutations = VendorMutationController::new(client);
            match mutations.create(&mut draft).await {
                Ok(created) => println!("Vendor {} created successfully!", created.id),
                Err(err) => {
                    if let Some(errors) = err.validation_errors() {
                        for (field, message) in errors.iter() {
                            eprintln!("{}: {message}", field.as_str());
                        }
                    }
                    return Err(err.into());
                }
            }
        }
        Command::Update { file } => {
            let vendor = read_vendor(&file).await?;
            let mut list = VendorListController::default();
            list.replace_results(client.list_vendors().await?);
            let mut mutations = VendorMutationController::new(client);
            let updated = mutations.update(&mut list, vendor).await?;
            println!("Vendor {} updated successfully!", updated.id);
        }
        Command::Delete { ids, yes } => {
            let ids: Vec<VendorId> = ids.into_iter().map(VendorId).collect();
            if !yes && !confirm(&format!("Delete {} vendor(s)?", ids.len()))? {
                println!("Cancelled.");
                return Ok(());
            }
            let mut list = VendorListController::default();
            let mutations = VendorMutationController::new(client);
            if let [id] = ids.as_slice() {
                mutations.delete_one(&mut list, *id).await?;
                println!("Vendor {id} deleted successfully!");
            } else {
                let report = mutations.delete_many(&mut list, &ids).await;
                println!("{}", report.summary());
                for (id, reason) in &report.failed {
                    eprintln!("  {id}: {reason}");
                }
                ensure_all_deleted(&report)?;
            }
        }
        Command::Export { format, out } => {
            let path = download_to(client.as_ref(), format.into(), &out).await?;
            println!("Saved {}", path.display());
        }
        Command::Upload { path } => {
            println!("{}", upload_file(client.as_ref(), &path).await?);
        }
        Command::Logs => {
            let mut viewer = ActivityLogViewer::new(client);
            viewer.load().await?;
            if let Some(message) = viewer.empty_message() {
                println!("{message}");
            }
            for log in viewer.logs() {
                println!(
                    "{:<20} {:<10} {:<12} {}",
                    log.display_timestamp(),
                    log.action,
                    log.performed_by,
                    log.details
                );
            }
        }
        Command::Locations { country, state } => {
            let cascade = LocationCascadeController::new(client);
            cascade.load_countries().await;
            if let Some(country) = &country {
                cascade.set_country(country).await;
            }
            if let Some(state) = &state {
                if country.is_none() {
                    bail!("--state needs --country");
                }
                cascade.set_state(state).await;
            }
            let snapshot = cascade.snapshot().await;
            if let Some(error) = &snapshot.last_error {
                bail!("{error}");
            }
            let level = if state.is_some() {
                &snapshot.cities
            } else if country.is_some() {
                &snapshot.states
            } else {
                &snapshot.countries
            };
            for option in level {
                println!("{:<8} {}", option.id, option.name);
            }
        }
        Command::Email {
            to,
            cc,
            subject,
            body,
            attach,
            plain,
        } => {
            let mut composer = EmailComposer::new(client);
            composer.to = to;
            composer.cc = cc.unwrap_or_default();
            composer.subject = subject;
            composer.body = body;
            if plain {
                println!("{}", composer.send_plain().await?);
            } else {
                if let Some(path) = attach {
                    composer.attach_file(&path).await?;
                }
                println!("{}", composer.send().await?);
            }
        }
    }
    Ok(())
}

fn print_page(list: &VendorListController) {
    for vendor in list.visible_page() {
        println!(
            "{:<6} {:<12} {:<28} {:<20} {:<14} {}",
            vendor.id,
            vendor.vendor_number,
            vendor.company,
            vendor.display_name(),
            vendor.vendor_type,
            vendor.location_label()
        );
    }
    if list.has_pagination() {
        println!(
            "page {}/{} ({} vendors)",
            list.current_page(),
            list.total_pages(),
            list.len()
        );
    }
}

async fn read_vendor(path: &PathBuf) -> Result<Vendor> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a vendor record", path.display()))
}

/// Any failed id makes the command fail, even when others were deleted.
fn ensure_all_deleted(report: &BulkDeleteReport) -> Result<()> {
    if report.status() != BulkDeleteStatus::Succeeded {
        bail!("{}", report.summary());
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
