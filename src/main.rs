//! Wardbook - a command-line client for a hospital management REST API.
//!
//! Sessions persist across runs; every authenticated request carries the
//! stored bearer token, and a 401 from any endpoint drops the session so
//! the next command starts from the login screen equivalent.

mod api;
mod auth;
mod config;
mod fetch;
mod models;

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use api::{ApiClient, RegisterRequest};
use auth::{FileStore, SessionManager};
use config::Config;
use fetch::{FetchState, Remote};
use models::{ReportFilters, ReportKind, Role, Section, User};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let mut config = Config::load().unwrap_or_default();
    let session = SessionManager::new(Box::new(FileStore::new(Config::session_dir()?)));
    session.restore();

    let client = ApiClient::new(config.base_url())?
        .with_credential_provider(session.credential_provider())
        .with_unauthorized_handler(session.unauthorized_handler());
    debug!(base_url = client.base_url(), "api client configured");

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "login" => {
            let username = match args.get(2) {
                Some(u) => u.clone(),
                None => prompt("Email: ")?,
            };
            let password = prompt("Password: ")?;
            let response = client.login(&username, &password).await?;
            session.login(response.user.clone(), response.access_token);
            config.last_username = Some(username);
            let _ = config.save();
            println!(
                "Signed in as {} ({})",
                response.user.name, response.user.role
            );
        }
        "register" => {
            let name = prompt("Full name: ")?;
            let email = prompt("Email: ")?;
            let password = prompt("Password: ")?;
            let role = Role::from_str(prompt("Role (Admin/Doctor/Patient): ")?.trim())
                .map_err(|e| anyhow::anyhow!(e))?;
            let response = client
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            // Auto-login after successful registration
            session.login(response.user.clone(), response.access_token);
            println!("Account created; signed in as {}", response.user.name);
        }
        "logout" => {
            if session.is_authenticated() {
                client.logout_remote().await;
            }
            session.logout();
            println!("Signed out");
        }
        "whoami" => match session.user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email.as_deref().unwrap_or("-"), user.role),
            None => println!("Not signed in"),
        },
        "sections" => {
            let user = require_login(&session)?;
            for section in user.role.allowed_sections() {
                println!("{}", section.label());
            }
        }
        "patients" => {
            let user = require_section(&session, Section::Patients)?;
            info!(role = %user.role, "listing patients");
            let remote = Remote::new();
            remote.sync((), || client.list_patients()).await;
            render(remote.state(), |patients| {
                for p in patients {
                    println!(
                        "#{:<5} {:<30} age {:<4} {}",
                        p.id,
                        p.name,
                        p.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
                        p.blood_type.as_deref().unwrap_or("-")
                    );
                }
            });
        }
        "doctors" => {
            require_section(&session, Section::Doctors)?;
            let remote = Remote::new();
            remote.sync((), || client.list_doctors()).await;
            render(remote.state(), |doctors| {
                for d in doctors {
                    println!(
                        "#{:<5} {:<30} {:<20} {}",
                        d.id,
                        d.name,
                        d.specialty.as_deref().unwrap_or("-"),
                        d.available.as_deref().unwrap_or("-")
                    );
                }
            });
        }
        "appointments" => {
            require_section(&session, Section::Appointments)?;
            let remote = Remote::new();
            remote.sync((), || client.list_appointments()).await;
            render(remote.state(), |appointments| {
                for a in appointments {
                    println!(
                        "#{:<5} {} {}  patient {:<20} doctor {:<20} [{}]",
                        a.id,
                        a.appointment_date,
                        a.appointment_time,
                        a.patient_name.as_deref().unwrap_or("-"),
                        a.doctor_name.as_deref().unwrap_or("-"),
                        a.status.as_deref().unwrap_or("Scheduled")
                    );
                }
            });
        }
        "billing" => {
            require_section(&session, Section::Billing)?;
            let filters: Vec<(&str, String)> = match args.get(2) {
                Some(status) => vec![("status", status.clone())],
                None => vec![],
            };
            let remote = Remote::new();
            remote.sync((), || client.list_bills(&filters)).await;
            render(remote.state(), |bills| {
                for b in bills {
                    println!(
                        "#{:<5} {:<25} {:>10.2}  {}",
                        b.id,
                        b.patient_name.as_deref().unwrap_or("-"),
                        b.amount,
                        b.status.as_deref().unwrap_or("-")
                    );
                }
            });
        }
        "inventory" => {
            require_section(&session, Section::Inventory)?;
            let remote = Remote::new();
            remote.sync((), || client.list_inventory()).await;
            render(remote.state(), |items| {
                for i in items {
                    let flag = if i.is_low_stock() { " LOW" } else { "" };
                    println!(
                        "#{:<5} {:<30} {:<15} qty {:<6}{}",
                        i.id,
                        i.item_name,
                        i.category.as_deref().unwrap_or("-"),
                        i.quantity,
                        flag
                    );
                }
            });
        }
        "low-stock" => {
            require_section(&session, Section::Inventory)?;
            let remote = Remote::new();
            remote.sync((), || client.low_stock_items()).await;
            render(remote.state(), |items| {
                for i in items {
                    println!(
                        "{:<30} qty {} (reorder at {})",
                        i.item_name,
                        i.quantity,
                        i.reorder_level.unwrap_or(0)
                    );
                }
            });
        }
        "restock" => {
            let user = require_section(&session, Section::Inventory)?;
            if !user.role.can_manage_inventory() {
                anyhow::bail!("Only admins can adjust inventory");
            }
            let id: i64 = parse_arg(&args, 2, "item id")?;
            let delta: i64 = parse_arg(&args, 3, "adjustment")?;
            // Mutations are not routed through the fetch adapter; failures
            // surface directly, like the blocking alert on a page
            match client.adjust_inventory_quantity(id, delta).await {
                Ok(item) => println!("{} now at {}", item.item_name, item.quantity),
                Err(e) => {
                    eprintln!("Error: {}", api::user_message(&e));
                    std::process::exit(1);
                }
            }
        }
        "records" => {
            let user = require_section(&session, Section::Patients)?;
            info!(role = %user.role, "listing records");
            let patient_id: i64 = parse_arg(&args, 2, "patient id")?;
            let remote = Remote::new();
            remote
                .sync(patient_id, || client.patient_records(patient_id))
                .await;
            render(remote.state(), |records| {
                for r in records {
                    println!(
                        "record #{:<5} {}  {} prescription item(s)",
                        r.record_id,
                        r.diagnosis,
                        r.prescription.len()
                    );
                }
            });
        }
        "report" => {
            require_section(&session, Section::Reports)?;
            let kind = ReportKind::from_str(args.get(2).map(String::as_str).unwrap_or("revenue"))
                .map_err(|e| anyhow::anyhow!(e))?;
            let filters = ReportFilters::default();
            let remote = Remote::new();
            remote
                .sync(kind.as_path(), || client.report(kind, &filters))
                .await;
            render(remote.state(), |rows| {
                for row in rows {
                    println!("{}", row);
                }
            });
        }
        "export-report" => {
            require_section(&session, Section::Reports)?;
            let kind = ReportKind::from_str(args.get(2).map(String::as_str).unwrap_or("revenue"))
                .map_err(|e| anyhow::anyhow!(e))?;
            let path = args
                .get(3)
                .cloned()
                .unwrap_or_else(|| format!("{}-report.pdf", kind.as_path()));
            let bytes = client
                .download_report(kind, &ReportFilters::default())
                .await?;
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write report to {}", path))?;
            println!("Wrote {} bytes to {}", bytes.len(), path);
        }
        "overview" => {
            let user = require_login(&session)?;
            println!("Signed in as {} ({})", user.name, user.role);
            if user.role == Role::Admin {
                // Fetch the two dashboard panels concurrently
                let (stats, low) = futures::future::try_join(
                    client.inventory_stats(),
                    client.low_stock_items(),
                )
                .await?;
                println!(
                    "Inventory: {} items, {} low on stock",
                    stats.total_items, stats.low_stock_count
                );
                for item in low {
                    println!("  {} at {}", item.item_name, item.quantity);
                }
            }
            let remote = Remote::new();
            remote.sync((), || client.list_appointments()).await;
            render(remote.state(), |appointments| {
                println!("{} appointment(s)", appointments.len());
            });
        }
        "help" | "--help" | "-h" => usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            usage();
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Print a fetched view: inline error where the data would render,
/// stale data (if any) underneath, matching page behavior for reads.
fn render<T>(state: FetchState<T>, show: impl FnOnce(&T)) {
    if let Some(error) = &state.error {
        println!("Error: {}", error);
    }
    if let Some(data) = &state.data {
        show(data);
    } else if state.error.is_none() {
        println!("No data");
    }
}

fn require_login(session: &SessionManager) -> Result<User> {
    session
        .user()
        .ok_or_else(|| anyhow::anyhow!("Not signed in - run `wardbook login` first"))
}

fn require_section(session: &SessionManager, section: Section) -> Result<User> {
    let user = require_login(session)?;
    if !section.visible_to(user.role) {
        anyhow::bail!("{} is not available to {} accounts", section.label(), user.role);
    }
    Ok(user)
}

fn parse_arg<T: FromStr>(args: &[String], index: usize, what: &str) -> Result<T> {
    args.get(index)
        .ok_or_else(|| anyhow::anyhow!("Missing {}", what))?
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}", what))
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn usage() {
    println!("wardbook - hospital management client");
    println!();
    println!("Usage: wardbook <command> [args]");
    println!();
    println!("  login [email]          sign in (password prompted)");
    println!("  register               create an account and sign in");
    println!("  logout                 sign out and clear the stored session");
    println!("  whoami                 show the current identity");
    println!("  sections               list sections your role can open");
    println!("  overview               dashboard summary");
    println!("  patients               list patients (Admin/Doctor)");
    println!("  doctors                list doctors (Admin)");
    println!("  appointments           list appointments");
    println!("  billing [status]       list bills, optionally by status");
    println!("  inventory              list stock (Admin)");
    println!("  low-stock              items at or below reorder level (Admin)");
    println!("  restock <id> <delta>   adjust item quantity (Admin)");
    println!("  records <patient-id>   medical records for a patient");
    println!("  report [type]          show a report (appointments|financial|inventory|revenue)");
    println!("  export-report [type] [file]  download a report as PDF");
}
