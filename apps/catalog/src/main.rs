use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    guard::{DEFAULT_ROUTE, LOGIN_ROUTE},
    load_settings, CatalogClient, ClientError, GuardDecision, PaginationMode, ProductForm, Settings,
};
use shared::domain::{ItemId, ItemPatch};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod views;

use commands::{BrowseCommand, HELP};
use views::{
    filters::{self, FilterArgs},
    pagination::PageControls,
    product_card,
    product_form::{self, ProductArgs},
    product_list,
};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and manage the product catalog")]
struct Cli {
    /// Settings file (defaults to ./catalog.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    /// server | client
    #[arg(long)]
    pagination: Option<String>,
    #[arg(long)]
    items_per_page: Option<u32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a session credential.
    Login {
        #[arg(long)]
        token: String,
        #[arg(long, default_value = "user")]
        user: String,
    },
    /// Forget the session credential.
    Logout,
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        json: bool,
    },
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    Add(ProductArgs),
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Decimal amount, e.g. 49.90.
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    Delete {
        id: String,
    },
    /// Interactive listing with filter, sort and paging commands.
    Browse,
}

impl Command {
    fn route(&self) -> &'static str {
        match self {
            Command::Login { .. } => LOGIN_ROUTE,
            _ => DEFAULT_ROUTE,
        }
    }
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = load_settings(self.config.as_deref());
        if let Some(api_url) = &self.api_url {
            settings.api_url = api_url.clone();
        }
        if let Some(raw) = &self.pagination {
            settings.pagination = PaginationMode::parse(raw)
                .ok_or_else(|| anyhow!("unknown pagination mode: {raw} (server, client)"))?;
        }
        if let Some(items_per_page) = self.items_per_page {
            settings.items_per_page = items_per_page.max(1);
        }
        Ok(settings)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = cli.settings()?;
    let mut client = CatalogClient::from_settings(settings)?;
    run(&mut client, cli.command).await
}

async fn run(client: &mut CatalogClient, command: Command) -> Result<()> {
    debug!(?command, "dispatching command");
    match client.guard.check(command.route()) {
        GuardDecision::Render => {}
        GuardDecision::Redirect(target) if target == LOGIN_ROUTE => {
            bail!("not signed in; run `catalog login --token <token>` first");
        }
        GuardDecision::Redirect(_) => {
            let who = client
                .session
                .user()
                .map(|profile| format!(" as {}", profile.username))
                .unwrap_or_default();
            eprintln!("Already signed in{who}. Run `catalog logout` to switch accounts.");
            client.guard.check(DEFAULT_ROUTE);
            return list(client, &FilterArgs::default(), 1, false).await;
        }
        GuardDecision::Loading => return Ok(()),
    }

    match command {
        Command::Login { token, user } => {
            client.session.sign_in(&token, &user)?;
            client.guard.check(DEFAULT_ROUTE);
            println!("Signed in as {user}.");
        }
        Command::Logout => {
            client.session.sign_out()?;
            client.guard.check(DEFAULT_ROUTE);
            println!("Signed out.");
        }
        Command::List {
            filters,
            page,
            json,
        } => list(client, &filters, page, json).await?,
        Command::Show { id, json } => {
            let item = client.store.get_product(&ItemId(id)).await.map_err(explain)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&item)?);
            } else {
                print!("{}", product_card::render(&item));
            }
        }
        Command::Add(args) => {
            let mut form = ProductForm::new();
            args.fill(&mut form);
            if args.name.is_none() && args.category.is_none() && args.price.is_none() {
                let mut input = BufReader::new(tokio::io::stdin());
                let mut output = tokio::io::stdout();
                if !product_form::prompt(&mut form, &mut input, &mut output).await? {
                    bail!("input ended before the form was complete");
                }
            }
            match form.submit(&client.store).await {
                Some(item) => println!("Created {} [{}]", item.name, item.id),
                None => {
                    eprint!("{}", product_form::render_feedback(&form));
                    bail!("product not created");
                }
            }
        }
        Command::Update {
            id,
            name,
            category,
            price,
            description,
            image_url,
        } => {
            let patch = ItemPatch {
                name,
                category,
                price,
                description,
                image_url,
            };
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let item = client
                .store
                .update_product(&ItemId(id), patch)
                .await
                .map_err(explain)?;
            print!("{}", product_card::render(&item));
        }
        Command::Delete { id } => {
            let id = ItemId(id);
            client.store.delete_product(&id).await.map_err(explain)?;
            println!("Deleted {id}");
        }
        Command::Browse => browse(client).await?,
    }
    Ok(())
}

/// A rejected credential gets a hint to sign in again.
fn explain(err: ClientError) -> anyhow::Error {
    if err.is_unauthorized() {
        anyhow!("{err} (session rejected; run `catalog login --token <token>` again)")
    } else {
        err.into()
    }
}

async fn list(client: &CatalogClient, filters: &FilterArgs, page: u32, json: bool) -> Result<()> {
    let store = &client.store;
    store.set_filters(filters.to_patch()?).await;
    if let Err(err) = store.load_products(Some(page), None).await {
        eprintln!("Failed to load products: {}", explain(err));
    }
    let visible = store.visible_items().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        let info = store.page_info().await;
        print!("{}", product_list::render(&visible, &info, store.mode()));
    }
    Ok(())
}

async fn write_out<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

async fn browse(client: &CatalogClient) -> Result<()> {
    let store = client.store.clone();
    let mut input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    if let Some(Err(err)) = client.initial_load.ensure_loaded(&store).await {
        eprintln!("Failed to load products: {err}");
    }

    loop {
        let visible = store.visible_items().await;
        let info = store.page_info().await;
        let criteria = store.filters().await;
        let view = format!(
            "\n{}\n{}",
            filters::render(&criteria),
            product_list::render(&visible, &info, store.mode())
        );
        write_out(&mut output, &view).await?;
        write_out(&mut output, "> ").await?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            break;
        }
        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        let controls = PageControls::new(info.current_page, info.total_pages);
        let result = match command {
            BrowseCommand::Filter(patch) => {
                store.set_filters(patch).await;
                Ok(())
            }
            BrowseCommand::Page(page) => store.set_page(page).await.map(|_| ()),
            BrowseCommand::Next => match controls.next {
                Some(page) => store.set_page(page).await.map(|_| ()),
                None => Ok(()),
            },
            BrowseCommand::Prev => match controls.previous {
                Some(page) => store.set_page(page).await.map(|_| ()),
                None => Ok(()),
            },
            BrowseCommand::Reload => store.load_products(None, None).await.map(|_| ()),
            BrowseCommand::Add => {
                let mut form = ProductForm::new();
                if product_form::prompt(&mut form, &mut input, &mut output).await? {
                    match form.submit(&store).await {
                        Some(item) => {
                            write_out(&mut output, &format!("Created {} [{}]\n", item.name, item.id))
                                .await?;
                        }
                        None => eprint!("{}", product_form::render_feedback(&form)),
                    }
                }
                Ok(())
            }
            BrowseCommand::Help => {
                write_out(&mut output, &format!("{HELP}\n")).await?;
                Ok(())
            }
            BrowseCommand::Quit => break,
        };
        if let Err(err) = result {
            eprintln!("{err}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
