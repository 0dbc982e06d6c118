mod api;
mod catalog;
mod config;
mod draft;
mod error;
mod filter;
mod logging;
mod model;
mod observe;
mod render;
mod search;
mod selection;
mod trends;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::info;

use api::{HttpTransport, Transport};
use catalog::Catalog;
use config::Config;
use draft::{CommitOutcome, ProfileEditor, ProfileField};
use filter::{DirectoryFilter, FilterState};
use logging::Sink;
use model::ArtistProfile;
use search::{SearchCoordinator, SearchStatus};
use selection::SelectionController;

#[derive(Parser, Debug)]
#[command(name = "artdesk", version, about = "Browse and curate the artist directory")]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at info level instead of warn
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    /// Append logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Initial directory query for the dashboard, e.g. `search=lo&country=us`
    #[arg(long, value_name = "QUERY", default_value = "")]
    query: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page of the directory
    Search(SearchArgs),
    /// Show one entry of a directory page with its trends
    Show(ShowArgs),
    /// Edit a profile from the command line
    Edit(EditArgs),
    /// Build a directory query string
    Encode(EncodeArgs),
    /// Explain a directory query string
    Decode(DecodeArgs),
    /// List known countries
    Countries(CountriesArgs),
    /// List the tag vocabulary
    Tags,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Directory query string
    #[arg(default_value = "")]
    query: String,

    /// Print the raw page as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct ShowArgs {
    user_id: String,

    /// Query of the page that lists the entry
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Args, Debug)]
struct EditArgs {
    user_id: String,

    /// Query of the page that lists the entry
    #[arg(long, default_value = "")]
    query: String,

    /// Field assignment, e.g. `--set bio="New bio"`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,

    /// Tag to add or remove
    #[arg(long = "toggle-tag", value_name = "TAG")]
    toggle_tag: Vec<String>,

    /// Print the change set without sending it
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    #[arg(long, default_value = "")]
    search: String,

    /// ISO country code
    #[arg(long)]
    country: Option<String>,

    /// Tag by display name or slug, repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long, default_value_t = filter::FIRST_PAGE)]
    page: u32,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    query: String,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Case-insensitive title filter
    #[arg(default_value = "")]
    filter: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sink = if cli.command.is_some() {
        Sink::Stderr
    } else {
        Sink::FileOnly
    };
    logging::init(cli.verbose, cli.log_file.as_deref(), sink)?;

    match cli.command {
        Some(Command::Encode(args)) => {
            let config = config::load_or_default(cli.config.as_deref())?;
            handle_encode(args, &config.catalog()?)
        }
        Some(Command::Decode(args)) => {
            let config = config::load_or_default(cli.config.as_deref())?;
            handle_decode(args, &config.catalog()?);
            Ok(())
        }
        Some(Command::Countries(args)) => {
            let config = config::load_or_default(cli.config.as_deref())?;
            handle_countries(args, &config.catalog()?);
            Ok(())
        }
        Some(Command::Tags) => {
            let config = config::load_or_default(cli.config.as_deref())?;
            handle_tags(&config.catalog()?);
            Ok(())
        }
        Some(Command::Search(args)) => {
            let config = config::load(cli.config.as_deref())?;
            let (catalog, transport, runtime) = connect(&config)?;
            runtime.block_on(handle_search(args, &catalog, &transport))
        }
        Some(Command::Show(args)) => {
            let config = config::load(cli.config.as_deref())?;
            let (catalog, transport, runtime) = connect(&config)?;
            runtime.block_on(handle_show(args, &catalog, &transport))
        }
        Some(Command::Edit(args)) => {
            let config = config::load(cli.config.as_deref())?;
            let (catalog, transport, runtime) = connect(&config)?;
            runtime.block_on(handle_edit(args, &catalog, &transport))
        }
        None => {
            let config = config::load(cli.config.as_deref())?;
            let (catalog, transport, runtime) = connect(&config)?;
            info!(path = %config.config_path.display(), "loaded configuration");

            let mut app =
                ui::app::App::new(&config, &catalog, transport, runtime.handle().clone(), &cli.query);
            app.run()
        }
    }
}

fn connect(config: &Config) -> Result<(Catalog, HttpTransport, Runtime)> {
    let catalog = config.catalog()?;
    let transport = HttpTransport::new(&config.api()?)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    Ok((catalog, transport, runtime))
}

fn handle_encode(args: EncodeArgs, catalog: &Catalog) -> Result<()> {
    let mut filter = DirectoryFilter {
        text: args.search,
        page: args.page.max(filter::FIRST_PAGE),
        ..DirectoryFilter::default()
    };
    if let Some(code) = args.country.as_deref().filter(|code| !code.trim().is_empty()) {
        filter.country = catalog
            .country_by_code(code)
            .cloned()
            .ok_or_else(|| anyhow!("unknown country code `{}`", code))?;
    }
    for tag in &args.tags {
        let slug = catalog
            .resolve_tag(tag)
            .ok_or_else(|| anyhow!("unknown tag `{}`", tag))?;
        filter.tags.insert(slug);
    }
    println!("{}", filter::encode(&filter));
    Ok(())
}

fn handle_decode(args: DecodeArgs, catalog: &Catalog) {
    let state = FilterState::from_query(&args.query, catalog);
    let filter = state.filter();
    let country = if filter.country.is_none() {
        "-".to_string()
    } else {
        format!("{} ({})", filter.country.title, filter.country.wire_code())
    };
    let tags: Vec<&str> = filter.tags.iter().map(|slug| slug.as_str()).collect();

    println!("search:  {}", filter.text);
    println!("country: {}", country);
    println!("tags:    {}", if tags.is_empty() { "-".to_string() } else { tags.join(", ") });
    println!("page:    {}", filter.page);
    println!("query:   {}", state.query());
}

fn handle_countries(args: CountriesArgs, catalog: &Catalog) {
    for country in catalog.search_countries(&args.filter) {
        println!("{}\t{}", country.value, country.title);
    }
}

fn handle_tags(catalog: &Catalog) {
    for tag in catalog.canonical_tags() {
        if let Some(slug) = catalog.resolve_tag(tag) {
            println!("{}\t{}", slug.as_str(), tag);
        }
    }
}

async fn fetch_page(
    query: &str,
    catalog: &Catalog,
    transport: &HttpTransport,
) -> Result<SearchCoordinator> {
    let filter = FilterState::from_query(query, catalog);
    let mut search = SearchCoordinator::new();
    search.run(transport, filter.filter()).await;
    if let SearchStatus::Failed(message) = search.snapshot().status {
        bail!("search failed: {}", message);
    }
    Ok(search)
}

async fn find_profile(
    user_id: &str,
    query: &str,
    catalog: &Catalog,
    transport: &HttpTransport,
) -> Result<ArtistProfile> {
    let search = fetch_page(query, catalog, transport).await?;
    search
        .snapshot()
        .items
        .into_iter()
        .find(|profile| profile.user_id == user_id)
        .ok_or_else(|| {
            anyhow!(
                "user {} is not on the page for query `{}`",
                user_id,
                query
            )
        })
}

async fn handle_search(args: SearchArgs, catalog: &Catalog, transport: &HttpTransport) -> Result<()> {
    if args.json {
        let state = FilterState::from_query(&args.query, catalog);
        let page = transport.search(state.query()).await?;
        let json = serde_json::to_string_pretty(&page).context("failed to encode page")?;
        println!("{}", json);
        return Ok(());
    }

    let search = fetch_page(&args.query, catalog, transport).await?;
    print!("{}", render::render_list(catalog, &search.snapshot()));
    Ok(())
}

async fn handle_show(args: ShowArgs, catalog: &Catalog, transport: &HttpTransport) -> Result<()> {
    let profile = find_profile(&args.user_id, &args.query, catalog, transport).await?;
    let mut selection = SelectionController::new();
    selection.load(transport, profile).await;
    print!("{}", render::render_detail(catalog, &selection.view()));
    Ok(())
}

async fn handle_edit(args: EditArgs, catalog: &Catalog, transport: &HttpTransport) -> Result<()> {
    let profile = find_profile(&args.user_id, &args.query, catalog, transport).await?;
    let mut editor = ProfileEditor::new(profile);
    editor.enter_edit();

    for assignment in &args.set {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD=VALUE, got `{}`", assignment))?;
        let field = ProfileField::parse(name)?;
        editor.set_field(catalog, field, value)?;
    }
    for tag in &args.toggle_tag {
        editor.toggle_tag(catalog, tag)?;
    }

    let diff = editor.diff();
    print!("{}", render::render_diff(&diff));
    if args.dry_run || diff.is_empty() {
        return Ok(());
    }

    match editor.commit(transport).await {
        Ok(CommitOutcome::Saved(saved)) => {
            println!("Saved.\n");
            print!("{}", render::render_profile(catalog, &saved));
            Ok(())
        }
        Ok(CommitOutcome::Unchanged) => Ok(()),
        Err(err) => {
            if let Some(rejection) = editor.rejection() {
                for (field, reason) in &rejection.fields {
                    eprintln!("  {}: {}", field, reason);
                }
            }
            Err(err).context("update failed")
        }
    }
}
