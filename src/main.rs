//! Command-line front end for the artfeed client library.
//!
//! A thin shim over the library: each subcommand builds the client stack,
//! runs one operation, and prints the result. The `search` subcommand runs
//! the real debounce pipeline through the driver so the full effect/event
//! loop is exercised end to end.

use artfeed::api::{ApiClient, AuthClient, ContentClient, SearchClient};
use artfeed::app::{FeedController, SearchOverlayController};
use artfeed::domain::{ArtfeedError, Result};
use artfeed::observability::init_tracing;
use artfeed::runtime::{AppEvent, Driver};
use artfeed::storage::{CredentialStore, JsonCredentialStore, MemoryCredentialStore};
use artfeed::Config;
use std::path::PathBuf;
use std::sync::Arc;

const USAGE: &str = "\
usage: artfeed <command> [args]

commands:
  feed                       print the first pages of the feed
  search <query>             search users and creations (debounced)
  login <email> <password>   sign in and persist the session
  signup <name> <email> <password>
  logout                     clear the persisted session
  profile                    show the signed-in user's profile
  comments <creation-id>     list a creation's comments
  comment <creation-id> <text>
  like <creation-id>         toggle a like
  generate <prompt> [category]

environment:
  ARTFEED_BASE_URL, ARTFEED_CONFIG, ARTFEED_LOG_LEVEL, ...";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config);

    let credentials = open_credentials(&config)?;
    let api = Arc::new(ApiClient::new(&config.base_url, credentials, config.retry_policy()));

    let strs: Vec<&str> = args.iter().map(String::as_str).collect();
    match strs.as_slice() {
        ["feed"] => show_feed(&config, api).await,
        ["search", query] => run_search(&config, api, query).await,
        ["login", email, password] => {
            let session = AuthClient::new(api).login(email, password).await?;
            println!("signed in as {} <{}>", session.user.name, session.user.email);
            Ok(())
        }
        ["signup", name, email, password] => {
            let session = AuthClient::new(api).signup(name, email, password).await?;
            println!("account created for {}", session.user.name);
            Ok(())
        }
        ["logout"] => {
            AuthClient::new(api).logout()?;
            println!("signed out");
            Ok(())
        }
        ["profile"] => {
            let auth = AuthClient::new(api);
            if !auth.is_authenticated()? {
                eprintln!("not signed in, run `artfeed login` first");
                std::process::exit(1);
            }
            let profile = auth.profile().await?;
            println!("{} ({} creations)", profile.user.name, profile.creations.len());
            Ok(())
        }
        ["comments", creation_id] => {
            let page = ContentClient::new(api).get_comments(creation_id, 1).await?;
            for comment in &page.comments {
                println!("{}: {}", comment.user.name, comment.comment);
            }
            if page.has_more {
                println!("... more on page 2");
            }
            Ok(())
        }
        ["comment", creation_id, text] => {
            let comment = ContentClient::new(api).add_comment(creation_id, text).await?;
            println!("posted comment {}", comment.id);
            Ok(())
        }
        ["like", creation_id] => {
            ContentClient::new(api).like_creation(creation_id).await?;
            println!("like toggled on {creation_id}");
            Ok(())
        }
        ["generate", prompt] => generate(api, prompt, "art").await,
        ["generate", prompt, category] => generate(api, prompt, category).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

/// Opens the credential store named by the config, falling back to a
/// per-user data path, then to a process-local store.
fn open_credentials(config: &Config) -> Result<Arc<dyn CredentialStore>> {
    let path = config
        .credentials_path
        .clone()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".local/share/artfeed/credentials.json"))
        });

    match path {
        Some(path) => Ok(Arc::new(JsonCredentialStore::new(path)?)),
        None => {
            tracing::debug!("no home directory, session will not persist");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}

/// Loads the feed through the controller so pagination and merge semantics
/// are the library's, not reimplemented here.
async fn show_feed(config: &Config, api: Arc<ApiClient>) -> Result<()> {
    let content = ContentClient::new(Arc::clone(&api));
    let search = SearchClient::new(api);
    let (driver, mut events) = Driver::new(content, search);

    let mut feed = FeedController::new();
    driver.dispatch(feed.initial_load());

    // Drain events until the page settles, following has_more once so the
    // output shows the merge across pages.
    let mut pages_wanted = 2u32;
    while let Some(event) = events.recv().await {
        match event {
            AppEvent::PageLoaded { generation, page } => {
                feed.on_page_loaded(generation, page);
                pages_wanted -= 1;
                if pages_wanted > 0 {
                    if let Some(effect) = feed.trigger_load_more() {
                        driver.dispatch(effect);
                        continue;
                    }
                }
                break;
            }
            AppEvent::PageFailed { generation, message } => {
                feed.on_page_failed(generation, message);
                break;
            }
            _ => {}
        }
    }

    if let Some(error) = feed.last_error() {
        return Err(ArtfeedError::Network(error.to_string()));
    }

    println!("base url: {}", config.base_url);
    for creation in feed.items() {
        println!(
            "{}  {}  by {}  ({})",
            creation.id,
            creation.display_url(),
            creation.created_by.name,
            creation.created_ago()
        );
    }
    println!("{} creations, more: {}", feed.items().len(), feed.has_more());
    Ok(())
}

/// Runs one query through the real debounce pipeline: keystroke, timer,
/// dispatch, results.
async fn run_search(config: &Config, api: Arc<ApiClient>, query: &str) -> Result<()> {
    let content = ContentClient::new(Arc::clone(&api));
    let search_client = SearchClient::new(api);
    let (driver, mut events) = Driver::new(content, search_client);

    let mut overlay = SearchOverlayController::with_debounce(config.debounce());
    driver.dispatch_all(overlay.on_query_change(query));

    while let Some(event) = events.recv().await {
        match event {
            AppEvent::DebounceFired { handle } => {
                if let Some(effect) = overlay.on_debounce_fired(handle) {
                    driver.dispatch(effect);
                }
            }
            AppEvent::SearchResolved { seq, results } => {
                overlay.on_results(seq, results);
                break;
            }
            AppEvent::SearchFailed { seq: _, message } => {
                return Err(ArtfeedError::Network(message));
            }
            _ => {}
        }
    }

    match overlay.results() {
        Some(results) if !results.is_empty() => {
            for user in &results.users {
                println!("user      {}  {}", user.id, user.name);
            }
            for creation in &results.creations {
                println!("creation  {}  {}", creation.id, creation.display_url());
            }
        }
        _ => println!("no results for {query:?}"),
    }
    Ok(())
}

async fn generate(api: Arc<ApiClient>, prompt: &str, category: &str) -> Result<()> {
    let created = ContentClient::new(api).generate_creation(prompt, category, false).await?;
    println!("{}", created.image_url);
    if !created.message.is_empty() {
        println!("{}", created.message);
    }
    Ok(())
}
