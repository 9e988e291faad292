mod cli;
mod render;

use cinetech::{
    catalog::{CatalogProvider, GenreDirectory, ImageUrls, Listing, TitleSummary, TmdbCatalog},
    comments::CommentThread,
    config::{self, Config},
    search::{self, Navigation, Phase, SearchController},
};
use cinetech_common::{CommentId, MediaId, MediaKind, Partition};
use cinetech_store::{kv::SqliteKv, pool::init_pool, CommentEntry, LocalStore, NewFavorite};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, CommentsAction, FavoritesAction};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cinetech=trace,cinetech_store=debug,cinetech_common=debug".to_string()
        } else {
            "cinetech=warn,cinetech_store=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Validate = cli.command {
        return validate_config(cli.config.as_deref());
    }

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let app = App::open(config)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app.run(cli.command))
}

fn validate_config(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid");
    println!("  Catalog: {} ({})", config.catalog.base_url, config.catalog.language);
    println!(
        "  API key: {}",
        if config.catalog.api_key.is_empty() {
            "missing"
        } else {
            "set"
        }
    );
    println!(
        "  Search: {}ms debounce, {} keywords, {} titles",
        config.search.debounce_ms, config.search.max_keywords, config.search.max_media
    );
    println!("  Storage: {}", config.storage.path.display());

    Ok(())
}

struct App {
    config: Config,
    store: LocalStore,
}

impl App {
    fn open(config: Config) -> Result<Self> {
        let db_path = config.storage.path.to_string_lossy().into_owned();
        tracing::debug!("Opening local store at {}", db_path);
        let pool = init_pool(&db_path)?;
        let store = LocalStore::new(SqliteKv::new(pool)).with_author(&config.comments.author);
        Ok(Self { config, store })
    }

    fn catalog(&self) -> Result<Arc<dyn CatalogProvider>> {
        config::require_api_key(&self.config)?;
        Ok(Arc::new(TmdbCatalog::new(&self.config.catalog)?))
    }

    async fn run(self, command: Commands) -> Result<()> {
        match command {
            Commands::Popular { kind, page } => {
                let listing = match kind {
                    MediaKind::Movie => Listing::PopularMovies,
                    MediaKind::Series => Listing::PopularSeries,
                };
                self.print_listing(listing, page).await
            }
            Commands::Trending { kind, window } => {
                self.print_listing(Listing::Trending(kind, window), 1).await
            }
            Commands::NewReleases {
                kind,
                upcoming,
                page,
            } => {
                let listing = match (kind, upcoming) {
                    (MediaKind::Movie, false) => Listing::NowPlayingMovies,
                    (MediaKind::Movie, true) => Listing::UpcomingMovies,
                    (MediaKind::Series, false) => Listing::AiringTodaySeries,
                    (MediaKind::Series, true) => Listing::OnTheAirSeries,
                };
                self.print_listing(listing, page).await
            }
            Commands::Details { kind, id } => self.print_details(kind, MediaId::new(id)).await,
            Commands::Search { query } => self.print_search(&query).await,
            Commands::Suggest => self.suggest().await,
            Commands::Favorites { action } => self.favorites(action).await,
            Commands::Comments { action } => self.comments(action).await,
            Commands::Validate => Ok(()),
        }
    }

    fn favorite_ids(&self) -> Result<Vec<(MediaId, MediaKind)>> {
        Ok(self
            .store
            .list_favorites()?
            .into_iter()
            .map(|f| (f.id, f.kind))
            .collect())
    }

    async fn print_titles(
        &self,
        catalog: Arc<dyn CatalogProvider>,
        titles: &[TitleSummary],
    ) -> Result<()> {
        let genres = GenreDirectory::new(catalog);
        let favorites = self.favorite_ids()?;
        for title in titles {
            let names = genres.names(title.kind, &title.genre_ids).await;
            let favorite = favorites.contains(&(title.id, title.kind));
            println!("{}", render::title_line(title, &names, favorite));
        }
        Ok(())
    }

    async fn print_listing(&self, listing: Listing, page: u32) -> Result<()> {
        let catalog = self.catalog()?;
        let results = catalog.list(listing, page).await?;
        tracing::info!(?listing, page = results.page, total = results.total_results, "Loaded listing");

        if results.results.is_empty() {
            println!("Aucun résultat");
            return Ok(());
        }
        self.print_titles(catalog, &results.results).await?;
        if results.has_next() {
            println!("-- page {}/{} --", results.page, results.total_pages);
        }
        Ok(())
    }

    async fn print_details(&self, kind: MediaKind, id: MediaId) -> Result<()> {
        let catalog = self.catalog()?;
        let details = catalog.details(kind, id).await?;
        let favorite = self.store.is_favorite(id, kind)?;
        let images = ImageUrls::from_config(&self.config.catalog);

        print!("{}", render::details(&details, &images, favorite));

        let section = CommentThread::render(
            self.store.clone(),
            Partition::new(id, kind),
            &details.reviews,
        )?;
        println!("\nCommentaires :");
        print!("{}", render::thread(section.thread()));
        Ok(())
    }

    async fn print_search(&self, query: &str) -> Result<()> {
        let catalog = self.catalog()?;
        let results = search::search_all(catalog.as_ref(), query).await?;
        println!("Résultats pour \"{}\"", query.trim());
        if results.is_empty() {
            println!("Aucun résultat");
            return Ok(());
        }
        self.print_titles(catalog, &results).await
    }

    async fn suggest(&self) -> Result<()> {
        let catalog = self.catalog()?;
        let controller = SearchController::new(catalog, self.config.search.clone());
        let mut views = controller.subscribe();
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        let mut input_open = true;
        let mut echo = render::DropdownEcho::default();

        loop {
            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) if line.trim().is_empty() => controller.dismiss(),
                    Some(line) => match line.strip_prefix('=') {
                        Some(text) => match controller.on_submit(text) {
                            Some(Navigation::SearchResults { query }) => {
                                self.print_search(&query).await?;
                            }
                            Some(Navigation::Title { id, kind }) => {
                                self.print_details(kind, id).await?;
                            }
                            None => println!("(au moins {} caractères)", self.config.search.min_query_len),
                        },
                        None => controller.on_input(&line),
                    },
                    None => input_open = false,
                },
                changed = views.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = views.borrow_and_update().clone();
                    if let Some(text) = echo.update(&view) {
                        print!("{text}");
                    }
                }
            }

            let settled = matches!(views.borrow().phase, Phase::Idle | Phase::Displaying);
            if !input_open && settled && !views.has_changed().unwrap_or(false) {
                break;
            }
        }
        Ok(())
    }

    async fn favorites(&self, action: FavoritesAction) -> Result<()> {
        match action {
            FavoritesAction::List => {
                print!("{}", render::favorites(&self.store.sorted_favorites()?));
            }
            FavoritesAction::Add { kind, id } => {
                let id = MediaId::new(id);
                if self.store.is_favorite(id, kind)? {
                    println!("Déjà dans les favoris");
                    return Ok(());
                }
                let details = self.catalog()?.details(kind, id).await?;
                if self.store.add_favorite(NewFavorite::from(&details))? {
                    println!("Ajouté aux favoris : {}", details.title);
                }
            }
            FavoritesAction::Remove { kind, id } => {
                self.store.remove_favorite(MediaId::new(id), kind)?;
                println!("Retiré des favoris");
            }
        }
        Ok(())
    }

    /// Thread for a title; remote reviews are skipped when unavailable.
    async fn comment_section(&self, partition: Partition) -> Result<CommentThread> {
        let reviews = match self.catalog() {
            Ok(catalog) => match catalog.details(partition.kind, partition.media_id).await {
                Ok(details) => details.reviews,
                Err(e) => {
                    tracing::warn!("Could not load reviews for {}: {}", partition, e);
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Ok(CommentThread::render(self.store.clone(), partition, &reviews)?)
    }

    async fn comments(&self, action: CommentsAction) -> Result<()> {
        match action {
            CommentsAction::List { kind, id } => {
                let section = self.comment_section(Partition::new(MediaId::new(id), kind)).await?;
                print!("{}", render::thread(section.thread()));
            }
            CommentsAction::Add { kind, id, content } => {
                let mut section = self.comment_section(Partition::new(MediaId::new(id), kind)).await?;
                let comment = section.submit_comment(&content)?;
                println!("Commentaire #{} publié", comment.id);
            }
            CommentsAction::Reply {
                kind,
                id,
                parent,
                content,
            } => {
                let mut section = self.comment_section(Partition::new(MediaId::new(id), kind)).await?;
                let reply = section.submit_reply(CommentId::new(parent), &content)?;
                println!("Réponse #{} publiée", reply.id);
            }
            CommentsAction::Delete {
                kind,
                id,
                comment,
                yes,
            } => {
                let mut section = self.comment_section(Partition::new(MediaId::new(id), kind)).await?;
                let confirm = |entry: &CommentEntry| yes || prompt_delete(entry);
                if section.delete(CommentId::new(comment), &confirm)? {
                    println!("Commentaire supprimé");
                } else {
                    println!("Aucun commentaire supprimé");
                }
            }
        }
        Ok(())
    }
}

fn prompt_delete(comment: &CommentEntry) -> bool {
    print!(
        "Voulez-vous vraiment supprimer ce commentaire ? \"{}\" [o/N] ",
        comment.content
    );
    if std::io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "o" | "oui" | "y" | "yes"),
        Err(_) => false,
    }
}
