use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use catalog::prompt::{self, CONFIRM_DELETE_CATEGORY, CONFIRM_DELETE_GAME};
use catalog::{
    render, AdminService, AppError, Catalog, CatalogConfig, FavoritesFile, GameForm,
    SessionTokenFile,
};
use database::{
    run_migrations, CatalogStore, FsMediaStore, ImageUpload, SqliteCatalogStore,
    SqliteSessionProvider,
};
use query::{GameQuery, SortKey};
use types::{category::DEFAULT_CATEGORIES, GameUpdate};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Board game catalog")]
struct Params {
    /// YAML config file (defaults to $CATALOG_CONFIG, then catalog.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite URL, overrides DATABASE_URL and the config file
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List games
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        favorites: bool,
        /// rating, name or play-time
        #[arg(long)]
        sort: Option<String>,
    },
    /// Show one game
    Show { id: String },
    /// Toggle a game in the local favorites
    Favorite { id: String },
    /// List categories
    Categories,
    /// Create an admin account
    RegisterAdmin { email: String, password: String },
    #[command(flatten)]
    Admin(AdminCommand),
}

/// Commands that go through the admin session.
#[derive(Subcommand, Debug)]
enum AdminCommand {
    Login { email: String, password: String },
    Logout,
    /// Show the current admin session
    Whoami,
    #[command(subcommand)]
    Game(GameCommand),
    #[command(subcommand)]
    Category(CategoryCommand),
}

#[derive(Subcommand, Debug)]
enum GameCommand {
    Add {
        name: String,
        #[command(flatten)]
        fields: GameFields,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: GameFields,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Optional game fields. On edit an empty string clears the field.
#[derive(Args, Debug)]
struct GameFields {
    #[arg(long)]
    name_en: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long)]
    full_description: Option<String>,
    #[arg(long)]
    rating: Option<f64>,
    #[arg(long)]
    min_players: Option<u32>,
    #[arg(long)]
    max_players: Option<u32>,
    #[arg(long)]
    play_time: Option<u32>,
    /// Local image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
    /// Existing image URL
    #[arg(long, conflicts_with = "image")]
    image_url: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    video_url: Option<String>,
    #[arg(long)]
    language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Add {
        name: String,
        #[arg(long)]
        color: Option<String>,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Empty string clears the color
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Create the default categories that are missing
    Seed,
}

fn nullable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.trim().is_empty() { None } else { Some(v) })
}

impl GameFields {
    fn into_form(self, name: String) -> GameForm {
        let defaults = GameForm::default();
        GameForm {
            name,
            name_en: self.name_en.unwrap_or_default(),
            short_description: self.short_description.unwrap_or_default(),
            full_description: self.full_description.unwrap_or_default(),
            rating: self.rating.unwrap_or(defaults.rating),
            min_players: self.min_players.unwrap_or(defaults.min_players),
            max_players: self.max_players.unwrap_or(defaults.max_players),
            play_time: self.play_time.unwrap_or(defaults.play_time),
            image: self.image_url.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            video_url: self.video_url.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
        }
    }

    fn into_update(self, name: Option<String>) -> GameUpdate {
        let mut update = GameUpdate {
            name,
            name_en: nullable(self.name_en),
            short_description: nullable(self.short_description),
            rating: self.rating,
            min_players: self.min_players,
            max_players: self.max_players,
            play_time: self.play_time,
            image: nullable(self.image_url),
            category: nullable(self.category),
            video_url: nullable(self.video_url),
            language: nullable(self.language),
            ..Default::default()
        };
        if let Some(full) = nullable(self.full_description) {
            update.set_full_description(full);
        }
        update
    }
}

async fn read_image(path: Option<&Path>) -> Result<Option<ImageUpload>, AppError> {
    match path {
        Some(path) => Ok(Some(ImageUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

fn parse_sort(raw: Option<&str>) -> Option<SortKey> {
    let Some(raw) = raw else {
        return Some(SortKey::default());
    };
    let key = SortKey::from_name(raw);
    if key.is_none() {
        log::warn!("Unknown sort key {raw:?}, keeping store order");
    }
    key
}

async fn run(args: Params) -> Result<(), AppError> {
    let config = CatalogConfig::load(args.config.as_deref())?;
    let pool = config
        .database(args.database_url)
        .create_pool()
        .await
        .map_err(AppError::Load)?;
    run_migrations(&pool).await?;

    let store = SqliteCatalogStore::new(pool.clone());
    let favorites_file = FavoritesFile::new(&config.favorites_path);
    let token_file = SessionTokenFile::new(&config.session_path);
    let sessions = SqliteSessionProvider::new(pool)
        .with_token(token_file.load().await)
        .with_ttl(config.session_ttl());

    match args.command {
        Command::List {
            search,
            category,
            favorites,
            sort,
        } => {
            let catalog = Catalog::load(&store).await?;
            let mut params = GameQuery::new()
                .favorites_only(favorites)
                .sort_by(parse_sort(sort.as_deref()));
            if let Some(search) = search {
                params = params.search(search);
            }
            if let Some(category) = category {
                params = params.category(category);
            }
            let favorites = favorites_file.load().await;
            println!(
                "{}",
                render::game_list(&catalog.visible(&params, &favorites), &favorites)
            );
        }
        Command::Show { id } => {
            let game = store
                .get_game(&id)
                .await
                .map_err(AppError::Load)?
                .ok_or(AppError::GameNotFound(id))?;
            let favorites = favorites_file.load().await;
            println!("{}", render::game_detail(&game, &favorites));
        }
        Command::Favorite { id } => {
            let now_favorite = favorites_file.toggle(&id).await?;
            if now_favorite {
                println!("Додано до обраного: {id}");
            } else {
                println!("Видалено з обраного: {id}");
            }
        }
        Command::Categories => {
            let categories = store.list_categories().await.map_err(AppError::Load)?;
            println!("{}", render::category_list(&categories));
        }
        Command::RegisterAdmin { email, password } => {
            let id = sessions
                .register_user(&email, &password)
                .await
                .map_err(AppError::SignIn)?;
            log::info!("Created admin {id}");
            println!("Адміністратора створено: {email}");
        }
        Command::Admin(command) => {
            let media = FsMediaStore::new(&config.media_dir, &config.public_base_url);
            let mut admin =
                AdminService::new(Box::new(store), Box::new(media), Box::new(sessions));
            run_admin(&mut admin, &token_file, command).await?;
        }
    }
    Ok(())
}

async fn run_admin(
    admin: &mut AdminService,
    token_file: &SessionTokenFile,
    command: AdminCommand,
) -> Result<(), AppError> {
    match command {
        AdminCommand::Login { email, password } => {
            let session = admin.sign_in(&email, &password).await?;
            token_file.save(&session.token).await?;
            println!("Вхід виконано: {}", session.email);
        }
        AdminCommand::Logout => {
            admin.sign_out().await?;
            token_file.clear().await?;
            println!("Вихід виконано");
        }
        AdminCommand::Whoami => match admin.session().await? {
            Some(session) => println!("{} (до {})", session.email, session.expires_at),
            None => {
                token_file.clear().await?;
                println!("Не авторизовано");
            }
        },
        AdminCommand::Game(GameCommand::Add { name, fields }) => {
            let image = read_image(fields.image.as_deref()).await?;
            let game = admin.create_game(&fields.into_form(name), image).await?;
            println!("Гру збережено: [{}] {game}", game.id);
        }
        AdminCommand::Game(GameCommand::Edit { id, name, fields }) => {
            let image = read_image(fields.image.as_deref()).await?;
            let update = fields.into_update(name);
            if update.is_empty() && image.is_none() {
                log::warn!("Nothing to update for {id}");
                return Ok(());
            }
            let game = admin.update_game(&id, update, image).await?;
            println!("Гру збережено: [{}] {game}", game.id);
        }
        AdminCommand::Game(GameCommand::Delete { id, yes }) => {
            if !yes && !ask(CONFIRM_DELETE_GAME)? {
                println!("Скасовано");
                return Ok(());
            }
            admin.delete_game(&id).await?;
            println!("Гру видалено: {id}");
        }
        AdminCommand::Category(CategoryCommand::Add { name, color }) => {
            let category = admin.create_category(&name, color.as_deref()).await?;
            println!("Категорію збережено: [{}] {}", category.id, category.name);
        }
        AdminCommand::Category(CategoryCommand::Edit { id, name, color }) => {
            let category = admin
                .update_category(&id, name.as_deref(), color.as_deref())
                .await?;
            println!("Категорію збережено: [{}] {}", category.id, category.name);
        }
        AdminCommand::Category(CategoryCommand::Delete { id, yes }) => {
            if !yes && !ask(CONFIRM_DELETE_CATEGORY)? {
                println!("Скасовано");
                return Ok(());
            }
            admin.delete_category(&id).await?;
            println!("Категорію видалено: {id}");
        }
        AdminCommand::Category(CategoryCommand::Seed) => {
            let added = admin.seed_categories(&DEFAULT_CATEGORIES).await?;
            println!("Додано категорій: {added}");
        }
    }
    Ok(())
}

fn ask(question: &str) -> Result<bool, AppError> {
    prompt::confirm(&mut std::io::stdin().lock(), &mut std::io::stdout(), question)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Params::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Params::try_parse_from(std::iter::once("catalog").chain(args.iter().copied()))
            .expect("Failed to parse arguments")
            .command
    }

    #[test]
    fn admin_commands_keep_top_level_names() {
        assert!(matches!(
            parse(&["login", "a@b.c", "pw"]),
            Command::Admin(AdminCommand::Login { .. })
        ));
        assert!(matches!(
            parse(&["category", "seed"]),
            Command::Admin(AdminCommand::Category(CategoryCommand::Seed))
        ));
        assert!(matches!(parse(&["categories"]), Command::Categories));
    }

    #[test]
    fn deletes_ask_unless_yes_is_given() {
        assert!(matches!(
            parse(&["game", "delete", "42"]),
            Command::Admin(AdminCommand::Game(GameCommand::Delete { yes: false, .. }))
        ));
        assert!(matches!(
            parse(&["game", "delete", "42", "--yes"]),
            Command::Admin(AdminCommand::Game(GameCommand::Delete { yes: true, .. }))
        ));
        assert!(matches!(
            parse(&["category", "delete", "7", "-y"]),
            Command::Admin(AdminCommand::Category(CategoryCommand::Delete { yes: true, .. }))
        ));
    }

    #[test]
    fn empty_edit_values_clear_fields() {
        let Command::Admin(AdminCommand::Game(GameCommand::Edit { name, fields, .. })) =
            parse(&["game", "edit", "42", "--category", "", "--play-time", "30"])
        else {
            panic!("expected game edit");
        };
        let update = fields.into_update(name);
        assert_eq!(update.category, Some(None));
        assert_eq!(update.play_time, Some(30));
        assert_eq!(update.name, None);
    }
}
