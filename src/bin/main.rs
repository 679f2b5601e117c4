use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use halal_core::app::{quote_of_the_day, App, Route};
use halal_core::catalog::{image_asset, Catalog, RecipeFilter, RECIPE_CATEGORIES};
use halal_core::core::types::{Day, MealSlot};
use halal_core::recipe::{CookingMode, Servings};
use halal_core::{FileStore, KeyValueStore, MemoryStore, PreferenceStore, ResetScope};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "HalalBite: halal recipes, meal planning and favorites")]
struct Args {
    /// Directory holding the preference store; defaults to the platform data dir
    #[arg(long, env = "HALALBITE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Load the datasets from this directory instead of the bundled copies
    #[arg(long, env = "HALALBITE_CATALOG_DIR", global = true)]
    catalog_dir: Option<PathBuf>,

    /// Keep preferences in memory only; nothing is written to disk
    #[arg(long, default_value_t, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recipes, optionally filtered
    Recipes {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long, default_value = "All")]
        category: String,
    },
    /// Show one recipe
    Recipe {
        id: String,
        /// Scale the ingredients to this many servings
        #[arg(long)]
        servings: Option<u32>,
        /// Walk the instructions step by step
        #[arg(long, default_value_t)]
        steps: bool,
    },
    /// Search the glossary
    Glossary {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Foods mentioned in the Quran and Sunnah
    Sunnah,
    /// Halal guidance
    Tips,
    /// Today's saying on eating
    Quote,
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },
    /// Weekly meal plan
    Plan {
        #[command(subcommand)]
        action: Option<PlanAction>,
    },
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    Onboarding {
        #[command(subcommand)]
        action: Option<OnboardingAction>,
    },
    /// Wipe saved data
    Reset {
        #[arg(value_enum)]
        scope: ResetArg,
    },
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    List,
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    Show,
    Set { day: Day, slot: MealSlot, id: String },
    Clear { day: Day, slot: MealSlot },
    Reset,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[derive(Subcommand, Debug)]
enum OnboardingAction {
    Status,
    Complete,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ResetArg {
    Onboarding,
    Favorites,
    MealPlan,
    All,
}

impl From<ResetArg> for ResetScope {
    fn from(arg: ResetArg) -> Self {
        match arg {
            ResetArg::Onboarding => ResetScope::Onboarding,
            ResetArg::Favorites => ResetScope::Favorites,
            ResetArg::MealPlan => ResetScope::MealPlan,
            ResetArg::All => ResetScope::All,
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let mut path = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .context("could not find a data or home directory; pass --data-dir")?;
    path.push("halalbite");
    Ok(path)
}

fn saved(ok: bool, what: &str) -> Result<()> {
    if !ok {
        bail!("could not save {what}; see the log for details");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let catalog = match &args.catalog_dir {
        Some(dir) => Catalog::from_dir(dir)
            .with_context(|| format!("loading catalog from {}", dir.display()))?,
        None => Catalog::bundled().context("loading bundled catalog")?,
    };

    if args.ephemeral {
        let mut app = App::new(catalog, PreferenceStore::new(MemoryStore::new()));
        return run(&mut app, args.command);
    }

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let store = FileStore::in_dir(&data_dir);
    log::debug!("preference store at {}", store.path().display());
    let mut app = App::new(catalog, PreferenceStore::new(store));
    run(&mut app, args.command)
}

fn run<S: KeyValueStore>(app: &mut App<S>, command: Command) -> Result<()> {
    if matches!(app.start_route(), Route::Onboarding)
        && !matches!(command, Command::Onboarding { .. } | Command::Reset { .. })
    {
        eprintln!(
            "{}",
            "Welcome to HalalBite! Run `halalbite onboarding complete` to skip this notice.".dim()
        );
    }

    match command {
        Command::Recipes { search, category } => {
            if !RECIPE_CATEGORIES.contains(&category.as_str()) {
                log::info!("category {category:?} is not one of the standard categories");
            }
            let filter = RecipeFilter::new(search, category);
            let recipes = app.catalog.filter_recipes(&filter);
            if recipes.is_empty() {
                println!("No recipes found.");
            }
            for recipe in recipes {
                let heart = if app.prefs.is_favorite(&recipe.key()) { "♥" } else { " " };
                println!(
                    "{heart} {:>3}  {}  {} min  [{}]",
                    recipe.id,
                    recipe.name.as_str().bold(),
                    recipe.prep_time,
                    recipe.categories.join(", ")
                );
            }
        }
        Command::Recipe { id, servings, steps } => {
            let Some(recipe) = app.catalog.recipe(&id) else {
                bail!("Recipe not found: {id}");
            };
            let mut portion = Servings::for_recipe(recipe);
            if let Some(n) = servings {
                portion.set(n);
            }
            let heart = if app.prefs.is_favorite(&id) { " ♥" } else { "" };
            println!("{}{}", recipe.name.as_str().bold().green(), heart);
            println!("{} min  [{}]  image: {}", recipe.prep_time, recipe.categories.join(", "), image_asset(&recipe.image));
            println!("\n{}\n", recipe.description);
            println!("{} (servings: {})", "Ingredients".bold(), portion.current());
            for line in portion.ingredient_lines(recipe) {
                println!("  • {line}");
            }
            println!("\n{}", "Instructions".bold());
            if steps {
                let mut mode = CookingMode::new(recipe);
                if mode.is_empty() {
                    println!("  {}", mode.progress().dim());
                }
                loop {
                    if let Some(step) = mode.current_step() {
                        println!("  {}: {step}", mode.progress().cyan());
                    }
                    if !mode.next_step() {
                        break;
                    }
                }
                mode.finish();
            } else {
                for (i, step) in recipe.instructions.iter().enumerate() {
                    println!("  {}. {step}", i + 1);
                }
            }
        }
        Command::Quote => {
            println!("{}", quote_of_the_day().italic());
        }
        Command::Glossary { search } => {
            for term in app.catalog.search_glossary(&search) {
                println!("{} ({})", term.term.as_str().bold(), term.arabic_term);
                println!("    {}", term.definition);
            }
        }
        Command::Sunnah => {
            for food in app.catalog.sunnah_foods() {
                println!("{} {}", food.name.as_str().bold().green(), food.arabic_name);
                println!("    Reference: {}", food.reference);
                println!("    Benefits: {}", food.benefits);
                let related = food.related_recipe_names();
                if !related.is_empty() {
                    println!("    Related recipes: {}", related.join(", "));
                }
            }
        }
        Command::Tips => {
            for tip in app.catalog.halal_tips() {
                println!("{}", tip.title.as_str().bold());
                println!("{}", tip.content);
                if let Some(hadith) = &tip.hadith {
                    println!("    \"{}\"", hadith.as_str().italic());
                }
                println!();
            }
        }
        Command::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            FavoritesAction::List => {
                let favorites = app.favorite_recipes();
                if favorites.is_empty() {
                    println!("No favorites yet.");
                }
                for recipe in favorites {
                    println!("♥ {:>3}  {}", recipe.id, recipe.name);
                }
            }
            FavoritesAction::Add { id } => {
                if app.catalog.recipe(&id).is_none() {
                    log::warn!("recipe {id} is not in the catalog");
                }
                saved(app.prefs.add_favorite(&id), "favorites")?;
                println!("Added {} to favorites.", app.catalog.recipe_name(&id));
            }
            FavoritesAction::Remove { id } => {
                saved(app.prefs.remove_favorite(&id), "favorites")?;
                println!("Removed {} from favorites.", app.catalog.recipe_name(&id));
            }
            FavoritesAction::Toggle { id } => match app.prefs.toggle_favorite(&id) {
                Some(true) => println!("♥ {}", app.catalog.recipe_name(&id)),
                Some(false) => println!("  {}", app.catalog.recipe_name(&id)),
                None => saved(false, "favorites")?,
            },
        },
        Command::Plan { action } => match action.unwrap_or(PlanAction::Show) {
            PlanAction::Show => {
                let mut current_day = None;
                for meal in app.meal_plan_view() {
                    if current_day != Some(meal.day) {
                        println!("{}", meal.day.as_str().bold());
                        current_day = Some(meal.day);
                    }
                    let name = meal.recipe_name.unwrap_or("-");
                    println!("  {:<10} {}", meal.slot.as_str(), name);
                }
            }
            PlanAction::Set { day, slot, id } => {
                if app.catalog.recipe(&id).is_none() {
                    log::warn!("recipe {id} is not in the catalog");
                }
                saved(app.prefs.set_meal(day, slot, &id), "meal plan")?;
                println!("{day} {slot}: {}", app.catalog.recipe_name(&id));
            }
            PlanAction::Clear { day, slot } => {
                saved(app.prefs.clear_meal(day, slot), "meal plan")?;
                println!("{day} {slot}: -");
            }
            PlanAction::Reset => {
                saved(app.prefs.reset_meal_plan(), "meal plan")?;
                println!("Meal plan cleared.");
            }
        },
        Command::Theme { action } => {
            let dark = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => app.prefs.is_dark_mode(),
                ThemeAction::Toggle => match app.prefs.toggle_dark_mode() {
                    Some(dark) => dark,
                    None => return saved(false, "theme"),
                },
                ThemeAction::Dark => {
                    saved(app.prefs.set_dark_mode(true), "theme")?;
                    true
                }
                ThemeAction::Light => {
                    saved(app.prefs.set_dark_mode(false), "theme")?;
                    false
                }
            };
            println!("Theme: {}", if dark { "dark" } else { "light" });
        }
        Command::Onboarding { action } => match action.unwrap_or(OnboardingAction::Status) {
            OnboardingAction::Status => {
                let done = app.prefs.is_onboarding_complete();
                println!("Onboarding {}", if done { "complete" } else { "pending" });
            }
            OnboardingAction::Complete => {
                saved(app.complete_onboarding(), "onboarding status")?;
                println!("Onboarding complete.");
            }
        },
        Command::Reset { scope } => {
            let (ok, route) = app.reset(scope.into());
            saved(ok, "reset")?;
            println!("Reset done.");
            if route == Some(Route::Onboarding) {
                println!("Onboarding will be shown again.");
            }
        }
    }
    Ok(())
}
