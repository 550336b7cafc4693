use clap::{Parser, Subcommand};
use log::{debug, error};
use recipe_finder::{
    origin_options, AppConfig, AppState, Catalog, Category, HistoryNavigator, IngredientExplorer,
    Origin, OriginFilter, Query, RecipeSummary, SearchDispatcher, SearchMode, SearchOutcome,
    SearchSession, SearchSlices,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "recipe-finder", version, about = "Search TheMealDB and TheCocktailDB")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single search
    Search {
        #[arg(short, long, default_value = "food")]
        category: Category,
        #[arg(short, long, default_value = "name")]
        mode: SearchMode,
        text: String,
    },
    /// List the origins meals can be filtered by
    Areas,
    /// Search meals, then keep only those from one origin
    Filter {
        #[arg(short, long)]
        area: String,
        #[arg(short, long, default_value = "first-letter")]
        mode: SearchMode,
        text: String,
    },
    /// List ingredients with their image URLs
    Ingredients {
        #[arg(short, long, default_value = "food")]
        category: Category,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List every recipe that uses an ingredient
    Explore {
        #[arg(short, long, default_value = "food")]
        category: Category,
        ingredient: String,
    },
    /// Read search text from stdin line by line; `:mode <name|ingredient|first-letter>` switches mode
    Interactive {
        #[arg(short, long, default_value = "food")]
        category: Category,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    debug!("{:?}", config);

    let catalog = Catalog::from_config(&config)?;
    let state = AppState::default();
    let navigator = Arc::new(HistoryNavigator::default());

    match cli.command {
        Command::Search {
            category,
            mode,
            text,
        } => {
            let dispatcher =
                SearchDispatcher::new(catalog, SearchSlices::from(&state), navigator.clone());
            let outcome = dispatcher.dispatch(category, &Query::new(text, mode)).await;
            print_outcome(&outcome, &state, cli.json)?;
        }
        Command::Areas => {
            for origin in origin_options(catalog.for_category(Category::Food)).await? {
                println!("{}", origin.label());
            }
        }
        Command::Filter { area, mode, text } => {
            let dispatcher =
                SearchDispatcher::new(catalog, SearchSlices::from(&state), navigator.clone());
            let outcome = dispatcher
                .dispatch(Category::Food, &Query::new(text, mode))
                .await;
            if let Some(notice) = outcome.notice() {
                eprintln!("{}", notice);
                return Ok(());
            }
            if let SearchOutcome::Redirected { recipe, .. } = &outcome {
                state.recipes.set(vec![recipe.clone()]);
            }

            let mut filter = OriginFilter::new(state.recipes.clone(), state.filtering.clone());
            filter.select(Origin::from(area.as_str()));
            print_recipes(&filter.view(), cli.json)?;
        }
        Command::Ingredients { category, limit } => {
            let explorer = IngredientExplorer::new(catalog, &config, state, navigator);
            let cards = explorer.ingredients(category).await?;
            let cards = &cards[..limit.unwrap_or(cards.len()).min(cards.len())];
            if cli.json {
                println!("{}", serde_json::to_string_pretty(cards)?);
            } else {
                for card in cards {
                    println!("{}\t{}", card.name, card.image_url);
                }
            }
        }
        Command::Explore {
            category,
            ingredient,
        } => {
            let explorer =
                IngredientExplorer::new(catalog, &config, state.clone(), navigator.clone());
            explorer.explore(category, &ingredient).await?;
            print_recipes(&state.recipes.get(), cli.json)?;
        }
        Command::Interactive { category } => {
            let dispatcher = Arc::new(SearchDispatcher::new(
                catalog,
                SearchSlices::from(&state),
                navigator.clone(),
            ));
            let mut session = SearchSession::new(category, dispatcher, config.debounce());
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            loop {
                tokio::select! {
                    line = lines.next_line() => match line? {
                        Some(line) => match line.strip_prefix(":mode ") {
                            Some(mode) => match mode.trim().parse::<SearchMode>() {
                                Ok(mode) => session.set_mode(mode),
                                Err(e) => error!("{}", e),
                            },
                            None => session.set_text(line),
                        },
                        None => break,
                    },
                    Some(outcome) = session.next_outcome() => {
                        print_outcome(&outcome, &state, cli.json)?;
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_outcome(
    outcome: &SearchOutcome,
    state: &AppState,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        SearchOutcome::Redirected { path, recipe } => {
            println!("{}", path);
            print_recipes(std::slice::from_ref(recipe), json)?;
        }
        SearchOutcome::Listed { .. } => print_recipes(&state.recipes.get(), json)?,
        other => {
            if let Some(notice) = other.notice() {
                eprintln!("{}", notice);
            }
        }
    }
    Ok(())
}

fn print_recipes(recipes: &[RecipeSummary], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipes)?);
        return Ok(());
    }
    for recipe in recipes {
        let detail = recipe
            .area
            .as_deref()
            .or(recipe.alcoholic.as_deref())
            .unwrap_or("");
        println!("{}\t{}\t{}", recipe.id, recipe.name, detail);
    }
    Ok(())
}
