use clap::{Args, Parser, Subcommand};
use diet_core::{
    dishes::{parse_dishes, recent_dish_names, render_dishes, total_calories},
    nutrition::{target_calories, UserProfile},
    resolve_parser_config, Meal, MealEditor, MenuService,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "diet")]
#[command(about = "Diet menu text interpretation CLI")]
struct Cli {
    /// YAML file overriding parser keywords, bounds and placeholders
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a menu into breakfast, lunch and dinner fragments
    Sections {
        /// Menu text file (stdin when omitted or "-")
        input: Option<PathBuf>,
    },
    /// Estimate the day's calories
    Calories {
        /// Menu text file (stdin when omitted or "-")
        input: Option<PathBuf>,
    },
    /// List dish rows
    Dishes {
        /// Menu or meal text file (stdin when omitted or "-")
        input: Option<PathBuf>,
        /// Take the dishes of one meal from a full menu
        #[arg(long)]
        meal: Option<Meal>,
    },
    /// Show a menu as the dashboard would
    View {
        /// Menu text file (stdin when omitted or "-")
        input: Option<PathBuf>,
        /// Stored total; takes precedence over extraction when positive
        #[arg(long)]
        stored_calories: Option<u32>,
    },
    /// Recommended daily calories for a profile
    Target(ProfileArgs),
    /// Dish names used in past menus
    Recent {
        /// Past menu text files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// "Nam"/"male", anything else counts as female
    #[arg(long)]
    gender: String,
    #[arg(long)]
    age: u32,
    /// Height in centimetres
    #[arg(long)]
    height: f64,
    /// Weight in kilograms
    #[arg(long)]
    weight: f64,
    /// Activity label, e.g. "Vận động vừa"
    #[arg(long)]
    activity: Option<String>,
    /// Free-text dietary goal, e.g. "giảm cân"
    #[arg(long)]
    goal: Option<String>,
}

fn read_input(input: Option<&Path>) -> std::io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Arc::new(resolve_parser_config(cli.config.as_deref())?);
    let service = MenuService::new(cfg);

    match cli.command {
        Some(Commands::Sections { input }) => {
            let sections = service.sections(&read_input(input.as_deref())?);
            for (meal, fragment) in sections.iter() {
                println!("== {} ==", meal);
                println!("{}", fragment);
            }
        }
        Some(Commands::Calories { input }) => {
            let raw = read_input(input.as_deref())?;
            match service.calories_with_tier(&raw) {
                Some(found) => println!("{} kcal ({})", found.kcal, found.tier.as_str()),
                None => println!("{}", service.config().display().unknown_calories),
            }
        }
        Some(Commands::Dishes { input, meal }) => {
            let raw = read_input(input.as_deref())?;
            let dishes = match meal {
                Some(meal) => {
                    let sections = service.sections(&raw);
                    MealEditor::open(meal, sections.get(meal)).dishes().to_vec()
                }
                None => parse_dishes(&raw),
            };
            if dishes.is_empty() {
                println!("No dish lines found.");
            } else {
                println!("{}", render_dishes(&dishes));
                println!("Total: {} kcal", total_calories(&dishes));
            }
        }
        Some(Commands::View {
            input,
            stored_calories,
        }) => {
            let view = service.view(&read_input(input.as_deref())?, stored_calories);
            for (meal, fragment) in view.sections.iter() {
                println!("== {} ==", meal);
                println!("{}", fragment);
            }
            println!(
                "Calories: {} ({})",
                view.calories_display,
                view.calorie_source.as_str()
            );
        }
        Some(Commands::Target(args)) => {
            let profile = UserProfile {
                gender: Some(args.gender),
                age: Some(args.age),
                height_cm: Some(args.height),
                weight_kg: Some(args.weight),
                activity_level: args.activity,
                dietary_goal: args.goal,
                allergies: None,
            };
            match target_calories(&profile) {
                Some(target) => println!(
                    "{} kcal/day ({}; BMR {:.0}, TDEE {:.0})",
                    target.kcal,
                    target.goal.description(),
                    target.bmr,
                    target.tdee
                ),
                None => eprintln!("Profile is incomplete: age, height and weight must be positive"),
            }
        }
        Some(Commands::Recent { inputs }) => {
            for path in inputs {
                let names = recent_dish_names(&std::fs::read_to_string(&path)?);
                println!("{}: {}", path.display(), names.join(", "));
            }
        }
        None => {
            println!("Use 'diet --help' for commands");
        }
    }

    Ok(())
}
