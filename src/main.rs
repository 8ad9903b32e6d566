use anyhow::Context;
use chrono::{Days, NaiveDate};
use clap::Parser;
use snu_menu::core::render::{current_meal_now, menu_text};
use snu_menu::domain::ports::MenuConfigProvider;
use snu_menu::utils::logger::{self, LogFormat};
use snu_menu::utils::validation::Validate;
use snu_menu::{CliConfig, MealKind, MenuCache, MenuConfig, ReqwestTransport, ScraperExtractor};
use tokio::io::{AsyncBufReadExt, BufReader};

type Cache = MenuCache<ReqwestTransport, ScraperExtractor>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let format = if args.log_json { LogFormat::Json } else { LogFormat::Compact };
    logger::init_logger(format, args.verbose);

    let mut config = MenuConfig::from_file(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    args.apply_overrides(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("{}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let transport = if config.accept_invalid_certs {
        tracing::warn!("TLS certificate verification disabled");
        ReqwestTransport::with_invalid_certs_accepted()?
    } else {
        ReqwestTransport::new()
    };
    let cache = MenuCache::new(transport, ScraperExtractor::new(), &config);

    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let meal = args.meal.unwrap_or_else(current_meal_now);
    let prefetch = config.prefetch_days();

    if args.browse {
        return browse(&cache, date, meal, prefetch).await;
    }

    let menu = match cache.get_menu(date, prefetch).await {
        Ok(menu) => menu,
        Err(e) => {
            tracing::error!("Menu fetch for {} failed: {}", date, e);
            eprintln!("{}", e.user_friendly_message());
            eprintln!("{}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&menu)?);
    } else {
        print_menu(date, meal, &menu_text(&menu, meal));
    }

    Ok(())
}

fn print_menu(date: NaiveDate, meal: MealKind, text: &str) {
    println!("{} {}\n", date, meal.korean_label());
    if text.is_empty() {
        println!("(no menu)");
    } else {
        print!("{}", text);
    }
}

/// `n`/`p` step a day, `b`/`l`/`d` pick a meal, `q` quits.
async fn browse(cache: &Cache, mut date: NaiveDate, mut meal: MealKind, prefetch: u32) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match cache.get_menu(date, prefetch).await {
            Ok(menu) => print_menu(date, meal, &menu_text(&menu, meal)),
            Err(e) => {
                tracing::warn!("Menu fetch for {} failed: {}", date, e);
                println!("{} {}\n\n{}", date, meal.korean_label(), e.user_friendly_message());
            }
        }
        println!("[n]ext [p]rev [b]reakfast [l]unch [d]inner [q]uit");

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        match line.trim() {
            "n" => date = date.checked_add_days(Days::new(1)).context("date out of range")?,
            "p" => date = date.checked_sub_days(Days::new(1)).context("date out of range")?,
            "b" => meal = MealKind::Breakfast,
            "l" => meal = MealKind::Lunch,
            "d" => meal = MealKind::Dinner,
            "q" => return Ok(()),
            other => println!("unknown command: {}", other),
        }
    }
}
