mod dashboard;

use anyhow::{Context, Result};
use skyglass_core::{App, Config};
use skyglass_weather::Coordinates;

const USAGE: &str = "Usage: skyglass [CITY...] | --at LAT,LON | --recent | --forget CITY";

enum Command {
    Show(Option<String>),
    ShowAt(Coordinates),
    Recent,
    Forget(String),
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        None => Ok(Command::Show(None)),
        Some("--recent") => Ok(Command::Recent),
        Some("--forget") => {
            let name = args[1..].join(" ");
            anyhow::ensure!(!name.trim().is_empty(), "{}", USAGE);
            Ok(Command::Forget(name))
        }
        Some("--at") => {
            let raw = args.get(1).context(USAGE)?;
            let (lat, lon) = raw.split_once(',').context(USAGE)?;
            let latitude: f64 = lat.trim().parse().context("Invalid latitude")?;
            let longitude: f64 = lon.trim().parse().context("Invalid longitude")?;
            Ok(Command::ShowAt(Coordinates::new(latitude, longitude)))
        }
        Some(flag) if flag.starts_with("--") => anyhow::bail!("Unknown option {}\n{}", flag, USAGE),
        Some(_) => Ok(Command::Show(Some(args.join(" ")))),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skyglass_core::init()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let (config, _) = Config::load_validated()?;
    let locale = config.weather.locale;
    let mut app = App::new(config)?;

    tracing::info!("Skyglass started");

    let loaded = match command {
        Command::Recent => {
            for city in app.recent_cities() {
                println!("{}  ({})", city.name, city.coordinates().label());
            }
            return Ok(());
        }
        Command::Forget(name) => {
            if app.forget_city(&name)? {
                println!("Removed {}", name);
            } else {
                println!("{} is not in the recent list", name);
            }
            return Ok(());
        }
        Command::ShowAt(coords) => app.load_location(coords).await,
        Command::Show(Some(query)) => match app.find_city(&query).await {
            Ok(city) => app.load_city(city).await,
            Err(e) => Err(e),
        },
        Command::Show(None) => {
            let city = app.startup_city();
            app.load_city(city).await
        }
    };

    match loaded {
        Ok(view) => {
            let now = view.weather.city_now();
            print!("{}", dashboard::render(&view, locale, now));
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            Err(e.into())
        }
    }
}
