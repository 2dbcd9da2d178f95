use crestplan::report::render_report;
use crestplan::share::{self, SharePayload};
use crestplan::utils::ConfigStore;
use crestplan::{build_info, plan_export, IndexCache, PlanOptions, Season};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Default)]
struct Args {
    file: Option<PathBuf>,
    ceiling: Option<u32>,
    maximal: bool,
    season: Option<PathBuf>,
    share: bool,
    decode: Option<String>,
    save_defaults: bool,
}

fn print_help() {
    println!("crestplan - crest upgrade planner\n");
    println!("Usage: crestplan [FILE] [options]\n");
    println!("Reads a character export from FILE, or stdin if omitted.\n");
    println!("Options:");
    println!("  --ceiling N      Highest item level you expect from free drops");
    println!("  --maximal        Plan every Hero item to max rank");
    println!("  --season FILE    Use a season definition from FILE");
    println!("  --share          Print a share link fragment instead of the plan");
    println!("  --decode TOKEN   Plan the export carried by a share link or token");
    println!("  --save-defaults  Remember --ceiling/--maximal for later runs");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'crestplan --help' for usage.");
    std::process::exit(2);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--ceiling" => {
                let value = iter
                    .next()
                    .unwrap_or_else(|| usage_error("--ceiling needs an item level"));
                match value.parse() {
                    Ok(ilvl) => args.ceiling = Some(ilvl),
                    Err(_) => usage_error(&format!("Invalid item level: {}", value)),
                }
            }
            "--maximal" => args.maximal = true,
            "--season" => {
                let path = iter
                    .next()
                    .unwrap_or_else(|| usage_error("--season needs a file path"));
                args.season = Some(PathBuf::from(path));
            }
            "--share" => args.share = true,
            "--decode" => {
                args.decode = Some(
                    iter.next()
                        .unwrap_or_else(|| usage_error("--decode needs a token")),
                );
            }
            "--save-defaults" => args.save_defaults = true,
            other if other.starts_with('-') && other != "-" => {
                usage_error(&format!("Unknown option: {}", other));
            }
            path => {
                if args.file.is_some() {
                    usage_error("Only one export file may be given");
                }
                args.file = Some(PathBuf::from(path));
            }
        }
    }
    args
}

fn read_export(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();

    let store = ConfigStore::home();
    let mut options = match &store {
        Ok(store) => store.load_options(),
        Err(e) => {
            log::warn!("saved defaults unavailable: {}", e);
            PlanOptions::default()
        }
    };
    if let Some(ceiling) = args.ceiling {
        options.drop_ceiling = Some(ceiling);
    }
    if args.maximal {
        options.maximal = true;
    }
    if args.save_defaults {
        let path = store?.save_options(&options)?;
        println!("Saved defaults to {}.", path.display());
    }

    let season = match &args.season {
        Some(path) => Season::from_file(path),
        None => Season::builtin(),
    };
    let season = match season {
        Ok(season) => season,
        Err(e) => {
            eprintln!("Invalid season data: {}", e);
            std::process::exit(1);
        }
    };

    let (text, options) = match &args.decode {
        Some(token) => match share::decode(token) {
            Some(payload) => {
                let shared = payload.options();
                let merged = PlanOptions {
                    drop_ceiling: args.ceiling.or(shared.drop_ceiling),
                    maximal: args.maximal || shared.maximal,
                };
                (payload.text, merged)
            }
            None => {
                eprintln!("Could not decode share token.");
                std::process::exit(1);
            }
        },
        None => (read_export(args.file.as_ref())?, options),
    };

    if args.share {
        println!("{}", share::encode(&SharePayload::new(text, &options))?);
        return Ok(());
    }

    let mut cache = IndexCache::new();
    let report = plan_export(&text, &season, &options, &mut cache);
    print!("{}", render_report(&report));
    Ok(())
}
