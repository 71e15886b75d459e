use factor_path::graph::{components, Tile};
use factor_path::improve::improve_until_stuck;
use factor_path::search::{run_search, SearchConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// How many fruitless improvement passes to tolerate before giving up.
const IMPROVE_PATIENCE: u32 = 10_000;

enum Mode {
    Search,
    Improve(Vec<Tile>),
    Groups(Vec<Tile>),
}

fn main() {
    let mut cfg = SearchConfig::default();
    let mut mode = Mode::Search;
    let mut invert: Option<usize> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--n" | "-n" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.n = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--notify" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.notify_every = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--invert" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                invert = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--improve" | "-s" => {
                mode = Mode::Improve(parse_tiles(&args[i + 1..]));
                i = args.len();
            }
            "--groups" => {
                mode = Mode::Groups(parse_tiles(&args[i + 1..]));
                i = args.len();
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    match mode {
        Mode::Search => {
            if let Err(e) = run_search(&cfg) {
                eprintln!("Error: {e}");
                std::process::exit(2);
            }
        }
        Mode::Improve(tiles) => run_improve(&cfg, &tiles),
        Mode::Groups(mut tiles) => {
            if let Some(n) = invert {
                tiles = (1..=n).filter(|t| !tiles.contains(t)).collect();
                println!("inverted to {}", join(&tiles));
            }
            match components(&tiles) {
                Ok(groups) => {
                    for group in groups {
                        println!("{}", join(&group));
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_improve(cfg: &SearchConfig, tiles: &[Tile]) {
    let seed = cfg.seed.unwrap_or_else(rand::random::<u64>);
    let mut rng = SmallRng::seed_from_u64(seed);
    println!("given [{}]{}", tiles.len(), join(tiles));
    let result = improve_until_stuck(tiles, cfg.n, &mut rng, IMPROVE_PATIENCE, |p| {
        println!("improved to [{}]{}", p.len(), join(p));
    });
    match result {
        Ok(best) => println!("final [{}]{}", best.len(), join(&best)),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_tiles(raw: &[String]) -> Vec<Tile> {
    if raw.is_empty() {
        usage_and_exit(2);
    }
    raw.iter()
        .map(|s| s.parse().unwrap_or_else(|_| usage_and_exit(2)))
        .collect()
}

fn join(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  factor-path [--n SIZE] [--seed SEED] [--notify EVERY]\n  factor-path [--n SIZE] [--seed SEED] --improve TILE...\n  factor-path [--invert SIZE] --groups TILE...\n\nOptions:\n  --n SIZE        Board size; tiles are 1..=SIZE (default: 100)\n  --seed SEED     Deterministic seed (default: random, echoed at startup)\n  --notify EVERY  Print a progress line every EVERY dead ends\n  --improve T...  Lengthen the given path by inserting unused tiles\n  --groups T...   Split the given tiles into divisibility-connected groups\n  --invert SIZE   With --groups: use the complement of the tiles in 1..=SIZE\n"
    );
    std::process::exit(code)
}
