//! dynartic: automatically generated, beautiful yet abstract art
//!
//! Think of it as Lorem Ipsum for images.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use dynartic::output::{self, AlphaMode};
use dynartic::{Recipe, Rng};

const DEFAULT_OUTPUT: &str = "output.png";

/// Command line options
#[derive(Debug)]
struct Options {
    width: Option<u32>,
    height: Option<u32>,
    seed: Option<u64>,
    output: PathBuf,
    recipe: Option<PathBuf>,
    save_recipe: Option<PathBuf>,
    alpha: AlphaMode,
}

fn print_help() {
    println!("Usage: dynartic WIDTH HEIGHT [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --seed N, -s N          Seed for every random choice (default: clock)");
    println!("  --output PATH, -o PATH  PNG to write (default: {})", DEFAULT_OUTPUT);
    println!("  --recipe PATH           Replay a saved recipe instead of picking one");
    println!("  --save-recipe PATH      Write the recipe that was rendered as JSON");
    println!("  --keep-alpha            Keep the alpha channel in the PNG");
    println!("  --help                  Show this help message");
}

/// Parse a canvas dimension; fractional input is floored
fn parse_dimension(name: &str, raw: &str) -> Result<u32> {
    let value: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a number, got {:?}", name, raw))?;
    let value = value.floor();
    if !(1.0..=u32::MAX as f64).contains(&value) {
        bail!("{} must be at least 1, got {}", name, raw);
    }
    Ok(value as u32)
}

/// Fetch the value following a flag
fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", flag))
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Options> {
    let mut opts = Options {
        width: None,
        height: None,
        seed: None,
        output: PathBuf::from(DEFAULT_OUTPUT),
        recipe: None,
        save_recipe: None,
        alpha: AlphaMode::Opaque,
    };
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                let raw = flag_value(args, i, "--seed")?;
                opts.seed = Some(
                    raw.parse()
                        .with_context(|| format!("--seed must be an integer, got {:?}", raw))?,
                );
                i += 1;
            },
            "--output" | "-o" => {
                opts.output = PathBuf::from(flag_value(args, i, "--output")?);
                i += 1;
            },
            "--recipe" => {
                opts.recipe = Some(PathBuf::from(flag_value(args, i, "--recipe")?));
                i += 1;
            },
            "--save-recipe" => {
                opts.save_recipe = Some(PathBuf::from(flag_value(args, i, "--save-recipe")?));
                i += 1;
            },
            "--keep-alpha" => opts.alpha = AlphaMode::Preserve,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            },
            other if other.starts_with("--") => bail!("unknown option {}", other),
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    match positional.as_slice() {
        [] => {},
        [w, h] => {
            opts.width = Some(parse_dimension("WIDTH", w)?);
            opts.height = Some(parse_dimension("HEIGHT", h)?);
        },
        _ => bail!("expected WIDTH and HEIGHT, got {} positional arguments", positional.len()),
    }
    if opts.recipe.is_none() && opts.width.is_none() {
        bail!("WIDTH and HEIGHT are required unless --recipe is given (see --help)");
    }
    Ok(opts)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args)?;

    let recipe = match (&opts.recipe, opts.width, opts.height) {
        (Some(path), _, _) => Recipe::load(path)
            .with_context(|| format!("loading recipe {}", path.display()))?,
        (None, Some(width), Some(height)) => {
            let seed = opts.seed.unwrap_or_else(Rng::seed_from_clock);
            Recipe::random(width, height, seed)
        },
        _ => bail!("WIDTH and HEIGHT are required"),
    };
    info!(
        "rendering {}x{} with seed {} ({} steps)",
        recipe.width,
        recipe.height,
        recipe.seed,
        recipe.steps.len()
    );

    let pixels = recipe.render().context("rendering recipe")?;

    if let Some(path) = &opts.save_recipe {
        recipe
            .save(path)
            .with_context(|| format!("saving recipe {}", path.display()))?;
        info!("recipe saved to {}", path.display());
    }

    output::save_png(&opts.output, &pixels, recipe.width, recipe.height, opts.alpha)
        .with_context(|| format!("writing {}", opts.output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_dimensions() {
        let opts = parse_args(&args(&["640", "480.9"])).unwrap();
        assert_eq!(opts.width, Some(640));
        assert_eq!(opts.height, Some(480));
        assert_eq!(opts.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(opts.alpha, AlphaMode::Opaque);
    }

    #[test]
    fn test_flags() {
        let opts = parse_args(&args(&[
            "32",
            "16",
            "--seed",
            "9",
            "-o",
            "art.png",
            "--keep-alpha",
            "--save-recipe",
            "art.json",
        ]))
        .unwrap();
        assert_eq!(opts.seed, Some(9));
        assert_eq!(opts.output, PathBuf::from("art.png"));
        assert_eq!(opts.alpha, AlphaMode::Preserve);
        assert_eq!(opts.save_recipe, Some(PathBuf::from("art.json")));
    }

    #[test]
    fn test_recipe_without_dimensions() {
        let opts = parse_args(&args(&["--recipe", "r.json"])).unwrap();
        assert_eq!(opts.recipe, Some(PathBuf::from("r.json")));
        assert_eq!(opts.width, None);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["0", "10"])).is_err());
        assert!(parse_args(&args(&["abc", "10"])).is_err());
        assert!(parse_args(&args(&["10"])).is_err());
        assert!(parse_args(&args(&["10", "10", "--seed"])).is_err());
        assert!(parse_args(&args(&["10", "10", "--bogus"])).is_err());
    }
}
