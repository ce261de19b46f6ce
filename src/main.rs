use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use std::io::{self, BufRead};

use inputmask::{AffinityStrategy, CaretString, Mask, pick_mask};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mask format, e.g. "[00]{-}[00]"
    #[arg(value_name = "FORMAT")]
    format: String,

    /// Text to format; reads lines from stdin when absent
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Caret position in TEXT (defaults to the end)
    #[arg(short = 'c', long)]
    caret: Option<usize>,

    /// Append trailing literals when the caret is at the end
    #[arg(short = 'a', long)]
    autocomplete: bool,

    /// Alternative format to compete with FORMAT
    #[arg(short = 'f', long = "affine", value_name = "FORMAT")]
    affine: Vec<String>,

    /// How to choose between FORMAT and affine formats
    #[arg(short = 's', long, value_enum, default_value_t = Strategy::WholeString)]
    strategy: Strategy,

    /// Print the placeholder and length bounds of each mask
    #[arg(short = 'i', long)]
    info: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    WholeString,
    Prefix,
    Capacity,
    ExtractedValueCapacity,
}

impl From<Strategy> for AffinityStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::WholeString => AffinityStrategy::WholeString,
            Strategy::Prefix => AffinityStrategy::Prefix,
            Strategy::Capacity => AffinityStrategy::Capacity,
            Strategy::ExtractedValueCapacity => AffinityStrategy::ExtractedValueCapacity,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let primary = Mask::get_or_create(&args.format)
        .with_context(|| format!("invalid format {:?}", args.format))?;
    let affine = args
        .affine
        .iter()
        .map(|f| Mask::get_or_create(f).with_context(|| format!("invalid format {f:?}")))
        .collect::<Result<Vec<_>>>()?;

    if args.info {
        for mask in std::iter::once(&primary).chain(&affine) {
            println!(
                "{}: placeholder {:?}, text {}..{}, value {}..{}",
                mask.format(),
                mask.placeholder(),
                mask.min_text_length(),
                mask.max_text_length(),
                mask.min_value_length(),
                mask.max_value_length(),
            );
        }
    }

    let texts = match args.text {
        Some(text) => {
            let caret = args.caret.unwrap_or_else(|| text.chars().count());
            vec![CaretString::new(text, caret)]
        }
        None => io::stdin()
            .lock()
            .lines()
            .map_ok(CaretString::at_end)
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read stdin")?,
    };

    for text in texts {
        let mask = pick_mask(
            &primary,
            affine.iter().map(|m| m.as_ref()),
            &text,
            args.autocomplete,
            args.strategy.into(),
        );
        let result = mask.apply(&text, args.autocomplete);
        println!(
            "{}",
            [
                format!("{:?}", result.formatted.string),
                format!("caret={}", result.formatted.caret),
                format!("value={:?}", result.extracted_value),
                format!("affinity={}", result.affinity),
                format!("complete={}", result.complete),
                format!("mask={}", mask.format()),
            ]
            .iter()
            .join(" ")
        );
    }
    Ok(())
}
