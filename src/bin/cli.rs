//! ptbr-g2p CLI — transcribe a single word or a word list.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use ptbr_g2p::{is_valid_word, transcribe, Algorithm};

#[derive(Parser)]
#[command(
    name = "ptbr-g2p",
    about = "Grapheme-to-phoneme transcriber for Brazilian Portuguese",
    version,
)]
struct Cli {
    /// Syllabification algorithm
    #[arg(short = 's', long = "separator", default_value = "silva", value_parser = ["silva", "ceci"])]
    separator: String,

    /// Single word to transcribe
    #[arg(short = 'w', long = "word")]
    word: Option<String>,

    /// Text file with one word per line; results go to output.txt
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,
}

fn format_line(word: &str, algorithm: Algorithm) -> Result<String> {
    let t = transcribe(word, algorithm)
        .with_context(|| format!("failed to transcribe {:?}", word))?;
    Ok(format!("{} -> [{}] | {}", word, t.ipa, t.annotated))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let algorithm = Algorithm::from_str(&cli.separator);

    match (cli.word, cli.file) {
        (Some(word), None) => {
            let word = word.to_lowercase();
            if !is_valid_word(&word) {
                bail!("{:?} is not a single Portuguese word", word);
            }
            println!("\n{}\n", format_line(&word, algorithm)?);
        }
        (None, Some(path)) => {
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                bail!("{} is not a text file", path.display());
            }
            let text = fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let mut out = fs::File::create("output.txt").context("cannot create output.txt")?;
            for line in text.lines() {
                let word = line.trim().to_lowercase();
                if word.is_empty() {
                    continue;
                }
                if !is_valid_word(&word) {
                    log::warn!("skipping {:?}", word);
                    continue;
                }
                writeln!(out, "{}", format_line(&word, algorithm)?)?;
            }
            println!("\nDone. Open output.txt to see the result.\n");
        }
        (Some(_), Some(_)) => bail!("pass either --word or --file, not both"),
        (None, None) => bail!("pass --word WORD or --file PATH"),
    }

    Ok(())
}
