mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use passgen::{GenerateParams, Generator};

#[derive(Parser)]
#[command(
    name = "passgen",
    version,
    author,
    about = "Tool for password generation."
)]
struct Cli {
    /// Password length.
    #[arg(short, long)]
    length: usize,

    /// Do not output the trailing newline.
    #[arg(short, long)]
    no_trailing_newline: bool,

    /// Minimum letters count (lowercase or uppercase).
    #[arg(long, default_value_t = 0)]
    min_letters_count: usize,

    /// Exclude lowercase letters.
    #[arg(long)]
    exclude_lower: bool,

    /// Exclude uppercase letters.
    #[arg(long)]
    exclude_upper: bool,

    /// Exclude digits.
    #[arg(long)]
    exclude_digits: bool,

    /// Exclude symbols.
    #[arg(long)]
    exclude_symbols: bool,

    /// Lowercase letters dictionary.
    #[arg(long, value_name = "STRING")]
    lower: Option<String>,

    /// Uppercase letters dictionary.
    #[arg(long, value_name = "STRING")]
    upper: Option<String>,

    /// Digits dictionary.
    #[arg(long, value_name = "STRING")]
    digits: Option<String>,

    /// Symbols dictionary.
    #[arg(long, value_name = "STRING")]
    symbols: Option<String>,
}

impl Cli {
    fn params(&self) -> GenerateParams {
        GenerateParams {
            length: self.length,
            min_letters_count: self.min_letters_count,
            include_lower: !self.exclude_lower,
            include_upper: !self.exclude_upper,
            include_digits: !self.exclude_digits,
            include_symbols: !self.exclude_symbols,
        }
    }

    fn generator(&self) -> Generator {
        let mut generator = Generator::new();

        if let Some(lower) = dictionary_override(&self.lower) {
            generator.set_lower(lower);
        }
        if let Some(upper) = dictionary_override(&self.upper) {
            generator.set_upper(upper);
        }
        if let Some(digits) = dictionary_override(&self.digits) {
            generator.set_digits(digits);
        }
        if let Some(symbols) = dictionary_override(&self.symbols) {
            generator.set_symbols(symbols);
        }

        generator
    }
}

// An empty override keeps the default dictionary.
fn dictionary_override(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn run(cli: &Cli, options: &ui::DisplayOptions) -> Result<()> {
    let password = cli.generator().generate(&cli.params())?;

    let stdout = std::io::stdout();
    ui::write_password(&mut stdout.lock(), &password, options)
        .context("Failed to write password to stdout")?;

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let options = ui::DisplayOptions {
        color_support: ui::detect_color_support(),
        trailing_newline: !cli.no_trailing_newline,
    };

    if let Err(err) = run(&cli, &options) {
        ui::report_error(&err, &options);
        std::process::exit(1);
    }
}
