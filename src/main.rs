use {
  anyhow::Context,
  clap::Parser,
  extract_article::{Document, Extractor, read_html, write_json},
  std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process,
  },
  tracing_subscriber::EnvFilter,
};

const OUTPUT_SUFFIX: &str = ".simple.json";

#[derive(Parser)]
#[command(name = "extract-article")]
#[command(about = "Extract the readable article from an HTML file as JSON", long_about = None)]
struct Arguments {
  /// Path to the HTML file to read
  #[arg(short = 'i', value_name = "FILE")]
  input: Option<PathBuf>,
  /// Where to write the JSON result [default: <FILE>.simple.json]
  #[arg(short = 'o', value_name = "FILE")]
  output: Option<PathBuf>,
}

impl Arguments {
  fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| {
      let mut path = OsString::from(input.as_os_str());
      path.push(OUTPUT_SUFFIX);
      PathBuf::from(path)
    })
  }

  fn run(self) -> Result {
    let Some(input) = self.input else {
      println!("Input file required.");
      process::exit(1);
    };

    let output = Self::output_path(&input, self.output);

    let html = read_html(&input)
      .with_context(|| format!("failed to read `{}`", input.display()))?;

    let document = Document::parse(&html);

    let article = Extractor::default()
      .extract(&document)
      .context("failed to extract article")?;

    tracing::info!(
      found = article.is_some(),
      output = %output.display(),
      "writing result"
    );

    write_json(article.as_ref(), &output)
      .with_context(|| format!("failed to write `{}`", output.display()))?;

    Ok(())
  }
}

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
    )
    .with_writer(std::io::stderr)
    .init();

  if let Err(error) = Arguments::parse().run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}
