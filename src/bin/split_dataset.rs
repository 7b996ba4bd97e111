use clap::Parser;
use json_sift::core::slice::write_slices;
use json_sift::utils::error::Result;
use json_sift::utils::logger;
use json_sift::utils::validation::{validate_path, Validate};
use json_sift::LocalStorage;

#[derive(Parser, Debug)]
#[command(name = "split-dataset")]
#[command(about = "Write the first N records of a JSON dataset to smaller files")]
struct Args {
    /// Source JSON file
    #[arg(short, long)]
    input: String,

    /// Slice sizes, comma separated
    #[arg(short, long, value_delimiter = ',', default_value = "100,1000")]
    sizes: Vec<usize>,

    /// Directory for the slices; defaults to the input's directory
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Validate for Args {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        if let Some(dir) = &self.output_dir {
            validate_path("output_dir", dir)?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose, false, None);

    if let Err(e) = args.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let storage = LocalStorage::default();
    match write_slices(&storage, &args.input, &args.sizes, args.output_dir.as_deref()).await {
        Ok(slices) => {
            let files: Vec<&str> = slices.iter().map(|s| s.path.as_str()).collect();
            println!("Generated files: {}", files.join(", "));
        }
        Err(e) => {
            tracing::error!("❌ Split failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
