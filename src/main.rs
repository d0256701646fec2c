use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use phpantom_reflection::{
    Config, NamedReflectable, PropertyEntity, Reflector, SingleFileSourceLocator, modifier_names,
};

/// Inspect PHP classes and properties without running them.
#[derive(Parser, Debug)]
#[command(name = "phpantom-reflect", version, about)]
struct Cli {
    /// Project root (where composer.json and .phpantom-reflect.toml live).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Extra PHP file to search, consulted before anything else.
    #[arg(long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Do not use composer.json autoloading.
    #[arg(long)]
    no_composer: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Fully-qualified class name.
    class: String,

    /// Property name, with or without `$`.
    property: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> phpantom_reflection::Result<()> {
    let mut config = Config::load(&cli.root)?;
    if cli.no_composer {
        config.locator.composer = false;
    }

    let mut locator = config.build_locator(&cli.root)?;
    // Files given on the command line are relative to the working
    // directory, not the root, and take precedence.
    if !cli.files.is_empty() {
        let mut chained = phpantom_reflection::AggregateSourceLocator::new();
        for file in &cli.files {
            chained.push(Box::new(SingleFileSourceLocator::new(file)));
        }
        chained.push(Box::new(locator));
        locator = chained;
    }

    let reflector = Reflector::new(locator);
    let class = reflector.reflect(&cli.class)?;

    let Some(property_name) = &cli.property else {
        for property in class.get_properties()? {
            println!("{}", property);
        }
        return Ok(());
    };

    let property = class.get_property(property_name)?;
    print_property(&property);
    Ok(())
}

fn print_property(property: &PropertyEntity<'_>) {
    println!("{}", property);
    println!("declaring class: {}", property.get_declaring_class_name());
    println!(
        "modifiers:       {} ({})",
        property.get_modifiers(),
        modifier_names(property.get_modifiers()).join(" ")
    );
    println!(
        "lines:           {}-{}",
        property.get_start_line(),
        property.get_end_line()
    );
    if let Some(hint) = property.get_type_hint() {
        println!("type hint:       {}", hint);
    }
    match property.get_default_value() {
        Ok(Some(value)) => println!("default value:   {:?}", value),
        Ok(None) => println!("default value:   (none)"),
        Err(e) => println!("default value:   ({})", e),
    }
    let types = property.get_doc_block_types();
    if !types.is_empty() {
        let rendered: Vec<String> = types.iter().map(ToString::to_string).collect();
        println!("doc types:       {}", rendered.join("|"));
    }
    let doc = property.get_doc_comment();
    if !doc.is_empty() {
        println!("doc comment:\n{}", doc);
    }
}
