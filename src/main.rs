use clap::{crate_version, App, Arg};
use log::{error, info};
use quire::build::build_site;
use quire::config::Config;
use quire::logging::{format_elapsed_time, init_logging};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    let matches = App::new("quire")
        .version(crate_version!())
        .about("Builds a static blog from Markdown posts and a single template")
        .arg(
            Arg::with_name("directory")
                .help("The project directory")
                .default_value(".")
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Write pages to DIR instead of the configured output directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-minify")
                .long("no-minify")
                .help("Write the rendered HTML without minifying it"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Only log warnings and errors"),
        )
        .get_matches();

    init_logging(matches.is_present("quiet"));

    let directory = Path::new(matches.value_of("directory").unwrap_or("."));
    if let Err(e) = run(
        directory,
        matches.value_of("output").map(PathBuf::from),
        matches.is_present("no-minify"),
    ) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(directory: &Path, output: Option<PathBuf>, no_minify: bool) -> anyhow::Result<()> {
    let mut config = Config::from_directory(directory)?;
    config.apply_overrides(output, no_minify);

    let start = Instant::now();
    let summary = build_site(&config)?;
    info!(
        "built {} posts ({} pages) into {} in {}",
        summary.posts,
        summary.pages,
        config.output_directory.display(),
        format_elapsed_time(start.elapsed()),
    );
    Ok(())
}
