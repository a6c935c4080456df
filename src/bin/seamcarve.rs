// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg, ArgMatches};
use failure::{bail, Error};
use seamcarve::{calculate_energy, persist, CarveConfig, SeamCarver};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let seams = value_t!(matches, "seams", u32)?;
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let pattern = matches.value_of("intermediate");
    if let Some(pattern) = pattern {
        if !pattern.contains("{}") {
            bail!("intermediate pattern {:?} has no {{}} for the pass number", pattern);
        }
    }

    let image = persist::load(input)?;
    info!(input, width = image.width(), height = image.height(), seams, "carving");

    if let Some(path) = matches.value_of("energy") {
        persist::save_energy(&calculate_energy(&image)?, path)?;
    }

    let carved = SeamCarver::new(image).carve_with(&CarveConfig::with_seams(seams), |pass, img| {
        match pattern {
            Some(pattern) => persist::save(img, pattern.replace("{}", &pass.to_string())),
            None => Ok(()),
        }
    })?;

    persist::save(&carved, output)?;
    info!(output, width = carved.width(), height = carved.height(), "done");
    Ok(())
}

fn main() {
    let matches = App::new("seamcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Narrow an image by carving out its lowest-energy vertical seams")
        .arg(
            Arg::with_name("input")
                .help("The image to carve (.bin raw raster, or any format the image crate reads)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("seams")
                .help("How many columns to remove")
                .short("n")
                .long("seams")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("energy")
                .help("Also write the input's energy map here")
                .long("energy")
                .value_name("PATH")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("intermediate")
                .help("Write the image after every pass; {} becomes the pass number, e.g. img{}.bin")
                .long("intermediate")
                .value_name("PATTERN")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log every pipeline stage")
                .short("v")
                .long("verbose"),
        )
        .get_matches();

    init_logging(matches.is_present("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        process::exit(1);
    }
}
