use photo_gps::{args::ProgramArgs, folder, processor::run};

use std::{io::{stdout, Write}, process::exit};
use clap::Parser;
use log::{error, LevelFilter};

fn main() {
    let args = ProgramArgs::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .init();

    let input = match args.folder {
        Some(input) => input,
        None => {
            println!("Please provide the folder path.");
            println!("Usage: photo_gps /path/to/folder");
            exit(1);
        },
    };

    if folder::validate(&input).is_err() {
        println!("The provided path is not a directory.");
        exit(1);
    }

    let stdout = stdout();
    let mut out = stdout.lock();

    if let Err(e) = run(&input, &mut out).and_then(|_| out.flush().map_err(Into::into)) {
        error!("Error: {}", e);
        exit(1);
    }
}
