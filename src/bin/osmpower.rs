extern crate clap;

use clap::{value_t, App, AppSettings, Arg, SubCommand};

use osmpower::defaultlogger::register_messenger_default;
use osmpower::fetch::{run_fetch, AREA_QUERY_TIMEOUT};
use osmpower::fetch_bbox::{run_fetch_bbox, BBOX_QUERY_TIMEOUT};

fn main() {
    let app = App::new("osmpower")
        .version("0.1")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("fetch")
                .about("fetches power plant and generator features for a named area, writing a shapefile and a csv attribute table")
                .arg(Arg::with_name("AREA").default_value("Vienna").help("name of the area to query"))
                .arg(Arg::with_name("PATH").short("-p").long("--path").takes_value(true).default_value(".").help("directory the output directory is created in"))
                .arg(Arg::with_name("DEDUP").short("-d").long("--dedup").help("drops elements already seen in an earlier selector pass"))
                .arg(Arg::with_name("TIMEOUT").short("-t").long("--timeout").takes_value(true).help("query timeout in seconds"))
                .arg(Arg::with_name("VERBOSE").short("-v").long("--verbose").help("logs per element skips"))
        )
        .subcommand(
            SubCommand::with_name("fetch-bbox")
                .about("fetches solar park outlines within the bounding box of an existing shapefile")
                .arg(Arg::with_name("SHAPE").required(true).help("source shapefile whose bounds select the query region"))
                .arg(Arg::with_name("TIMEOUT").short("-t").long("--timeout").takes_value(true).help("query timeout in seconds"))
                .arg(Arg::with_name("VERBOSE").short("-v").long("--verbose").help("logs per element skips"))
        );

    let res = match app.get_matches().subcommand() {
        ("fetch", Some(fetch)) => {
            register_messenger_default(fetch.is_present("VERBOSE"))
                .expect("failed to register messenger");
            run_fetch(
                fetch.value_of("AREA").unwrap(),
                fetch.value_of("PATH").unwrap(),
                fetch.is_present("DEDUP"),
                value_t!(fetch, "TIMEOUT", u64).unwrap_or(AREA_QUERY_TIMEOUT),
            )
        }
        ("fetch-bbox", Some(bbox)) => {
            register_messenger_default(bbox.is_present("VERBOSE"))
                .expect("failed to register messenger");
            run_fetch_bbox(
                bbox.value_of("SHAPE").unwrap(),
                value_t!(bbox, "TIMEOUT", u64).unwrap_or(BBOX_QUERY_TIMEOUT),
            )
        }
        _ => Ok(()),
    };

    if let Err(e) = res {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
