/*
This code is part of the geodecode library.
Authors: geodecode contributors
Created: 18/10/2026
Last Modified: 18/10/2026
License: MIT

Notes: Prints a summary of a Shapefile and its attribute table.
*/

use geodecode::common::utils::get_formatted_elapsed_time;
use geodecode::vector::{FieldDescriptor, ShapefileHeader};
use geodecode::{DecodeError, DecoderConfigs, Shapefile};
use log::{debug, error};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::path;
use std::process;
use std::time::Instant;

#[derive(Serialize)]
struct Summary<'a> {
    file: &'a str,
    header: &'a ShapefileHeader,
    num_records: usize,
    shape_counts: BTreeMap<String, usize>,
    total_parts: usize,
    total_points: usize,
    num_attribute_records: Option<usize>,
    fields: Vec<&'a FieldDescriptor>,
    projection: &'a str,
    warnings: Vec<String>,
}

fn main() {
    let sep: String = path::MAIN_SEPARATOR.to_string();
    let mut input_file = String::new();
    let mut working_directory = String::new();
    let mut configs_file = String::new();
    let mut verbose = false;
    let mut strict = false;
    let mut json = false;
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        eprintln!("Tool run with no parameters. Please see help (-h) for parameter descriptions.");
        process::exit(1);
    }
    for i in 0..args.len() {
        let arg = args[i].replace('"', "").replace('\'', "");
        let vec = arg.split('=').collect::<Vec<&str>>(); // in case an equals sign was used
        let keyval = vec.len() > 1;
        let flag = vec[0].to_lowercase();
        let value = || {
            if keyval {
                vec[1].to_string()
            } else {
                args.get(i + 1).cloned().unwrap_or_default()
            }
        };
        if flag == "-i" || flag == "--i" || flag == "--input" {
            input_file = value();
        } else if flag == "-wd" || flag == "--wd" {
            working_directory = value();
        } else if flag == "-configs" || flag == "--configs" {
            configs_file = value();
        } else if flag == "-v" || flag == "--verbose" {
            verbose = true;
        } else if flag == "-strict" || flag == "--strict" {
            strict = true;
        } else if flag == "-json" || flag == "--json" {
            json = true;
        } else if flag == "-h" || flag == "--help" || flag == "--h" {
            let mut s: String = "Help:\n".to_owned();
            s.push_str("-i       Input Shapefile (.shp). The .dbf and .prj files are read when present.\n");
            s.push_str("-wd      Optional working directory. If specified, filenames parameters need not include a full path.\n");
            s.push_str("-configs Optional JSON file of decoder settings.\n");
            s.push_str("-v       Verbose mode; logs each record as it is decoded.\n");
            s.push_str("-strict  Treat recoverable problems as errors.\n");
            s.push_str("-json    Print the summary as JSON.\n");
            s.push_str("-version Prints the tool version number.\n");
            s.push_str("-h       Prints help information.\n\n");
            s.push_str("Example usage:\n\n");
            s.push_str(&">> .*shapefile_info -wd *path*to*data* -i input.shp -v\n".replace('*', &sep));
            s.push_str(&">> .*shapefile_info -i *path*to*data*input.shp --json\n".replace('*', &sep));
            println!("{}", s);
            return;
        } else if flag == "-version" || flag == "--version" {
            const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
            println!("shapefile_info v{}", VERSION.unwrap_or("unknown"));
            return;
        }
    }

    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if input_file.is_empty() {
        error!("No input file specified (-i).");
        process::exit(1);
    }
    if !working_directory.is_empty() && !working_directory.ends_with(&sep) {
        working_directory.push_str(&sep);
    }
    if !input_file.contains(&sep) {
        input_file = format!("{}{}", working_directory, input_file);
    }

    if let Err(err) = run(&input_file, &configs_file, verbose, strict, json) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(
    input_file: &str,
    configs_file: &str,
    verbose: bool,
    strict: bool,
    json: bool,
) -> Result<(), DecodeError> {
    let start = Instant::now();
    let mut configs = if configs_file.is_empty() {
        DecoderConfigs::new()
    } else {
        DecoderConfigs::from_json_file(configs_file)?
    };
    configs.verbose_mode |= verbose;
    configs.strict_mode |= strict;
    debug!("decoder configs: {:?}", configs);

    let input = Shapefile::read_with_configs(input_file, &configs)?;

    let mut shape_counts = BTreeMap::new();
    for record in &input.records {
        *shape_counts.entry(record.shape_type().to_string()).or_insert(0) += 1;
    }
    let summary = Summary {
        file: &input.file_name,
        header: &input.header,
        num_records: input.num_records(),
        shape_counts,
        total_parts: input.get_total_num_parts(),
        total_points: input.get_total_num_points(),
        num_attribute_records: input.attributes.as_ref().map(|a| a.num_records()),
        fields: input
            .attributes
            .as_ref()
            .map(|a| a.header.fields.iter().collect())
            .unwrap_or_default(),
        projection: &input.projection,
        warnings: input.warnings.iter().map(|w| w.to_string()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("*****************************");
    println!("* Welcome to shapefile_info *");
    println!("*****************************");
    println!("\nFile: {}", summary.file);
    println!("{}", input.header);

    println!("\nShape Table");
    for (shape_type, count) in &summary.shape_counts {
        println!("{}: {}", shape_type, count);
    }
    println!("Total parts:  {}", summary.total_parts);
    println!("Total points: {}", summary.total_points);

    match &input.attributes {
        Some(table) => {
            println!("\nAttribute Table ({} records)", table.num_records());
            if let Some(date) = table.header.last_modified() {
                println!("Last modified: {}", date);
            }
            for (i, field) in table.header.fields.iter().enumerate() {
                println!("{}: {}", i + 1, field);
            }
        }
        None => println!("\nNo attribute table."),
    }

    if !input.projection.is_empty() {
        println!("\nProjection: {}", input.projection.trim());
    }

    if !summary.warnings.is_empty() {
        println!("\nWarnings");
        for w in &summary.warnings {
            println!("{}", w);
        }
    }

    println!("\nElapsed Time: {}", get_formatted_elapsed_time(start));
    Ok(())
}
