use clap::{Arg, ArgAction, Command};
use rln::link::error::LinkError;
use rln::link::link_batch::{link_into_directory, link_sources};
use rln::link::link_options::{FollowMode, LinkOptions};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let matches = Command::new("ln")
        .about("make links between files")
        .arg(
            Arg::new("symbolic")
                .short('s')
                .long("symbolic")
                .help("make symbolic links instead of hard links")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("remove existing destination files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("logical")
                .short('L')
                .long("logical")
                .help("dereference sources that are symbolic links (default)")
                .action(ArgAction::SetTrue)
                .overrides_with("physical"),
        )
        .arg(
            Arg::new("physical")
                .short('P')
                .long("physical")
                .help("make hard links directly to symbolic links")
                .action(ArgAction::SetTrue)
                .overrides_with("logical"),
        )
        .arg(
            Arg::new("backup")
                .short('b')
                .help("make a backup of each existing destination file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("suffix")
                .short('S')
                .long("suffix")
                .help("override the usual backup suffix")
                .value_name("SUFFIX")
                .default_value("~"),
        )
        .arg(
            Arg::new("relative")
                .short('r')
                .long("relative")
                .help("with -s, create links relative to link location")
                .requires("symbolic")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("print name of each linked file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("target-directory")
                .short('t')
                .long("target-directory")
                .help("specify the DIRECTORY in which to create the links")
                .value_name("DIRECTORY"),
        )
        .arg(
            Arg::new("operands")
                .required(true)
                .num_args(1..)
                .value_name("SOURCE"),
        )
        .try_get_matches()
        .unwrap_or_else(|err| {
            if err.use_stderr() {
                let _ = err.print();
                process::exit(1);
            }
            err.exit();
        });

    let opts = LinkOptions {
        symbolic: matches.get_flag("symbolic"),
        force: matches.get_flag("force"),
        follow: if matches.get_flag("physical") {
            FollowMode::Physical
        } else {
            FollowMode::Dereference
        },
        relative: matches.get_flag("relative"),
        backup: matches.get_flag("backup"),
        backup_suffix: matches.get_one::<String>("suffix").unwrap().clone(),
        verbose: matches.get_flag("verbose"),
    };

    let operands: Vec<PathBuf> = matches
        .get_many::<String>("operands")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();

    let outcome = if let Some(dir) = matches.get_one::<String>("target-directory") {
        link_into_directory(&operands, Path::new(dir), &opts)
    } else if operands.len() < 2 {
        Err(LinkError::MissingOperand)
    } else {
        let (sources, target) = operands.split_at(operands.len() - 1);
        link_sources(sources, &target[0], &opts)
    };

    let results = match outcome {
        Ok(results) => results,
        Err(err) => {
            eprintln!("ln: {err}");
            process::exit(1);
        }
    };

    let mut status = 0;
    for result in results {
        match result {
            Ok(destination) => {
                if opts.verbose {
                    println!("Created link: {}", destination.display());
                }
            }
            Err(err) => {
                eprintln!("ln: {err}");
                status |= 1;
            }
        }
    }
    process::exit(status);
}
