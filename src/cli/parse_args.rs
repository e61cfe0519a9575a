use otter_trace::config::Config;

use crate::config::CliConfig;

/// Parse CLI arguments to a [Config] struct or a [CliConfig] struct.
///
/// The last argument is taken to be the path to a trace, and is not examined.
///
/// If an unrecognised argument or invalid option is found an message is sent and the process is terminated.
pub fn parse_args(args: &[String], cfg: &mut Config, cli_options: &mut CliConfig) {
    'arg_examination: for arg in args.iter().skip(1).rev().skip(1) {
        let mut split = arg.split("=");
        match split.next() {
            Some("--events") => {
                cli_options.events = true;
            }

            Some("--quiet") => {
                cli_options.quiet = true;
            }

            Some("--finalisation_flag") => {
                let (min, max) = cfg.finalisation_flag.min_max();

                if let Some(request) = split.next() {
                    if let Ok(value) = request.parse::<bool>() {
                        if cfg.finalisation_flag.set(value).is_ok() {
                            continue 'arg_examination;
                        }
                    }
                }

                println!("finalisation_flag requires a value between {min} and {max}");
                std::process::exit(1);
            }

            Some(_) | None => {
                println!("Unable to parse argument: {arg:?}");
                std::process::exit(1);
            }
        }
    }
}
