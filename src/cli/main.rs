use std::collections::HashMap;

use config::CliConfig;
use otter_trace::{
    config::Config,
    reports::{trace::event::Label, Completion},
};
use parse_args::parse_args;
use read::open_trace;

mod config;
mod parse_args;
mod read;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let mut cli_options = CliConfig::default();
    let mut cfg = Config::default();

    let args: Vec<String> = std::env::args().collect();
    parse_args(&args, &mut cfg, &mut cli_options);

    let (path, mut reader) = match open_trace(args.iter().skip(1).last(), &cfg) {
        Ok(opened) => opened,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    let header = *reader.header();
    if !cli_options.quiet {
        println!("c Header size:      {}", reader.header_size());
        println!("c Restarts:         {}", header.restarts);
        println!("c Finalisation flag {}", header.finalisation_flag);
        println!("c Completion:       {}", reader.completion());
    }

    let mut counts: HashMap<char, usize> = HashMap::default();
    let mut event_count = 0;

    loop {
        let offset = reader.offset();
        match reader.next_event() {
            Ok(Some(event)) => {
                if cli_options.events {
                    println!("{offset} {event}");
                }
                *counts.entry(event.label().byte() as char).or_default() += 1;
                event_count += 1;
            }

            Ok(None) => break,

            Err(e) => {
                println!("c Error after {event_count} events: {e:?}");
                if reader.header_zeroed() {
                    println!(
                        "c The header is zeroed and so its layout was assumed, perhaps try --finalisation_flag={}",
                        !cfg.finalisation_flag.value
                    );
                }
                std::process::exit(2);
            }
        }
    }

    if !cli_options.quiet {
        for label in [
            Label::DecisionLevel,
            Label::Backtrack,
            Label::Branch,
            Label::Set,
            Label::Conflict,
            Label::Learn,
            Label::Unlearn,
            Label::Restart,
        ] {
            let label = label.byte() as char;
            println!("c {label} {}", counts.get(&label).copied().unwrap_or(0));
        }
    }

    if reader.completion() == Completion::Finalised && reader.restarts_read() != header.restarts {
        println!(
            "c Header notes {} restarts, but {} were read",
            header.restarts,
            reader.restarts_read()
        );
    }

    println!("s {} {path:?} {event_count} events", reader.completion());
}
