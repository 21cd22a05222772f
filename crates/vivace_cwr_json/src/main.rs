use std::fs;
use std::process;
use std::time::Instant;

use log::info;
use vivace_cwr::{parse_cwr, report_summary, LookupManager, ParseOptions};
use vivace_cwr_cli::{get_value, init_logging_and_parse_args, read_stdin_or_exit, BaseConfig};

fn parse_args() -> Result<BaseConfig, String> {
    let mut config = BaseConfig::new();
    let mut parser = lexopt::Parser::from_env();

    while let Ok(Some(arg)) = parser.next() {
        match arg {
            lexopt::Arg::Long("version") => {
                let version_str = get_value(&mut parser, "version")?;
                config.set_cwr_version(&version_str)?;
            }
            lexopt::Arg::Long("no-validate") => {
                config.validate = false;
            }
            lexopt::Arg::Long("output") => {
                config.output_file = Some(get_value(&mut parser, "output")?);
            }
            lexopt::Arg::Value(val) => {
                config.set_input_file(val.to_string_lossy().to_string())?;
            }
            lexopt::Arg::Short('h') | lexopt::Arg::Long("help") => {
                print_help();
                process::exit(0);
            }
            _ => {
                return Err("Unknown argument".to_string());
            }
        }
    }

    Ok(config)
}

fn main() {
    let config = init_logging_and_parse_args(parse_args);
    let start_time = Instant::now();

    let input = match &config.input_file {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading '{}': {}", path, e);
                process::exit(2);
            }
        },
        None => {
            info!("Reading CWR data from stdin");
            read_stdin_or_exit()
        }
    };

    let options = ParseOptions {
        version_hint: config.cwr_version,
        validate: config.validate,
        ..ParseOptions::default()
    };
    let lookups = LookupManager::new();
    let report = parse_cwr(&input, &lookups, &options);

    let result = match &config.output_file {
        Some(path) => fs::File::create(path)
            .map_err(vivace_cwr::CwrError::Io)
            .and_then(|file| vivace_cwr_json::write_report_json(&report, file)),
        None => vivace_cwr_json::write_report_json(&report, std::io::stdout().lock()),
    };
    if let Err(e) = result {
        eprintln!("Error writing output: {}", e);
        process::exit(2);
    }

    eprintln!("{}", report_summary(&report));
    info!("processed in {:.2?}", start_time.elapsed());

    if !report.is_valid {
        process::exit(1);
    }
}

fn print_help() {
    eprintln!("Usage: cwr-json [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                 CWR file to parse. Reads from stdin when omitted");
    eprintln!();
    eprintln!("Options:");
    eprintln!("      --version <v>      CWR version (2.1 or 2.2). Inferred from the HDR record if not specified");
    eprintln!("      --no-validate      Skip the validation passes; structural parsing still runs");
    eprintln!("      --output <path>    Write the JSON report to a file instead of stdout");
    eprintln!("  -h, --help             Show this help message");
    eprintln!();
    eprintln!("Exit codes: 0 valid, 1 parse/validation findings, 2 host error");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  cwr-json input.cwr                        # Parse and validate a CWR file");
    eprintln!("  cwr-json --version 2.2 input.cwr          # Force CWR version 2.2");
    eprintln!("  cat input.cwr | cwr-json --no-validate    # Structure only, from stdin");
}
