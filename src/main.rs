use clap::{Arg, ArgAction, Command};

use argus::checks;
use argus::core::report;
use argus::core::status::Status;

fn build_cli() -> Command {
    let cli = Command::new("argus")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Nagios-compatible service checks and probe utilities")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging on stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("check")
                .about("Evaluate explicit metrics against thresholds")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("metric")
                        .short('m')
                        .long("metric")
                        .value_name("SPEC")
                        .help("Metric as name=value[,w=WARN][,c=CRIT] (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("service")
                        .short('s')
                        .long("service")
                        .value_name("NAME")
                        .help("Service label used in the status line")
                        .default_value("metrics"),
                )
                .arg(
                    Arg::new("warning")
                        .short('w')
                        .long("warning")
                        .value_name("SPEC")
                        .help("Warning threshold for metrics without their own"),
                )
                .arg(
                    Arg::new("critical")
                        .short('c')
                        .long("critical")
                        .value_name("SPEC")
                        .help("Critical threshold for metrics without their own"),
                ),
        )
        .subcommand(
            Command::new("http")
                .about("Probe an HTTP endpoint for availability and latency")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .value_name("URL")
                        .help("URL to fetch")
                        .required(true),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Request deadline in seconds (1-300)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("warning")
                        .short('w')
                        .long("warning")
                        .value_name("SPEC")
                        .help("Warning threshold on response time in milliseconds"),
                )
                .arg(
                    Arg::new("critical")
                        .short('c')
                        .long("critical")
                        .value_name("SPEC")
                        .help("Critical threshold on response time in milliseconds"),
                )
                .arg(
                    Arg::new("expect-status")
                        .long("expect-status")
                        .value_name("CODE")
                        .help("Exact response status code expected")
                        .value_parser(clap::value_parser!(u16)),
                )
                .arg(
                    Arg::new("expect")
                        .long("expect")
                        .value_name("REGEX")
                        .help("Pattern the response body must match"),
                )
                .arg(
                    Arg::new("on-error")
                        .long("on-error")
                        .value_name("SEVERITY")
                        .help("Severity reported on connection refusal or timeout")
                        .default_value("critical"),
                ),
        )
        .subcommand(
            Command::new("dns")
                .about("Check hostname resolution across DNS domains")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOSTNAME")
                        .help("Hostname to resolve inside each domain")
                        .required(true),
                )
                .arg(
                    Arg::new("domains")
                        .short('d')
                        .long("domains")
                        .value_name("LIST")
                        .help("Comma separated list of domains")
                        .required(true),
                )
                .arg(
                    Arg::new("require")
                        .short('R')
                        .long("require")
                        .value_name("MODE")
                        .help("Whether the host must resolve in all or any domain")
                        .value_parser(["all", "any"])
                        .default_value("any"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Deadline per lookup in seconds (1-300)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                ),
        )
        .subcommand(
            Command::new("cache")
                .about("Audit Cache-Control max-age headers for groups of URLs")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("hostname")
                        .short('H')
                        .long("hostname")
                        .value_name("HOST")
                        .help("Host the group paths are fetched from")
                        .required(true),
                )
                .arg(
                    Arg::new("urls")
                        .short('U')
                        .long("urls")
                        .value_name("FILE")
                        .help("JSON file describing URL groups and expected TTLs")
                        .required(true),
                )
                .arg(
                    Arg::new("warning")
                        .short('w')
                        .long("warning")
                        .value_name("SPEC")
                        .help("Warning threshold on the cache error count")
                        .default_value("1"),
                )
                .arg(
                    Arg::new("critical")
                        .short('c')
                        .long("critical")
                        .value_name("SPEC")
                        .help("Critical threshold on the cache error count")
                        .default_value("1"),
                )
                .arg(
                    Arg::new("page-warning")
                        .long("page-warning")
                        .value_name("SPEC")
                        .help("Warning threshold on the page error count")
                        .default_value("10"),
                )
                .arg(
                    Arg::new("page-critical")
                        .long("page-critical")
                        .value_name("SPEC")
                        .help("Critical threshold on the page error count")
                        .default_value("20"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Deadline for the whole audit in seconds (30-300)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("300"),
                )
                .arg(
                    Arg::new("request-timeout")
                        .short('T')
                        .long("request-timeout")
                        .value_name("SECS")
                        .help("Deadline per request in seconds (1-30)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                ),
        )
        .subcommand(
            Command::new("poll")
                .about("Repeatedly fetch a URL and print latency statistics")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("url")
                        .short('u')
                        .long("url")
                        .value_name("URL")
                        .help("URL to poll")
                        .required(true),
                )
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("SECS")
                        .help("Pause between requests")
                        .value_parser(clap::value_parser!(f64))
                        .default_value("0.5"),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of requests, 0 polls until interrupted")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("0"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECS")
                        .help("Deadline per request in seconds (1-300)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Print response bodies")
                        .action(ArgAction::SetTrue),
                ),
        );

    #[cfg(unix)]
    let cli = cli.subcommand(
        Command::new("run")
            .about("Run a command under an exclusive lock file")
            .arg_required_else_help(true)
            .arg(
                Arg::new("lock")
                    .short('l')
                    .long("lock")
                    .value_name("PATH")
                    .help("Lock file path, defaults to /tmp/<command>.lock"),
            )
            .arg(
                Arg::new("timeout")
                    .short('t')
                    .long("timeout")
                    .value_name("SECS")
                    .help("Seconds to wait for the lock")
                    .value_parser(clap::value_parser!(u64))
                    .default_value("30"),
            )
            .arg(
                Arg::new("command")
                    .value_name("COMMAND")
                    .help("Command and arguments to run")
                    .num_args(1..)
                    .allow_hyphen_values(true)
                    .trailing_var_arg(true)
                    .required(true),
            ),
    );

    cli.subcommand(
        Command::new("completions")
            .about("Generate shell completions")
            .arg(
                Arg::new("shell")
                    .value_name("SHELL")
                    .help("bash, zsh, fish, powershell or elvish")
                    .required(true)
                    .index(1),
            ),
    )
}

fn main() {
    let matches = build_cli().get_matches();

    argus::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("check", sub_matches)) => checks::check::execute(sub_matches),
        Some(("http", sub_matches)) => checks::http::execute(sub_matches),
        Some(("dns", sub_matches)) => checks::dns::execute(sub_matches),
        Some(("cache", sub_matches)) => checks::cache::execute(sub_matches),
        Some(("poll", sub_matches)) => run_utility(checks::poll::execute(sub_matches)),
        #[cfg(unix)]
        Some(("run", sub_matches)) => run_utility(checks::runlock::execute(sub_matches)),
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            run_utility(checks::completions::execute(sub_matches, &mut cli));
        }
        _ => report::quit(Status::Unknown, "no subcommand given, try 'argus --help'"),
    }
}

fn run_utility(result: anyhow::Result<()>) {
    if let Err(err) = result {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
