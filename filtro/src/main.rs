mod cli;
mod session;
mod viewer;

use clap::Parser;
use cli::Cli;
use session::Session;
use std::{io, process::ExitCode};

fn init_logger(verbose: bool) {
    use std::io::Write;

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let viewer = cli.viewer();
    let mut session = Session::new(
        io::stdin().lock(),
        io::stdout(),
        io::stderr(),
        cli.session_options(),
    );

    match session.run(viewer.as_ref()) {
        Ok(state) => {
            log::debug!(
                "session finished in {state:?} for {:?}",
                session.buffer().source_path()
            );
            ExitCode::from(state.exit_code())
        }
        Err(e) => {
            log::error!("console i/o failed: {e:?}");
            ExitCode::FAILURE
        }
    }
}
