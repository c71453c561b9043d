use integral_calc::app::calculator::IntegrationCalculator;
use integral_calc::app::task_parser::load_task_file;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "usage: integral_calc EXPRESSION LOWER UPPER [PLOT.png]
       integral_calc --task TASK.toml

examples:
       integral_calc \"x**2\" 0 2
       integral_calc \"sin(x) + exp(-x)\" 0 3.14 plot.png";

fn main() -> ExitCode {
    // logger init can only fail if something installed one before us
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let args: Vec<String> = env::args().skip(1).collect();
    let mut calc = IntegrationCalculator::new();

    match args.as_slice() {
        [flag, path] if flag == "--task" => match load_task_file(Path::new(path)) {
            Ok(task) => calc.apply_task(task),
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return ExitCode::FAILURE;
            }
        },
        [expr, lower, upper] => calc.set_inputs(expr, lower, upper),
        [expr, lower, upper, plot] => {
            calc.set_inputs(expr, lower, upper);
            calc.set_plot_file(PathBuf::from(plot));
        }
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    }

    match calc.calculate() {
        Ok(outcome) => {
            println!("{}", outcome.report());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
