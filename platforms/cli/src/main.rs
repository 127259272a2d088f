use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::process::ExitCode;
use tape_machine::{Program, ProgramManager, TuringMachine, PROGRAMS};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tape-machine 0011
  tape-machine -p binary-increment 1011 111
  printf '01\\n10\\n' | tape-machine --json")]
struct Cli {
    /// The inputs to run, one machine each. Read from stdin, one per line, when omitted
    input: Vec<String>,

    /// The built-in program to execute
    #[clap(short, long, default_value = "unary-equality")]
    program: String,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final configuration as JSON
    #[clap(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for program in PROGRAMS.iter() {
            println!("{:<20} {}", program.name, program.description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let program = ProgramManager::get_program_by_name(&cli.program)?;
    let inputs = if cli.input.is_empty() && atty::isnt(atty::Stream::Stdin) {
        read_inputs(io::stdin().lock())?
    } else {
        cli.input.clone()
    };

    if inputs.is_empty() {
        bail!("no input given");
    }

    let mut invalid = false;
    for input in &inputs {
        let mut machine = match program.machine(input) {
            Ok(machine) => machine,
            Err(e) => {
                warn!(input = input.as_str(), "rejected input");
                eprintln!("Error: {}", e);
                invalid = true;
                continue;
            }
        };

        if cli.debug {
            trace_run(&mut machine);
        } else {
            machine.run();
        }
        debug!(input = input.as_str(), steps = machine.step_count(), "run finished");

        if cli.json {
            println!("{}", serde_json::to_string(&machine.report())?);
        } else {
            println!("{}", render(&program, &machine));
        }
    }

    Ok(if invalid {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Collects the non-empty, trimmed lines of `reader`.
fn read_inputs(reader: impl BufRead) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}

/// Runs the machine the way `run` does, printing the configuration after every step.
fn trace_run(machine: &mut TuringMachine) {
    let print_state = |machine: &TuringMachine| {
        println!(
            "Step: {}, State: {}, Tape: [{}], Head: {}",
            machine.step_count(),
            machine.state(),
            machine.tape(),
            machine.head()
        );
    };

    print_state(machine);
    while machine.is_running() {
        machine.step();
        print_state(machine);
    }

    if machine.is_halted() {
        println!("\nMachine halted.");
    }
    println!();
}

fn render(program: &Program, machine: &TuringMachine) -> String {
    let result = if program.is_accepting(machine.state()) {
        "Input string is accepted."
    } else {
        "Input string is rejected."
    };

    format!(
        "Final Tape: {}\nFinal State: {}\nHead Position: {}\nResult: {}",
        machine.tape(),
        machine.state(),
        machine.head(),
        result
    )
}
