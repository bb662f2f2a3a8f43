use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use study_tracker::{
    AppConfig, DashboardView, FormData, Program, local_now, logging, update_program_from_form,
};

#[derive(Debug, Parser)]
#[command(name = "study-tracker", about = "Track progress through a study program")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show progress, credits and goals
    Dashboard {
        #[arg(long)]
        json: bool,
    },
    /// List every module per semester
    Modules,
    /// Apply an urlencoded edit-form payload ("-" reads stdin)
    ApplyForm { input: String },
    /// Print a default configuration file
    ConfigTemplate,
}

fn render_row(widths: &[usize], cells: &[&str]) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.iter().enumerate() {
        let pad = widths[ci].saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&widths, &cells));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn module_rows(program: &Program) -> Vec<Vec<String>> {
    program
        .semesters
        .iter()
        .flat_map(|semester| {
            semester.modules.iter().map(move |module| {
                vec![
                    semester.number.to_string(),
                    module.title.clone(),
                    module.credits.to_string(),
                    module.exam.kind.clone(),
                    module
                        .exam
                        .grade
                        .map(study_tracker::dashboard::format_grade)
                        .unwrap_or_default(),
                    if module.exam.is_recognized() { "yes" } else { "" }.to_string(),
                ]
            })
        })
        .collect()
}

fn read_payload(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::ConfigTemplate = cli.command {
        print!("{}", AppConfig::default_template());
        return Ok(());
    }

    let config = AppConfig::resolve(cli.config.as_deref())?;
    logging::init_logging(&config.logging)?;
    let manager = config.build_manager();

    match cli.command {
        Commands::Dashboard { json } => {
            let program = manager.load_program()?;
            let view = DashboardView::build(&program, local_now());
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", view.to_text());
            }
        }
        Commands::Modules => {
            let program = manager.load_program()?;
            let headers = ["Semester", "Module", "ECTS", "Exam", "Grade", "Recognized"];
            print!("{}", render_text_table(&headers, &module_rows(&program)));
        }
        Commands::ApplyForm { input } => {
            let payload = read_payload(&input)?;
            let program = manager.load_program()?;
            let form = FormData::from_urlencoded(&payload);
            let updated = update_program_from_form(&manager, program, &form)?;
            println!(
                "Changes saved: {} modules in {} semesters.",
                updated.total_modules(),
                updated.semesters.len()
            );
        }
        Commands::ConfigTemplate => {}
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
