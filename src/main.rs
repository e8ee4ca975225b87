//! Interactive terminal entry point for the loan approval wizard.
//!
//! Walks the four input steps, submits to the configured prediction
//! service, and renders the decision report. Typing `<` at any prompt
//! goes back one step; pressing enter keeps the current value.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use loan_sherpa::adapters::terminal;
use loan_sherpa::adapters::HttpPredictionService;
use loan_sherpa::application::WizardController;
use loan_sherpa::config::AppConfig;
use loan_sherpa::domain::ResultReport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Loan Approval Predictor");
    println!("Fill out the form below to get instant results with personalized recommendations.");
    println!("Prediction service: {}", config.api.normalized_base_url());
    println!();

    let service = Arc::new(HttpPredictionService::new(&config.api));
    let mut controller = WizardController::new(service);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        collect_steps(&mut controller, &mut input)?;

        println!();
        println!("Analyzing your application...");

        match controller.submit().await {
            Ok(response) => {
                let report = ResultReport::from_response(response);
                println!("{}", terminal::render_report(&report));

                if !ask_yes_no(&mut input, "New application? [y/N] ")? {
                    break;
                }
                controller.reset()?;
                println!();
            }
            Err(err) => {
                // Stay on the final step so the user can adjust and retry.
                println!("Error: {}", err);
                if !ask_yes_no(&mut input, "Try again? [y/N] ")? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Prompts through the wizard steps until the final step's fields are
/// filled in. Returns with the session on step 4.
fn collect_steps(
    controller: &mut WizardController,
    input: &mut impl BufRead,
) -> io::Result<()> {
    while let Some(step) = controller.session().current_step() {
        println!();
        println!("{}", terminal::progress_line(step));

        let mut went_back = false;
        for field in terminal::fields_for(step) {
            let current = controller
                .session()
                .draft()
                .display_value(field.name)
                .unwrap_or_default();

            loop {
                let raw = prompt(
                    input,
                    &format!("  {} [{}] ({}): ", field.label, current, field.hint),
                )?;

                if raw.is_empty() {
                    break;
                }
                if raw == "<" {
                    if controller.retreat().is_ok() {
                        went_back = true;
                    }
                    break;
                }
                match controller.update_field(field.name, &raw) {
                    Ok(()) => break,
                    Err(err) => println!("    {}", err),
                }
            }

            if went_back {
                break;
            }
        }

        if went_back {
            continue;
        }
        if step.is_final() {
            break;
        }
        controller.advance().map_err(invalid_state)?;
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn ask_yes_no(input: &mut impl BufRead, label: &str) -> io::Result<bool> {
    let answer = prompt(input, label)?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn invalid_state(err: loan_sherpa::domain::WizardError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}
