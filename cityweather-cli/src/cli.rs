use std::io;

use cityweather_core::{ForecastClient, GeocodeClient, pipeline};
use inquire::Text;

/// What the user answered at the continue prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Again,
    Quit,
    Invalid,
}

/// `y` runs another lookup, `n` exits cleanly, anything else exits with
/// the invalid-input notice. Matching is exact apart from surrounding
/// whitespace.
pub fn classify_answer(input: &str) -> Answer {
    match input.trim() {
        "y" => Answer::Again,
        "n" => Answer::Quit,
        _ => Answer::Invalid,
    }
}

/// The prompt-run-prompt loop.
///
/// A failed run is printed to stderr and the loop still offers another
/// go; every answer path leaves with exit code 0. Both service clients
/// are built once so repeated runs share the connection pool.
pub async fn run() -> anyhow::Result<()> {
    let geocode = GeocodeClient::new();
    let forecast = ForecastClient::new();

    loop {
        let city = Text::new("Enter a city:").prompt()?;

        let mut stdout = io::stdout();
        if let Err(err) = pipeline::run_once(&geocode, &forecast, &city, &mut stdout).await {
            eprintln!("Error: {err}");
        }

        println!();
        let answer = Text::new("Do you want to continue? (y/n):").prompt()?;
        match classify_answer(&answer) {
            Answer::Again => {}
            Answer::Quit => {
                println!("Exiting...");
                break;
            }
            Answer::Invalid => {
                println!("Invalid input, exiting system");
                break;
            }
        }
    }

    Ok(())
}
