use dotenv::dotenv;
use tokio::io::{stdin, AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use booking_cell::{
    BookingWizard, DoctorListView, Gender, Navigation, PatientForm, WizardEvent,
    WizardOutcome, WizardStep,
};
use commands::{parse_command, Command, HELP};
use doctor_cell::{DoctorCard, DEPARTMENTS};
use shared_config::ClientConfig;

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    info!("Booking against {}", config.api_base_url);

    let mut wizard = BookingWizard::starting_today(&config);
    let mut lines = BufReader::new(stdin()).lines();

    println!("Book an appointment");
    print_departments();
    println!("{}", HELP);

    loop {
        if wizard.step() == WizardStep::Completed {
            if let Some(timer) = wizard.redirect_timer() {
                println!("Returning to {} in {}s (press Enter to go now)...",
                         config.home_target, timer.delay().as_secs());
                let navigation = timer.wait(manual_navigation(&mut lines)).await;
                leave(&navigation);
            }
            break;
        }

        prompt(&wizard);
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line, &wizard) {
            Ok(command) => command,
            Err(message) => {
                println!("! {}", message);
                continue;
            }
        };

        let event = match command {
            Command::Event(event) => event,
            Command::Submit => WizardEvent::Submit(read_patient_form(&mut lines).await?),
            Command::Summary => {
                println!("{}", wizard.summary());
                continue;
            }
            Command::Show => {
                render(&wizard);
                continue;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        };

        match wizard.dispatch(event).await {
            Ok(WizardOutcome::Updated) => render(&wizard),
            Ok(WizardOutcome::NavigateAway(target)) => {
                leave(&Navigation::Manual(target));
                break;
            }
            Err(err) => println!("! {}", err),
        }
    }

    Ok(())
}

/// Resolves when the user presses Enter. Unreadable input counts as leaving.
async fn manual_navigation<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>) {
    if let Err(err) = lines.next_line().await {
        debug!("Could not read manual navigation: {}", err);
    }
}

fn prompt(wizard: &BookingWizard) {
    println!();
    println!("[{}] >", wizard.step());
}

fn leave(navigation: &Navigation) {
    println!("Leaving booking page for {}", navigation.target());
}

fn print_departments() {
    println!("Departments:");
    for (index, name) in DEPARTMENTS.iter().enumerate() {
        println!("  {}. {}", index + 1, name);
    }
}

fn render(wizard: &BookingWizard) {
    match wizard.step() {
        WizardStep::SelectingDepartment => print_departments(),
        WizardStep::SelectingDoctor => render_doctor_list(wizard.doctor_list()),
        WizardStep::SelectingDateTime => {
            if let Some(calendar) = wizard.calendar() {
                println!("{}", calendar);
            }
            if !wizard.time_slots().is_empty() {
                println!("Time slots:");
                for (index, slot) in wizard.time_slots().iter().enumerate() {
                    let marker = if wizard.draft().selected_time == Some(*slot) { "*" } else { " " };
                    println!(" {}{:>2}. {}", marker, index + 1, slot);
                }
            }
            println!("{}", wizard.summary());
        }
        WizardStep::EnteringPatientDetails => {
            println!("{}", wizard.summary());
            println!("Type 'submit' to enter patient details.");
        }
        WizardStep::Submitting => println!("{}", wizard.submit_control().label),
        WizardStep::Completed => {
            if let Some(confirmation) = wizard.confirmation() {
                println!("{}", confirmation);
            }
        }
        WizardStep::Failed => {
            println!("Error booking appointment: {}", wizard.alert().unwrap_or_default());
            println!("Type 'submit' to try again or 'back' to change the date and time.");
        }
    }
}

fn render_doctor_list(view: &DoctorListView) {
    match view {
        DoctorListView::Hidden => {}
        DoctorListView::Loading { department } => println!("Loading doctors for {}...", department),
        DoctorListView::Empty { .. } => println!("No doctors available in this department"),
        DoctorListView::Failed { message, .. } => {
            println!("Error: {}", message);
            println!("Type 'retry' to try again.");
        }
        DoctorListView::Loaded { department, doctors } => {
            println!("{} doctors:", department);
            for doctor in doctors {
                println!("{}", DoctorCard { doctor });
            }
        }
    }
}

async fn ask(lines: &mut InputLines, label: &str) -> anyhow::Result<String> {
    println!("{}:", label);
    Ok(lines.next_line().await?.unwrap_or_default().trim().to_string())
}

async fn read_patient_form(lines: &mut InputLines) -> anyhow::Result<PatientForm> {
    Ok(PatientForm {
        full_name: ask(lines, "Full name").await?,
        contact_number: ask(lines, "Contact number").await?,
        email: ask(lines, "Email").await?,
        adhar: ask(lines, "Aadhaar number").await?,
        gender: Gender::parse(&ask(lines, "Gender (Male/Female/Other)").await?),
        address: ask(lines, "Address").await?,
        city: ask(lines, "City").await?,
        state: ask(lines, "State").await?,
        pin_code: ask(lines, "PIN code").await?,
        description: ask(lines, "Reason for visit").await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_navigation_on_enter() {
        let mut lines = BufReader::new(&b"\nnext\n"[..]).lines();
        manual_navigation(&mut lines).await;
        assert_eq!(lines.next_line().await.unwrap(), Some("next".to_string()));
    }

    #[tokio::test]
    async fn test_manual_navigation_survives_unreadable_input() {
        let mut lines = BufReader::new(&b"\xff\xfe\n"[..]).lines();
        manual_navigation(&mut lines).await;
    }
}
