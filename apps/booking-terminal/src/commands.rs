use chrono::{Datelike, NaiveDate};

use booking_cell::{BookingWizard, TimeSlot, WizardEvent};
use doctor_cell::DEPARTMENTS;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(WizardEvent),
    /// Prompt for the patient form, then submit.
    Submit,
    Summary,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  dept <name|number>     choose a department (see list above)
  retry                  retry loading doctors
  doctor <id>            choose a doctor by id
  prev | next-month      move the calendar
  date <day|YYYY-MM-DD>  choose a day (day numbers refer to the shown month)
  time <n|09:30 AM>      choose a time slot
  next | back            move between steps
  submit                 enter patient details and book
  summary | show | help | home | quit";

/// Turn one input line into a command. The wizard supplies context for
/// shorthand arguments such as a day number or slot position.
pub fn parse_command(line: &str, wizard: &BookingWizard) -> Result<Command, String> {
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "dept" | "department" => Command::Event(WizardEvent::SelectDepartment(parse_department(arg)?)),
        "retry" => Command::Event(WizardEvent::RetryDoctors),
        "doctor" => {
            let id = arg.parse().map_err(|_| format!("'{}' is not a doctor id", arg))?;
            Command::Event(WizardEvent::SelectDoctor(id))
        }
        "prev" => Command::Event(WizardEvent::PreviousMonth),
        "next-month" => Command::Event(WizardEvent::NextMonth),
        "date" => Command::Event(WizardEvent::SelectDate(parse_date(arg, wizard)?)),
        "time" => Command::Event(WizardEvent::SelectTime(parse_time(arg, wizard)?)),
        "next" => Command::Event(WizardEvent::Next),
        "back" => Command::Event(WizardEvent::Back),
        "home" => Command::Event(WizardEvent::ReturnHome),
        "submit" => Command::Submit,
        "summary" => Command::Summary,
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
    };

    Ok(command)
}

fn parse_department(arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        return Err("Please name a department".to_string());
    }
    match arg.parse::<usize>() {
        Ok(n) => DEPARTMENTS
            .get(n.wrapping_sub(1))
            .map(|name| name.to_string())
            .ok_or_else(|| format!("There is no department number {}", n)),
        Err(_) => Ok(arg.to_string()),
    }
}

fn parse_date(arg: &str, wizard: &BookingWizard) -> Result<NaiveDate, String> {
    if let Ok(date) = NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
        return Ok(date);
    }

    let day: u32 = arg.parse().map_err(|_| format!("'{}' is not a date", arg))?;
    let anchor = wizard
        .calendar()
        .map(|calendar| calendar.anchor())
        .ok_or_else(|| "Choose a doctor before picking a date".to_string())?;

    NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day)
        .ok_or_else(|| format!("{} has no day {}", anchor.format("%B"), day))
}

fn parse_time(arg: &str, wizard: &BookingWizard) -> Result<TimeSlot, String> {
    if let Ok(position) = arg.parse::<usize>() {
        return wizard
            .time_slots()
            .get(position.wrapping_sub(1))
            .copied()
            .ok_or_else(|| format!("There is no time slot number {}", position));
    }
    TimeSlot::parse(arg).ok_or_else(|| format!("'{}' is not a time", arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_config::ClientConfig;

    fn wizard() -> BookingWizard {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        BookingWizard::new(&ClientConfig::default(), today)
    }

    #[test]
    fn test_department_by_number_and_name() {
        let wizard = wizard();
        assert_eq!(
            parse_command("dept 1", &wizard),
            Ok(Command::Event(WizardEvent::SelectDepartment("Cardiology".to_string())))
        );
        assert_eq!(
            parse_command("dept General Medicine", &wizard),
            Ok(Command::Event(WizardEvent::SelectDepartment("General Medicine".to_string())))
        );
        assert!(parse_command("dept 0", &wizard).is_err());
    }

    #[test]
    fn test_full_date_and_time_label() {
        let wizard = wizard();
        assert_eq!(
            parse_command("date 2026-11-02", &wizard),
            Ok(Command::Event(WizardEvent::SelectDate(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap())))
        );
        assert_eq!(
            parse_command("time 02:30 PM", &wizard),
            Ok(Command::Event(WizardEvent::SelectTime(TimeSlot::parse("14:30").unwrap())))
        );
    }

    #[test]
    fn test_shorthand_needs_context() {
        let wizard = wizard();
        assert!(parse_command("date 20", &wizard).is_err());
        assert!(parse_command("time 3", &wizard).is_err());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("book now", &wizard()),
            Err("Unknown command 'book'. Type 'help'.".to_string())
        );
    }
}
