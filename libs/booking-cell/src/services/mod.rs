pub mod calendar;
pub mod clock;
pub mod lifecycle;
pub mod redirect;
pub mod slots;
pub mod submission;
pub mod validation;
pub mod wizard;

pub use calendar::{CalendarCell, CalendarView};
pub use clock::{Clock, LocalClock};
pub use lifecycle::StepLifecycle;
pub use redirect::{Navigation, RedirectTimer};
pub use slots::generate_time_slots;
pub use submission::BookingSubmissionService;
pub use validation::PatientFormValidator;
pub use wizard::{BookingWizard, DoctorFetch, DoctorListView, SubmitControl, WizardEvent, WizardOutcome};
