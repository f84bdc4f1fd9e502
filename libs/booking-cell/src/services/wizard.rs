// libs/booking-cell/src/services/wizard.rs
use chrono::NaiveDate;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::{normalize_department, Doctor, DoctorDirectoryService};
use shared_api::HospitalApiClient;
use shared_config::ClientConfig;
use shared_models::ApiError;

use crate::models::{
    AppointmentSummary, BookingConfirmation, BookingError, BookingRequest,
    DraftAppointment, PatientForm, TimeSlot, WizardStep,
};
use crate::services::calendar::CalendarView;
use crate::services::clock::{Clock, LocalClock};
use crate::services::lifecycle::StepLifecycle;
use crate::services::redirect::RedirectTimer;
use crate::services::slots::generate_time_slots;
use crate::services::submission::BookingSubmissionService;
use crate::services::validation::PatientFormValidator;

pub const SUBMIT_LABEL: &str = "Confirm Booking";
pub const SUBMITTING_LABEL: &str = "Booking...";

/// Every interaction the booking page can raise.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    SelectDepartment(String),
    RetryDoctors,
    SelectDoctor(i64),
    PreviousMonth,
    NextMonth,
    SelectDate(NaiveDate),
    SelectTime(TimeSlot),
    Next,
    Back,
    Submit(PatientForm),
    ReturnHome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutcome {
    Updated,
    NavigateAway(String),
}

/// Contents of the doctor list area under the department cards.
#[derive(Debug, Clone, PartialEq)]
pub enum DoctorListView {
    Hidden,
    Loading { department: String },
    Loaded { department: String, doctors: Vec<Doctor> },
    Empty { department: String },
    Failed { department: String, message: String },
}

impl DoctorListView {
    pub fn doctors(&self) -> &[Doctor] {
        match self {
            DoctorListView::Loaded { doctors, .. } => doctors,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub enabled: bool,
}

impl SubmitControl {
    fn idle() -> Self {
        Self { label: SUBMIT_LABEL, enabled: true }
    }

    fn in_flight() -> Self {
        Self { label: SUBMITTING_LABEL, enabled: false }
    }
}

/// Identifies one doctor-list request. Only the newest ticket's result is
/// rendered; older results are dropped when they arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorFetch {
    pub seq: u64,
    pub department: String,
}

/// One booking session: owns the draft appointment and routes every event
/// through the step lifecycle.
pub struct BookingWizard {
    session_id: Uuid,
    step: WizardStep,
    draft: DraftAppointment,
    clock: Box<dyn Clock>,
    doctor_list: DoctorListView,
    fetch_seq: u64,
    calendar: Option<CalendarView>,
    time_slots: Vec<TimeSlot>,
    submit_control: SubmitControl,
    alert: Option<String>,
    confirmation: Option<BookingConfirmation>,
    lifecycle: StepLifecycle,
    validator: PatientFormValidator,
    directory: DoctorDirectoryService,
    submission: BookingSubmissionService,
    redirect_delay: Duration,
    home_target: String,
}

impl BookingWizard {
    pub fn new(config: &ClientConfig, clock: impl Clock + 'static) -> Self {
        let api = HospitalApiClient::new(config);
        let session_id = Uuid::new_v4();
        info!(%session_id, "Starting booking session");

        Self {
            session_id,
            step: WizardStep::SelectingDepartment,
            draft: DraftAppointment::default(),
            clock: Box::new(clock),
            doctor_list: DoctorListView::Hidden,
            fetch_seq: 0,
            calendar: None,
            time_slots: Vec::new(),
            submit_control: SubmitControl::idle(),
            alert: None,
            confirmation: None,
            lifecycle: StepLifecycle::new(),
            validator: PatientFormValidator::new(),
            directory: DoctorDirectoryService::with_client(api.clone()),
            submission: BookingSubmissionService::with_client(api),
            redirect_delay: config.redirect_delay(),
            home_target: config.home_target.clone(),
        }
    }

    /// Wizard following the local calendar date.
    pub fn starting_today(config: &ClientConfig) -> Self {
        Self::new(config, LocalClock)
    }

    // ==========================================================================
    // READ ACCESS
    // ==========================================================================

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftAppointment {
        &self.draft
    }

    pub fn doctor_list(&self) -> &DoctorListView {
        &self.doctor_list
    }

    pub fn calendar(&self) -> Option<&CalendarView> {
        self.calendar.as_ref()
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit_control
    }

    /// Last user-visible message raised by a rejected event or failed request.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn summary(&self) -> AppointmentSummary {
        AppointmentSummary::from(&self.draft)
    }

    /// Timer for leaving the confirmation screen; only once completed.
    pub fn redirect_timer(&self) -> Option<RedirectTimer> {
        (self.step == WizardStep::Completed)
            .then(|| RedirectTimer::new(self.redirect_delay, self.home_target.clone()))
    }

    // ==========================================================================
    // EVENT ROUTING
    // ==========================================================================

    /// Apply one user event. Network failures are absorbed into the view
    /// state; `Err` means the event itself was rejected and nothing changed.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<WizardOutcome, BookingError> {
        debug!(session_id = %self.session_id, step = %self.step, "Dispatching {:?}", event);

        let result = self.route(event).await;

        if let Err(ref err) = result {
            warn!(session_id = %self.session_id, step = %self.step, "Event rejected: {}", err);
            self.alert = Some(err.to_string());
        }

        result
    }

    async fn route(&mut self, event: WizardEvent) -> Result<WizardOutcome, BookingError> {
        match event {
            WizardEvent::SelectDepartment(department) => {
                let ticket = self.begin_department_selection(&department)?;
                self.run_doctor_fetch(ticket).await;
            }
            WizardEvent::RetryDoctors => {
                let ticket = self.retry_doctor_fetch()?;
                self.run_doctor_fetch(ticket).await;
            }
            WizardEvent::SelectDoctor(doctor_id) => self.select_doctor(doctor_id)?,
            WizardEvent::PreviousMonth => {
                self.previous_month()?;
            }
            WizardEvent::NextMonth => self.next_month()?,
            WizardEvent::SelectDate(date) => self.select_date(date)?,
            WizardEvent::SelectTime(slot) => self.select_time(slot)?,
            WizardEvent::Next => self.advance()?,
            WizardEvent::Back => self.go_back()?,
            WizardEvent::Submit(form) => {
                let request = self.begin_submission(form)?;
                let result = self.submission.submit(&request).await;
                self.complete_submission(result)?;
            }
            WizardEvent::ReturnHome => return Ok(self.return_home()),
        }

        Ok(WizardOutcome::Updated)
    }

    async fn run_doctor_fetch(&mut self, ticket: DoctorFetch) {
        let result = self.directory.fetch_by_department(&ticket.department).await;
        self.complete_doctor_fetch(&ticket, result);
    }

    fn transition(&mut self, next: WizardStep) -> Result<(), BookingError> {
        self.lifecycle.validate_step_transition(self.step, next)?;
        if self.step != next {
            info!(session_id = %self.session_id, "Step {} -> {}", self.step, next);
        }
        self.step = next;
        Ok(())
    }

    fn require_step(&self, allowed: &[WizardStep]) -> Result<(), BookingError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(BookingError::UnavailableInStep(self.step))
        }
    }

    // ==========================================================================
    // DEPARTMENT & DOCTOR
    // ==========================================================================

    /// Show the loading state for `department` and hand back the ticket the
    /// fetch result must be matched against.
    pub fn begin_department_selection(&mut self, department: &str) -> Result<DoctorFetch, BookingError> {
        let department = normalize_department(department).ok_or(BookingError::DepartmentRequired)?;
        self.transition(WizardStep::SelectingDoctor)?;
        Ok(self.issue_fetch(department))
    }

    /// Re-issue the fetch that last failed, for the same department.
    pub fn retry_doctor_fetch(&mut self) -> Result<DoctorFetch, BookingError> {
        self.require_step(&[WizardStep::SelectingDoctor])?;
        match &self.doctor_list {
            DoctorListView::Failed { department, .. } => {
                let department = department.clone();
                Ok(self.issue_fetch(department))
            }
            _ => Err(BookingError::NothingToRetry),
        }
    }

    fn issue_fetch(&mut self, department: String) -> DoctorFetch {
        self.fetch_seq += 1;
        self.alert = None;
        self.doctor_list = DoctorListView::Loading { department: department.clone() };
        debug!(session_id = %self.session_id, seq = self.fetch_seq, "Loading doctors for {}", department);
        DoctorFetch { seq: self.fetch_seq, department }
    }

    /// Render a doctor-list result. Returns false when the ticket has been
    /// superseded by a newer selection and the result was dropped.
    pub fn complete_doctor_fetch(&mut self, ticket: &DoctorFetch, result: Result<Vec<Doctor>, ApiError>) -> bool {
        if ticket.seq != self.fetch_seq {
            debug!(session_id = %self.session_id, "Dropping stale doctor list for {} (seq {} < {})",
                   ticket.department, ticket.seq, self.fetch_seq);
            return false;
        }

        let department = ticket.department.clone();
        self.doctor_list = match result {
            Ok(doctors) if doctors.is_empty() => DoctorListView::Empty { department },
            Ok(doctors) => DoctorListView::Loaded { department, doctors },
            Err(err) => {
                warn!(session_id = %self.session_id, "Failed to fetch doctors for {}: {}", department, err);
                DoctorListView::Failed {
                    department,
                    message: format!("Failed to fetch doctors: {}", err.user_message()),
                }
            }
        };
        true
    }

    pub fn select_doctor(&mut self, doctor_id: i64) -> Result<(), BookingError> {
        self.require_step(&[WizardStep::SelectingDoctor])?;

        let doctor = self
            .doctor_list
            .doctors()
            .iter()
            .find(|d| d.id == doctor_id)
            .cloned()
            .ok_or(BookingError::DoctorNotListed(doctor_id))?;

        self.transition(WizardStep::SelectingDateTime)?;
        info!(session_id = %self.session_id, "Selected doctor {} ({})", doctor.id, doctor.display_name());
        self.draft.selected_doctor = Some(doctor);
        self.calendar = Some(CalendarView::new(self.clock.today()));
        self.alert = None;
        Ok(())
    }

    // ==========================================================================
    // DATE & TIME
    // ==========================================================================

    fn calendar_mut(&mut self) -> Result<&mut CalendarView, BookingError> {
        self.require_step(&[WizardStep::SelectingDateTime])?;
        let today = self.clock.today();
        let calendar = self.calendar.get_or_insert_with(|| CalendarView::new(today));
        calendar.refresh(today);
        Ok(calendar)
    }

    /// Returns whether the view moved; never earlier than the current month.
    pub fn previous_month(&mut self) -> Result<bool, BookingError> {
        Ok(self.calendar_mut()?.previous_month())
    }

    pub fn next_month(&mut self) -> Result<(), BookingError> {
        self.calendar_mut()?.next_month();
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        if !self.calendar_mut()?.is_selectable(date) {
            return Err(BookingError::PastDate(date));
        }

        self.draft.selected_date = Some(date);
        self.time_slots = generate_time_slots();
        self.alert = None;
        debug!(session_id = %self.session_id, "Selected date {}", date);
        Ok(())
    }

    pub fn select_time(&mut self, slot: TimeSlot) -> Result<(), BookingError> {
        self.require_step(&[WizardStep::SelectingDateTime])?;
        if self.draft.selected_date.is_none() {
            return Err(BookingError::DateRequired);
        }
        if !self.time_slots.contains(&slot) {
            return Err(BookingError::UnknownTimeSlot(slot.label()));
        }

        self.draft.selected_time = Some(slot);
        self.alert = None;
        debug!(session_id = %self.session_id, "Selected time {}", slot);
        Ok(())
    }

    // ==========================================================================
    // NAVIGATION
    // ==========================================================================

    pub fn advance(&mut self) -> Result<(), BookingError> {
        self.require_step(&[WizardStep::SelectingDateTime])?;
        if !self.draft.has_date_and_time() {
            return Err(BookingError::IncompleteDateTime);
        }
        if let Some(date) = self.draft.selected_date.filter(|date| *date < self.clock.today()) {
            return Err(BookingError::PastDate(date));
        }
        self.transition(WizardStep::EnteringPatientDetails)?;
        self.alert = None;
        Ok(())
    }

    /// Step back without clearing anything already chosen.
    pub fn go_back(&mut self) -> Result<(), BookingError> {
        let previous = self
            .lifecycle
            .previous_step(self.step)
            .ok_or(BookingError::UnavailableInStep(self.step))?;
        self.transition(previous)?;
        self.alert = None;
        Ok(())
    }

    /// Leave the page; the draft does not outlive the session.
    pub fn return_home(&mut self) -> WizardOutcome {
        info!(session_id = %self.session_id, "Leaving booking page from {}", self.step);
        self.draft = DraftAppointment::default();
        WizardOutcome::NavigateAway(self.home_target.clone())
    }

    // ==========================================================================
    // SUBMISSION
    // ==========================================================================

    /// Validate locally, store the patient form, lock the submit control and
    /// return the request to send. Nothing is sent for an invalid draft.
    pub fn begin_submission(&mut self, form: PatientForm) -> Result<BookingRequest, BookingError> {
        if self.step == WizardStep::Submitting {
            return Err(BookingError::SubmissionInFlight);
        }
        let (doctor, date, time) = self.draft.selections().ok_or(BookingError::IncompleteSelection)?;
        self.require_step(&[WizardStep::EnteringPatientDetails, WizardStep::Failed])?;
        if date < self.clock.today() {
            return Err(BookingError::PastDate(date));
        }

        self.validator.validate(&form)?;
        let request = BookingRequest::new(doctor, date, time, &form);

        self.transition(WizardStep::Submitting)?;
        self.draft.patient = Some(form);
        self.submit_control = SubmitControl::in_flight();
        self.alert = None;
        Ok(request)
    }

    pub fn complete_submission(&mut self, result: Result<BookingConfirmation, ApiError>) -> Result<(), BookingError> {
        self.require_step(&[WizardStep::Submitting])?;

        match result {
            Ok(confirmation) => {
                self.transition(WizardStep::Completed)?;
                info!(session_id = %self.session_id, "Booking confirmed with appointment {}", confirmation.appointment_id);
                self.confirmation = Some(confirmation);
                self.draft = DraftAppointment::default();
            }
            Err(err) => {
                self.transition(WizardStep::Failed)?;
                warn!(session_id = %self.session_id, "Booking failed: {}", err);
                self.alert = Some(err.user_message());
                self.submit_control = SubmitControl::idle();
            }
        }
        Ok(())
    }
}
