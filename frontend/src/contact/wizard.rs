//! Step sequencing and submission rules of the contact wizard.
//!
//! `WizardState` is plain data: the view feeds it user actions and performs
//! the sink call between `begin_submit` and `finish_submit`.

use log::{error, info, warn};

use crate::contact::guard::{self, AntiSpam, Clock, KeyValueStore};
use crate::contact::lead::{FieldErrors, LeadField, LeadForm, LeadSubmission};
use crate::contact::sink::SinkError;
use crate::contact::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Identity,
    Scope,
    Vision,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Identity,
        WizardStep::Scope,
        WizardStep::Vision,
        WizardStep::Review,
    ];

    pub fn number(self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Scope => 2,
            WizardStep::Vision => 3,
            WizardStep::Review => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Identity => "Identity",
            WizardStep::Scope => "Scope",
            WizardStep::Vision => "Vision",
            WizardStep::Review => "Review",
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Identity => Some(WizardStep::Scope),
            WizardStep::Scope => Some(WizardStep::Vision),
            WizardStep::Vision => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Identity => None,
            WizardStep::Scope => Some(WizardStep::Identity),
            WizardStep::Vision => Some(WizardStep::Scope),
            WizardStep::Review => Some(WizardStep::Vision),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Success,
    /// Honeypot tripped. Shown to the visitor exactly like `Success`.
    SilentlyRejected,
}

/// Visible, blocking messages raised by a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RateLimited,
    SubmitFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::RateLimited => "Please wait a minute before sending another request.",
            Notice::SubmitFailed => "Something went wrong. Please try again.",
        }
    }
}

/// What a press of "Send Request" turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Send this record to the sink, then call `finish_submit`.
    Dispatch(LeadSubmission),
    /// Honeypot filled: fake success, nothing is written.
    Deflected,
    /// Submitted before the minimum dwell time. Nothing changes.
    TooFast,
    RateLimited { retry_in_ms: i64 },
    Invalid,
    /// Not on the review step, already submitting or already done.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: LeadForm,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    pub anti_spam: AntiSpam,
    pub notice: Option<Notice>,
    session: u64,
}

impl WizardState {
    pub fn opened(now_ms: i64) -> Self {
        Self {
            step: WizardStep::Identity,
            form: LeadForm::default(),
            errors: FieldErrors::default(),
            status: SubmissionStatus::Idle,
            anti_spam: AntiSpam::new(now_ms),
            notice: None,
            session: 0,
        }
    }

    /// Throws away everything entered and starts a new session at step 1.
    pub fn restart(&mut self, now_ms: i64) {
        let session = self.session.wrapping_add(1);
        *self = Self {
            session,
            ..Self::opened(now_ms)
        };
    }

    /// Identifies the current session so late sink results can be told apart.
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// True for real and deflected successes alike.
    pub fn shows_success(&self) -> bool {
        matches!(
            self.status,
            SubmissionStatus::Success | SubmissionStatus::SilentlyRejected
        )
    }

    pub fn update_field(&mut self, field: LeadField, value: &str) -> Result<(), WizardError> {
        self.form.set(field, value)?;
        self.errors.clear(field);
        Ok(())
    }

    pub fn set_honeypot(&mut self, value: &str) {
        self.anti_spam.honeypot = value.to_string();
    }

    fn validate(&self, step: WizardStep) -> FieldErrors {
        match step {
            WizardStep::Identity => self.form.validate_identity(),
            WizardStep::Scope => self.form.validate_scope(),
            WizardStep::Vision => self.form.validate_vision(),
            WizardStep::Review => FieldErrors::default(),
        }
    }

    /// Moves one step forward if the current step validates.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        let errors = self.validate(self.step);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.step = next;
        true
    }

    /// Moves one step back. Entered values are kept.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    pub fn begin_submit(&mut self, clock: &dyn Clock, store: &dyn KeyValueStore) -> SubmitAttempt {
        if self.step != WizardStep::Review || self.is_submitting() || self.shows_success() {
            return SubmitAttempt::Ignored;
        }

        if self.anti_spam.honeypot_filled() {
            warn!("Bot detected: Honeypot filled");
            self.status = SubmissionStatus::SilentlyRejected;
            return SubmitAttempt::Deflected;
        }

        let now = clock.now_ms();
        if self.anti_spam.too_fast(now) {
            warn!("Bot detected: Too fast");
            return SubmitAttempt::TooFast;
        }

        if let Some(retry_in_ms) = guard::cooldown_remaining_ms(store, now) {
            info!("Submission blocked by cooldown, {} ms left", retry_in_ms);
            self.notice = Some(Notice::RateLimited);
            return SubmitAttempt::RateLimited { retry_in_ms };
        }

        match LeadSubmission::try_from(&self.form) {
            Ok(record) => {
                self.notice = None;
                self.status = SubmissionStatus::Submitting;
                SubmitAttempt::Dispatch(record)
            }
            Err(errors) => {
                self.errors = errors;
                SubmitAttempt::Invalid
            }
        }
    }

    /// Applies the sink result of a dispatched record.
    ///
    /// A successful insert always starts the cooldown. The wizard itself only
    /// changes when `session` is still the current one. Returns whether it did.
    pub fn finish_submit(
        &mut self,
        session: u64,
        result: Result<(), SinkError>,
        clock: &dyn Clock,
        store: &dyn KeyValueStore,
    ) -> bool {
        if result.is_ok() {
            guard::record_submission(store, clock.now_ms());
        }

        if session != self.session {
            info!("Ignoring submission result of a closed wizard session");
            return false;
        }

        self.status = SubmissionStatus::Idle;
        match result {
            Ok(()) => {
                info!("Lead submitted");
                self.status = SubmissionStatus::Success;
            }
            Err(e) => {
                error!("Error submitting form: {}", e);
                self.notice = Some(Notice::SubmitFailed);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::fakes::{ManualClock, MemoryStore};
    use crate::contact::guard::LAST_SUBMISSION_KEY;
    use crate::contact::lead::{BudgetRange, LeadStatus, ProjectType};
    use crate::contact::sink::{LeadSink, MockLeadSink};
    use futures::executor::block_on;

    const OPENED_AT: i64 = 1_700_000_000_000;

    fn fill_identity(state: &mut WizardState) {
        state.update_field(LeadField::Name, "Grace Hopper").unwrap();
        state.update_field(LeadField::Email, "grace@navy.mil").unwrap();
        state.update_field(LeadField::Role, "Rear Admiral").unwrap();
    }

    fn fill_scope(state: &mut WizardState) {
        state.update_field(LeadField::ProjectType, "web-app").unwrap();
        state.update_field(LeadField::Budget, "1000/- to 5000/-").unwrap();
    }

    fn fill_vision(state: &mut WizardState) {
        state
            .update_field(LeadField::Description, "A compiler explorer for the whole fleet")
            .unwrap();
        state.update_field(LeadField::Competitors, "Godbolt").unwrap();
    }

    fn at_review() -> WizardState {
        let mut state = WizardState::opened(OPENED_AT);
        fill_identity(&mut state);
        assert!(state.advance());
        fill_scope(&mut state);
        assert!(state.advance());
        fill_vision(&mut state);
        assert!(state.advance());
        assert_eq!(state.step, WizardStep::Review);
        state
    }

    /// Same sequence the view runs: plan, await the sink, apply the result.
    fn submit(
        state: &mut WizardState,
        sink: &dyn LeadSink,
        clock: &ManualClock,
        store: &MemoryStore,
    ) -> SubmitAttempt {
        let session = state.session();
        let attempt = state.begin_submit(clock, store);
        if let SubmitAttempt::Dispatch(record) = &attempt {
            let result = block_on(sink.insert(record.clone()));
            state.finish_submit(session, result, clock, store);
        }
        attempt
    }

    fn sink_never_called() -> MockLeadSink {
        let mut sink = MockLeadSink::new();
        sink.expect_insert().never();
        sink
    }

    #[test]
    fn empty_identity_blocks_advance() {
        let mut state = WizardState::opened(OPENED_AT);
        assert!(!state.advance());
        assert_eq!(state.step, WizardStep::Identity);
        assert!(state.errors.contains(LeadField::Name));
        assert!(state.errors.contains(LeadField::Email));
    }

    #[test]
    fn minimal_email_advances_identity() {
        let mut state = WizardState::opened(OPENED_AT);
        state.update_field(LeadField::Name, "X").unwrap();
        state.update_field(LeadField::Email, "x@y").unwrap();
        assert!(!state.advance());
        assert_eq!(state.errors.get(LeadField::Email), Some("Valid email is required"));

        state.update_field(LeadField::Email, "x@y.z").unwrap();
        assert!(state.errors.is_empty());
        assert!(state.advance());
        assert_eq!(state.step, WizardStep::Scope);
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let mut state = WizardState::opened(OPENED_AT);
        state.advance();
        state.update_field(LeadField::Name, "N").unwrap();
        assert!(!state.errors.contains(LeadField::Name));
        assert!(state.errors.contains(LeadField::Email));
    }

    #[test]
    fn scope_needs_type_and_budget() {
        let mut state = WizardState::opened(OPENED_AT);
        fill_identity(&mut state);
        state.advance();

        state.update_field(LeadField::ProjectType, "other").unwrap();
        assert!(!state.advance());
        assert_eq!(state.step, WizardStep::Scope);
        assert_eq!(state.errors.get(LeadField::Budget), Some("Please select a budget range"));

        state.update_field(LeadField::Budget, "< 1000/-").unwrap();
        assert!(state.advance());
        assert_eq!(state.step, WizardStep::Vision);
    }

    #[test]
    fn vision_needs_twenty_chars() {
        let mut state = WizardState::opened(OPENED_AT);
        fill_identity(&mut state);
        state.advance();
        fill_scope(&mut state);
        state.advance();

        state.update_field(LeadField::Description, &"x".repeat(19)).unwrap();
        assert!(!state.advance());
        assert_eq!(state.step, WizardStep::Vision);

        state.update_field(LeadField::Description, &"x".repeat(20)).unwrap();
        assert!(state.advance());
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn back_keeps_entered_values() {
        let mut state = WizardState::opened(OPENED_AT);
        fill_identity(&mut state);
        let identity = state.form.clone();
        state.advance();
        assert!(state.back());
        assert_eq!(state.step, WizardStep::Identity);
        assert_eq!(state.form, identity);
        assert!(state.advance());
        assert_eq!(state.form.name, "Grace Hopper");
        assert_eq!(state.form.email, "grace@navy.mil");
        assert!(!WizardState::opened(OPENED_AT).back());
    }

    #[test]
    fn next_does_not_pass_review() {
        let mut state = at_review();
        assert!(!state.advance());
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn honeypot_fakes_success_without_insert() {
        let mut state = at_review();
        state.set_honeypot("http://spam.example");
        let clock = ManualClock::at(OPENED_AT + 10_000);
        let store = MemoryStore::default();

        let attempt = submit(&mut state, &sink_never_called(), &clock, &store);
        assert_eq!(attempt, SubmitAttempt::Deflected);
        assert_eq!(state.status, SubmissionStatus::SilentlyRejected);
        assert!(state.shows_success());
        assert_eq!(store.get(LAST_SUBMISSION_KEY), None);
    }

    #[test]
    fn honeypot_wins_even_when_too_fast() {
        let mut state = at_review();
        state.set_honeypot("x");
        let clock = ManualClock::at(OPENED_AT);
        let store = MemoryStore::default();
        assert_eq!(
            submit(&mut state, &sink_never_called(), &clock, &store),
            SubmitAttempt::Deflected
        );
    }

    #[test]
    fn fast_submit_changes_nothing() {
        let mut state = at_review();
        let before = state.clone();
        let clock = ManualClock::at(OPENED_AT + 2_999);
        let store = MemoryStore::default();

        assert_eq!(
            submit(&mut state, &sink_never_called(), &clock, &store),
            SubmitAttempt::TooFast
        );
        assert_eq!(state, before);
    }

    #[test]
    fn cooldown_blocks_with_notice() {
        let mut state = at_review();
        let clock = ManualClock::at(OPENED_AT + 30_000);
        let store = MemoryStore::default();
        guard::record_submission(&store, OPENED_AT - 20_000);

        let attempt = submit(&mut state, &sink_never_called(), &clock, &store);
        assert_eq!(attempt, SubmitAttempt::RateLimited { retry_in_ms: 10_000 });
        assert_eq!(state.notice, Some(Notice::RateLimited));
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.step, WizardStep::Review);
    }

    #[test]
    fn full_run_inserts_exactly_once() {
        let mut state = at_review();
        let clock = ManualClock::at(OPENED_AT);
        clock.advance(45_000);
        let store = MemoryStore::default();
        guard::record_submission(&store, OPENED_AT - 120_000);

        let mut sink = MockLeadSink::new();
        sink.expect_insert()
            .times(1)
            .withf(|record| {
                record.name == "Grace Hopper"
                    && record.email == "grace@navy.mil"
                    && record.company.is_empty()
                    && record.role == "Rear Admiral"
                    && record.project_type == ProjectType::WebApp
                    && record.budget == BudgetRange::OneToFiveThousand
                    && record.description == "A compiler explorer for the whole fleet"
                    && record.competitors == "Godbolt"
                    && record.status == LeadStatus::New
            })
            .returning(|_| Box::pin(async { Ok(()) }));

        let attempt = submit(&mut state, &sink, &clock, &store);
        assert!(matches!(attempt, SubmitAttempt::Dispatch(_)));
        assert_eq!(state.status, SubmissionStatus::Success);
        assert_eq!(
            store.get(LAST_SUBMISSION_KEY),
            Some((OPENED_AT + 45_000).to_string())
        );

        // a second press on the success screen does nothing
        assert_eq!(state.begin_submit(&clock, &store), SubmitAttempt::Ignored);
    }

    #[test]
    fn dispatched_record_matches_form() {
        let mut state = at_review();
        let clock = ManualClock::at(OPENED_AT + 3_000);
        let store = MemoryStore::default();

        match state.begin_submit(&clock, &store) {
            SubmitAttempt::Dispatch(record) => {
                assert_eq!(record, crate::contact::fakes::valid_record())
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(state.is_submitting());
        assert_eq!(state.begin_submit(&clock, &store), SubmitAttempt::Ignored);
    }

    #[test]
    fn sink_failure_allows_retry() {
        let mut state = at_review();
        let clock = ManualClock::at(OPENED_AT + 5_000);
        let store = MemoryStore::default();

        let mut failing = MockLeadSink::new();
        failing
            .expect_insert()
            .times(1)
            .returning(|_| Box::pin(async { Err(SinkError::Network("offline".into())) }));

        assert!(matches!(
            submit(&mut state, &failing, &clock, &store),
            SubmitAttempt::Dispatch(_)
        ));
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.notice, Some(Notice::SubmitFailed));
        assert_eq!(state.step, WizardStep::Review);
        assert_eq!(store.get(LAST_SUBMISSION_KEY), None);

        let mut working = MockLeadSink::new();
        working
            .expect_insert()
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        submit(&mut state, &working, &clock, &store);
        assert_eq!(state.status, SubmissionStatus::Success);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn submit_outside_review_is_ignored() {
        let mut state = WizardState::opened(OPENED_AT);
        let clock = ManualClock::at(OPENED_AT + 10_000);
        let store = MemoryStore::default();
        assert_eq!(
            submit(&mut state, &sink_never_called(), &clock, &store),
            SubmitAttempt::Ignored
        );
    }

    #[test]
    fn restart_resets_everything() {
        let mut state = at_review();
        state.set_honeypot("bot");
        state.status = SubmissionStatus::Success;
        let previous_session = state.session();

        state.restart(OPENED_AT + 90_000);
        assert_eq!(state.step, WizardStep::Identity);
        assert_eq!(state.form, LeadForm::default());
        assert!(state.errors.is_empty());
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.anti_spam, AntiSpam::new(OPENED_AT + 90_000));
        assert_ne!(state.session(), previous_session);
    }

    #[test]
    fn late_result_only_starts_cooldown() {
        let mut state = at_review();
        let clock = ManualClock::at(OPENED_AT + 8_000);
        let store = MemoryStore::default();

        let session = state.session();
        assert!(matches!(
            state.begin_submit(&clock, &store),
            SubmitAttempt::Dispatch(_)
        ));

        // closed and reopened while the insert was in flight
        state.restart(clock.now_ms());
        let fresh = state.clone();

        assert!(!state.finish_submit(session, Ok(()), &clock, &store));
        assert_eq!(state, fresh);
        assert_eq!(
            store.get(LAST_SUBMISSION_KEY),
            Some((OPENED_AT + 8_000).to_string())
        );
    }
}
