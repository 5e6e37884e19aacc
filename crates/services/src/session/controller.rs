use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{
    AnswerSheet, ChoiceLabel, Question, QuizPayload, SubmissionResult, TimerConfig,
};

use crate::error::{SessionError, SubmissionError};
use crate::navigation::NavigationCursor;
use crate::session::progress::SessionProgress;
use crate::submission::{SubmissionClient, SubmissionRequest};
use crate::timer::{Tick, TimerEngine};

//
// ─── STATES AND OUTCOMES ───────────────────────────────────────────────────────
//

/// Lifecycle of one session attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting learner actions and timer ticks.
    Active,
    /// A manual submission is in flight; inputs and ticks are suspended.
    Submitting,
    /// An expiry-triggered submission is in flight.
    ExpiredSubmitting,
    /// Scored result attached; the session is immutable.
    Submitted,
    /// An expiry-triggered submission failed. Terminal: the timer has
    /// already elapsed, so a retry has no remaining-time semantics.
    Failed,
}

impl SessionPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted | Self::Failed)
    }
}

/// What a delivered tick did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not consuming ticks right now.
    Suspended,
    /// One second elapsed, time remains.
    Running { remaining: u32 },
    /// Per-question expiry on a non-final question: automatic advance,
    /// forfeiting the departed question's unused time.
    AdvancedQuestion { index: usize, remaining: u32 },
    /// Expiry triggered the submission and it succeeded.
    Submitted,
    /// Expiry triggered the submission and it failed; the session is now
    /// terminal with the failure attached.
    Failed(SubmissionError),
}

/// Result of driving a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator scored the session; result attached.
    Completed,
    /// Manual submission failed; the session reverted to `Active` with the
    /// timer held, and the learner may retry or dismiss.
    Retryable(SubmissionError),
    /// Expiry-triggered submission failed; the session is terminal.
    Fatal(SubmissionError),
    /// The trigger lost the race against another submission attempt and was
    /// dropped as a no-op.
    Ignored,
}

/// Snapshot handed to the confirmation dialog before a manual submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPrompt {
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitTrigger {
    Manual,
    Expiry,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// The session state machine.
///
/// Owns the authoritative session state: the cursor, the answer sheet, and
/// the countdown are private collaborators mutated by nothing else. Callers
/// must serialize access (the ticker wraps the controller in a mutex); the
/// `&mut self` receivers make races impossible within one controller.
///
/// At most one submission call is made per session: whichever trigger
/// (manual confirm or timer expiry) first moves the phase out of `Active`
/// wins, and later triggers are dropped as no-ops.
pub struct SessionController {
    payload: QuizPayload,
    client: Arc<dyn SubmissionClient>,
    clock: Clock,
    phase: SessionPhase,
    engine: TimerEngine,
    cursor: NavigationCursor,
    sheet: AnswerSheet,
    /// Seconds actually spent across the session. Needed independently of
    /// the engine in per-question mode, where remaining time resets on each
    /// transition and cannot reconstruct the total.
    elapsed_secs: u32,
    submit_requested: bool,
    /// Set after a recoverable manual failure: ticks are suppressed so the
    /// countdown does not drain behind the error display.
    timer_held: bool,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    result: Option<SubmissionResult>,
    failure: Option<SubmissionError>,
}

impl SessionController {
    /// Start a session over a validated payload, armed per its timer config.
    #[must_use]
    pub fn new(payload: QuizPayload, client: Arc<dyn SubmissionClient>, clock: Clock) -> Self {
        let timer = payload.timer();
        let engine = TimerEngine::start(timer.mode(), timer.initial_secs());
        let cursor = NavigationCursor::new(payload.len());
        let started_at = clock.now();
        Self {
            payload,
            client,
            clock,
            phase: SessionPhase::Active,
            engine,
            cursor,
            sheet: AnswerSheet::new(),
            elapsed_secs: 0,
            submit_requested: false,
            timer_held: false,
            started_at,
            submitted_at: None,
            result: None,
            failure: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn payload(&self) -> &QuizPayload {
        &self.payload
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        self.payload
            .question_at(self.cursor.index())
            .expect("cursor is bounded to the question list")
    }

    /// The learner's stored choice for the currently displayed question.
    #[must_use]
    pub fn current_selection(&self) -> Option<ChoiceLabel> {
        self.sheet.selected(self.current_question().id())
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.sheet.answered_count()
    }

    /// Seconds left on the countdown; `None` once it is disarmed.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.engine.is_armed().then(|| self.engine.remaining())
    }

    /// The scored result, once the session reached `Submitted`.
    #[must_use]
    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// The terminal failure, once the session reached `Failed`.
    #[must_use]
    pub fn failure(&self) -> Option<&SubmissionError> {
        self.failure.as_ref()
    }

    /// True while a recoverable manual failure holds the countdown.
    #[must_use]
    pub fn is_timer_held(&self) -> bool {
        self.timer_held
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            phase: self.phase,
            current_index: self.cursor.index(),
            total: self.payload.len(),
            answered: self.sheet.answered_count(),
            remaining_secs: self.remaining_secs(),
        }
    }

    //
    // ─── LEARNER ACTIONS ───────────────────────────────────────────────────
    //

    /// Record `choice` for the currently displayed question, superseding any
    /// earlier selection. Does not touch the timer or the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn select_answer(&mut self, choice: ChoiceLabel) -> Result<(), SessionError> {
        self.ensure_active()?;
        let question_id = self.current_question().id();
        self.sheet.select(question_id, choice);
        Ok(())
    }

    /// Move to the next question. No-op at the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn next(&mut self) -> Result<bool, SessionError> {
        self.ensure_active()?;
        let moved = self.cursor.next();
        if moved {
            self.reset_per_question_timer();
        }
        Ok(moved)
    }

    /// Move to the previous question. No-op at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn previous(&mut self) -> Result<bool, SessionError> {
        self.ensure_active()?;
        let moved = self.cursor.previous();
        if moved {
            self.reset_per_question_timer();
        }
        Ok(moved)
    }

    /// Jump directly to a question index from the quick-navigation grid.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active` and
    /// `SessionError::OutOfRange` for an invalid index.
    pub fn jump_to(&mut self, index: usize) -> Result<bool, SessionError> {
        self.ensure_active()?;
        let moved = self.cursor.jump_to(index)?;
        if moved {
            self.reset_per_question_timer();
        }
        Ok(moved)
    }

    /// First step of a manual submit: the explicit acknowledgment gate.
    ///
    /// Returns the counts for the confirmation dialog; unanswered questions
    /// never block submission. The countdown keeps running while the dialog
    /// is open, and an expiry that fires meanwhile wins the race.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` outside `Active`.
    pub fn request_submit(&mut self) -> Result<SubmitPrompt, SessionError> {
        self.ensure_active()?;
        self.submit_requested = true;
        Ok(SubmitPrompt {
            answered: self.sheet.answered_count(),
            total: self.payload.len(),
        })
    }

    /// Withdraw a pending submit request without submitting.
    pub fn cancel_submit(&mut self) {
        self.submit_requested = false;
    }

    /// Second step of a manual submit, after the learner acknowledged the
    /// confirmation dialog. Also the retry entry point after a recoverable
    /// failure (the request stays pending across failures).
    ///
    /// Returns `SubmitOutcome::Ignored` when another trigger already moved
    /// the session out of `Active`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SubmitNotRequested` when no acknowledgment
    /// step preceded this call.
    pub async fn confirm_submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.phase != SessionPhase::Active {
            return Ok(SubmitOutcome::Ignored);
        }
        if !self.submit_requested {
            return Err(SessionError::SubmitNotRequested);
        }
        Ok(self.execute_submit(SubmitTrigger::Manual).await)
    }

    /// Dismiss the error display after a recoverable manual failure,
    /// releasing the held countdown.
    pub fn dismiss_submit_error(&mut self) {
        if self.phase == SessionPhase::Active && self.timer_held {
            self.timer_held = false;
            self.submit_requested = false;
            self.engine.resume();
        }
    }

    //
    // ─── TICK DELIVERY ─────────────────────────────────────────────────────
    //

    /// Consume one elapsed second.
    ///
    /// Suspends itself outside `Active` and while the timer is held, so no
    /// time drains during an in-flight submission or an error display. On
    /// expiry, per-question mode auto-advances (or auto-submits on the last
    /// question) and whole mode always auto-submits.
    pub async fn tick(&mut self) -> TickOutcome {
        if self.phase != SessionPhase::Active || self.timer_held {
            return TickOutcome::Suspended;
        }

        match self.engine.tick() {
            Tick::Idle => TickOutcome::Suspended,
            Tick::Running { remaining } => {
                self.elapsed_secs += 1;
                TickOutcome::Running { remaining }
            }
            Tick::Expired => {
                self.elapsed_secs += 1;
                self.handle_expiry().await
            }
        }
    }

    async fn handle_expiry(&mut self) -> TickOutcome {
        if let TimerConfig::PerQuestion { secs_per_question } = self.payload.timer()
            && !self.cursor.is_last()
        {
            // Unused time on the departed question is forfeited.
            self.cursor.next();
            self.engine.reset(secs_per_question);
            return TickOutcome::AdvancedQuestion {
                index: self.cursor.index(),
                remaining: secs_per_question,
            };
        }

        match self.execute_submit(SubmitTrigger::Expiry).await {
            SubmitOutcome::Completed => TickOutcome::Submitted,
            SubmitOutcome::Ignored => TickOutcome::Suspended,
            SubmitOutcome::Retryable(err) | SubmitOutcome::Fatal(err) => {
                TickOutcome::Failed(err)
            }
        }
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────
    //

    fn elapsed_for_submission(&self) -> u32 {
        match self.payload.timer() {
            TimerConfig::Whole { total_secs } => {
                total_secs.saturating_sub(self.engine.remaining())
            }
            TimerConfig::PerQuestion { .. } => self.elapsed_secs,
        }
    }

    async fn execute_submit(&mut self, trigger: SubmitTrigger) -> SubmitOutcome {
        // First-to-acquire-the-transition wins; the loser is dropped.
        if self.phase != SessionPhase::Active {
            return SubmitOutcome::Ignored;
        }
        self.phase = match trigger {
            SubmitTrigger::Manual => SessionPhase::Submitting,
            SubmitTrigger::Expiry => SessionPhase::ExpiredSubmitting,
        };
        self.engine.halt();

        let request = SubmissionRequest {
            quiz_id: self.payload.id(),
            answers: self.sheet.to_submission(&self.payload.question_order()),
            time_taken_secs: self.elapsed_for_submission(),
        };

        match self.client.submit(&request).await {
            Ok(result) => {
                self.result = Some(result);
                self.submitted_at = Some(self.clock.now());
                self.submit_requested = false;
                self.phase = SessionPhase::Submitted;
                SubmitOutcome::Completed
            }
            Err(err) => match trigger {
                SubmitTrigger::Manual => {
                    // Recoverable: answers and cursor are intact, the timer
                    // stays held until the learner retries or dismisses.
                    self.phase = SessionPhase::Active;
                    self.timer_held = true;
                    SubmitOutcome::Retryable(err)
                }
                SubmitTrigger::Expiry => {
                    self.failure = Some(err.clone());
                    self.phase = SessionPhase::Failed;
                    SubmitOutcome::Fatal(err)
                }
            },
        }
    }

    fn reset_per_question_timer(&mut self) {
        if let TimerConfig::PerQuestion { secs_per_question } = self.payload.timer() {
            self.engine.reset(secs_per_question);
        }
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        // Inputs stay disabled behind a failure display until dismissed.
        if self.phase == SessionPhase::Active && !self.timer_held {
            Ok(())
        } else {
            Err(SessionError::NotActive)
        }
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("quiz_id", &self.payload.id())
            .field("phase", &self.phase)
            .field("current", &self.cursor.index())
            .field("answered", &self.sheet.answered_count())
            .field("remaining", &self.engine.remaining())
            .field("elapsed_secs", &self.elapsed_secs)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use quiz_core::model::{QuestionId, QuestionOutcome, QuizId};
    use quiz_core::time::fixed_clock;

    /// Scripted submission double: pops pre-loaded responses, records every
    /// request, and echoes an all-wrong result when the script runs dry.
    struct ScriptedClient {
        responses: Mutex<VecDeque<Result<SubmissionResult, SubmissionError>>>,
        requests: Mutex<Vec<SubmissionRequest>>,
    }

    impl ScriptedClient {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn push_failure(self: &Arc<Self>, err: SubmissionError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }

        fn requests(&self) -> Vec<SubmissionRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn echo_result(request: &SubmissionRequest) -> SubmissionResult {
            let outcomes: Vec<_> = request
                .answers
                .iter()
                .map(|answer| QuestionOutcome {
                    question_id: answer.question_id,
                    selected: answer.selected,
                    correct: ChoiceLabel::A,
                    is_correct: false,
                    explanation: None,
                })
                .collect();
            let total = u32::try_from(outcomes.len()).unwrap();
            SubmissionResult::from_parts(
                0.0,
                0,
                total,
                request.time_taken_secs,
                None,
                outcomes,
            )
            .unwrap()
        }
    }

    #[async_trait]
    impl SubmissionClient for ScriptedClient {
        async fn submit(
            &self,
            request: &SubmissionRequest,
        ) -> Result<SubmissionResult, SubmissionError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.responses.lock().unwrap().pop_front() {
                Some(scripted) => scripted,
                None => Ok(Self::echo_result(request)),
            }
        }
    }

    fn build_payload(question_count: u64, timer: TimerConfig) -> QuizPayload {
        let questions = (1..=question_count)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    format!("Question {id}?"),
                    vec!["first".into(), "second".into()],
                    None,
                )
                .unwrap()
            })
            .collect();
        QuizPayload::new(QuizId::new(1), "Timed", None, questions, timer).unwrap()
    }

    fn build_controller(
        question_count: u64,
        timer: TimerConfig,
    ) -> (SessionController, Arc<ScriptedClient>) {
        let client = ScriptedClient::new();
        let controller = SessionController::new(
            build_payload(question_count, timer),
            client.clone(),
            fixed_clock(),
        );
        (controller, client)
    }

    #[tokio::test]
    async fn manual_submit_reports_answers_and_elapsed_time() {
        let (mut session, client) =
            build_controller(2, TimerConfig::whole(120).unwrap());

        session.select_answer(ChoiceLabel::A).unwrap();
        assert!(session.next().unwrap());
        session.select_answer(ChoiceLabel::B).unwrap();

        for _ in 0..15 {
            session.tick().await;
        }

        let prompt = session.request_submit().unwrap();
        assert_eq!(prompt.answered, 2);
        assert_eq!(prompt.total, 2);

        let outcome = session.confirm_submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(session.phase(), SessionPhase::Submitted);

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].time_taken_secs, 15);
        assert_eq!(requests[0].answers[0].selected, Some(ChoiceLabel::A));
        assert_eq!(requests[0].answers[1].selected, Some(ChoiceLabel::B));
    }

    #[tokio::test]
    async fn whole_mode_expiry_auto_submits_exactly_once() {
        let (mut session, client) = build_controller(2, TimerConfig::whole(60).unwrap());

        let mut submitted = 0;
        for _ in 0..60 {
            if session.tick().await == TickOutcome::Submitted {
                submitted += 1;
            }
        }

        assert_eq!(submitted, 1);
        assert_eq!(session.phase(), SessionPhase::Submitted);
        assert_eq!(client.call_count(), 1);

        let request = &client.requests()[0];
        assert_eq!(request.time_taken_secs, 60);
        assert!(request.answers.iter().all(|a| a.selected.is_none()));

        // Further ticks are suspended, not re-submitted.
        assert_eq!(session.tick().await, TickOutcome::Suspended);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn per_question_expiry_advances_then_submits_on_last() {
        let (mut session, client) =
            build_controller(3, TimerConfig::per_question(30).unwrap());

        // Advancing at tick 10 resets the allotment.
        for _ in 0..10 {
            session.tick().await;
        }
        assert_eq!(session.remaining_secs(), Some(20));
        session.next().unwrap();
        assert_eq!(session.remaining_secs(), Some(30));
        assert_eq!(session.current_index(), 1);

        // Let question 2 expire: automatic advance, no confirmation.
        for _ in 0..29 {
            session.tick().await;
        }
        let outcome = session.tick().await;
        assert_eq!(
            outcome,
            TickOutcome::AdvancedQuestion {
                index: 2,
                remaining: 30
            }
        );
        assert_eq!(client.call_count(), 0);

        // Expiry on the last question submits instead of advancing.
        for _ in 0..29 {
            session.tick().await;
        }
        assert_eq!(session.tick().await, TickOutcome::Submitted);
        assert_eq!(client.call_count(), 1);
        // 10 on question 1 plus a full allotment on questions 2 and 3.
        assert_eq!(client.requests()[0].time_taken_secs, 70);
    }

    #[tokio::test]
    async fn per_question_navigation_forfeits_unused_time() {
        let (mut session, _client) =
            build_controller(3, TimerConfig::per_question(30).unwrap());

        for _ in 0..25 {
            session.tick().await;
        }
        session.jump_to(2).unwrap();
        assert_eq!(session.remaining_secs(), Some(30));

        session.previous().unwrap();
        assert_eq!(session.remaining_secs(), Some(30));

        // A jump to the current index is not a transition.
        for _ in 0..5 {
            session.tick().await;
        }
        assert_eq!(session.jump_to(1), Ok(false));
        assert_eq!(session.remaining_secs(), Some(25));
    }

    #[tokio::test]
    async fn whole_mode_navigation_keeps_the_countdown() {
        let (mut session, _client) = build_controller(3, TimerConfig::whole(90).unwrap());

        for _ in 0..40 {
            session.tick().await;
        }
        session.next().unwrap();
        session.jump_to(2).unwrap();
        assert_eq!(session.remaining_secs(), Some(50));
    }

    #[tokio::test]
    async fn simultaneous_manual_and_expiry_trigger_submit_once() {
        let (mut session, client) = build_controller(1, TimerConfig::whole(5).unwrap());

        session.request_submit().unwrap();
        for _ in 0..5 {
            session.tick().await;
        }
        assert_eq!(session.phase(), SessionPhase::Submitted);

        // The learner's confirmation arrives after expiry won the race.
        let outcome = session.confirm_submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn manual_failure_is_recoverable_and_holds_the_timer() {
        let (mut session, client) = build_controller(2, TimerConfig::whole(100).unwrap());
        client.push_failure(SubmissionError::Transient("connection refused".into()));

        session.select_answer(ChoiceLabel::B).unwrap();
        for _ in 0..10 {
            session.tick().await;
        }

        session.request_submit().unwrap();
        let outcome = session.confirm_submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Retryable(_)));
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.is_timer_held());

        // Time must not drain behind the error display, and inputs stay off.
        assert_eq!(session.tick().await, TickOutcome::Suspended);
        assert_eq!(session.remaining_secs(), None);
        assert_eq!(session.select_answer(ChoiceLabel::A), Err(SessionError::NotActive));

        // Answers and cursor survive for the retry.
        let outcome = session.confirm_submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(session.phase(), SessionPhase::Submitted);
        assert_eq!(client.call_count(), 2);
        assert_eq!(
            client.requests()[1].answers[0].selected,
            Some(ChoiceLabel::B)
        );
        // Elapsed time did not grow while the error was displayed.
        assert_eq!(client.requests()[1].time_taken_secs, 10);
    }

    #[tokio::test]
    async fn dismissing_a_manual_failure_resumes_the_countdown() {
        let (mut session, client) = build_controller(1, TimerConfig::whole(30).unwrap());
        client.push_failure(SubmissionError::Transient("timeout".into()));

        for _ in 0..5 {
            session.tick().await;
        }
        session.request_submit().unwrap();
        session.confirm_submit().await.unwrap();
        assert!(session.is_timer_held());

        session.dismiss_submit_error();
        assert!(!session.is_timer_held());
        assert_eq!(session.tick().await, TickOutcome::Running { remaining: 24 });
        // A fresh acknowledgment is needed for the next attempt.
        assert_eq!(
            session.confirm_submit().await,
            Err(SessionError::SubmitNotRequested)
        );
    }

    #[tokio::test]
    async fn expiry_failure_is_terminal() {
        let (mut session, client) = build_controller(1, TimerConfig::whole(2).unwrap());
        client.push_failure(SubmissionError::Transient("gateway down".into()));

        session.tick().await;
        let outcome = session.tick().await;
        assert!(matches!(outcome, TickOutcome::Failed(_)));
        assert_eq!(session.phase(), SessionPhase::Failed);
        assert!(session.failure().is_some());

        // Terminal: nothing moves the session any more.
        assert_eq!(session.select_answer(ChoiceLabel::A), Err(SessionError::NotActive));
        assert_eq!(session.next(), Err(SessionError::NotActive));
        assert_eq!(session.tick().await, TickOutcome::Suspended);
        assert!(session.request_submit().is_err());
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn unanswered_questions_do_not_block_submission() {
        let (mut session, client) = build_controller(5, TimerConfig::whole(300).unwrap());

        session.select_answer(ChoiceLabel::A).unwrap();
        session.next().unwrap();
        session.select_answer(ChoiceLabel::B).unwrap();
        session.jump_to(4).unwrap();
        session.select_answer(ChoiceLabel::A).unwrap();

        session.request_submit().unwrap();
        let outcome = session.confirm_submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Completed);

        let request = &client.requests()[0];
        let absent: Vec<_> = request
            .answers
            .iter()
            .filter(|a| a.selected.is_none())
            .map(|a| a.question_id)
            .collect();
        assert_eq!(absent, vec![QuestionId::new(3), QuestionId::new(4)]);

        let result = session.result().unwrap();
        let unanswered = result
            .outcomes()
            .iter()
            .filter(|o| o.selected.is_none())
            .count();
        assert_eq!(unanswered, 2);
    }

    #[tokio::test]
    async fn reselecting_supersedes_the_previous_choice() {
        let (mut session, client) = build_controller(1, TimerConfig::whole(60).unwrap());

        session.select_answer(ChoiceLabel::A).unwrap();
        session.select_answer(ChoiceLabel::B).unwrap();
        assert_eq!(session.current_selection(), Some(ChoiceLabel::B));
        assert_eq!(session.answered_count(), 1);

        session.request_submit().unwrap();
        session.confirm_submit().await.unwrap();
        assert_eq!(
            client.requests()[0].answers[0].selected,
            Some(ChoiceLabel::B)
        );
    }

    #[tokio::test]
    async fn cancelling_the_confirmation_keeps_the_session_running() {
        let (mut session, client) = build_controller(2, TimerConfig::whole(60).unwrap());

        session.request_submit().unwrap();
        session.cancel_submit();
        assert_eq!(
            session.confirm_submit().await,
            Err(SessionError::SubmitNotRequested)
        );
        assert_eq!(session.phase(), SessionPhase::Active);
        assert_eq!(session.tick().await, TickOutcome::Running { remaining: 59 });
        assert_eq!(client.call_count(), 0);
    }
}
