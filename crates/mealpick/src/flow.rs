//! Interface state machine.
//!
//! ```text
//! Idle ──submit──► Requesting ──completed──► ResultShown
//!  ▲                 │    ▲                       │
//!  └─────failed──────┘    └──submit / regenerate──┘
//! ```
//!
//! `Requesting` refuses every trigger until the in-flight call resolves.
//! Submitting writes the new context into [`SessionState`]; nothing else
//! mutates it.

use mealpick_types::{context::SerializedContext, prompt::MealPrompt};
use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterfaceState {
    #[default]
    Idle,
    Requesting,
    ResultShown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The form was submitted; carries the freshly serialized context.
    Submit(SerializedContext),
    Regenerate,
    Completed,
    Failed,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Submit(_) => "submit",
            Event::Regenerate => "regenerate",
            Event::Completed => "completed",
            Event::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send this prompt to the completion service.
    CallCompletion(MealPrompt),
    /// Nothing to call; show the page for the new state.
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a recommendation is already being prepared for this session")]
    Busy,

    #[error("nothing to regenerate: the form has not been submitted yet")]
    NothingToRegenerate,

    #[error("event `{event}` is not valid in state {state:?}")]
    Unexpected {
        state: InterfaceState,
        event: &'static str,
    },
}

/// Apply `event` to `state`. On error neither the state nor `memory` change.
pub fn transition(
    state: InterfaceState,
    event: Event,
    memory: &mut SessionState,
) -> Result<(InterfaceState, Effect), TransitionError> {
    match (state, event) {
        (InterfaceState::Requesting, Event::Submit(_) | Event::Regenerate) => {
            Err(TransitionError::Busy)
        }
        (_, Event::Submit(context)) => {
            memory.set(context.clone());
            Ok((
                InterfaceState::Requesting,
                Effect::CallCompletion(MealPrompt::new(context, false)),
            ))
        }
        (_, Event::Regenerate) => {
            let context = memory
                .get()
                .cloned()
                .ok_or(TransitionError::NothingToRegenerate)?;
            Ok((
                InterfaceState::Requesting,
                Effect::CallCompletion(MealPrompt::new(context, true)),
            ))
        }
        (InterfaceState::Requesting, Event::Completed) => {
            Ok((InterfaceState::ResultShown, Effect::Render))
        }
        (InterfaceState::Requesting, Event::Failed) => Ok((InterfaceState::Idle, Effect::Render)),
        (state, event) => Err(TransitionError::Unexpected {
            state,
            event: event.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use mealpick_types::form::{FormRecord, MealTime};
    use pretty_assertions::assert_eq;

    use super::*;

    fn context_a() -> SerializedContext {
        FormRecord::default().to_context()
    }

    fn context_b() -> SerializedContext {
        FormRecord {
            meal_time: MealTime::Dinner,
            ..FormRecord::default()
        }
        .to_context()
    }

    fn prompt_of(effect: Effect) -> MealPrompt {
        match effect {
            Effect::CallCompletion(prompt) => prompt,
            Effect::Render => panic!("expected a completion call"),
        }
    }

    #[test]
    fn submit_stores_context_and_requests() {
        let mut memory = SessionState::default();

        let (state, effect) =
            transition(InterfaceState::Idle, Event::Submit(context_a()), &mut memory).unwrap();

        assert_eq!(state, InterfaceState::Requesting);
        assert_eq!(memory.get(), Some(&context_a()));
        let prompt = prompt_of(effect);
        assert_eq!(prompt.context(), &context_a());
        assert!(!prompt.is_regeneration());
    }

    #[test]
    fn submit_always_overwrites() {
        let mut memory = SessionState::default();
        memory.set(context_a());

        transition(
            InterfaceState::ResultShown,
            Event::Submit(context_b()),
            &mut memory,
        )
        .unwrap();

        assert_eq!(memory.get(), Some(&context_b()));
    }

    #[test]
    fn regenerate_replays_last_submitted_context() {
        let mut memory = SessionState::default();
        memory.set(context_a());

        let (state, effect) =
            transition(InterfaceState::ResultShown, Event::Regenerate, &mut memory).unwrap();

        assert_eq!(state, InterfaceState::Requesting);
        let prompt = prompt_of(effect);
        assert_eq!(prompt.context(), &context_a());
        assert!(prompt.is_regeneration());
        assert_eq!(memory.get(), Some(&context_a()));
    }

    #[test]
    fn regenerate_without_context_is_refused() {
        let mut memory = SessionState::default();

        let err = transition(InterfaceState::Idle, Event::Regenerate, &mut memory).unwrap_err();

        assert_eq!(err, TransitionError::NothingToRegenerate);
        assert_eq!(memory.get(), None);
    }

    #[test]
    fn requesting_blocks_new_triggers_without_touching_memory() {
        let mut memory = SessionState::default();
        memory.set(context_a());

        let submit = transition(
            InterfaceState::Requesting,
            Event::Submit(context_b()),
            &mut memory,
        );
        let regenerate = transition(InterfaceState::Requesting, Event::Regenerate, &mut memory);

        assert_eq!(submit.unwrap_err(), TransitionError::Busy);
        assert_eq!(regenerate.unwrap_err(), TransitionError::Busy);
        assert_eq!(memory.get(), Some(&context_a()));
    }

    #[test]
    fn completion_outcomes() {
        let mut memory = SessionState::default();

        let (done, _) =
            transition(InterfaceState::Requesting, Event::Completed, &mut memory).unwrap();
        let (failed, effect) =
            transition(InterfaceState::Requesting, Event::Failed, &mut memory).unwrap();

        assert_eq!(done, InterfaceState::ResultShown);
        assert_eq!(failed, InterfaceState::Idle);
        assert_eq!(effect, Effect::Render);
    }

    #[test]
    fn stray_completion_is_unexpected() {
        let mut memory = SessionState::default();

        let err = transition(InterfaceState::Idle, Event::Completed, &mut memory).unwrap_err();

        assert_eq!(
            err,
            TransitionError::Unexpected {
                state: InterfaceState::Idle,
                event: "completed"
            }
        );
    }
}
