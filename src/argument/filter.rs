//! Argument filters: a predicate over a parsed value plus the message used
//! when the predicate rejects it.

use crate::text::{self, Message};
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type RejectionMessage<T> = Arc<dyn Fn(&str, &str, &T) -> Message + Send + Sync>;

/// Stateless accept/reject rule, cheap to clone and share between arguments.
pub struct ArgumentFilter<T> {
    predicate: Predicate<T>,
    rejection: RejectionMessage<T>,
}

impl<T> Clone for ArgumentFilter<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            rejection: Arc::clone(&self.rejection),
        }
    }
}

impl<T> fmt::Debug for ArgumentFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentFilter").finish_non_exhaustive()
    }
}

fn default_rejection<T>(argument: &str, input: &str, _value: &T) -> Message {
    Message::new(text::REJECTED_ARGUMENT)
        .with_arg(text::PLACEHOLDER_ARGUMENT, argument)
        .with_arg(text::PLACEHOLDER_INPUT, input)
}

impl<T: 'static> ArgumentFilter<T> {
    /// Filter with the default rejection message.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            rejection: Arc::new(default_rejection::<T>),
        }
    }

    pub fn accept_any() -> Self {
        Self::new(|_| true)
    }

    /// Replace the rejection message factory. It receives the argument name,
    /// the raw consumed input and the rejected value.
    pub fn with_rejection<M>(mut self, message: M) -> Self
    where
        M: Fn(&str, &str, &T) -> Message + Send + Sync + 'static,
    {
        self.rejection = Arc::new(message);
        self
    }

    /// Accept only values both filters accept; rejections report the first
    /// failing filter's message.
    pub fn and(self, other: ArgumentFilter<T>) -> Self {
        let first = self.clone();
        let second = other.clone();
        Self {
            predicate: Arc::new(move |value| first.test(value) && second.test(value)),
            rejection: Arc::new(move |argument, input, value| {
                if !self.test(value) {
                    self.rejection_message(argument, input, value)
                } else {
                    other.rejection_message(argument, input, value)
                }
            }),
        }
    }

    pub fn test(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    pub fn rejection_message(&self, argument: &str, input: &str, value: &T) -> Message {
        (self.rejection)(argument, input, value)
    }
}

impl<O: 'static> ArgumentFilter<Option<O>> {
    /// Accept resolved objects only; an absent object is reported as not found.
    pub fn existing() -> Self {
        Self::new(Option::is_some).with_rejection(|argument, input, _| {
            Message::new(text::OBJECT_NOT_FOUND)
                .with_arg(text::PLACEHOLDER_ARGUMENT, argument)
                .with_arg(text::PLACEHOLDER_INPUT, input)
        })
    }

    /// Accept existing objects that pass `predicate`.
    pub fn existing_where<P>(predicate: P) -> Self
    where
        P: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self::existing().and(Self::new(move |value: &Option<O>| {
            value.as_ref().map_or(false, |object| predicate(object))
        }))
    }
}
