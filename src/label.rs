//! Class-label prompting for finished selections.

use std::collections::VecDeque;

/// Pending class names, consumed one per finalized selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLabelQueue {
    pending: VecDeque<String>,
}

impl ClassLabelQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blank labels are ignored.
    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            self.pending.push_back(trimmed.to_string());
        }
    }

    pub fn front(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Modal label entry. `prompt` blocks until the user answers, pushing any
/// chosen label(s) onto `queue`; pushing nothing means the user cancelled.
pub trait LabelPrompt {
    fn prompt(&mut self, queue: &mut ClassLabelQueue);
}

impl<F: FnMut(&mut ClassLabelQueue)> LabelPrompt for F {
    fn prompt(&mut self, queue: &mut ClassLabelQueue) {
        self(queue)
    }
}

/// Prompt that answers from a fixed script, then cancels once exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LabelPrompt for ScriptedPrompt {
    fn prompt(&mut self, queue: &mut ClassLabelQueue) {
        if let Some(Some(label)) = self.answers.pop_front() {
            queue.push(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo_and_skips_blank() {
        let mut q = ClassLabelQueue::new();
        q.push("car");
        q.push("   ");
        q.push(" truck ");
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop().as_deref(), Some("car"));
        assert_eq!(q.front(), Some("truck"));
    }

    #[test]
    fn scripted_prompt_cancels_when_exhausted() {
        let mut prompt = ScriptedPrompt::new([Some("car"), None]);
        let mut q = ClassLabelQueue::new();
        prompt.prompt(&mut q);
        prompt.prompt(&mut q);
        prompt.prompt(&mut q);
        assert_eq!(q.len(), 1);
        assert_eq!(prompt.remaining(), 0);
    }

    #[test]
    fn closures_are_prompts() {
        let mut q = ClassLabelQueue::new();
        let mut prompt = |q: &mut ClassLabelQueue| q.push("person");
        prompt.prompt(&mut q);
        assert_eq!(q.front(), Some("person"));
    }
}
