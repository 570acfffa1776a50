//! Scripted stand-in for a platform permission dialog.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use guided_capture_core::models::permission::PermissionResponse;
use guided_capture_core::traits::permission_provider::PermissionProvider;

/// Answers prompts from a fixed script. Once the script runs out the last
/// answer repeats, so `ScriptedPrompt::new([denied, granted])` models a user
/// who declines once and then accepts.
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<PermissionResponse>>,
    last: Mutex<PermissionResponse>,
    prompts: AtomicU32,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = PermissionResponse>) -> Self {
        let answers: VecDeque<_> = answers.into_iter().collect();
        let last = answers.back().copied().unwrap_or_else(PermissionResponse::granted);
        Self {
            answers: Mutex::new(answers),
            last: Mutex::new(last),
            prompts: AtomicU32::new(0),
        }
    }

    pub fn always_grant() -> Self {
        Self::new([PermissionResponse::granted()])
    }

    /// How many times the dialog was shown.
    pub fn prompts(&self) -> u32 {
        self.prompts.load(Ordering::SeqCst)
    }

    fn next_answer(&self) -> PermissionResponse {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match self.answers.lock().pop_front() {
            Some(answer) => {
                *self.last.lock() = answer;
                answer
            }
            None => *self.last.lock(),
        }
    }
}

#[async_trait]
impl PermissionProvider for ScriptedPrompt {
    async fn request_permission(&self) -> PermissionResponse {
        tokio::task::yield_now().await;
        self.next_answer()
    }
}
