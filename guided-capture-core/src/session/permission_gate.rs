use parking_lot::Mutex;

use crate::models::permission::{Capability, PermissionResponse, PermissionState};
use crate::traits::permission_provider::PermissionProvider;

#[derive(Debug, Clone, Copy)]
struct CapabilityEntry {
    state: PermissionState,
    can_ask_again: bool,
    prompts: u32,
}

impl CapabilityEntry {
    fn new() -> Self {
        Self {
            state: PermissionState::Unrequested,
            can_ask_again: true,
            prompts: 0,
        }
    }
}

/// Tracks authorization for the camera and media-store capabilities.
///
/// Requests are idempotent once granted, at most one prompt per capability is
/// outstanding at a time, and a capability the platform refuses to re-prompt
/// for keeps resolving to `Denied` without touching the host again.
pub struct PermissionGate {
    camera: Mutex<CapabilityEntry>,
    media_store: Mutex<CapabilityEntry>,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self {
            camera: Mutex::new(CapabilityEntry::new()),
            media_store: Mutex::new(CapabilityEntry::new()),
        }
    }

    pub async fn request_camera<P>(&self, provider: &P) -> PermissionState
    where
        P: PermissionProvider + ?Sized,
    {
        self.request(Capability::Camera, provider).await
    }

    pub async fn request_media_store<P>(&self, provider: &P) -> PermissionState
    where
        P: PermissionProvider + ?Sized,
    {
        self.request(Capability::MediaStore, provider).await
    }

    /// Ask `provider` for `capability` unless the answer is already known.
    pub async fn request<P>(&self, capability: Capability, provider: &P) -> PermissionState
    where
        P: PermissionProvider + ?Sized,
    {
        let previous = {
            let mut entry = self.entry(capability).lock();
            match entry.state {
                PermissionState::Granted | PermissionState::Requesting => return entry.state,
                PermissionState::Denied if !entry.can_ask_again => {
                    log::debug!("{} permission permanently denied, not prompting", capability);
                    return PermissionState::Denied;
                }
                _ => {}
            }
            let previous = entry.state;
            entry.state = PermissionState::Requesting;
            entry.prompts += 1;
            previous
        };

        let mut pending = PendingRequest {
            entry: self.entry(capability),
            previous,
            resolved: false,
        };
        let response = provider.request_permission().await;
        pending.resolve(response);

        let state = response.state();
        match state {
            PermissionState::Granted => log::info!("{} permission granted", capability),
            _ => log::warn!(
                "{} permission denied (can ask again: {})",
                capability,
                response.can_ask_again
            ),
        }
        state
    }

    /// The host reported that a previous grant was withdrawn (e.g. from system settings).
    pub fn revoke(&self, capability: Capability) {
        let mut entry = self.entry(capability).lock();
        entry.state = PermissionState::Denied;
        entry.can_ask_again = true;
        log::info!("{} permission revoked", capability);
    }

    pub fn state(&self, capability: Capability) -> PermissionState {
        self.entry(capability).lock().state
    }

    pub fn is_camera_granted(&self) -> bool {
        self.state(Capability::Camera).is_granted()
    }

    pub fn is_media_store_granted(&self) -> bool {
        self.state(Capability::MediaStore).is_granted()
    }

    /// Number of times the host prompt was shown for `capability`.
    pub fn prompt_count(&self, capability: Capability) -> u32 {
        self.entry(capability).lock().prompts
    }

    fn entry(&self, capability: Capability) -> &Mutex<CapabilityEntry> {
        match capability {
            Capability::Camera => &self.camera,
            Capability::MediaStore => &self.media_store,
        }
    }
}

impl Default for PermissionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Puts a capability back to its previous state if the request future is
/// dropped before the host answers.
struct PendingRequest<'a> {
    entry: &'a Mutex<CapabilityEntry>,
    previous: PermissionState,
    resolved: bool,
}

impl PendingRequest<'_> {
    fn resolve(&mut self, response: PermissionResponse) {
        let mut entry = self.entry.lock();
        entry.state = response.state();
        entry.can_ask_again = response.granted || response.can_ask_again;
        self.resolved = true;
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.entry.lock().state = self.previous;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::future::Future;
    use std::task::{Context, Waker};

    use async_trait::async_trait;

    use super::*;

    /// Answers from a fixed script, repeating the last answer.
    struct Prompt {
        answers: Mutex<VecDeque<PermissionResponse>>,
        last: Mutex<PermissionResponse>,
    }

    impl Prompt {
        fn new(answers: &[PermissionResponse]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().copied().collect()),
                last: Mutex::new(PermissionResponse::denied()),
            }
        }
    }

    #[async_trait]
    impl PermissionProvider for Prompt {
        async fn request_permission(&self) -> PermissionResponse {
            tokio::task::yield_now().await;
            let next = self.answers.lock().pop_front();
            let mut last = self.last.lock();
            if let Some(answer) = next {
                *last = answer;
            }
            *last
        }
    }

    #[tokio::test]
    async fn starts_unrequested() {
        let gate = PermissionGate::new();
        assert_eq!(gate.state(Capability::Camera), PermissionState::Unrequested);
        assert!(!gate.is_camera_granted());
        assert!(!gate.is_media_store_granted());
    }

    #[tokio::test]
    async fn granted_is_idempotent() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::granted()]);

        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Granted);
        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Granted);
        assert_eq!(gate.prompt_count(Capability::Camera), 1);
        assert!(gate.is_camera_granted());
        assert!(!gate.is_media_store_granted());
    }

    #[tokio::test]
    async fn denied_can_be_retried() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::denied(), PermissionResponse::granted()]);

        assert_eq!(gate.request_media_store(&prompt).await, PermissionState::Denied);
        assert_eq!(gate.request_media_store(&prompt).await, PermissionState::Granted);
        assert_eq!(gate.prompt_count(Capability::MediaStore), 2);
    }

    #[tokio::test]
    async fn permanent_denial_stops_prompting() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::denied_permanently(), PermissionResponse::granted()]);

        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Denied);
        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Denied);
        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Denied);
        assert_eq!(gate.prompt_count(Capability::Camera), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_prompt() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::granted()]);

        let (first, second) = tokio::join!(gate.request_camera(&prompt), gate.request_camera(&prompt));
        assert_eq!(first, PermissionState::Granted);
        assert_eq!(second, PermissionState::Requesting);
        assert_eq!(gate.prompt_count(Capability::Camera), 1);
        assert!(gate.is_camera_granted());
    }

    #[tokio::test]
    async fn revoke_allows_prompting_again() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::granted()]);

        gate.request_camera(&prompt).await;
        gate.revoke(Capability::Camera);
        assert_eq!(gate.state(Capability::Camera), PermissionState::Denied);

        assert_eq!(gate.request_camera(&prompt).await, PermissionState::Granted);
        assert_eq!(gate.prompt_count(Capability::Camera), 2);
    }

    #[tokio::test]
    async fn dropped_request_restores_previous_state() {
        let gate = PermissionGate::new();
        let prompt = Prompt::new(&[PermissionResponse::granted()]);

        {
            let mut request = Box::pin(gate.request_camera(&prompt));
            // Poll once so the gate marks the capability as requesting, then drop.
            let mut cx = Context::from_waker(Waker::noop());
            assert!(request.as_mut().poll(&mut cx).is_pending());
            assert_eq!(gate.state(Capability::Camera), PermissionState::Requesting);
        }

        assert_eq!(gate.state(Capability::Camera), PermissionState::Unrequested);
    }
}
