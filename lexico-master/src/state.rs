use dictionary::LookupResult;

/// Identifies one submitted lookup. Later submissions always get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request: RequestId,
    pub word: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        request: RequestId,
        word: String,
    },
    Success(LookupResult),
    Error(String),
}

/// State of the lookup screen.
///
/// All mutation goes through [`submit`](Self::submit) and the two resolve
/// functions. A resolution is only applied if it answers the most recent
/// submission, so a slow response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct LookupState {
    query: String,
    phase: Phase,
    last_request: u64,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Starts a lookup for the current query.
    ///
    /// Returns `None` and leaves the state untouched when the query is blank.
    pub fn submit(&mut self) -> Option<Submission> {
        let word = self.query.trim();
        if word.is_empty() {
            return None;
        }
        let word = word.to_owned();
        self.last_request += 1;
        let request = RequestId(self.last_request);
        self.phase = Phase::Loading {
            request,
            word: word.clone(),
        };
        Some(Submission { request, word })
    }

    pub fn resolve_success(&mut self, request: RequestId, result: LookupResult) -> bool {
        self.resolve(request, Phase::Success(result))
    }

    pub fn resolve_error(&mut self, request: RequestId, message: impl Into<String>) -> bool {
        self.resolve(request, Phase::Error(message.into()))
    }

    fn resolve(&mut self, request: RequestId, phase: Phase) -> bool {
        match &self.phase {
            Phase::Loading { request: pending, .. } if *pending == request => {
                self.phase = phase;
                true
            }
            _ => {
                tracing::debug!(?request, "discarding stale lookup response");
                false
            }
        }
    }
}
