use std::fmt::Display;

/// Fetch lifecycle of one screen: every mutating action re-enters
/// `Loading` and resolves to `Loaded` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

/// Token identifying one issued fetch; only the latest one may resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Screen fetch-state holder with a stale-response guard.
///
/// Responses carry the token of the request that produced them; a response
/// for anything but the latest issued request is discarded, so an old
/// in-flight fetch can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct ScreenState<T> {
    state: FetchState<T>,
    latest: u64,
}

impl<T> ScreenState<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Enter `Loading` and issue the token for this fetch.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = FetchState::Loading;
        RequestToken(self.latest)
    }

    /// Apply a fetch outcome. Returns false (and leaves the state alone)
    /// when the token is stale.
    pub fn resolve<E: Display>(&mut self, token: RequestToken, result: Result<T, E>) -> bool {
        if token.0 != self.latest {
            return false;
        }
        self.state = match result {
            Ok(value) => FetchState::Loaded(value),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        true
    }
}
