//! The request lifecycle shared by the fetch and send wrappers.
//!
//! ```text
//! Idle ──┐
//! Success ├─ Init ──> Loading ── Success(data) ──> Success
//! Error ──┘                  └── Failure ───────> Error
//! ```
//!
//! Idle is only ever the initial state, and only when there is no initial
//! URL to request on mount.

/// Derived view of the three state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// State exposed to the UI.
///
/// At most one flag is set at a time. `data` is kept across failures and
/// only replaced by a newer success.
#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub is_loading: bool,
    pub is_success: bool,
    pub is_error: bool,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestAction<T> {
    Init,
    Success(T),
    Failure,
}

impl<T> HookState<T> {
    /// A request issued on mount means the first render is already loading.
    pub fn new(initial_url_defined: bool, data: Option<T>) -> Self {
        Self {
            is_loading: initial_url_defined,
            is_success: false,
            is_error: false,
            data,
        }
    }

    /// The reducer.
    pub fn apply(self, action: RequestAction<T>) -> Self {
        match action {
            RequestAction::Init => Self {
                is_loading: true,
                is_success: false,
                is_error: false,
                ..self
            },
            RequestAction::Success(data) => Self {
                is_loading: false,
                is_success: true,
                is_error: false,
                data: Some(data),
            },
            RequestAction::Failure => Self {
                is_loading: false,
                is_success: false,
                is_error: true,
                ..self
            },
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.is_success {
            Phase::Success
        } else if self.is_error {
            Phase::Error
        } else {
            Phase::Idle
        }
    }
}

impl<T> Default for HookState<T> {
    fn default() -> Self {
        Self::new(false, None)
    }
}

#[cfg(feature = "yew")]
impl<T: Clone + 'static> yew::Reducible for HookState<T> {
    type Action = RequestAction<T>;

    fn reduce(
        self: std::rc::Rc<Self>,
        action: Self::Action,
    ) -> std::rc::Rc<Self> {
        std::rc::Rc::new(std::rc::Rc::unwrap_or_clone(self).apply(action))
    }
}
