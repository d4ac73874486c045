use std::fmt;

/// A change the model reports to its listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// A question's rendered title changed.
    TitleChanged {
        /// Question name.
        question: String,
        /// The newly rendered title.
        title:    String,
    },
    /// A question was shown or hidden.
    VisibilityChanged {
        /// Question name.
        question: String,
        /// The new visibility.
        visible:  bool,
    },
}

impl ModelEvent {
    /// Name of the question the event is about.
    #[must_use]
    pub fn question(&self) -> &str {
        match self {
            Self::TitleChanged { question, .. } | Self::VisibilityChanged { question, .. } => question,
        }
    }
}

impl fmt::Display for ModelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleChanged { question, title } => write!(f, "{question}: title -> \"{title}\""),
            Self::VisibilityChanged { question, visible: true } => write!(f, "{question}: shown"),
            Self::VisibilityChanged { question, visible: false } => write!(f, "{question}: hidden"),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// A boxed listener.
pub type Listener = Box<dyn FnMut(&ModelEvent)>;
