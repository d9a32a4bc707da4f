use std::fmt::Display;

/// 探索を始める前に検出できる設定の誤り
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// 参加者が 1 人もいない
    NoParticipants,
    /// 同じ参加者が 2 回指定された
    DuplicateParticipant(String),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoParticipants => write!(f, "No participants specified."),
            Self::DuplicateParticipant(name) => {
                write!(f, "Participant \"{name}\" is specified more than once.")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// 制約をすべて満たす割り当てが存在しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibleAssignmentError {
    pub participant_count: usize,
}

impl Display for InfeasibleAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "No valid assignment exists for {} participants under the given constraints.",
            self.participant_count
        )
    }
}

impl std::error::Error for InfeasibleAssignmentError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    Configuration(ConfigurationError),
    Infeasible(InfeasibleAssignmentError),
}

impl Display for AssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "Configuration error: {e}"),
            Self::Infeasible(e) => write!(f, "Infeasible assignment: {e}"),
        }
    }
}

impl std::error::Error for AssignmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Infeasible(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for AssignmentError {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<InfeasibleAssignmentError> for AssignmentError {
    fn from(e: InfeasibleAssignmentError) -> Self {
        Self::Infeasible(e)
    }
}
