//! The award table: which actions earn points, and how many

/// Actions that earn experience points
///
/// The table is the authoritative mapping from action to base points;
/// multipliers are applied by the awarder, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XpAction {
    /// Commenting on a project
    Comment,
    /// Voting on a project
    Vote,
    /// Submitting a project
    ProjectSubmit,
    /// Joining a team
    TeamJoin,
    /// Receiving mentor feedback
    MentorFeedback,
}

impl XpAction {
    /// Base points awarded for this action
    pub fn points(self) -> i64 {
        match self {
            XpAction::Comment => 5,
            XpAction::Vote => 2,
            XpAction::ProjectSubmit => 50,
            XpAction::TeamJoin => 10,
            XpAction::MentorFeedback => 25,
        }
    }

    /// Human-readable label shown in the award notification
    pub fn description(self) -> &'static str {
        match self {
            XpAction::Comment => "Commented on a project",
            XpAction::Vote => "Voted on a project",
            XpAction::ProjectSubmit => "Submitted a project",
            XpAction::TeamJoin => "Joined a team",
            XpAction::MentorFeedback => "Received mentor feedback",
        }
    }
}
